use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    #[serde(default)]
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub trades: u32,
}

/// Chart timeframe a signal was detected on.
///
/// Codes outside the known set resolve to `Minute15`, so a typo from an
/// upstream collaborator never blocks an evaluation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeFrame {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "1d")]
    Day1,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 6] = [
        TimeFrame::Minute1,
        TimeFrame::Minute5,
        TimeFrame::Minute15,
        TimeFrame::Hour1,
        TimeFrame::Hour4,
        TimeFrame::Day1,
    ];

    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "1m" => TimeFrame::Minute1,
            "5m" => TimeFrame::Minute5,
            "15m" => TimeFrame::Minute15,
            "1h" => TimeFrame::Hour1,
            "4h" => TimeFrame::Hour4,
            "1d" => TimeFrame::Day1,
            _ => TimeFrame::Minute15,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TimeFrame::Minute1 => "1m",
            TimeFrame::Minute5 => "5m",
            TimeFrame::Minute15 => "15m",
            TimeFrame::Hour1 => "1h",
            TimeFrame::Hour4 => "4h",
            TimeFrame::Day1 => "1d",
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LONG" | "BUY" => Ok(Direction::Long),
            "SHORT" | "SELL" => Ok(Direction::Short),
            other => Err(format!("unknown trade direction '{}', use LONG or SHORT", other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => f.write_str("LONG"),
            Direction::Short => f.write_str("SHORT"),
        }
    }
}

/// The naive trade setup produced by pattern detection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub entry: f64,
    pub stop_loss: f64,
    #[serde(default)]
    pub target: Option<f64>,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendDirection {
    Bullish,
    Bearish,
    Neutral,
}

impl TrendDirection {
    /// True when a trade in `direction` goes with this trend.
    pub fn agrees_with(&self, direction: Direction) -> bool {
        matches!(
            (self, direction),
            (TrendDirection::Bullish, Direction::Long) | (TrendDirection::Bearish, Direction::Short)
        )
    }

    /// True when a trade in `direction` fights this trend. Neutral opposes nothing.
    pub fn opposes(&self, direction: Direction) -> bool {
        matches!(
            (self, direction),
            (TrendDirection::Bearish, Direction::Long) | (TrendDirection::Bullish, Direction::Short)
        )
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Bullish => f.write_str("BULLISH"),
            TrendDirection::Bearish => f.write_str("BEARISH"),
            TrendDirection::Neutral => f.write_str("NEUTRAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrendAnalysis {
    pub strength: f64,
    pub direction: TrendDirection,
    pub multiplier: f64,
}

impl TrendAnalysis {
    pub fn neutral() -> Self {
        TrendAnalysis {
            strength: 50.0,
            direction: TrendDirection::Neutral,
            multiplier: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AdjustmentFactor {
    Volatility,
    Trend,
    Quality,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Impact {
    Extended,
    Tightened,
}

impl Impact {
    pub fn for_multiplier(multiplier: f64) -> Self {
        if multiplier > 1.0 {
            Impact::Extended
        } else {
            Impact::Tightened
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Adjustment {
    pub factor: AdjustmentFactor,
    pub value: String,
    pub impact: Impact,
}

/// Diagnostic breakdown for display. Not meant to feed further computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub atr: f64,
    pub atr_percent: f64,
    pub volatility_percentile: f64,
    pub trend_direction: TrendDirection,
    pub trend_strength: f64,
    pub timeframe_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimizationResult {
    #[serde(rename = "optimizedRR")]
    pub optimized_rr: f64,
    #[serde(rename = "originalRR")]
    pub original_rr: f64,
    #[serde(rename = "rrScore")]
    pub rr_score: f64,
    #[serde(rename = "optimizedTarget")]
    pub optimized_target: f64,
    #[serde(rename = "originalTarget")]
    pub original_target: f64,
    pub adjustments: Vec<Adjustment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<MarketAnalysis>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_codes_round_trip_and_fallback() {
        for tf in TimeFrame::ALL {
            assert_eq!(TimeFrame::from_code(tf.code()), tf);
        }
        assert_eq!(TimeFrame::from_code("3h"), TimeFrame::Minute15);
        assert_eq!(TimeFrame::from_code(""), TimeFrame::Minute15);
        assert_eq!(TimeFrame::from_code(" 4h "), TimeFrame::Hour4);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("long".parse::<Direction>().unwrap(), Direction::Long);
        assert_eq!("SHORT".parse::<Direction>().unwrap(), Direction::Short);
        assert_eq!("Buy".parse::<Direction>().unwrap(), Direction::Long);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_trend_alignment() {
        assert!(TrendDirection::Bullish.agrees_with(Direction::Long));
        assert!(TrendDirection::Bearish.agrees_with(Direction::Short));
        assert!(TrendDirection::Bullish.opposes(Direction::Short));
        assert!(TrendDirection::Bearish.opposes(Direction::Long));
        assert!(!TrendDirection::Neutral.agrees_with(Direction::Long));
        assert!(!TrendDirection::Neutral.opposes(Direction::Short));
    }

    #[test]
    fn test_impact_labels() {
        assert_eq!(Impact::for_multiplier(1.2), Impact::Extended);
        assert_eq!(Impact::for_multiplier(0.85), Impact::Tightened);
    }

    #[test]
    fn test_result_serializes_with_contract_keys() {
        let result = OptimizationResult {
            optimized_rr: 2.5,
            original_rr: 2.0,
            rr_score: 30.0,
            optimized_target: 112.5,
            original_target: 110.0,
            adjustments: vec![Adjustment {
                factor: AdjustmentFactor::Trend,
                value: "BULLISH (80% strength)".to_string(),
                impact: Impact::Extended,
            }],
            analysis: Some(MarketAnalysis {
                atr: 1.5,
                atr_percent: 1.5,
                volatility_percentile: 55.0,
                trend_direction: TrendDirection::Bullish,
                trend_strength: 80.0,
                timeframe_label: "1 Hour".to_string(),
            }),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["optimizedRR"], 2.5);
        assert_eq!(json["originalRR"], 2.0);
        assert_eq!(json["rrScore"], 30.0);
        assert_eq!(json["adjustments"][0]["factor"], "Trend");
        assert_eq!(json["adjustments"][0]["impact"], "Extended");
        assert_eq!(json["analysis"]["atrPercent"], 1.5);
        assert_eq!(json["analysis"]["trendDirection"], "BULLISH");
        assert_eq!(json["analysis"]["timeframeLabel"], "1 Hour");
    }

    #[test]
    fn test_signal_deserializes_without_target() {
        let signal: Signal =
            serde_json::from_str(r#"{"entry":100.0,"stopLoss":95.0,"direction":"SHORT"}"#).unwrap();
        assert_eq!(signal.target, None);
        assert_eq!(signal.direction, Direction::Short);
        assert_eq!(signal.stop_loss, 95.0);
    }
}
