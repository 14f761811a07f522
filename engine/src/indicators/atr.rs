// Average True Range (ATR) indicator implementation
use super::IndicatorCalculator;
use serde_json::Value;
use shared::models::Candle;

pub const DEFAULT_ATR_PERIOD: usize = 14;

/// True range of every candle after the first:
/// `max(high - low, |high - prev_close|, |low - prev_close|)`.
pub fn true_ranges(candles: &[Candle]) -> Vec<f64> {
    candles
        .windows(2)
        .map(|pair| {
            let (prev, cur) = (&pair[0], &pair[1]);
            (cur.high - cur.low)
                .max((cur.high - prev.close).abs())
                .max((cur.low - prev.close).abs())
        })
        .collect()
}

/// Arithmetic mean of the last `period` true ranges.
///
/// Returns 0.0 when fewer than `period + 1` candles are available; callers
/// read that as "not enough data" rather than an error.
pub fn average_true_range(candles: &[Candle], period: usize) -> f64 {
    if period == 0 || candles.len() < period + 1 {
        return 0.0;
    }
    let ranges = true_ranges(candles);
    window_mean(&ranges[ranges.len() - period..])
}

fn window_mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

/// Rolling simple-mean ATR.
///
/// The value at candle `j` equals `average_true_range(&data[..=j], period)`,
/// summed in the same order, so percentile ranks built on it match a
/// from-scratch recomputation bit for bit.
pub struct Atr {
    name: String,
    period: usize,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("ATR({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        if self.period == 0 || data.len() < self.period + 1 {
            return vec![None; data.len()];
        }

        // ranges[t] belongs to candle t + 1
        let ranges = true_ranges(data);
        let mut results = vec![None; self.period];
        for j in self.period..data.len() {
            results.push(Some(window_mean(&ranges[j - self.period..j])));
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{assert_close, candle, linear_series};

    #[test]
    fn test_true_range_uses_previous_close_gaps() {
        let candles = vec![
            candle(0, 10.0, 11.0, 9.0, 10.0),
            // Gap up: high - prev_close dominates
            candle(1, 14.0, 15.0, 13.5, 14.0),
            // Gap down: |low - prev_close| dominates
            candle(2, 10.0, 10.5, 9.0, 9.5),
            // Inside bar: high - low dominates
            candle(3, 9.5, 11.0, 8.0, 10.0),
        ];
        assert_eq!(true_ranges(&candles), vec![5.0, 5.0, 3.0]);
    }

    #[test]
    fn test_atr_is_mean_of_latest_window() {
        let candles = vec![
            candle(0, 10.0, 11.0, 9.0, 10.0),
            candle(1, 14.0, 15.0, 13.5, 14.0),
            candle(2, 10.0, 10.5, 9.0, 9.5),
            candle(3, 9.5, 11.0, 8.0, 10.0),
        ];
        assert_close(average_true_range(&candles, 2), 4.0);
        assert_close(average_true_range(&candles, 3), 13.0 / 3.0);
    }

    #[test]
    fn test_atr_insufficient_data_returns_zero() {
        let candles = linear_series(14, 100.0, 1.0);
        assert_eq!(average_true_range(&candles, DEFAULT_ATR_PERIOD), 0.0);
        assert_eq!(average_true_range(&candles, 0), 0.0);
        assert_eq!(average_true_range(&[], DEFAULT_ATR_PERIOD), 0.0);
    }

    #[test]
    fn test_atr_constant_range_series() {
        // Close steps by 2 with a 1-unit band: every TR is |high - prev_close| = 3
        let candles = linear_series(30, 100.0, 2.0);
        assert_eq!(average_true_range(&candles, DEFAULT_ATR_PERIOD), 3.0);
    }

    #[test]
    fn test_rolling_atr_matches_prefix_recomputation() {
        let candles: Vec<_> = (0..40)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.7).sin() * 5.0;
                let band = 0.5 + (i % 7) as f64 * 0.3;
                candle(i, close, close + band, close - band, close)
            })
            .collect();

        let rolling = Atr::new(DEFAULT_ATR_PERIOD).calculate(&candles);
        assert_eq!(rolling.len(), candles.len());
        for j in 0..candles.len() {
            let expected = average_true_range(&candles[..=j], DEFAULT_ATR_PERIOD);
            match rolling[j] {
                Some(value) => assert_eq!(value, expected, "mismatch at {}", j),
                None => assert_eq!(expected, 0.0, "missing value at {}", j),
            }
        }
        assert!(rolling[13].is_none());
        assert!(rolling[14].is_some());
    }
}
