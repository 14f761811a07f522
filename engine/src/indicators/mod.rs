// Technical indicators consumed by the optimizer's analyzers
pub mod atr;
pub mod ema;

pub use atr::{average_true_range, true_ranges, Atr, DEFAULT_ATR_PERIOD};
pub use ema::{ema_series, Ema};

use serde_json::Value;
use shared::models::Candle;

// Common trait for all indicators
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>>; // One entry per candle, None during warm-up
}

/// Latest defined value of an indicator series.
pub fn latest_value(indicator: &dyn IndicatorCalculator, data: &[Candle]) -> Option<f64> {
    let value = indicator.calculate(data).last().copied().flatten();
    tracing::trace!(
        indicator = indicator.name(),
        parameters = %indicator.parameters(),
        ?value,
        "latest indicator value"
    );
    value
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, TimeZone, Utc};
    use shared::models::Candle;

    pub fn candle(index: usize, open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            symbol: "TEST".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(index as i64),
            open,
            high,
            low,
            close,
            volume: 0.0,
            trades: 0,
        }
    }

    /// Candles with `high = close + half_range` and `low = close - half_range`.
    pub fn series_from_closes(closes: &[f64], half_range: f64) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| candle(i, c, c + half_range, c - half_range, c))
            .collect()
    }

    /// Linear trend `start + slope * i`, one unit high/low band.
    pub fn linear_series(len: usize, start: f64, slope: f64) -> Vec<Candle> {
        let closes: Vec<f64> = (0..len).map(|i| start + slope * i as f64).collect();
        series_from_closes(&closes, 1.0)
    }

    pub fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {} but got {}",
            expected,
            actual
        );
    }
}
