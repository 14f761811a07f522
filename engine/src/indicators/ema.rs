// Exponential Moving Average (EMA) indicator implementation
use super::IndicatorCalculator;
use serde_json::Value;
use shared::models::Candle;

/// EMA over a raw price slice.
///
/// Seeded with the simple mean of the first `period` prices, then
/// `price * k + prev * (1 - k)` with `k = 2 / (period + 1)`. The output has
/// `prices.len() - period + 1` values; it is empty when there are fewer
/// prices than `period`.
pub fn ema_series(prices: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || prices.len() < period {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let seed = prices[..period].iter().sum::<f64>() / period as f64;

    let mut values = Vec::with_capacity(prices.len() - period + 1);
    values.push(seed);
    let mut previous = seed;
    for &price in &prices[period..] {
        let ema = price * k + previous * (1.0 - k);
        values.push(ema);
        previous = ema;
    }
    values
}

pub struct Ema {
    name: String,
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("EMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = data.iter().map(|c| c.close).collect();
        let values = ema_series(&closes, self.period);
        if values.is_empty() {
            return vec![None; data.len()];
        }

        let mut results = vec![None; self.period - 1];
        results.extend(values.into_iter().map(Some));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{assert_close, series_from_closes};

    #[test]
    fn test_ema_series_seed_and_smoothing() {
        // SMA(10, 11, 12) = 11, k = 0.5
        // 13 * 0.5 + 11 * 0.5 = 12, 14 * 0.5 + 12 * 0.5 = 13
        let values = ema_series(&[10.0, 11.0, 12.0, 13.0, 14.0], 3);
        assert_eq!(values, vec![11.0, 12.0, 13.0]);
    }

    #[test]
    fn test_ema_series_insufficient_data() {
        assert!(ema_series(&[1.0, 2.0], 3).is_empty());
        assert!(ema_series(&[], 1).is_empty());
        assert!(ema_series(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn test_ema_series_exact_period_is_simple_mean() {
        let values = ema_series(&[2.0, 4.0, 6.0, 8.0], 4);
        assert_eq!(values, vec![5.0]);
    }

    #[test]
    fn test_ema_indicator_alignment() {
        let candles = series_from_closes(&[10.0, 11.0, 12.0, 13.0, 14.0], 0.0);
        let results = Ema::new(3).calculate(&candles);
        assert_eq!(results.len(), 5);
        assert_eq!(results[0], None);
        assert_eq!(results[1], None);
        assert_eq!(results[2], Some(11.0));
        assert_eq!(results[4], Some(13.0));
    }

    #[test]
    fn test_ema_lags_linear_trend_by_half_window() {
        // A linear series keeps the SMA seed's (period - 1) / 2 lag forever.
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let values = ema_series(&closes, 10);
        assert_close(*values.last().unwrap(), 139.0 - 4.5);
    }

    #[test]
    fn test_ema_indicator_metadata() {
        let ema = Ema::new(20);
        assert_eq!(ema.name(), "EMA(20)");
        assert_eq!(ema.parameters()["period"], 20);
        assert_eq!(ema.calculate(&[]), Vec::<Option<f64>>::new());
    }
}
