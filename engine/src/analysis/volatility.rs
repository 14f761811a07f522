// Volatility regime: where the current ATR sits in its own recent history
use crate::indicators::{Atr, IndicatorCalculator, DEFAULT_ATR_PERIOD};
use shared::models::Candle;

/// Below this many candles the percentile is reported as neutral.
pub const MIN_PERCENTILE_HISTORY: usize = 50;
/// First prefix length sampled for the historical ATR distribution.
pub const PERCENTILE_WARMUP: usize = 20;
pub const NEUTRAL_PERCENTILE: f64 = 50.0;

/// Empirical-CDF rank (0-100) of `current_atr` among the ATRs of every
/// prefix `candles[..i]` for `i` in `20..len`. Zero samples are skipped.
///
/// The prefix ATRs come from one pass of the `Atr` indicator, which averages
/// each 14-range window from scratch, so the cost is O(n * period).
pub fn volatility_percentile(current_atr: f64, candles: &[Candle]) -> f64 {
    if candles.len() < MIN_PERCENTILE_HISTORY {
        return NEUTRAL_PERCENTILE;
    }

    // rolling[i - 1] is the ATR of the prefix candles[..i]
    let rolling = Atr::new(DEFAULT_ATR_PERIOD).calculate(candles);
    let history: Vec<f64> = (PERCENTILE_WARMUP..candles.len())
        .filter_map(|i| rolling[i - 1])
        .filter(|atr| *atr != 0.0)
        .collect();

    percentile_rank(current_atr, &history)
}

/// Share of `samples` at or below `value`, scaled to 0-100.
pub fn percentile_rank(value: f64, samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return NEUTRAL_PERCENTILE;
    }
    let at_or_below = samples.iter().filter(|&&s| s <= value).count();
    at_or_below as f64 / samples.len() as f64 * 100.0
}

pub fn volatility_multiplier(percentile: f64) -> f64 {
    if percentile > 80.0 {
        1.2
    } else if percentile > 60.0 {
        1.1
    } else if percentile < 30.0 {
        0.85
    } else {
        1.0
    }
}
