// Trend direction and strength from a fast/slow EMA pair
use crate::indicators::{latest_value, Ema};
use shared::models::{Candle, Direction, TrendAnalysis, TrendDirection};

pub const FAST_EMA_PERIOD: usize = 10;
pub const SLOW_EMA_PERIOD: usize = 20;
pub const MIN_TREND_HISTORY: usize = 20;

pub const WITH_TREND_FACTOR: f64 = 1.1;
pub const COUNTER_TREND_FACTOR: f64 = 0.85;

/// Direction and strength of the trend in `candles`, before any alignment
/// with a signal. Fewer than 20 candles yields the neutral default.
pub fn analyze_trend(candles: &[Candle]) -> TrendAnalysis {
    if candles.len() < MIN_TREND_HISTORY {
        return TrendAnalysis::neutral();
    }

    let fast = latest_value(&Ema::new(FAST_EMA_PERIOD), candles);
    let slow = latest_value(&Ema::new(SLOW_EMA_PERIOD), candles);
    let (fast, slow, price) = match (fast, slow, candles.last()) {
        (Some(fast), Some(slow), Some(last)) => (fast, slow, last.close),
        _ => return TrendAnalysis::neutral(),
    };

    let direction = trend_direction(fast, slow, price);
    let strength = trend_strength(fast, slow, price);
    TrendAnalysis {
        strength,
        direction,
        multiplier: strength_multiplier(strength),
    }
}

/// Trend analysis with the multiplier adjusted for the signal's direction.
pub fn analyze_trend_for_signal(candles: &[Candle], direction: Direction) -> TrendAnalysis {
    align_with_signal(analyze_trend(candles), direction)
}

pub fn trend_direction(fast: f64, slow: f64, price: f64) -> TrendDirection {
    if fast > slow && price > fast {
        TrendDirection::Bullish
    } else if fast < slow && price < fast {
        TrendDirection::Bearish
    } else {
        TrendDirection::Neutral
    }
}

/// EMA spread plus price distance from the fast EMA, both as fractions,
/// scaled by 1000 and capped at 100.
pub fn trend_strength(fast: f64, slow: f64, price: f64) -> f64 {
    let spread = relative_gap(fast, slow);
    let extension = relative_gap(price, fast);
    ((spread + extension) * 1000.0).min(100.0)
}

// Zero base only happens on all-zero prices
fn relative_gap(value: f64, base: f64) -> f64 {
    if base == 0.0 {
        return 0.0;
    }
    (value - base).abs() / base
}

pub fn strength_multiplier(strength: f64) -> f64 {
    if strength > 70.0 {
        1.2
    } else if strength > 50.0 {
        1.1
    } else if strength < 30.0 {
        0.9
    } else {
        1.0
    }
}

/// Extends targets that ride the trend and tightens those that fight it.
pub fn align_with_signal(trend: TrendAnalysis, direction: Direction) -> TrendAnalysis {
    let factor = if trend.direction.opposes(direction) {
        COUNTER_TREND_FACTOR
    } else if trend.direction.agrees_with(direction) {
        WITH_TREND_FACTOR
    } else {
        1.0
    };
    TrendAnalysis {
        multiplier: trend.multiplier * factor,
        ..trend
    }
}
