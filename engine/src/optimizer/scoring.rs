// Confidence score and adjustment list for an optimized target
use super::FactorBreakdown;
use shared::models::{Adjustment, AdjustmentFactor, Impact};

pub const MAX_SCORE: f64 = 100.0;
pub const MAX_IMPROVEMENT_BONUS: f64 = 15.0;
pub const WITH_TREND_BONUS: f64 = 10.0;
pub const SWEET_SPOT_BONUS: f64 = 5.0;
pub const SWEET_SPOT_LOW: f64 = 40.0;
pub const SWEET_SPOT_HIGH: f64 = 70.0;

pub fn rr_tier_points(optimized_rr: f64) -> f64 {
    if optimized_rr >= 3.0 {
        30.0
    } else if optimized_rr >= 2.5 {
        25.0
    } else if optimized_rr >= 2.0 {
        20.0
    } else if optimized_rr >= 1.5 {
        10.0
    } else {
        0.0
    }
}

/// Ten points per unit of R:R gained, at most 15, never negative.
pub fn improvement_bonus(optimized_rr: f64, original_rr: f64) -> f64 {
    let bonus = ((optimized_rr - original_rr) * 10.0).min(MAX_IMPROVEMENT_BONUS);
    if bonus > 0.0 {
        bonus
    } else {
        0.0
    }
}

pub fn in_volatility_sweet_spot(percentile: f64) -> bool {
    (SWEET_SPOT_LOW..=SWEET_SPOT_HIGH).contains(&percentile)
}

/// Terms are summed unclamped; only the total is capped.
pub fn rr_score(optimized_rr: f64, original_rr: f64, with_trend: bool, volatility_percentile: f64) -> f64 {
    let mut score = rr_tier_points(optimized_rr) + improvement_bonus(optimized_rr, original_rr);
    if with_trend {
        score += WITH_TREND_BONUS;
    }
    if in_volatility_sweet_spot(volatility_percentile) {
        score += SWEET_SPOT_BONUS;
    }
    score.min(MAX_SCORE)
}

/// One entry per factor whose multiplier moved the target. The timeframe
/// multiplier is a fixed horizon setting and is not reported.
pub fn collect_adjustments(factors: &FactorBreakdown) -> Vec<Adjustment> {
    let mut adjustments = Vec::new();

    if factors.volatility_multiplier != 1.0 {
        adjustments.push(Adjustment {
            factor: AdjustmentFactor::Volatility,
            value: format!("{} percentile", ordinal(factors.volatility_percentile.round() as u32)),
            impact: Impact::for_multiplier(factors.volatility_multiplier),
        });
    }
    if factors.trend.multiplier != 1.0 {
        adjustments.push(Adjustment {
            factor: AdjustmentFactor::Trend,
            value: format!("{} ({:.0}% strength)", factors.trend.direction, factors.trend.strength),
            impact: Impact::for_multiplier(factors.trend.multiplier),
        });
    }
    if factors.quality_multiplier != 1.0 {
        adjustments.push(Adjustment {
            factor: AdjustmentFactor::Quality,
            value: format!("Score {:.0}", factors.quality_score),
            impact: Impact::for_multiplier(factors.quality_multiplier),
        });
    }
    adjustments
}

/// 1st, 2nd, 3rd, 4th, ... with 11th-13th as exceptions.
fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
