//! Adaptive risk:reward target optimizer.
//!
//! Re-targets a detected signal by blending four independent factors into one
//! multiplier:
//!
//! 1. **Volatility regime**: percentile of the current ATR in its own history.
//! 2. **Timeframe horizon**: fixed multiplier and R:R band per timeframe.
//! 3. **Trend alignment**: EMA(10)/EMA(20) trend, extended or tightened by
//!    whether the signal trades with it.
//! 4. **Signal quality**: bracketed 0-100 quality score.
//!
//! The blended ratio is clamped to the timeframe's band, the target price is
//! recomputed from the original risk, and a 0-100 confidence score is
//! attached. Nothing here fails: short histories and zero risk fall back to
//! neutral defaults so a trading workflow is never blocked.

pub mod quality;
pub mod scoring;
pub mod timeframe;

use crate::analysis::{analyze_trend_for_signal, volatility_multiplier, volatility_percentile};
use crate::indicators::{average_true_range, DEFAULT_ATR_PERIOD};
use quality::quality_multiplier;
use shared::models::{Candle, Direction, MarketAnalysis, OptimizationResult, Signal, TrendAnalysis};
use timeframe::TimeframeProfile;

/// Minimum candles before any factor is measured.
pub const MIN_HISTORY: usize = 20;
/// Ratio used when risk is zero or history is too short.
pub const DEFAULT_RR: f64 = 2.0;

/// Weights are held in basis points so their sum can be checked exactly at
/// compile time.
pub const WEIGHT_SCALE: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorWeights {
    pub volatility: u32,
    pub timeframe: u32,
    pub trend: u32,
    pub quality: u32,
}

pub const FACTOR_WEIGHTS: FactorWeights = FactorWeights {
    volatility: 2_500,
    timeframe: 2_500,
    trend: 3_000,
    quality: 2_000,
};

const _: () = assert!(
    FACTOR_WEIGHTS.total() == WEIGHT_SCALE,
    "factor weights must sum to 1.0"
);

impl FactorWeights {
    pub const fn total(&self) -> u32 {
        self.volatility + self.timeframe + self.trend + self.quality
    }

    pub fn fraction(basis_points: u32) -> f64 {
        basis_points as f64 / WEIGHT_SCALE as f64
    }

    pub fn combine(&self, volatility: f64, timeframe: f64, trend: f64, quality: f64) -> f64 {
        Self::fraction(self.volatility) * volatility
            + Self::fraction(self.timeframe) * timeframe
            + Self::fraction(self.trend) * trend
            + Self::fraction(self.quality) * quality
    }
}

/// Risk and reward distances of the naive setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskReward {
    pub risk: f64,
    pub reward: f64,
    pub ratio: f64,
}

impl RiskReward {
    /// A missing target counts as zero reward.
    pub fn of(signal: &Signal) -> Self {
        let risk = (signal.entry - signal.stop_loss).abs();
        let reward = signal.target.map_or(0.0, |target| (target - signal.entry).abs());
        let ratio = if risk > 0.0 { reward / risk } else { DEFAULT_RR };
        RiskReward { risk, reward, ratio }
    }
}

/// Every measured factor behind one optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorBreakdown {
    pub atr: f64,
    pub atr_percent: f64,
    pub volatility_percentile: f64,
    pub volatility_multiplier: f64,
    pub profile: TimeframeProfile,
    /// Already adjusted for the signal's direction.
    pub trend: TrendAnalysis,
    pub quality_score: f64,
    pub quality_multiplier: f64,
}

impl FactorBreakdown {
    pub fn measure(signal: &Signal, candles: &[Candle], timeframe_code: &str, quality_score: f64) -> Self {
        let atr = average_true_range(candles, DEFAULT_ATR_PERIOD);
        let price = candles.last().map_or(0.0, |c| c.close);
        let atr_percent = if price != 0.0 { atr / price * 100.0 } else { 0.0 };
        let percentile = volatility_percentile(atr, candles);

        FactorBreakdown {
            atr,
            atr_percent,
            volatility_percentile: percentile,
            volatility_multiplier: volatility_multiplier(percentile),
            profile: TimeframeProfile::resolve(timeframe_code),
            trend: analyze_trend_for_signal(candles, signal.direction),
            quality_score,
            quality_multiplier: quality_multiplier(quality_score),
        }
    }

    pub fn combined_multiplier(&self) -> f64 {
        FACTOR_WEIGHTS.combine(
            self.volatility_multiplier,
            self.profile.multiplier,
            self.trend.multiplier,
            self.quality_multiplier,
        )
    }

    fn analysis(&self) -> MarketAnalysis {
        MarketAnalysis {
            atr: self.atr,
            atr_percent: self.atr_percent,
            volatility_percentile: self.volatility_percentile,
            trend_direction: self.trend.direction,
            trend_strength: self.trend.strength,
            timeframe_label: self.profile.label.to_string(),
        }
    }
}

/// Recomputes the target and R:R of `signal` from its price history.
pub fn optimize_target(
    signal: &Signal,
    candles: &[Candle],
    timeframe_code: &str,
    quality_score: f64,
) -> OptimizationResult {
    if candles.len() < MIN_HISTORY {
        tracing::debug!(
            candles = candles.len(),
            required = MIN_HISTORY,
            "Not enough history to optimize target, returning default"
        );
        return insufficient_history_result(signal);
    }

    let factors = FactorBreakdown::measure(signal, candles, timeframe_code, quality_score);
    apply_factors(signal, &factors)
}

/// Turns measured factors into the final result.
pub fn apply_factors(signal: &Signal, factors: &FactorBreakdown) -> OptimizationResult {
    let setup = RiskReward::of(signal);
    let combined = factors.combined_multiplier();
    let optimized_rr = factors.profile.clamp_rr(setup.ratio * combined);

    let optimized_reward = setup.risk * optimized_rr;
    let optimized_target = match signal.direction {
        Direction::Long => signal.entry + optimized_reward,
        Direction::Short => signal.entry - optimized_reward,
    };

    let with_trend = factors.trend.direction.agrees_with(signal.direction);
    let rr_score = scoring::rr_score(optimized_rr, setup.ratio, with_trend, factors.volatility_percentile);

    tracing::debug!(
        volatility = factors.volatility_multiplier,
        timeframe = factors.profile.multiplier,
        trend = factors.trend.multiplier,
        quality = factors.quality_multiplier,
        combined,
        original_rr = setup.ratio,
        optimized_rr,
        rr_score,
        "Target optimized"
    );

    OptimizationResult {
        optimized_rr,
        original_rr: setup.ratio,
        rr_score,
        optimized_target,
        original_target: signal.target.unwrap_or(0.0),
        adjustments: scoring::collect_adjustments(factors),
        analysis: Some(factors.analysis()),
    }
}

pub fn insufficient_history_result(signal: &Signal) -> OptimizationResult {
    let target = signal.target.unwrap_or(0.0);
    OptimizationResult {
        optimized_rr: DEFAULT_RR,
        original_rr: DEFAULT_RR,
        rr_score: 0.0,
        optimized_target: target,
        original_target: target,
        adjustments: Vec::new(),
        analysis: None,
    }
}
