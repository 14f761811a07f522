// Market-regime analyzers feeding the target optimizer
pub mod trend;
pub mod volatility;

pub use trend::{align_with_signal, analyze_trend, analyze_trend_for_signal};
pub use volatility::{volatility_multiplier, volatility_percentile};
