// Engine library root
// Adaptive risk:reward target optimizer plus the thin service layer that
// feeds it stored candle histories.

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod optimizer;
pub mod services;

pub use error::EngineError;
pub use optimizer::optimize_target;
