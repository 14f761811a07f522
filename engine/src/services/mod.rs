// Request/response messages for the optimizer service
pub mod optimizer_service;

pub use optimizer_service::OptimizerService;

use serde::{Deserialize, Serialize};
use shared::models::{OptimizationResult, Signal, TimeFrame};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadCandlesRequest {
    pub file_path: PathBuf,
    pub symbol: String,
    /// Timeframe code; empty uses the configured default.
    #[serde(default)]
    pub timeframe: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadCandlesResponse {
    pub success: bool,
    pub message: String,
    pub candles_loaded: usize,
    pub series_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub symbol: String,
    #[serde(default)]
    pub timeframe: String,
    pub signal: Signal,
    pub quality_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub evaluation_id: Uuid,
    pub symbol: String,
    pub timeframe: TimeFrame,
    pub candles_used: usize,
    pub result: OptimizationResult,
}
