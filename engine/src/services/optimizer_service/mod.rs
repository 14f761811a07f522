// engine/src/services/optimizer_service/mod.rs
// OptimizerService owns the candle store and dispatches each operation to
// its handler module.

use crate::config::EngineSettings;
use crate::data::market_data::MarketDataStore;
use crate::error::EngineError;
use crate::services::{LoadCandlesRequest, LoadCandlesResponse, OptimizeRequest, OptimizeResponse};
use shared::models::{Candle, TimeFrame};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinSet;

pub mod load_candles;
pub mod optimize_signal;

pub struct OptimizerService {
    market_data_store: Arc<RwLock<MarketDataStore>>,
    settings: Arc<EngineSettings>,
}

impl OptimizerService {
    pub fn new(market_data_store: Arc<RwLock<MarketDataStore>>, settings: EngineSettings) -> Self {
        OptimizerService {
            market_data_store,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub async fn load_candles(&self, request: LoadCandlesRequest) -> Result<LoadCandlesResponse, EngineError> {
        tracing::info!(
            symbol = %request.symbol,
            path = %request.file_path.display(),
            "Received LoadCandlesRequest, dispatching to handler."
        );
        load_candles::handle_load_candles(request, self.market_data_store.clone(), self.settings.clone()).await
    }

    /// Stores candles that arrived from an in-process collaborator.
    pub async fn ingest_candles(&self, symbol: &str, timeframe: &str, candles: Vec<Candle>) -> usize {
        let timeframe = resolve_timeframe(timeframe, &self.settings);
        load_candles::ingest(&self.market_data_store, symbol, timeframe, candles).await
    }

    pub async fn optimize_signal(&self, request: OptimizeRequest) -> OptimizeResponse {
        tracing::debug!(
            symbol = %request.symbol,
            timeframe = %request.timeframe,
            quality_score = request.quality_score,
            "Received OptimizeRequest, dispatching to handler."
        );
        optimize_signal::handle_optimize_signal(request, self.market_data_store.clone(), self.settings.clone()).await
    }

    /// Evaluates independent signals concurrently. Responses keep request order.
    pub async fn optimize_batch(&self, requests: Vec<OptimizeRequest>) -> Result<Vec<OptimizeResponse>, EngineError> {
        let total = requests.len();
        let mut tasks = JoinSet::new();
        for (idx, request) in requests.into_iter().enumerate() {
            let store = self.market_data_store.clone();
            let settings = self.settings.clone();
            tasks.spawn(async move { (idx, optimize_signal::handle_optimize_signal(request, store, settings).await) });
        }

        let mut responses = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            responses.push(joined?);
        }
        responses.sort_by_key(|(idx, _)| *idx);

        tracing::info!(signals = total, "Batch optimization finished");
        Ok(responses.into_iter().map(|(_, response)| response).collect())
    }
}

/// Empty codes take the configured default; unknown codes fall back to 15m.
fn resolve_timeframe(code: &str, settings: &EngineSettings) -> TimeFrame {
    if code.trim().is_empty() {
        TimeFrame::from_code(&settings.default_timeframe)
    } else {
        TimeFrame::from_code(code)
    }
}
