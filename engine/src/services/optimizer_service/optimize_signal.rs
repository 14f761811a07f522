// Handler for optimizing one signal against its stored history
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::EngineSettings;
use crate::data::market_data::MarketDataStore;
use crate::optimizer::{optimize_target, MIN_HISTORY};
use crate::services::{OptimizeRequest, OptimizeResponse};
use shared::utils::format_risk_reward;

pub async fn handle_optimize_signal(
    req_payload: OptimizeRequest,
    market_data_store: Arc<RwLock<MarketDataStore>>,
    settings: Arc<EngineSettings>,
) -> OptimizeResponse {
    let evaluation_id = Uuid::new_v4();
    let timeframe = super::resolve_timeframe(&req_payload.timeframe, &settings);

    let store = market_data_store.read().await;
    let candles = store.latest(&req_payload.symbol, timeframe, settings.max_history);
    drop(store);

    if candles.len() < MIN_HISTORY {
        tracing::warn!(
            %evaluation_id,
            symbol = %req_payload.symbol,
            %timeframe,
            candles = candles.len(),
            "Too little history for symbol, target left unadjusted"
        );
    }

    let result = optimize_target(&req_payload.signal, &candles, timeframe.code(), req_payload.quality_score);

    tracing::info!(
        %evaluation_id,
        symbol = %req_payload.symbol,
        %timeframe,
        direction = %req_payload.signal.direction,
        original = %format_risk_reward(result.original_rr),
        optimized = %format_risk_reward(result.optimized_rr),
        target = result.optimized_target,
        score = result.rr_score,
        "Signal optimized"
    );

    OptimizeResponse {
        evaluation_id,
        symbol: req_payload.symbol,
        timeframe,
        candles_used: candles.len(),
        result,
    }
}
