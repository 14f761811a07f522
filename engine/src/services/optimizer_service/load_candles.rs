// Handler for loading a CSV candle history into the store
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::EngineSettings;
use crate::data::csv_parser::CandleCsvParser;
use crate::data::market_data::MarketDataStore;
use crate::error::EngineError;
use crate::services::{LoadCandlesRequest, LoadCandlesResponse};
use shared::models::TimeFrame;

pub async fn handle_load_candles(
    req_payload: LoadCandlesRequest,
    market_data_store: Arc<RwLock<MarketDataStore>>,
    settings: Arc<EngineSettings>,
) -> Result<LoadCandlesResponse, EngineError> {
    let timeframe = super::resolve_timeframe(&req_payload.timeframe, &settings);

    // File parsing is blocking work; keep it off the async workers
    let path = req_payload.file_path.clone();
    let symbol = req_payload.symbol.clone();
    let delimiter = settings.csv_delimiter_byte();
    let candles = tokio::task::spawn_blocking(move || {
        CandleCsvParser::load_candles_from_csv(&path, &symbol, delimiter)
    })
    .await??;

    let candles_loaded = candles.len();
    let series_length = ingest(&market_data_store, &req_payload.symbol, timeframe, candles).await;

    tracing::info!(
        symbol = %req_payload.symbol,
        %timeframe,
        candles_loaded,
        series_length,
        "Candle history loaded"
    );

    Ok(LoadCandlesResponse {
        success: true,
        message: format!("Loaded {} candles for symbol {}", candles_loaded, req_payload.symbol),
        candles_loaded,
        series_length,
    })
}

pub async fn ingest(
    market_data_store: &Arc<RwLock<MarketDataStore>>,
    symbol: &str,
    timeframe: TimeFrame,
    candles: Vec<shared::models::Candle>,
) -> usize {
    let mut store = market_data_store.write().await;
    store.add_candles(symbol, timeframe, candles)
}
