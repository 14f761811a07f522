//! CLI driver for the risk:reward target optimizer.
//!
//! Subcommands:
//!   - `optimize`: re-target one signal against a CSV candle history
//!   - `batch`:    re-target a JSON list of signals against the same history

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rr_engine::config::EngineSettings;
use rr_engine::data::market_data::MarketDataStore;
use rr_engine::services::{LoadCandlesRequest, OptimizeRequest, OptimizerService};
use shared::models::{Direction, Signal};
use shared::utils::{format_risk_reward, round_to};

#[derive(Parser)]
#[command(
    name = "rr-engine",
    version,
    about = "Adaptive risk:reward target optimizer for detected trade signals"
)]
struct Cli {
    /// JSON settings file; defaults apply to missing keys
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize a single signal
    Optimize(OptimizeArgs),
    /// Optimize every signal in a JSON file
    Batch(BatchArgs),
}

#[derive(Args)]
struct HistoryArgs {
    /// CSV with timestamp,open,high,low,close[,volume,trades] columns
    #[arg(long)]
    candles: PathBuf,

    #[arg(long, default_value = "SIGNAL")]
    symbol: String,

    /// Timeframe code (1m, 5m, 15m, 1h, 4h, 1d)
    #[arg(long)]
    timeframe: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Args)]
struct OptimizeArgs {
    #[command(flatten)]
    history: HistoryArgs,

    #[arg(long)]
    entry: f64,

    #[arg(long)]
    stop_loss: f64,

    #[arg(long)]
    target: Option<f64>,

    /// LONG or SHORT
    #[arg(long)]
    direction: Direction,

    /// Signal quality score, 0-100
    #[arg(long, default_value_t = 60.0)]
    quality: f64,
}

#[derive(Args)]
struct BatchArgs {
    #[command(flatten)]
    history: HistoryArgs,

    /// JSON array of {"signal": {...}, "qualityScore": n}
    #[arg(long)]
    signals: PathBuf,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchEntry {
    signal: Signal,
    quality_score: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = EngineSettings::load(cli.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.config.as_deref() {
        Some(path) => debug!(path = %path.display(), ?settings, "Loaded engine settings"),
        None => debug!(?settings, "Using default engine settings"),
    }

    let service = OptimizerService::new(Arc::new(RwLock::new(MarketDataStore::new())), settings);

    match cli.command {
        Commands::Optimize(args) => run_optimize(&service, args).await,
        Commands::Batch(args) => run_batch(&service, args).await,
    }
}

async fn load_history(service: &OptimizerService, history: &HistoryArgs) -> Result<String> {
    let timeframe = history
        .timeframe
        .clone()
        .unwrap_or_else(|| service.settings().default_timeframe.clone());
    service
        .load_candles(LoadCandlesRequest {
            file_path: history.candles.clone(),
            symbol: history.symbol.clone(),
            timeframe: timeframe.clone(),
        })
        .await?;
    Ok(timeframe)
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

async fn run_optimize(service: &OptimizerService, args: OptimizeArgs) -> Result<()> {
    let timeframe = load_history(service, &args.history).await?;

    let response = service
        .optimize_signal(OptimizeRequest {
            symbol: args.history.symbol.clone(),
            timeframe,
            signal: Signal {
                entry: args.entry,
                stop_loss: args.stop_loss,
                target: args.target,
                direction: args.direction,
            },
            quality_score: args.quality,
        })
        .await;

    info!(
        "{} -> {} target {} score {}",
        format_risk_reward(response.result.original_rr),
        format_risk_reward(response.result.optimized_rr),
        round_to(response.result.optimized_target, 4),
        round_to(response.result.rr_score, 2)
    );
    print_json(&response, args.history.pretty)
}

async fn run_batch(service: &OptimizerService, args: BatchArgs) -> Result<()> {
    let timeframe = load_history(service, &args.history).await?;

    let raw = std::fs::read_to_string(&args.signals)
        .with_context(|| format!("Failed to read signals file '{}'", args.signals.display()))?;
    let entries: Vec<BatchEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid signals JSON in '{}'", args.signals.display()))?;

    let requests = entries
        .into_iter()
        .map(|entry| OptimizeRequest {
            symbol: args.history.symbol.clone(),
            timeframe: timeframe.clone(),
            signal: entry.signal,
            quality_score: entry.quality_score,
        })
        .collect();

    let responses = service.optimize_batch(requests).await?;
    print_json(&responses, args.history.pretty)
}
