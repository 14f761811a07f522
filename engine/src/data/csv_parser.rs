// Candle history loader for the optimizer's CSV inputs
use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use shared::models::Candle;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// Timestamp formats accepted besides RFC 3339 and epoch milliseconds
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Deserialize)]
struct CandleRow {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: Option<f64>,
    #[serde(default)]
    trades: Option<u32>,
    #[serde(default)]
    symbol: Option<String>,
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(millis) = raw.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| anyhow!("Epoch milliseconds out of range: {}", millis));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }
    Err(anyhow!("Unrecognized timestamp '{}'", raw))
}

pub struct CandleCsvParser;

impl CandleCsvParser {
    // CSV Header: timestamp,open,high,low,close[,volume][,trades][,symbol]
    // Example Row: 2024-03-01T14:00:00Z,100.5,101.2,99.8,100.9,1520.0,87
    pub fn load_candles_from_csv(file_path: &Path, default_symbol: &str, delimiter: u8) -> Result<Vec<Candle>> {
        let file = File::open(file_path)
            .with_context(|| format!("Failed to open CSV file '{}'", file_path.display()))?;
        Self::read_candles(BufReader::new(file), default_symbol, delimiter)
    }

    /// Parses, validates and sorts candles oldest first.
    pub fn read_candles<R: Read>(reader: R, default_symbol: &str, delimiter: u8) -> Result<Vec<Candle>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut candles = Vec::new();
        for (idx, result) in rdr.deserialize::<CandleRow>().enumerate() {
            let line = idx + 2;
            let row = result.with_context(|| format!("Error reading CSV record at line {}", line))?;

            let timestamp = parse_timestamp(&row.timestamp)
                .with_context(|| format!("Error parsing 'timestamp' at line {}", line))?;
            Self::validate_prices(&row, line)?;

            candles.push(Candle {
                symbol: row
                    .symbol
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| default_symbol.to_string()),
                timestamp,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume.unwrap_or(0.0),
                trades: row.trades.unwrap_or(0),
            });
        }

        candles.sort_by_key(|c| c.timestamp);
        tracing::debug!(count = candles.len(), symbol = default_symbol, "Parsed candles from CSV");
        Ok(candles)
    }

    fn validate_prices(row: &CandleRow, line: usize) -> Result<()> {
        let prices = [row.open, row.high, row.low, row.close];
        if prices.iter().any(|p| !p.is_finite()) {
            bail!("Non-finite price at line {}", line);
        }
        if row.high < row.low {
            bail!("High {} below low {} at line {}", row.high, row.low, line);
        }
        Ok(())
    }
}
