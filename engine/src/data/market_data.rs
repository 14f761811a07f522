// In-memory candle histories the optimizer service evaluates signals against
use chrono::{DateTime, Utc};
use shared::models::{Candle, TimeFrame};
use std::collections::HashMap;

pub struct MarketDataStore {
    // Candles per symbol and timeframe, oldest first, unique timestamps
    data: HashMap<String, HashMap<TimeFrame, Vec<Candle>>>,
}

impl MarketDataStore {
    pub fn new() -> Self {
        MarketDataStore {
            data: HashMap::new(),
        }
    }

    /// Merges `new_candles` into the series. On duplicate timestamps the
    /// newest write wins. Returns the series length after the merge.
    pub fn add_candles(&mut self, symbol: &str, timeframe: TimeFrame, new_candles: Vec<Candle>) -> usize {
        let series = self
            .data
            .entry(symbol.to_string())
            .or_default()
            .entry(timeframe)
            .or_default();

        // Newer writes go first so the stable sort + dedup keeps them
        let mut merged = new_candles;
        merged.reverse();
        merged.append(series);
        merged.sort_by_key(|c| c.timestamp);
        merged.dedup_by_key(|c| c.timestamp);
        *series = merged;
        series.len()
    }

    pub fn get_candles(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        from_timestamp: Option<DateTime<Utc>>,
        to_timestamp: Option<DateTime<Utc>>,
    ) -> Option<Vec<Candle>> {
        self.series(symbol, timeframe).map(|candles| {
            candles
                .iter()
                .filter(|c| from_timestamp.map_or(true, |start| c.timestamp >= start))
                .filter(|c| to_timestamp.map_or(true, |end| c.timestamp <= end))
                .cloned()
                .collect()
        })
    }

    /// The most recent `limit` candles, oldest first.
    pub fn latest(&self, symbol: &str, timeframe: TimeFrame, limit: usize) -> Vec<Candle> {
        self.series(symbol, timeframe)
            .map(|candles| candles[candles.len().saturating_sub(limit)..].to_vec())
            .unwrap_or_default()
    }

    pub fn len(&self, symbol: &str, timeframe: TimeFrame) -> usize {
        self.series(symbol, timeframe).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.data.values().all(|by_tf| by_tf.values().all(Vec::is_empty))
    }

    fn series(&self, symbol: &str, timeframe: TimeFrame) -> Option<&Vec<Candle>> {
        self.data.get(symbol).and_then(|by_tf| by_tf.get(&timeframe))
    }
}

impl Default for MarketDataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn candle_at(minute: i64, close: f64) -> Candle {
        Candle {
            symbol: "BTCUSD".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minute),
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
            trades: 0,
        }
    }

    #[test]
    fn test_add_candles_sorts_and_dedups() {
        let mut store = MarketDataStore::new();
        assert!(store.is_empty());

        let len = store.add_candles("BTCUSD", TimeFrame::Hour1, vec![candle_at(2, 3.0), candle_at(0, 1.0)]);
        assert_eq!(len, 2);

        // Minute 2 is replaced by the later write
        let len = store.add_candles("BTCUSD", TimeFrame::Hour1, vec![candle_at(2, 30.0), candle_at(1, 2.0)]);
        assert_eq!(len, 3);

        let closes: Vec<f64> = store
            .get_candles("BTCUSD", TimeFrame::Hour1, None, None)
            .unwrap()
            .iter()
            .map(|c| c.close)
            .collect();
        assert_eq!(closes, vec![1.0, 2.0, 30.0]);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_series_are_keyed_by_timeframe() {
        let mut store = MarketDataStore::new();
        store.add_candles("BTCUSD", TimeFrame::Hour1, vec![candle_at(0, 1.0)]);
        assert_eq!(store.len("BTCUSD", TimeFrame::Hour1), 1);
        assert_eq!(store.len("BTCUSD", TimeFrame::Day1), 0);
        assert!(store.get_candles("BTCUSD", TimeFrame::Day1, None, None).is_none());
        assert!(store.get_candles("ETHUSD", TimeFrame::Hour1, None, None).is_none());
    }

    #[test]
    fn test_range_query() {
        let mut store = MarketDataStore::new();
        store.add_candles("BTCUSD", TimeFrame::Minute1, (0..10).map(|m| candle_at(m, m as f64)).collect());
        let from = candle_at(3, 0.0).timestamp;
        let to = candle_at(5, 0.0).timestamp;
        let window = store.get_candles("BTCUSD", TimeFrame::Minute1, Some(from), Some(to)).unwrap();
        assert_eq!(window.iter().map(|c| c.close).collect::<Vec<_>>(), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_latest_returns_tail() {
        let mut store = MarketDataStore::new();
        store.add_candles("BTCUSD", TimeFrame::Minute5, (0..10).map(|m| candle_at(m, m as f64)).collect());
        let tail = store.latest("BTCUSD", TimeFrame::Minute5, 3);
        assert_eq!(tail.iter().map(|c| c.close).collect::<Vec<_>>(), vec![7.0, 8.0, 9.0]);
        assert_eq!(store.latest("BTCUSD", TimeFrame::Minute5, 50).len(), 10);
        assert!(store.latest("NOPE", TimeFrame::Minute5, 3).is_empty());
    }
}
