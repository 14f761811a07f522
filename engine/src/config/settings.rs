// Engine settings, loaded from an optional JSON file
use crate::error::EngineError;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// Most recent candles handed to the optimizer per evaluation.
    pub max_history: usize,
    pub csv_delimiter: char,
    pub default_timeframe: String,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            max_history: 300,
            csv_delimiter: ',',
            default_timeframe: "15m".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl EngineSettings {
    /// Defaults when `path` is `None`; otherwise the file's keys over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        let settings = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                serde_json::from_str::<EngineSettings>(&raw)?
            }
            None => EngineSettings::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        // The optimizer needs at least 20 candles; below that it only returns defaults
        if self.max_history < crate::optimizer::MIN_HISTORY {
            return Err(EngineError::ConfigError(format!(
                "max_history must be at least {}, got {}",
                crate::optimizer::MIN_HISTORY,
                self.max_history
            )));
        }
        if !self.csv_delimiter.is_ascii() {
            return Err(EngineError::ConfigError(format!(
                "csv_delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            )));
        }
        Ok(())
    }

    pub fn csv_delimiter_byte(&self) -> u8 {
        self.csv_delimiter as u8
    }
}
