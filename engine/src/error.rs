use thiserror::Error;

/// Errors raised by the ambient engine layers (config, CSV ingestion).
///
/// The optimizer itself never fails: degenerate inputs resolve to neutral
/// defaults, so nothing in `crate::optimizer` returns this type.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Optimizer task failed: {0}")]
    TaskError(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl From<tokio::task::JoinError> for EngineError {
    fn from(err: tokio::task::JoinError) -> Self {
        tracing::error!("Optimizer task did not complete: {:?}", err);
        EngineError::TaskError(err.to_string())
    }
}
