//! Error types for match-core.

use thiserror::Error;

/// Result type alias using ConfigError.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while checking a game configuration, before any game starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("rows × cols must be even ({rows} × {cols} = {product})")]
    OddGrid { rows: u32, cols: u32, product: u32 },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("batch size must be a positive even number of cards, got {0}")]
    InvalidBatchSize(usize),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors reported by a pair source while loading content.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("pair source unavailable: {0}")]
    Unavailable(String),

    #[error("invalid category name: {0:?}")]
    InvalidCategory(String),
}
