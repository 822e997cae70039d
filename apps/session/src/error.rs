//! Error handling for session hosting.

use match_core::{ConfigError, SourceError};
use thiserror::Error;
use uuid::Uuid;

/// Session host error types
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid game configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load pairs: {0}")]
    Source(#[from] SourceError),

    #[error("Session {0} is no longer running")]
    Closed(Uuid),
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
