//! Session host for the flashcard pair-matching games.
//!
//! Runs each game session on its own tokio task, turns the session's
//! delay requests into real timers and streams outcome events to the
//! presentation.

mod actor;
pub mod error;
pub mod handle;
pub mod launcher;
pub mod summary;

pub use error::{Result, SessionError};
pub use handle::{EventStream, SessionEvent, SessionHandle, SessionSnapshot};
pub use launcher::{launch, spawn_session};
pub use summary::GameSummary;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber, filtered by `RUST_LOG`
/// (default `info`). Returns false if one was already installed.
pub fn init_logging() -> bool {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
