//! Core library for the flashcard pair-matching games.
//!
//! Provides:
//! - Card, pair and batch types shared by every variant
//! - Game configuration with validation
//! - The pair source interface and an in-memory implementation
//! - Batch sequencing and the selection arbiter state machine
//! - Grid-flip and line-match pick policies

pub mod config;
pub mod error;
pub mod event;
pub mod sequencer;
pub mod session;
pub mod source;
pub mod types;
pub mod variant;

pub use config::{GameConfig, Timing, BATCH_ADVANCE_DELAY_MS};
pub use error::{ConfigError, Result, SourceError};
pub use event::{GameEvent, Step, Timer, TimerKind};
pub use sequencer::{BatchSequencer, BatchSize, Window};
pub use session::{GameSession, Phase};
pub use source::{clean_face, InMemoryPairSource, LoadOptions, PairSource, SourceCard};
pub use types::{build_cards, Batch, Card, CardId, Pair, PairContent, PairId, Role, Scoreboard};
pub use variant::{Feedback, Variant};
