//! Outcomes emitted by a game session.

use crate::types::{Batch, CardId, Scoreboard};
use crate::variant::Feedback;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Something the presentation should react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A new batch is in play.
    BatchReady { batch: Batch },
    /// A card was taken into a selection slot.
    Selected { card: CardId, feedback: Feedback },
    /// A line-match first choice was replaced.
    Deselected { card: CardId, feedback: Feedback },
    /// A second pick completed a move.
    Move { moves: u32 },
    CorrectMatch { first: CardId, second: CardId },
    WrongMatch { first: CardId, second: CardId },
    /// A mismatched pair went back to its resting look; input is open again.
    Recovered {
        first: CardId,
        second: CardId,
        feedback: Feedback,
    },
    /// Every batch has been cleared.
    GameComplete { score: Scoreboard },
}

/// What a delayed continuation does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Show the next batch (or finish the game).
    AdvanceBatch,
    /// Undo the selection look of a mismatched pair and unlock input.
    Recover { first: CardId, second: CardId },
}

/// A delayed continuation requested by the session.
///
/// The caller waits `delay` and hands the timer back to
/// [`GameSession::fire`](crate::session::GameSession::fire). A timer from an
/// older generation is ignored there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub kind: TimerKind,
    pub delay: Duration,
    pub generation: u64,
}

/// Result of feeding one input into a session.
#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    pub events: Vec<GameEvent>,
    pub timer: Option<Timer>,
}

impl Step {
    /// True when the input was dropped without any effect.
    pub fn is_ignored(&self) -> bool {
        self.events.is_empty() && self.timer.is_none()
    }

    pub(crate) fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
