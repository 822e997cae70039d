//! End-of-game summary.

use chrono::{DateTime, Utc};
use match_core::{Scoreboard, Variant};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stats shown once every batch is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub session_id: Uuid,
    pub variant: Variant,
    pub moves: u32,
    pub correct_matches: u32,
    /// Whole-number percentage of moves that were matches.
    pub accuracy: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_secs: i64,
}

impl GameSummary {
    pub fn new(
        session_id: Uuid,
        variant: Variant,
        score: Scoreboard,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id,
            variant,
            moves: score.moves,
            correct_matches: score.correct_matches,
            accuracy: score.accuracy(),
            started_at,
            finished_at,
            elapsed_secs: (finished_at - started_at).num_seconds().max(0),
        }
    }

    /// One-line stats for the win screen.
    pub fn headline(&self) -> String {
        format!(
            "Moves: {}   Accuracy: {}%   Time: {}s",
            self.moves, self.accuracy, self.elapsed_secs
        )
    }
}
