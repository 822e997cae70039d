//! Per-variant pick policies.
//!
//! Both games share one selection protocol; a variant only decides whether
//! a pick is admitted and how selection looks to the player.

use crate::types::Card;
use serde::{Deserialize, Serialize};

/// Game variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Face-down grid; picks turn tiles over.
    #[serde(rename = "memory_flip")]
    GridFlip,
    /// Two always-visible columns; picks highlight labels.
    LineMatch,
}

impl Default for Variant {
    fn default() -> Self {
        Self::GridFlip
    }
}

impl Variant {
    /// Get the variant name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GridFlip => "memory_flip",
            Self::LineMatch => "line_match",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "memory_flip" => Some(Self::GridFlip),
            "line_match" => Some(Self::LineMatch),
            _ => None,
        }
    }

    /// How a selected card is shown.
    pub fn selection_feedback(self) -> Feedback {
        match self {
            Self::GridFlip => Feedback::Reveal,
            Self::LineMatch => Feedback::Highlight,
        }
    }

    /// How a mismatched card is returned to its resting look.
    pub fn recovery_feedback(self) -> Feedback {
        match self {
            Self::GridFlip => Feedback::Conceal,
            Self::LineMatch => Feedback::Clear,
        }
    }

    /// Decide what a pick on `card` means given the current first selection.
    pub(crate) fn admit(self, card: &Card, first: Option<&Card>) -> Admission {
        match self {
            // Already face up: either the first selection or a tile still
            // showing. Neither can start or complete a pair.
            Self::GridFlip if card.revealed => Admission::Ignore,
            Self::GridFlip => Admission::Proceed,
            Self::LineMatch => match first {
                Some(first) if first.id == card.id => Admission::Ignore,
                Some(first) if first.role == card.role => Admission::ReplaceFirst,
                _ => Admission::Proceed,
            },
        }
    }
}

/// Visual change the presentation should apply to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    /// Turn face up.
    Reveal,
    /// Turn face down.
    Conceal,
    /// Mark as selected.
    Highlight,
    /// Remove the selection mark.
    Clear,
}

/// Outcome of a variant's admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Admission {
    /// Run the shared protocol.
    Proceed,
    /// Drop the pick without any state change.
    Ignore,
    /// Swap the first selection for this card; not a move.
    ReplaceFirst,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CardId, Role};

    fn card(id: usize, role: Role) -> Card {
        Card::new(CardId(id), id as u32 / 2, role, "x")
    }

    #[test]
    fn name_roundtrip() {
        for variant in [Variant::GridFlip, Variant::LineMatch] {
            assert_eq!(Variant::from_str(variant.as_str()), Some(variant));
        }
        assert_eq!(Variant::from_str("snap"), None);
    }

    #[test]
    fn grid_ignores_revealed_tile() {
        let mut tile = card(0, Role::Front);
        assert_eq!(Variant::GridFlip.admit(&tile, None), Admission::Proceed);
        tile.revealed = true;
        assert_eq!(Variant::GridFlip.admit(&tile, None), Admission::Ignore);
    }

    #[test]
    fn grid_allows_two_fronts() {
        let first = card(0, Role::Front);
        let second = card(2, Role::Front);
        assert_eq!(
            Variant::GridFlip.admit(&second, Some(&first)),
            Admission::Proceed
        );
    }

    #[test]
    fn line_same_side_replaces_first() {
        let first = card(0, Role::Front);
        let second = card(2, Role::Front);
        assert_eq!(
            Variant::LineMatch.admit(&second, Some(&first)),
            Admission::ReplaceFirst
        );
    }

    #[test]
    fn line_other_side_proceeds() {
        let first = card(0, Role::Front);
        let second = card(3, Role::Back);
        assert_eq!(
            Variant::LineMatch.admit(&second, Some(&first)),
            Admission::Proceed
        );
    }

    #[test]
    fn line_repick_of_first_is_ignored() {
        let mut first = card(0, Role::Front);
        first.revealed = true;
        assert_eq!(
            Variant::LineMatch.admit(&first, Some(&first)),
            Admission::Ignore
        );
    }

    #[test]
    fn feedback_per_variant() {
        assert_eq!(Variant::GridFlip.selection_feedback(), Feedback::Reveal);
        assert_eq!(Variant::GridFlip.recovery_feedback(), Feedback::Conceal);
        assert_eq!(Variant::LineMatch.selection_feedback(), Feedback::Highlight);
        assert_eq!(Variant::LineMatch.recovery_feedback(), Feedback::Clear);
    }
}
