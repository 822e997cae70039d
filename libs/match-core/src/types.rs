//! Core types for pair-matching games.

use serde::{Deserialize, Serialize};

/// Identifier shared by the two cards of a pair, unique within a game.
pub type PairId = u32;

/// Position of a card in its game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub usize);

/// Which face of a pair a card carries.
///
/// Line-match lays fronts out in the left column and backs in the right,
/// so two cards are on the same side exactly when their roles are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Front,
    Back,
}

/// Pair content as supplied by a pair source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairContent {
    pub front: String,
    pub back: String,
}

impl PairContent {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// A loaded pair with its identifier. Immutable once numbered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub id: PairId,
    pub front: String,
    pub back: String,
}

impl Pair {
    /// Assign ids `0..n` to pair contents, keeping their order.
    pub fn number(contents: Vec<PairContent>) -> Vec<Pair> {
        contents
            .into_iter()
            .enumerate()
            .map(|(idx, content)| Pair {
                id: idx as PairId,
                front: content.front,
                back: content.back,
            })
            .collect()
    }
}

/// One face of a pair, with its per-round flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub pair_id: PairId,
    pub role: Role,
    pub text: String,
    /// Face up (grid-flip) or highlighted (line-match).
    pub revealed: bool,
    pub matched: bool,
}

impl Card {
    pub fn new(id: CardId, pair_id: PairId, role: Role, text: impl Into<String>) -> Self {
        Self {
            id,
            pair_id,
            role,
            text: text.into(),
            revealed: false,
            matched: false,
        }
    }

    /// Whether a presentation should forward picks on this card.
    pub fn is_pickable(&self) -> bool {
        !self.matched
    }

    pub(crate) fn reset(&mut self) {
        self.revealed = false;
        self.matched = false;
    }
}

/// Build the card sequence for a game, front then back for each pair.
///
/// Both faces of a pair are adjacent, so any even batch size keeps them
/// in the same batch.
pub fn build_cards(pairs: &[Pair]) -> Vec<Card> {
    let mut cards = Vec::with_capacity(pairs.len() * 2);
    for pair in pairs {
        let front = CardId(cards.len());
        cards.push(Card::new(front, pair.id, Role::Front, pair.front.clone()));
        let back = CardId(cards.len());
        cards.push(Card::new(back, pair.id, Role::Back, pair.back.clone()));
    }
    cards
}

/// Cards presented together for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Zero-based position of this batch in the game.
    pub number: usize,
    pub cards: Vec<Card>,
}

impl Batch {
    /// Number of matchable pairs (floor of half the card count).
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Split into the left (front) and right (back) columns.
    pub fn columns(&self) -> (Vec<&Card>, Vec<&Card>) {
        self.cards.iter().partition(|card| card.role == Role::Front)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.iter().any(|card| card.id == id)
    }
}

/// Move and accuracy counters for one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub moves: u32,
    pub correct_matches: u32,
}

impl Scoreboard {
    /// Whole-number accuracy percentage; 100 before any move.
    pub fn accuracy(&self) -> u32 {
        if self.moves == 0 {
            return 100;
        }
        self.correct_matches * 100 / self.moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn contents() -> Vec<PairContent> {
        vec![
            PairContent::new("hola", "hello"),
            PairContent::new("gato", "cat"),
        ]
    }

    #[test]
    fn pairs_numbered_in_order() {
        let pairs = Pair::number(contents());
        assert_eq!(pairs[0].id, 0);
        assert_eq!(pairs[1].id, 1);
        assert_eq!(pairs[1].front, "gato");
    }

    #[test]
    fn cards_interleave_front_and_back() {
        let cards = build_cards(&Pair::number(contents()));
        let layout: Vec<_> = cards.iter().map(|c| (c.id.0, c.pair_id, c.role)).collect();
        assert_eq!(
            layout,
            vec![
                (0, 0, Role::Front),
                (1, 0, Role::Back),
                (2, 1, Role::Front),
                (3, 1, Role::Back),
            ]
        );
        assert!(cards.iter().all(|c| !c.revealed && !c.matched));
    }

    #[test]
    fn no_pairs_no_cards() {
        assert!(build_cards(&[]).is_empty());
    }

    #[test]
    fn batch_columns_split_by_role() {
        let batch = Batch {
            number: 0,
            cards: build_cards(&Pair::number(contents())),
        };
        let (left, right) = batch.columns();
        assert!(left.iter().all(|c| c.role == Role::Front));
        assert!(right.iter().all(|c| c.role == Role::Back));
        assert_eq!(left.len(), 2);
        assert_eq!(batch.pair_count(), 2);
    }

    #[test]
    fn accuracy_defaults_to_full() {
        assert_eq!(Scoreboard::default().accuracy(), 100);
    }

    #[test]
    fn accuracy_rounds_down() {
        let score = Scoreboard {
            moves: 3,
            correct_matches: 2,
        };
        assert_eq!(score.accuracy(), 66);
    }

    #[test]
    fn matched_card_not_pickable() {
        let mut card = Card::new(CardId(0), 0, Role::Front, "x");
        assert!(card.is_pickable());
        card.matched = true;
        assert!(!card.is_pickable());
    }
}
