//! Pair sources: where game content comes from.

use crate::error::SourceError;
use crate::types::PairContent;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

static MARKUP: OnceLock<Regex> = OnceLock::new();

/// Reduce a stored note field to the plain text shown on a card.
///
/// Drops HTML tags and `[sound:...]` markers, decodes entities and trims.
/// A field holding only media comes out empty.
pub fn clean_face(raw: &str) -> String {
    let markup = MARKUP.get_or_init(|| {
        Regex::new(r"<[^>]+>|\[sound:[^\]]+\]").expect("markup pattern is valid")
    });
    let stripped = markup.replace_all(raw, "");
    html_escape::decode_html_entities(&stripped).trim().to_string()
}

/// Filtering options passed to a pair source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Only return items currently due for review.
    pub use_review_queue_only: bool,
    /// Cap on the number of pairs returned.
    pub max_count: Option<usize>,
}

/// Supplies shuffled content pairs for a deck or category.
///
/// An empty result is valid and ends the game immediately.
pub trait PairSource {
    fn load_pairs(
        &self,
        category: &str,
        options: &LoadOptions,
    ) -> Result<Vec<PairContent>, SourceError>;

    /// Whether a game for `category` would have anything to show.
    fn has_pairs(&self, category: &str, options: &LoadOptions) -> Result<bool, SourceError> {
        Ok(!self.load_pairs(category, options)?.is_empty())
    }
}

/// A study card as held by an in-memory deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCard {
    pub front: String,
    pub back: String,
    /// Due for review today.
    #[serde(default)]
    pub due: bool,
}

impl SourceCard {
    pub fn new(front: impl Into<String>, back: impl Into<String>, due: bool) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            due,
        }
    }
}

/// Pair source backed by decks held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPairSource {
    decks: HashMap<String, Vec<SourceCard>>,
    seed: Option<u64>,
}

impl InMemoryPairSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shuffle with a fixed seed so every load returns the same order.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Add cards to a deck, creating it if needed.
    pub fn insert_deck(&mut self, name: impl Into<String>, cards: Vec<SourceCard>) {
        self.decks.entry(name.into()).or_default().extend(cards);
    }

    pub fn deck_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.decks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl PairSource for InMemoryPairSource {
    fn load_pairs(
        &self,
        category: &str,
        options: &LoadOptions,
    ) -> Result<Vec<PairContent>, SourceError> {
        if category.trim().is_empty() {
            return Err(SourceError::InvalidCategory(category.to_string()));
        }

        let Some(deck) = self.decks.get(category) else {
            return Ok(vec![]);
        };

        let mut cards: Vec<&SourceCard> = deck
            .iter()
            .filter(|card| !options.use_review_queue_only || card.due)
            .collect();
        cards.shuffle(&mut self.rng());

        if let Some(max) = options.max_count {
            cards.truncate(max);
        }

        // Blank faces cannot be matched against anything.
        Ok(cards
            .into_iter()
            .map(|card| PairContent::new(clean_face(&card.front), clean_face(&card.back)))
            .filter(|pair| !pair.front.is_empty() && !pair.back.is_empty())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn source() -> InMemoryPairSource {
        let mut source = InMemoryPairSource::new().with_seed(7);
        source.insert_deck(
            "spanish",
            vec![
                SourceCard::new("hola", "hello", true),
                SourceCard::new("gato", "cat", false),
                SourceCard::new("perro", "dog", true),
                SourceCard::new("casa", "house", false),
            ],
        );
        source
    }

    fn fronts(pairs: &[PairContent]) -> Vec<&str> {
        let mut fronts: Vec<&str> = pairs.iter().map(|p| p.front.as_str()).collect();
        fronts.sort_unstable();
        fronts
    }

    #[test]
    fn loads_whole_deck() {
        let pairs = source().load_pairs("spanish", &LoadOptions::default()).unwrap();
        assert_eq!(fronts(&pairs), vec!["casa", "gato", "hola", "perro"]);
    }

    #[test]
    fn review_queue_keeps_due_only() {
        let options = LoadOptions {
            use_review_queue_only: true,
            max_count: None,
        };
        let pairs = source().load_pairs("spanish", &options).unwrap();
        assert_eq!(fronts(&pairs), vec!["hola", "perro"]);
    }

    #[test]
    fn max_count_caps_result() {
        let options = LoadOptions {
            use_review_queue_only: false,
            max_count: Some(3),
        };
        assert_eq!(source().load_pairs("spanish", &options).unwrap().len(), 3);
    }

    #[test]
    fn seeded_loads_repeat() {
        let source = source();
        let first = source.load_pairs("spanish", &LoadOptions::default()).unwrap();
        let second = source.load_pairs("spanish", &LoadOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_deck_is_empty() {
        let source = source();
        assert!(source
            .load_pairs("german", &LoadOptions::default())
            .unwrap()
            .is_empty());
        assert!(!source.has_pairs("german", &LoadOptions::default()).unwrap());
        assert!(source.has_pairs("spanish", &LoadOptions::default()).unwrap());
    }

    #[test]
    fn blank_category_rejected() {
        assert!(matches!(
            source().load_pairs("  ", &LoadOptions::default()),
            Err(SourceError::InvalidCategory(_))
        ));
    }

    #[test]
    fn blank_faces_dropped() {
        let mut source = InMemoryPairSource::new();
        source.insert_deck(
            "mixed",
            vec![
                SourceCard::new("  ", "nothing", false),
                SourceCard::new("sol", "sun", false),
            ],
        );
        let pairs = source.load_pairs("mixed", &LoadOptions::default()).unwrap();
        assert_eq!(pairs, vec![PairContent::new("sol", "sun")]);
    }

    #[test]
    fn markup_stripped_from_faces() {
        assert_eq!(clean_face("  <b>gato</b> "), "gato");
        assert_eq!(clean_face("perro [sound:perro.mp3]"), "perro");
        assert_eq!(clean_face("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(clean_face("<div>rock &lt;n&gt; roll</div>"), "rock <n> roll");
    }

    #[test]
    fn media_only_faces_dropped() {
        let mut source = InMemoryPairSource::new();
        source.insert_deck(
            "media",
            vec![
                SourceCard::new("<img src=\"cat.jpg\">", "cat", false),
                SourceCard::new("[sound:dog.mp3]", "dog", false),
                SourceCard::new("<i>sol</i>", "<br>sun", false),
            ],
        );
        let pairs = source.load_pairs("media", &LoadOptions::default()).unwrap();
        assert_eq!(pairs, vec![PairContent::new("sol", "sun")]);
    }

    #[test]
    fn deck_names_sorted() {
        let mut source = source();
        source.insert_deck("french", vec![]);
        assert_eq!(source.deck_names(), vec!["french", "spanish"]);
    }
}
