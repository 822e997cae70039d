//! Game configuration, resolved once per session.

use crate::error::{ConfigError, Result};
use crate::sequencer::BatchSize;
use crate::source::LoadOptions;
use crate::variant::Variant;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;

/// Pause between clearing the last pair of a batch and showing the next.
pub const BATCH_ADVANCE_DELAY_MS: u64 = 500;

const GRID_SIDE: RangeInclusive<u32> = 2..=10;
const LINE_PAIRS: RangeInclusive<u32> = 2..=20;
const WRONG_DELAY_MS: RangeInclusive<u64> = 200..=3000;

/// Options recognised in the games config document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: u32,
    pub cols: u32,
    /// Pairs per line-match batch.
    #[serde(rename = "numberOfPairs")]
    pub number_of_pairs: u32,
    #[serde(alias = "flipDelayMs")]
    pub flip_delay_ms: u64,
    #[serde(alias = "lineWrongMs")]
    pub line_wrong_ms: u64,
    /// Only load cards currently due for review.
    #[serde(rename = "useReviewQueue", alias = "useReviewQueueOnly")]
    pub use_review_queue: bool,
    #[serde(
        rename = "maxCards",
        alias = "maxCount",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_cards: Option<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            number_of_pairs: 4,
            flip_delay_ms: 800,
            line_wrong_ms: 800,
            use_review_queue: false,
            max_cards: None,
        }
    }
}

/// Delays applied by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// How long a mismatched pair stays shown with input locked.
    pub recovery_delay: Duration,
    /// How long a cleared batch stays shown before the next one.
    pub advance_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        GameConfig::default().timing(Variant::default())
    }
}

impl GameConfig {
    /// Parse and validate a JSON config document. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a playable game.
    pub fn validate(&self) -> Result<()> {
        check_range("rows", self.rows.into(), widen(&GRID_SIDE))?;
        check_range("cols", self.cols.into(), widen(&GRID_SIDE))?;
        check_range("numberOfPairs", self.number_of_pairs.into(), widen(&LINE_PAIRS))?;
        check_range("flip_delay_ms", self.flip_delay_ms, WRONG_DELAY_MS)?;
        check_range("line_wrong_ms", self.line_wrong_ms, WRONG_DELAY_MS)?;

        let product = self.rows * self.cols;
        if product % 2 != 0 {
            return Err(ConfigError::OddGrid {
                rows: self.rows,
                cols: self.cols,
                product,
            });
        }
        Ok(())
    }

    /// Cards per batch for a variant. Validates first.
    pub fn batch_size(&self, variant: Variant) -> Result<BatchSize> {
        self.validate()?;
        match variant {
            Variant::GridFlip => BatchSize::new((self.rows * self.cols) as usize),
            Variant::LineMatch => BatchSize::from_pairs(self.number_of_pairs as usize),
        }
    }

    /// Delays for a variant.
    pub fn timing(&self, variant: Variant) -> Timing {
        let wrong_ms = match variant {
            Variant::GridFlip => self.flip_delay_ms,
            Variant::LineMatch => self.line_wrong_ms,
        };
        Timing {
            recovery_delay: Duration::from_millis(wrong_ms),
            advance_delay: Duration::from_millis(BATCH_ADVANCE_DELAY_MS),
        }
    }

    /// Options to pass to a pair source.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            use_review_queue_only: self.use_review_queue,
            max_count: self.max_cards,
        }
    }
}

fn widen(range: &RangeInclusive<u32>) -> RangeInclusive<u64> {
    (*range.start()).into()..=(*range.end()).into()
}

fn check_range(field: &'static str, value: u64, range: RangeInclusive<u64>) -> Result<()> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(ConfigError::OutOfRange {
        field,
        value,
        min: *range.start(),
        max: *range.end(),
    })
}
