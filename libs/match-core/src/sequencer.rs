//! Fixed-size batching of a game's card sequence.

use crate::error::{ConfigError, Result};
use std::ops::Range;

/// Number of cards shown together in one round. Always even and non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSize(usize);

impl BatchSize {
    pub fn new(cards: usize) -> Result<Self> {
        if cards == 0 || cards % 2 != 0 {
            return Err(ConfigError::InvalidBatchSize(cards));
        }
        Ok(Self(cards))
    }

    /// Batch size holding `pairs` whole pairs.
    pub fn from_pairs(pairs: usize) -> Result<Self> {
        Self::new(pairs.saturating_mul(2))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// A slice of the card sequence handed out by the sequencer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub number: usize,
    pub range: Range<usize>,
}

impl Window {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Hands out consecutive windows of the card sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSequencer {
    batch_size: BatchSize,
    cursor: usize,
    served: usize,
}

impl BatchSequencer {
    pub fn new(batch_size: BatchSize) -> Self {
        Self {
            batch_size,
            cursor: 0,
            served: 0,
        }
    }

    /// Next window over a sequence of `total` cards, or `None` once every
    /// card has been handed out. The last window may be short.
    pub fn next_window(&mut self, total: usize) -> Option<Window> {
        if self.cursor >= total {
            return None;
        }
        let end = (self.cursor + self.batch_size.get()).min(total);
        let window = Window {
            number: self.served,
            range: self.cursor..end,
        };
        self.cursor = end;
        self.served += 1;
        Some(window)
    }

    /// Rewind to the start of the sequence.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.served = 0;
    }

    /// Offset of the first card not yet handed out.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of windows handed out so far.
    pub fn served(&self) -> usize {
        self.served
    }

    pub fn batch_size(&self) -> BatchSize {
        self.batch_size
    }
}
