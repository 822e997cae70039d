//! Selection arbiter: the pick / match / recover protocol shared by every
//! variant.
//!
//! A session never blocks and never sleeps. Delays are returned as
//! [`Timer`] values inside a [`Step`]; the caller waits and passes the timer
//! back to [`GameSession::fire`]. Every scheduled timer gets a fresh
//! generation number and only the most recent one is honoured, so a timer
//! that outlives a restart or close does nothing.

use crate::config::{GameConfig, Timing};
use crate::error::Result;
use crate::event::{GameEvent, Step, Timer, TimerKind};
use crate::sequencer::{BatchSequencer, BatchSize};
use crate::types::{Batch, Card, CardId, Scoreboard};
use crate::variant::{Admission, Variant};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::time::Duration;
use tracing::{debug, trace};

/// Observable state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Built but `start` not yet called.
    NotStarted,
    /// Waiting for a first pick.
    Idle,
    /// One card selected, waiting for the second.
    OneSelected,
    /// Mismatch shown; input locked until recovery fires.
    Reverting,
    /// Batch cleared; next batch pending.
    Advancing,
    Complete,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    NotStarted,
    Running,
    Complete,
    Closed,
}

/// One game: its cards, the batch in play and the two selection slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    variant: Variant,
    timing: Timing,
    cards: Vec<Card>,
    sequencer: BatchSequencer,
    batch_number: usize,
    window: Range<usize>,
    pairs_remaining: usize,
    slot1: Option<CardId>,
    slot2: Option<CardId>,
    input_locked: bool,
    pending: Option<Timer>,
    generation: u64,
    score: Scoreboard,
    lifecycle: Lifecycle,
}

impl GameSession {
    /// Cards are renumbered by position, so the ids seen in `BatchReady`
    /// always address the card they label.
    pub fn new(
        variant: Variant,
        mut cards: Vec<Card>,
        batch_size: BatchSize,
        timing: Timing,
    ) -> Self {
        for (idx, card) in cards.iter_mut().enumerate() {
            card.id = CardId(idx);
        }
        Self {
            variant,
            timing,
            cards,
            sequencer: BatchSequencer::new(batch_size),
            batch_number: 0,
            window: 0..0,
            pairs_remaining: 0,
            slot1: None,
            slot2: None,
            input_locked: false,
            pending: None,
            generation: 0,
            score: Scoreboard::default(),
            lifecycle: Lifecycle::NotStarted,
        }
    }

    /// Build a session from a validated config.
    pub fn from_config(variant: Variant, cards: Vec<Card>, config: &GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            variant,
            cards,
            config.batch_size(variant)?,
            config.timing(variant),
        ))
    }

    /// Show the first batch, or finish at once when there are no cards.
    pub fn start(&mut self) -> Step {
        let mut step = Step::default();
        if self.lifecycle != Lifecycle::NotStarted {
            trace!("start ignored: session already started");
            return step;
        }
        self.lifecycle = Lifecycle::Running;
        debug!(variant = self.variant.as_str(), cards = self.cards.len(), "session started");
        self.start_or_advance(&mut step);
        step
    }

    /// Feed one player pick. Picks that cannot apply are dropped silently.
    pub fn pick(&mut self, id: CardId) -> Step {
        let mut step = Step::default();
        if self.lifecycle != Lifecycle::Running {
            trace!(card = id.0, "pick ignored: session not running");
            return step;
        }
        if self.input_locked {
            trace!(card = id.0, "pick ignored: input locked");
            return step;
        }
        if matches!(self.pending, Some(Timer { kind: TimerKind::AdvanceBatch, .. })) {
            trace!(card = id.0, "pick ignored: batch cleared");
            return step;
        }
        if !self.window.contains(&id.0) {
            trace!(card = id.0, "pick ignored: card not in current batch");
            return step;
        }

        let card = &self.cards[id.0];
        if card.matched {
            trace!(card = id.0, "pick ignored: card already matched");
            return step;
        }
        let first = self.slot1.map(|first| &self.cards[first.0]);
        match self.variant.admit(card, first) {
            Admission::Proceed => {}
            Admission::Ignore => {
                trace!(card = id.0, "pick ignored by variant");
                return step;
            }
            Admission::ReplaceFirst => {
                self.replace_first(id, &mut step);
                return step;
            }
        }

        match self.slot1 {
            None => {
                self.slot1 = Some(id);
                self.select(id, &mut step);
            }
            Some(first) => {
                self.slot2 = Some(id);
                self.input_locked = true;
                self.select(id, &mut step);
                self.score.moves += 1;
                step.push(GameEvent::Move {
                    moves: self.score.moves,
                });
                self.check_match(first, id, &mut step);
            }
        }
        step
    }

    /// Run a delayed continuation. Anything but the pending timer is ignored.
    pub fn fire(&mut self, timer: Timer) -> Step {
        let mut step = Step::default();
        if self.lifecycle != Lifecycle::Running || self.pending != Some(timer) {
            trace!(generation = timer.generation, "stale timer ignored");
            return step;
        }
        self.pending = None;

        match timer.kind {
            TimerKind::AdvanceBatch => self.start_or_advance(&mut step),
            TimerKind::Recover { first, second } => {
                self.cards[first.0].revealed = false;
                self.cards[second.0].revealed = false;
                self.input_locked = false;
                step.push(GameEvent::Recovered {
                    first,
                    second,
                    feedback: self.variant.recovery_feedback(),
                });
            }
        }
        step
    }

    /// Play again with the same cards from the first batch.
    pub fn restart(&mut self) -> Step {
        if self.lifecycle == Lifecycle::Closed {
            trace!("restart ignored: session closed");
            return Step::default();
        }
        self.generation += 1;
        self.pending = None;
        self.cards.iter_mut().for_each(Card::reset);
        self.sequencer.reset();
        self.score = Scoreboard::default();
        self.window = 0..0;
        self.pairs_remaining = 0;
        self.clear_selection();
        self.input_locked = false;
        self.lifecycle = Lifecycle::NotStarted;
        self.start()
    }

    /// Tear the session down. Later picks and timers are ignored.
    pub fn close(&mut self) {
        if self.lifecycle == Lifecycle::Closed {
            return;
        }
        self.generation += 1;
        self.pending = None;
        self.clear_selection();
        self.input_locked = false;
        self.lifecycle = Lifecycle::Closed;
        debug!("session closed");
    }

    pub fn phase(&self) -> Phase {
        match self.lifecycle {
            Lifecycle::NotStarted => Phase::NotStarted,
            Lifecycle::Complete => Phase::Complete,
            Lifecycle::Closed => Phase::Closed,
            Lifecycle::Running => match (self.pending.map(|timer| timer.kind), self.slot1) {
                (Some(TimerKind::Recover { .. }), _) => Phase::Reverting,
                (Some(TimerKind::AdvanceBatch), _) => Phase::Advancing,
                (None, Some(_)) => Phase::OneSelected,
                (None, None) => Phase::Idle,
            },
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.0)
    }

    /// Snapshot of the batch in play, if the game is running.
    pub fn current_batch(&self) -> Option<Batch> {
        if self.lifecycle != Lifecycle::Running {
            return None;
        }
        Some(Batch {
            number: self.batch_number,
            cards: self.cards[self.window.clone()].to_vec(),
        })
    }

    pub fn score(&self) -> Scoreboard {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.score.moves
    }

    pub fn correct_matches(&self) -> u32 {
        self.score.correct_matches
    }

    pub fn input_locked(&self) -> bool {
        self.input_locked
    }

    pub fn pairs_remaining(&self) -> usize {
        self.pairs_remaining
    }

    /// Contents of the two selection slots.
    pub fn selection(&self) -> (Option<CardId>, Option<CardId>) {
        (self.slot1, self.slot2)
    }

    pub fn pending_timer(&self) -> Option<Timer> {
        self.pending
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_live(&self) -> bool {
        self.lifecycle != Lifecycle::Closed
    }

    fn start_or_advance(&mut self, step: &mut Step) {
        loop {
            self.clear_selection();
            self.input_locked = false;

            let Some(window) = self.sequencer.next_window(self.cards.len()) else {
                self.lifecycle = Lifecycle::Complete;
                self.window = 0..0;
                self.pairs_remaining = 0;
                debug!(
                    moves = self.score.moves,
                    correct = self.score.correct_matches,
                    "game complete"
                );
                step.push(GameEvent::GameComplete { score: self.score });
                return;
            };

            self.pairs_remaining = window.len() / 2;
            self.batch_number = window.number;
            self.window = window.range;
            debug!(
                batch = self.batch_number,
                cards = self.window.len(),
                pairs = self.pairs_remaining,
                "batch ready"
            );
            let batch = Batch {
                number: self.batch_number,
                cards: self.cards[self.window.clone()].to_vec(),
            };
            step.push(GameEvent::BatchReady { batch });

            if self.pairs_remaining > 0 {
                return;
            }
            // A lone trailing card has nothing to match with.
            debug!(batch = self.batch_number, "batch has no complete pair, moving on");
        }
    }

    fn select(&mut self, id: CardId, step: &mut Step) {
        self.cards[id.0].revealed = true;
        step.push(GameEvent::Selected {
            card: id,
            feedback: self.variant.selection_feedback(),
        });
    }

    fn replace_first(&mut self, id: CardId, step: &mut Step) {
        if let Some(previous) = self.slot1.replace(id) {
            self.cards[previous.0].revealed = false;
            step.push(GameEvent::Deselected {
                card: previous,
                feedback: self.variant.recovery_feedback(),
            });
        }
        self.select(id, step);
    }

    fn check_match(&mut self, first: CardId, second: CardId, step: &mut Step) {
        let pair_id = self.cards[first.0].pair_id;
        if pair_id == self.cards[second.0].pair_id {
            for id in [first, second] {
                let card = &mut self.cards[id.0];
                card.matched = true;
                card.revealed = true;
            }
            self.score.correct_matches += 1;
            step.push(GameEvent::CorrectMatch { first, second });
            self.clear_selection();
            self.pairs_remaining = self.pairs_remaining.saturating_sub(1);
            self.input_locked = false;
            debug!(pair = pair_id, remaining = self.pairs_remaining, "correct match");

            if self.pairs_remaining == 0 {
                step.timer =
                    Some(self.schedule(TimerKind::AdvanceBatch, self.timing.advance_delay));
            }
        } else {
            // Slots clear now; the lock holds until recovery fires.
            step.push(GameEvent::WrongMatch { first, second });
            self.clear_selection();
            debug!(first = first.0, second = second.0, "wrong match");
            step.timer = Some(self.schedule(
                TimerKind::Recover { first, second },
                self.timing.recovery_delay,
            ));
        }
    }

    fn schedule(&mut self, kind: TimerKind, delay: Duration) -> Timer {
        self.generation += 1;
        let timer = Timer {
            kind,
            delay,
            generation: self.generation,
        };
        self.pending = Some(timer);
        timer
    }

    fn clear_selection(&mut self) {
        self.slot1 = None;
        self.slot2 = None;
    }
}
