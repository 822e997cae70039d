//! Shared fixtures for session host tests.
//!
//! Tests run on a paused tokio clock, so every delay a session schedules
//! elapses as soon as the runtime is otherwise idle.

#![allow(dead_code)]

use match_core::{
    Batch, CardId, GameConfig, GameEvent, InMemoryPairSource, Role, SourceCard,
};
use match_session::{EventStream, SessionEvent};

pub const DECK: &str = "capitals";

const CAPITALS: [(&str, &str); 6] = [
    ("France", "Paris"),
    ("Peru", "Lima"),
    ("Japan", "Tokyo"),
    ("Kenya", "Nairobi"),
    ("Chile", "Santiago"),
    ("Egypt", "Cairo"),
];

/// A seeded source with `count` capital pairs in [`DECK`], all due.
pub fn seeded_source(count: usize) -> InMemoryPairSource {
    let mut source = InMemoryPairSource::new().with_seed(42);
    source.insert_deck(
        DECK,
        CAPITALS
            .iter()
            .take(count)
            .map(|(front, back)| SourceCard::new(*front, *back, true))
            .collect(),
    );
    source
}

/// Two pairs per batch with the shortest allowed delays.
pub fn fast_config() -> GameConfig {
    GameConfig {
        rows: 2,
        cols: 2,
        number_of_pairs: 2,
        flip_delay_ms: 200,
        line_wrong_ms: 200,
        ..GameConfig::default()
    }
}

/// Next event; panics if the session has shut down.
pub async fn next_event(events: &mut EventStream) -> SessionEvent {
    events.recv().await.expect("session ended before the expected event")
}

/// Skip events until one matches.
pub async fn wait_for<F>(events: &mut EventStream, matches: F) -> SessionEvent
where
    F: Fn(&SessionEvent) -> bool,
{
    loop {
        let event = next_event(events).await;
        if matches(&event) {
            return event;
        }
    }
}

pub async fn wait_for_batch(events: &mut EventStream) -> Batch {
    match wait_for(events, |event| {
        matches!(event, SessionEvent::Game(GameEvent::BatchReady { .. }))
    })
    .await
    {
        SessionEvent::Game(GameEvent::BatchReady { batch }) => batch,
        other => panic!("expected a batch, got {other:?}"),
    }
}

/// Matching (front, back) ids in a batch.
pub fn pairs_in(batch: &Batch) -> Vec<(CardId, CardId)> {
    let (fronts, backs) = batch.columns();
    fronts
        .iter()
        .filter_map(|front| {
            backs
                .iter()
                .find(|back| back.pair_id == front.pair_id)
                .map(|back| (front.id, back.id))
        })
        .collect()
}

/// Every event already queued on the stream.
pub fn drain(events: &mut EventStream) -> Vec<SessionEvent> {
    std::iter::from_fn(|| events.try_recv()).collect()
}

pub fn fronts_of(batch: &Batch) -> Vec<CardId> {
    batch
        .cards
        .iter()
        .filter(|card| card.role == Role::Front)
        .map(|card| card.id)
        .collect()
}
