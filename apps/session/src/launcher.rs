//! Building and spawning sessions.

use crate::actor::SessionActor;
use crate::error::Result;
use crate::handle::{EventStream, SessionHandle};
use match_core::{build_cards, GameConfig, GameSession, Pair, PairSource, Variant};
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

/// Run `session` on its own task. Must be called inside a tokio runtime.
///
/// The first batch (or an immediate `GameComplete` for an empty game) is
/// the first event on the returned stream.
pub fn spawn_session(session: GameSession) -> (SessionHandle, EventStream) {
    let id = Uuid::new_v4();
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (events_tx, events_rx) = mpsc::unbounded_channel();

    let actor = SessionActor::new(id, session, commands_rx, events_tx);
    tokio::spawn(actor.run());

    (SessionHandle::new(id, commands_tx), EventStream::new(events_rx))
}

/// Load pairs for `category` and start a game of `variant` on them.
pub fn launch<S>(
    source: &S,
    category: &str,
    variant: Variant,
    config: &GameConfig,
) -> Result<(SessionHandle, EventStream)>
where
    S: PairSource + ?Sized,
{
    config.validate()?;
    let batch_size = config.batch_size(variant)?;

    let contents = source.load_pairs(category, &config.load_options())?;
    info!(
        category,
        variant = variant.as_str(),
        pairs = contents.len(),
        "launching game"
    );

    let cards = build_cards(&Pair::number(contents));
    let session = GameSession::new(variant, cards, batch_size, config.timing(variant));
    Ok(spawn_session(session))
}
