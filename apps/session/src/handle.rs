//! Handles used by a presentation to drive a running session.

use crate::actor::Command;
use crate::error::{Result, SessionError};
use crate::summary::GameSummary;
use match_core::{Batch, CardId, GameEvent, GameSession, Phase, Scoreboard, Variant};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

/// Output of a running session, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum SessionEvent {
    Game(GameEvent),
    /// Sent right after `GameComplete`.
    Finished(GameSummary),
}

/// Read-only view of a session at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub variant: Variant,
    pub phase: Phase,
    pub score: Scoreboard,
    pub accuracy: u32,
    pub batch: Option<Batch>,
    pub pairs_remaining: usize,
    pub input_locked: bool,
    pub selection: (Option<CardId>, Option<CardId>),
}

impl SessionSnapshot {
    pub(crate) fn capture(session_id: Uuid, session: &GameSession) -> Self {
        let score = session.score();
        Self {
            session_id,
            variant: session.variant(),
            phase: session.phase(),
            score,
            accuracy: score.accuracy(),
            batch: session.current_batch(),
            pairs_remaining: session.pairs_remaining(),
            input_locked: session.input_locked(),
            selection: session.selection(),
        }
    }
}

/// Cloneable handle to a running session.
///
/// The session ends when `close` is called or every handle is dropped.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: Uuid,
    commands: mpsc::UnboundedSender<Command>,
}

impl SessionHandle {
    pub(crate) fn new(id: Uuid, commands: mpsc::UnboundedSender<Command>) -> Self {
        Self { id, commands }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Forward a pick. Returns whether the session acted on it.
    pub async fn pick(&self, card: CardId) -> Result<bool> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Pick { card, reply })?;
        rx.await.map_err(|_| SessionError::Closed(self.id))
    }

    /// Start the same game over from the first batch.
    pub async fn restart(&self) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Restart { reply })?;
        rx.await.map_err(|_| SessionError::Closed(self.id))
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot { reply })?;
        rx.await.map_err(|_| SessionError::Closed(self.id))
    }

    /// Tear the session down; pending delays never fire.
    pub fn close(&self) {
        let _ = self.commands.send(Command::Close);
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| SessionError::Closed(self.id))
    }
}

/// Receiving end of a session's events.
#[derive(Debug)]
pub struct EventStream {
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

impl EventStream {
    pub(crate) fn new(events: mpsc::UnboundedReceiver<SessionEvent>) -> Self {
        Self { events }
    }

    /// Next event, or `None` once the session has shut down and every
    /// queued event has been read.
    pub async fn recv(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    /// Next already-queued event, without waiting.
    pub fn try_recv(&mut self) -> Option<SessionEvent> {
        self.events.try_recv().ok()
    }
}
