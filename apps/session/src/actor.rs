//! Task that owns one game session.
//!
//! The session itself is single-threaded; this task serialises every pick
//! and every fired delay through one loop, so the session never sees two
//! inputs at once.

use crate::handle::{SessionEvent, SessionSnapshot};
use crate::summary::GameSummary;
use chrono::{DateTime, Utc};
use match_core::{CardId, GameEvent, GameSession, Step, Timer};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug)]
pub(crate) enum Command {
    Pick {
        card: CardId,
        reply: oneshot::Sender<bool>,
    },
    Restart {
        reply: oneshot::Sender<()>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Close,
}

enum Wake {
    Command(Option<Command>),
    Timer(Timer),
}

pub(crate) struct SessionActor {
    id: Uuid,
    session: GameSession,
    commands: mpsc::UnboundedReceiver<Command>,
    timers_tx: mpsc::UnboundedSender<Timer>,
    timers: mpsc::UnboundedReceiver<Timer>,
    events: mpsc::UnboundedSender<SessionEvent>,
    pending: Option<JoinHandle<()>>,
    started_at: DateTime<Utc>,
    receiver_gone: bool,
}

impl SessionActor {
    pub(crate) fn new(
        id: Uuid,
        session: GameSession,
        commands: mpsc::UnboundedReceiver<Command>,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        let (timers_tx, timers) = mpsc::unbounded_channel();
        Self {
            id,
            session,
            commands,
            timers_tx,
            timers,
            events,
            pending: None,
            started_at: Utc::now(),
            receiver_gone: false,
        }
    }

    pub(crate) async fn run(mut self) {
        info!(
            session = %self.id,
            variant = self.session.variant().as_str(),
            cards = self.session.cards().len(),
            "session running"
        );
        let step = self.session.start();
        self.apply(step);

        loop {
            let wake = tokio::select! {
                command = self.commands.recv() => Wake::Command(command),
                Some(timer) = self.timers.recv() => Wake::Timer(timer),
            };
            match wake {
                Wake::Command(Some(command)) => {
                    if !self.handle(command) {
                        break;
                    }
                }
                // Every handle dropped.
                Wake::Command(None) => break,
                Wake::Timer(timer) => {
                    let step = self.session.fire(timer);
                    self.apply(step);
                }
            }
        }

        self.cancel_pending();
        self.session.close();
        info!(session = %self.id, "session closed");
    }

    /// Returns false once the session should stop.
    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Pick { card, reply } => {
                let step = self.session.pick(card);
                let accepted = !step.is_ignored();
                self.apply(step);
                let _ = reply.send(accepted);
            }
            Command::Restart { reply } => {
                self.cancel_pending();
                self.started_at = Utc::now();
                let step = self.session.restart();
                debug!(session = %self.id, "session restarted");
                self.apply(step);
                let _ = reply.send(());
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(SessionSnapshot::capture(self.id, &self.session));
            }
            Command::Close => return false,
        }
        true
    }

    fn apply(&mut self, step: Step) {
        let Step { events, timer } = step;
        for event in events {
            let finished = matches!(event, GameEvent::GameComplete { .. });
            self.emit(SessionEvent::Game(event));
            if finished {
                let summary = GameSummary::new(
                    self.id,
                    self.session.variant(),
                    self.session.score(),
                    self.started_at,
                    Utc::now(),
                );
                info!(
                    session = %self.id,
                    moves = summary.moves,
                    accuracy = summary.accuracy,
                    "game finished"
                );
                self.emit(SessionEvent::Finished(summary));
            }
        }
        if let Some(timer) = timer {
            self.schedule(timer);
        }
    }

    fn schedule(&mut self, timer: Timer) {
        self.cancel_pending();
        debug!(
            session = %self.id,
            delay_ms = timer.delay.as_millis() as u64,
            generation = timer.generation,
            "timer scheduled"
        );
        let timers = self.timers_tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(timer.delay).await;
            // Fails once the session task is gone.
            let _ = timers.send(timer);
        }));
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        if self.events.send(event).is_err() && !self.receiver_gone {
            self.receiver_gone = true;
            warn!(session = %self.id, "event receiver dropped, discarding events");
        }
    }
}
