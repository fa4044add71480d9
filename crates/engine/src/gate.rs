//! Blocking move acquisition for a human turn.

use std::sync::Arc;

use tracing::debug;

use crate::channel::Channels;
use crate::message::{Command, Envelope, GameEvent, SessionId};
use crate::types::{Coordinate, NO_MOVE};

/// How a gate wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A member of the legal set.
    Move(Coordinate),
    /// A cancellation token arrived and was re-posted.
    Cancelled,
}

impl Resolution {
    /// The coordinate handed back to the session, [`NO_MOVE`] when cancelled.
    pub fn into_move(self) -> Coordinate {
        match self {
            Resolution::Move(mv) => mv,
            Resolution::Cancelled => NO_MOVE,
        }
    }
}

/// Blocks the session thread until the presentation layer supplies a legal
/// move or the game is cancelled.
///
/// Candidates that are not legal are dropped and the wait goes on: clicks can
/// go stale on the round trip through the presentation layer. A cancellation
/// token is put back on the command queue before being acknowledged, so the
/// session loop's next receive sees it too and the queue never looks settled
/// in between.
#[derive(Debug, Clone)]
pub struct MoveGate {
    channels: Arc<Channels>,
    session: SessionId,
}

impl MoveGate {
    pub fn new(channels: Arc<Channels>, session: SessionId) -> Self {
        Self { channels, session }
    }

    /// Wait for a move in `legal_moves`. Emits move-wait-start before blocking
    /// and move-wait-end once resolved.
    pub fn await_move(&self, legal_moves: &[Coordinate]) -> Resolution {
        self.emit(GameEvent::MoveWaitStart);

        let commands = &self.channels.commands;
        let resolution = loop {
            let resolved = match commands.get() {
                Command::Move(mv) if legal_moves.contains(&mv) => Some(Resolution::Move(mv)),
                Command::Move(mv) => {
                    debug!(session = %self.session, candidate = %mv, "discarding illegal candidate");
                    None
                }
                Command::Cancel => {
                    commands.put(Command::Cancel);
                    Some(Resolution::Cancelled)
                }
                Command::Proceed => {
                    debug!(session = %self.session, "discarding proceed token during move wait");
                    None
                }
            };
            commands.task_done();
            if let Some(r) = resolved {
                break r;
            }
        };

        self.emit(GameEvent::MoveWaitEnd);
        resolution
    }

    fn emit(&self, event: GameEvent) {
        self.channels.events.put(Envelope {
            session: self.session,
            event,
        });
    }
}
