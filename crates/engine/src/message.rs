//! Messages carried by the two channels.
//!
//! Neither direction ever carries an error value; failures surface as the
//! plain [`GameEvent::Aborted`] token.

use std::fmt;

use crate::types::{BoardSnapshot, Coordinate, Player};

/// Identifies one game session. Monotonic per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Simulation-bound items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A raw board coordinate from the presentation layer. Not yet validated.
    Move(Coordinate),
    /// Poison pill: terminate cooperatively.
    Cancel,
    /// The presentation layer has drawn the current board; take the turn.
    Proceed,
}

/// Presentation-bound events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Replace the displayed board.
    SetBoard(BoardSnapshot),
    /// Redraw, then answer with [`Command::Proceed`].
    Draw,
    GameOver { winner: Player },
    /// Start forwarding board clicks.
    MoveWaitStart,
    /// Stop forwarding board clicks.
    MoveWaitEnd,
    /// The session died without finishing (strategy failure).
    Aborted,
}

impl GameEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::SetBoard(_) => "set-board",
            GameEvent::Draw => "draw",
            GameEvent::GameOver { .. } => "game-over",
            GameEvent::MoveWaitStart => "move-wait-start",
            GameEvent::MoveWaitEnd => "move-wait-end",
            GameEvent::Aborted => "aborted",
        }
    }
}

/// An event stamped with the session that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub session: SessionId,
    pub event: GameEvent,
}
