//! Move-selection policies.
//!
//! A strategy is handed a shared borrow of the engine, the legal moves and a
//! live time budget, and answers with one coordinate. Rules for new
//! strategies:
//!
//! - return a member of `legal_moves`, or [`NO_MOVE`] to pass the tick
//! - do not keep anything borrowed from the engine past the call
//!
//! Errors are not caught by the session; they end that session's thread.

use anyhow::Result;
use tracing::debug;

use crate::clock::TimeBudget;
use crate::core::{Engine, SimpleRng};
use crate::gate::{MoveGate, Resolution};
use crate::types::{Coordinate, NO_MOVE};

/// Produces one move per turn.
pub trait PlayerStrategy: Send {
    fn select_move(
        &mut self,
        engine: &dyn Engine,
        legal_moves: &[Coordinate],
        time_left: &TimeBudget,
    ) -> Result<Coordinate>;

    /// Display name used in logs and game records.
    fn name(&self) -> &str;

    /// Whether this strategy waits on the presentation layer.
    fn is_interactive(&self) -> bool {
        false
    }

    /// Whether the last `select_move` gave up because the game was cancelled.
    fn was_cancelled(&self) -> bool {
        false
    }
}

/// Moves come from the presentation layer through a [`MoveGate`].
///
/// The only strategy that may block indefinitely.
#[derive(Debug)]
pub struct Human {
    name: String,
    gate: MoveGate,
    cancelled: bool,
}

impl Human {
    pub fn new(name: impl Into<String>, gate: MoveGate) -> Self {
        Self {
            name: name.into(),
            gate,
            cancelled: false,
        }
    }
}

impl PlayerStrategy for Human {
    fn select_move(
        &mut self,
        _engine: &dyn Engine,
        legal_moves: &[Coordinate],
        _time_left: &TimeBudget,
    ) -> Result<Coordinate> {
        let resolution = self.gate.await_move(legal_moves);
        self.cancelled = resolution == Resolution::Cancelled;
        Ok(resolution.into_move())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn was_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Uniform random choice over the legal moves.
#[derive(Debug)]
pub struct Scripted {
    name: String,
    rng: SimpleRng,
}

impl Scripted {
    pub fn new(name: impl Into<String>, seed: u32) -> Self {
        Self {
            name: name.into(),
            rng: SimpleRng::new(seed),
        }
    }
}

impl PlayerStrategy for Scripted {
    fn select_move(
        &mut self,
        _engine: &dyn Engine,
        legal_moves: &[Coordinate],
        time_left: &TimeBudget,
    ) -> Result<Coordinate> {
        let Some(&mv) = self.rng.choose(legal_moves) else {
            return Ok(NO_MOVE);
        };
        debug!(ai = %self.name, chosen = %mv, left_ms = time_left.time_left_ms(), "scripted move");
        Ok(mv)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
