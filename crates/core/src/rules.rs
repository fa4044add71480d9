//! The narrow rules interface consumed by the session thread.
//!
//! The session never looks inside an engine; it only asks for legal moves,
//! applies one of them, and reads who is to move. Strategies receive a shared
//! borrow for the duration of a single call, so they cannot keep engine state
//! alive past it.

use crate::types::{BoardSnapshot, Coordinate, Player};

/// A two-player, turn-based rules engine.
pub trait Engine: Send {
    /// Moves available to the active player. Empty means the game is over.
    fn legal_moves(&self) -> Vec<Coordinate>;

    /// Apply a move for the active player and pass the turn.
    ///
    /// Callers only pass members of [`Engine::legal_moves`].
    fn apply_move(&mut self, mv: Coordinate);

    fn active_player(&self) -> Player;

    fn inactive_player(&self) -> Player;

    /// Most recent position of `player`, `None` before their first move.
    fn last_move(&self, player: Player) -> Option<Coordinate>;

    /// Number of moves applied so far, both players combined.
    fn move_count(&self) -> u32;

    /// Owned copy of the state for the presentation thread.
    fn snapshot(&self) -> BoardSnapshot;
}
