//! Core types module - shared data structures and constants
//!
//! This module defines the plain data passed between the session thread, the
//! rules engine and the terminal front end. Nothing here owns a thread or a
//! lock, so every type can be copied into an event payload and rendered later.
//!
//! # Board Dimensions
//!
//! - **Width**: 7 columns (indexed 0-6)
//! - **Height**: 7 rows (indexed 0-6)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Presentation frame interval (~60 FPS) |
//! | `DEFAULT_TIME_LIMIT_MS` | 500 | Advisory per-move budget |
//!
//! # Examples
//!
//! ```
//! use tui_isolation_types::{Coordinate, GameMode, Player, NO_MOVE};
//!
//! let c = Coordinate::new(2, 3);
//! assert!(c.in_bounds(7, 7));
//! assert!(NO_MOVE.is_sentinel());
//!
//! assert_eq!(Player::One.other(), Player::Two);
//! assert_eq!(GameMode::from_digit('3'), Some(GameMode::HumanVsHuman));
//! ```

use serde::Serialize;

/// Board width in cells
pub const BOARD_WIDTH: u8 = 7;

/// Board height in cells
pub const BOARD_HEIGHT: u8 = 7;

/// Presentation tick interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Per-move time budget handed to strategies
pub const DEFAULT_TIME_LIMIT_MS: u64 = 500;

/// A board position, row first.
///
/// Rows and columns are signed so that the "no move" sentinel `(-1, -1)` and
/// off-board knight jumps can be expressed without wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coordinate {
    pub row: i8,
    pub col: i8,
}

/// Sentinel returned by a strategy (or the move gate) when no move is made
/// this tick. It is never a member of any legal-move set.
pub const NO_MOVE: Coordinate = Coordinate { row: -1, col: -1 };

impl Coordinate {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn is_sentinel(&self) -> bool {
        *self == NO_MOVE
    }

    pub fn in_bounds(&self, width: u8, height: u8) -> bool {
        self.row >= 0 && self.col >= 0 && (self.row as u8) < height && (self.col as u8) < width
    }

    /// Offset by `(d_row, d_col)`, returning `None` on i8 overflow.
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add(d_row)?,
            col: self.col.checked_add(d_col)?,
        })
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(&self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index into per-player arrays (`0` for player one).
    pub fn index(&self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::One => "player 1",
            Player::Two => "player 2",
        }
    }
}

/// Who picks moves for one seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Controller {
    /// Moves arrive from the presentation layer.
    Human,
    /// Moves are computed on the session thread.
    Scripted,
}

/// The four selectable game modes, bound to keys `1`..`4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameMode {
    /// Human plays first against the computer.
    HumanFirst,
    /// Computer plays first against the human.
    HumanSecond,
    /// Two humans share the board.
    HumanVsHuman,
    /// Computer plays itself.
    ScriptedVsScripted,
}

impl GameMode {
    /// Parse a mode-select key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_isolation_types::GameMode;
    ///
    /// assert_eq!(GameMode::from_digit('1'), Some(GameMode::HumanFirst));
    /// assert_eq!(GameMode::from_digit('4'), Some(GameMode::ScriptedVsScripted));
    /// assert_eq!(GameMode::from_digit('5'), None);
    /// ```
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '1' => Some(GameMode::HumanFirst),
            '2' => Some(GameMode::HumanSecond),
            '3' => Some(GameMode::HumanVsHuman),
            '4' => Some(GameMode::ScriptedVsScripted),
            _ => None,
        }
    }

    /// Controllers for player one and player two, in that order.
    pub fn controllers(&self) -> [Controller; 2] {
        match self {
            GameMode::HumanFirst => [Controller::Human, Controller::Scripted],
            GameMode::HumanSecond => [Controller::Scripted, Controller::Human],
            GameMode::HumanVsHuman => [Controller::Human, Controller::Human],
            GameMode::ScriptedVsScripted => [Controller::Scripted, Controller::Scripted],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::HumanFirst => "human-first",
            GameMode::HumanSecond => "human-second",
            GameMode::HumanVsHuman => "human-vs-human",
            GameMode::ScriptedVsScripted => "scripted-vs-scripted",
        }
    }
}

/// Occupancy of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CellState {
    #[default]
    Blank,
    /// Occupied at some point by this player; blocked for the rest of the game.
    Visited(Player),
}

/// Immutable copy of the engine state handed to the presentation thread.
///
/// The session thread is the only owner of live engine state; everything the
/// renderer needs travels in one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major cell states, `width * height` long.
    pub cells: Vec<CellState>,
    /// Last position of each player, indexed by [`Player::index`].
    pub last_moves: [Option<Coordinate>; 2],
    pub active: Player,
    pub legal_moves: Vec<Coordinate>,
    pub move_count: u32,
}

impl BoardSnapshot {
    pub fn empty(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![CellState::Blank; (width as usize) * (height as usize)],
            last_moves: [None, None],
            active: Player::One,
            legal_moves: Vec::new(),
            move_count: 0,
        }
    }

    pub fn cell(&self, at: Coordinate) -> Option<CellState> {
        if !at.in_bounds(self.width, self.height) {
            return None;
        }
        self.cells
            .get((at.row as usize) * (self.width as usize) + (at.col as usize))
            .copied()
    }

    pub fn last_move(&self, player: Player) -> Option<Coordinate> {
        self.last_moves[player.index()]
    }

    pub fn is_legal(&self, at: Coordinate) -> bool {
        self.legal_moves.contains(&at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_never_in_bounds() {
        assert!(!NO_MOVE.in_bounds(BOARD_WIDTH, BOARD_HEIGHT));
        assert!(Coordinate::new(0, 0).in_bounds(BOARD_WIDTH, BOARD_HEIGHT));
        assert!(!Coordinate::new(7, 0).in_bounds(BOARD_WIDTH, BOARD_HEIGHT));
    }

    #[test]
    fn offset_guards_overflow() {
        assert_eq!(Coordinate::new(1, 1).offset(-2, 1), Some(Coordinate::new(-1, 2)));
        assert_eq!(Coordinate::new(i8::MAX, 0).offset(1, 0), None);
    }

    #[test]
    fn mode_controllers_cover_all_seats() {
        assert_eq!(
            GameMode::HumanSecond.controllers(),
            [Controller::Scripted, Controller::Human]
        );
        for c in ['1', '2', '3', '4'] {
            assert!(GameMode::from_digit(c).is_some());
        }
    }

    #[test]
    fn snapshot_cell_lookup_is_row_major() {
        let mut snap = BoardSnapshot::empty(3, 2);
        snap.cells[4] = CellState::Visited(Player::Two);
        assert_eq!(
            snap.cell(Coordinate::new(1, 1)),
            Some(CellState::Visited(Player::Two))
        );
        assert_eq!(snap.cell(Coordinate::new(2, 0)), None);
    }
}
