//! Board module - Isolation rules on a 7x7 grid
//!
//! Each player's first move may land on any blank cell. After that a player
//! jumps like a chess knight from their last position to a blank cell. Every
//! cell a player has stood on stays blocked, so the board fills up until the
//! player to move is stuck; the other player wins.
//!
//! Cells are stored in a flat row-major array: index = row * WIDTH + col.

use arrayvec::ArrayVec;

use crate::rules::Engine;
use crate::types::{BoardSnapshot, CellState, Coordinate, Player, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Knight jumps as (d_row, d_col).
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Isolation game state.
#[derive(Debug, Clone, PartialEq)]
pub struct IsolationBoard {
    cells: [CellState; BOARD_SIZE],
    last_moves: [Option<Coordinate>; 2],
    active: Player,
    move_count: u32,
}

impl IsolationBoard {
    /// Empty board, player one to move.
    pub fn new() -> Self {
        Self {
            cells: [CellState::Blank; BOARD_SIZE],
            last_moves: [None, None],
            active: Player::One,
            move_count: 0,
        }
    }

    #[inline(always)]
    fn index(at: Coordinate) -> Option<usize> {
        if !at.in_bounds(BOARD_WIDTH, BOARD_HEIGHT) {
            return None;
        }
        Some((at.row as usize) * (BOARD_WIDTH as usize) + (at.col as usize))
    }

    /// Get cell at `at`; `None` if out of bounds.
    pub fn get(&self, at: Coordinate) -> Option<CellState> {
        Self::index(at).map(|i| self.cells[i])
    }

    /// Check if position is within bounds and never visited.
    pub fn is_blank(&self, at: Coordinate) -> bool {
        matches!(self.get(at), Some(CellState::Blank))
    }

    /// Blank knight jumps from `from`. At most eight, so no allocation.
    pub fn knight_moves(&self, from: Coordinate) -> ArrayVec<Coordinate, 8> {
        let mut out = ArrayVec::new();
        for &(dr, dc) in KNIGHT_OFFSETS.iter() {
            if let Some(to) = from.offset(dr, dc) {
                if self.is_blank(to) {
                    out.push(to);
                }
            }
        }
        out
    }

    fn blank_cells(&self) -> Vec<Coordinate> {
        let mut out = Vec::with_capacity(BOARD_SIZE);
        for row in 0..BOARD_HEIGHT as i8 {
            for col in 0..BOARD_WIDTH as i8 {
                let at = Coordinate::new(row, col);
                if self.is_blank(at) {
                    out.push(at);
                }
            }
        }
        out
    }
}

impl Default for IsolationBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for IsolationBoard {
    fn legal_moves(&self) -> Vec<Coordinate> {
        match self.last_moves[self.active.index()] {
            None => self.blank_cells(),
            Some(from) => self.knight_moves(from).to_vec(),
        }
    }

    fn apply_move(&mut self, mv: Coordinate) {
        let Some(i) = Self::index(mv) else {
            debug_assert!(false, "apply_move off the board: {mv}");
            return;
        };
        self.cells[i] = CellState::Visited(self.active);
        self.last_moves[self.active.index()] = Some(mv);
        self.active = self.active.other();
        self.move_count += 1;
    }

    fn active_player(&self) -> Player {
        self.active
    }

    fn inactive_player(&self) -> Player {
        self.active.other()
    }

    fn last_move(&self, player: Player) -> Option<Coordinate> {
        self.last_moves[player.index()]
    }

    fn move_count(&self) -> u32 {
        self.move_count
    }

    fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells: self.cells.to_vec(),
            last_moves: self.last_moves,
            active: self.active,
            legal_moves: self.legal_moves(),
            move_count: self.move_count,
        }
    }
}
