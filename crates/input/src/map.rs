//! Key and mouse mapping from terminal events to front-end inputs.

use crate::types::{Coordinate, GameMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Cursor step on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Everything the presentation loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Cancel any game and start a new one.
    SelectMode(GameMode),
    /// Cancel any game and exit.
    Quit,
    MoveCursor(Direction),
    /// Submit the cell under the cursor.
    Submit,
    /// Left click at a terminal position (column, row).
    Click { column: u16, row: u16 },
    /// Pointer moved to a terminal position (column, row).
    Hover { column: u16, row: u16 },
}

/// Map keyboard input to a front-end input.
pub fn map_key(key: KeyEvent) -> Option<Input> {
    if should_quit(key) {
        return Some(Input::Quit);
    }
    match key.code {
        KeyCode::Char(c @ '1'..='4') => GameMode::from_digit(c).map(Input::SelectMode),

        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Input::MoveCursor(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Input::MoveCursor(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Input::MoveCursor(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Input::MoveCursor(Direction::Right))
        }

        KeyCode::Enter | KeyCode::Char(' ') => Some(Input::Submit),

        _ => None,
    }
}

/// Map mouse input. Only left-button releases and pointer motion matter.
pub fn map_mouse(mouse: MouseEvent) -> Option<Input> {
    match mouse.kind {
        MouseEventKind::Up(MouseButton::Left) => Some(Input::Click {
            column: mouse.column,
            row: mouse.row,
        }),
        MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => Some(Input::Hover {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}

/// Check if key should quit the application.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Step the board cursor, clamped to a `width` x `height` board.
pub fn move_cursor(at: Coordinate, dir: Direction, width: u8, height: u8) -> Coordinate {
    let max_row = height.saturating_sub(1) as i8;
    let max_col = width.saturating_sub(1) as i8;
    let (row, col) = match dir {
        Direction::Up => (at.row - 1, at.col),
        Direction::Down => (at.row + 1, at.col),
        Direction::Left => (at.row, at.col - 1),
        Direction::Right => (at.row, at.col + 1),
    };
    Coordinate::new(row.clamp(0, max_row), col.clamp(0, max_col))
}
