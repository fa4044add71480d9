//! BoardView: maps a board snapshot plus front-end state into a framebuffer.
//!
//! Pure (no I/O), so layout and coloring can be unit-tested.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BoardSnapshot, CellState, Coordinate, Player};

const LIGHT: Rgb = Rgb::new(0xc0, 0xc0, 0xc0);
const DARK: Rgb = Rgb::new(0x80, 0x80, 0x80);
const BLOCKED: Rgb = Rgb::new(0x10, 0x10, 0x10);
const RED: Rgb = Rgb::new(0xbb, 0x00, 0x00);
const BLUE: Rgb = Rgb::new(0x00, 0x00, 0xbb);
const HOVER: Rgb = Rgb::new(0x00, 0xbb, 0x00);
const LEGAL: Rgb = Rgb::new(0x00, 0x44, 0x00);
const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

/// Shown before the first game.
pub const HELP_TEXT: [&str; 6] = [
    "Press ESC or Ctrl+C to close this window at any time.",
    "",
    "Press 1 to start a new game as player 1 against the AI.",
    "Press 2 to start a new game as player 2 against the AI.",
    "Press 3 to start a game with two human players.",
    "Press 4 to watch the AI play against itself.",
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything one frame needs. Borrowed from the presentation loop.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub board: Option<&'a BoardSnapshot>,
    /// Board clicks are being forwarded.
    pub input_mode: bool,
    pub cursor: Coordinate,
    pub winner: Option<Player>,
    /// One-line status override (e.g. an aborted session).
    pub banner: Option<&'a str>,
}

pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2:1 roughly squares a cell in most terminal fonts.
        Self { cell_w: 6, cell_h: 3 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Top-left terminal position of the board for a `width` x `height` board.
    fn origin(&self, viewport: Viewport, width: u8, height: u8) -> (u16, u16) {
        let px_w = width as u16 * self.cell_w;
        // One status row under the board.
        let px_h = height as u16 * self.cell_h + 2;
        (
            viewport.width.saturating_sub(px_w) / 2,
            viewport.height.saturating_sub(px_h) / 2,
        )
    }

    /// Board cell under a terminal position, if any.
    pub fn cell_at(&self, viewport: Viewport, board: &BoardSnapshot, column: u16, row: u16) -> Option<Coordinate> {
        let (ox, oy) = self.origin(viewport, board.width, board.height);
        if column < ox || row < oy {
            return None;
        }
        let c = (column - ox) / self.cell_w;
        let r = (row - oy) / self.cell_h;
        let at = Coordinate::new(r.min(i8::MAX as u16) as i8, c.min(i8::MAX as u16) as i8);
        at.in_bounds(board.width, board.height).then_some(at)
    }

    pub fn render_into(&self, scene: &Scene<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let Some(board) = scene.board else {
            self.draw_help(fb, viewport);
            return;
        };

        let (ox, oy) = self.origin(viewport, board.width, board.height);
        for row in 0..board.height as i8 {
            for col in 0..board.width as i8 {
                let at = Coordinate::new(row, col);
                let bg = cell_color(board, at, scene.input_mode, scene.cursor);
                let x = ox + col as u16 * self.cell_w;
                let y = oy + row as u16 * self.cell_h;
                fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', CellStyle::new(WHITE, bg));
                if scene.input_mode && at == scene.cursor {
                    fb.put_str_centered(x, self.cell_w, y + self.cell_h / 2, "+", CellStyle::new(WHITE, bg));
                }
            }
        }

        if let Some(winner) = scene.winner {
            if let Some(at) = board.last_move(winner) {
                let x = ox + at.col as u16 * self.cell_w;
                let y = oy + at.row as u16 * self.cell_h + self.cell_h / 2;
                let bg = cell_color(board, at, false, scene.cursor);
                fb.put_str_centered(x, self.cell_w, y, "W", CellStyle::new(WHITE, bg).bold());
            }
        }

        let status = status_line(board, scene);
        let board_w = board.width as u16 * self.cell_w;
        let status_y = oy + board.height as u16 * self.cell_h + 1;
        fb.put_str_centered(ox, board_w, status_y, &status, CellStyle::new(WHITE, BLACK));
    }

    fn draw_help(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let top = viewport.height.saturating_sub(HELP_TEXT.len() as u16) / 2;
        for (i, line) in HELP_TEXT.iter().enumerate() {
            fb.put_str_centered(0, viewport.width, top + i as u16, line, CellStyle::default());
        }
    }
}

/// Background for one board cell.
///
/// Last moves win over everything; legal cells only light up while a human
/// is choosing, and the non-hovered highlight waits until both players have
/// placed (before that every blank cell is legal).
pub fn cell_color(board: &BoardSnapshot, at: Coordinate, input_mode: bool, hover: Coordinate) -> Rgb {
    if board.last_move(Player::One) == Some(at) {
        return RED;
    }
    if board.last_move(Player::Two) == Some(at) {
        return BLUE;
    }
    match board.cell(at) {
        Some(CellState::Blank) => {
            let legal = input_mode && board.is_legal(at);
            if legal && at == hover {
                HOVER
            } else if legal && board.move_count > 1 {
                LEGAL
            } else if (at.row + at.col) % 2 == 0 {
                LIGHT
            } else {
                DARK
            }
        }
        _ => BLOCKED,
    }
}

fn status_line(board: &BoardSnapshot, scene: &Scene<'_>) -> String {
    if let Some(banner) = scene.banner {
        return banner.to_string();
    }
    if let Some(winner) = scene.winner {
        return format!("Game over: {} wins. Press 1-4 for a new game.", winner.as_str());
    }
    let color = match board.active {
        Player::One => "red",
        Player::Two => "blue",
    };
    if scene.input_mode {
        format!("{} ({color}): choose a square", board.active.as_str())
    } else {
        format!("{} ({color}) to move", board.active.as_str())
    }
}
