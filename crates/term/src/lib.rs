//! Terminal rendering module.
//!
//! A small framebuffer renderer for the board: [`BoardView`] turns a
//! [`BoardSnapshot`](crate::types::BoardSnapshot) and the front end's input
//! state into a [`FrameBuffer`], and [`TerminalRenderer`] flushes it through
//! crossterm. No ratatui widgets or layout.

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use tui_isolation_types as types;

pub use board_view::{cell_color, BoardView, Scene, Viewport, HELP_TEXT};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
