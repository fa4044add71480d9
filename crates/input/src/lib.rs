//! Terminal input module.
//!
//! Maps `crossterm` key and mouse events into [`Input`] values for the
//! presentation loop. No state lives here; the loop owns the cursor.

pub mod map;

pub use tui_isolation_types as types;

pub use map::{map_key, map_mouse, move_cursor, should_quit, Direction, Input};
