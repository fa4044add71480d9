//! Rules module - the game engine behind the session thread
//!
//! This crate has **no dependencies** on threads, terminals, or channels. It
//! provides:
//!
//! - [`rules`]: the [`Engine`] trait, the only surface the session core sees
//! - [`board`]: [`IsolationBoard`], a 7x7 Isolation implementation of it
//! - [`rng`]: a seeded LCG used by scripted players
//!
//! # Example
//!
//! ```
//! use tui_isolation_core::{Engine, IsolationBoard};
//! use tui_isolation_types::{Coordinate, Player};
//!
//! let mut board = IsolationBoard::new();
//! assert_eq!(board.legal_moves().len(), 49);
//!
//! board.apply_move(Coordinate::new(3, 3));
//! assert_eq!(board.active_player(), Player::Two);
//! assert_eq!(board.last_move(Player::One), Some(Coordinate::new(3, 3)));
//! ```

pub mod board;
pub mod rng;
pub mod rules;

pub use tui_isolation_types as types;

pub use board::IsolationBoard;
pub use rng::SimpleRng;
pub use rules::Engine;
