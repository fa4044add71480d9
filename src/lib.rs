//! Terminal Isolation (workspace facade crate).
//!
//! Re-exports the member crates as `tui_isolation::{types, core, engine,
//! input, term}` and adds the presentation loop used by the binary.

pub use tui_isolation_core as core;
pub use tui_isolation_engine as engine;
pub use tui_isolation_input as input;
pub use tui_isolation_term as term;
pub use tui_isolation_types as types;

pub mod app;
pub mod logging;

pub use app::{Flow, PresentationLoop};
