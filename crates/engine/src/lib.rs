//! Session coordination core.
//!
//! Two threads cooperate through two queues:
//!
//! - the **presentation thread** never blocks; it polls [`EventChannel`] once
//!   per frame, draws, and forwards proceed tokens and board clicks
//! - the **session thread** owns the engine and blocks only while waiting for
//!   a proceed token or, on a human turn, inside the [`MoveGate`]
//!
//! Cancellation is a poison pill on [`CommandChannel`], never a preemptive
//! kill. [`SessionController::kill_game`] posts it and waits until every
//! queued command has been acknowledged before clearing the session.
//!
//! # Modules
//!
//! - [`channel`]: FIFO work queues with acknowledgement and join
//! - [`message`]: command and event vocabularies
//! - [`gate`]: blocking, validating move acquisition
//! - [`strategy`]: the [`PlayerStrategy`] trait with [`Human`] and [`Scripted`]
//! - [`session`]: the per-game thread and its handle
//! - [`controller`]: `new_game` / `kill_game`
//! - [`clock`], [`config`], [`record`]: time budget, env config, game history

pub mod channel;
pub mod clock;
pub mod config;
pub mod controller;
pub mod gate;
pub mod message;
pub mod record;
pub mod session;
pub mod strategy;

pub use tui_isolation_core as core;
pub use tui_isolation_types as types;

pub use channel::{Channels, CommandChannel, EventChannel, JoinOutcome, WorkQueue};
pub use clock::TimeBudget;
pub use config::SessionConfig;
pub use controller::SessionController;
pub use gate::{MoveGate, Resolution};
pub use message::{Command, Envelope, GameEvent, SessionId};
pub use record::{GameRecord, MoveEntry};
pub use session::{SessionHandle, SessionOutcome, SessionThread};
pub use strategy::{Human, PlayerStrategy, Scripted};
