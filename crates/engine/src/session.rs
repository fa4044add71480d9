//! The session thread: owns one running game.
//!
//! ```text
//!            legal moves empty ─────────────► game-over ─┐
//!   RUNNING ─ draw ─► AWAITING_MOVE ─ proceed ─► turn ─┐  │
//!      ▲                   │                          │  ▼
//!      └──────── move applied / no move ──────────────┘ TERMINATED
//!                          └───────── cancel ──────────────▲
//! ```
//!
//! The engine never leaves this thread. The presentation side only sees
//! [`BoardSnapshot`](crate::types::BoardSnapshot) copies inside events.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, error, info, warn};

use crate::channel::Channels;
use crate::clock::TimeBudget;
use crate::config::SessionConfig;
use crate::core::Engine;
use crate::message::{Command, Envelope, GameEvent, SessionId};
use crate::record::GameRecord;
use crate::strategy::PlayerStrategy;
use crate::types::{Coordinate, GameMode, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Running,
    AwaitingMove,
    Terminated,
}

/// Result of one proceed-triggered turn.
enum Turn {
    Moved,
    /// The strategy returned the no-move sentinel.
    Passed,
    /// A human wait was cancelled; the token is still queued.
    Cancelled,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The player to move was stuck; `winner` is the other one.
    GameOver { winner: Player },
    /// A cancellation token was received.
    Cancelled,
    /// The thread failed or panicked. Only reported by the controller.
    Aborted,
}

/// One game, ready to run on its own thread.
pub struct SessionThread {
    id: SessionId,
    mode: Option<GameMode>,
    engine: Box<dyn Engine>,
    players: [Box<dyn PlayerStrategy>; 2],
    channels: Arc<Channels>,
    config: SessionConfig,
    state: SessionState,
    record: GameRecord,
}

impl SessionThread {
    /// `players[0]` moves for player one, `players[1]` for player two.
    pub fn new(
        id: SessionId,
        engine: Box<dyn Engine>,
        players: [Box<dyn PlayerStrategy>; 2],
        channels: Arc<Channels>,
    ) -> Self {
        Self {
            id,
            mode: None,
            engine,
            players,
            channels,
            config: SessionConfig::default(),
            state: SessionState::Running,
            record: GameRecord::new(id.0, None),
        }
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = Some(mode);
        self.record.mode = Some(mode);
        self
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Play until game over or cancellation, on the calling thread.
    ///
    /// Strategy errors are returned as-is; the caller decides what dies.
    pub fn run(mut self) -> Result<SessionOutcome> {
        info!(session = %self.id, mode = self.mode.map(|m| m.as_str()), "== begin game ==");
        self.emit(GameEvent::SetBoard(self.engine.snapshot()));

        let mut legal = Vec::new();
        let mut redraw = true;
        loop {
            if redraw {
                self.transition(SessionState::Running);
                legal = self.engine.legal_moves();
                if legal.is_empty() {
                    return Ok(self.finish());
                }
                self.emit(GameEvent::Draw);
                self.transition(SessionState::AwaitingMove);
            }

            let command = self.channels.commands.get();
            let turn = match command {
                Command::Cancel => {
                    self.channels.commands.task_done();
                    return Ok(self.cancelled());
                }
                Command::Move(mv) => {
                    debug!(session = %self.id, stale = %mv, "discarding coordinate outside a move wait");
                    None
                }
                Command::Proceed => Some(self.play_turn(&legal)),
            };
            self.channels.commands.task_done();

            redraw = match turn {
                None => false,
                Some(Ok(Turn::Moved | Turn::Passed)) => true,
                Some(Ok(Turn::Cancelled)) => return Ok(self.wind_down()),
                Some(Err(e)) => {
                    self.transition(SessionState::Terminated);
                    return Err(e.context(format!("session {} move selection failed", self.id)));
                }
            };
        }
    }

    fn play_turn(&mut self, legal: &[Coordinate]) -> Result<Turn> {
        let player = self.engine.active_player();
        let budget = TimeBudget::start(self.config.time_limit);

        let strategy = &mut self.players[player.index()];
        let mv = strategy.select_move(self.engine.as_ref(), legal, &budget)?;
        if mv.is_sentinel() {
            if strategy.was_cancelled() {
                return Ok(Turn::Cancelled);
            }
            debug!(session = %self.id, player = player.as_str(), "no move this tick");
            return Ok(Turn::Passed);
        }
        if !legal.contains(&mv) {
            bail!("{} chose {mv}, which is not a legal move", strategy.name());
        }

        let took_ms = budget.elapsed_ms();
        if budget.expired() {
            warn!(
                session = %self.id,
                player = player.as_str(),
                limit_ms = budget.limit().as_millis() as u64,
                overrun_ms = -budget.time_left_ms(),
                "move exceeded its time budget"
            );
        }
        info!(session = %self.id, player = player.as_str(), mv = %mv, took_ms, "move");

        self.engine.apply_move(mv);
        self.record.push(player, mv, took_ms);
        self.emit(GameEvent::SetBoard(self.engine.snapshot()));
        Ok(Turn::Moved)
    }

    /// The move wait saw the cancellation token and put it back. Acknowledge
    /// everything up to and including it without emitting anything.
    fn wind_down(&mut self) -> SessionOutcome {
        loop {
            let command = self.channels.commands.get();
            self.channels.commands.task_done();
            if command == Command::Cancel {
                return self.cancelled();
            }
            debug!(session = %self.id, ?command, "discarding command after cancellation");
        }
    }

    fn cancelled(&mut self) -> SessionOutcome {
        self.transition(SessionState::Terminated);
        info!(session = %self.id, moves = self.record.moves.len(), "== end game (cancelled) ==");
        SessionOutcome::Cancelled
    }

    fn finish(&mut self) -> SessionOutcome {
        let winner = self.engine.inactive_player();
        self.emit(GameEvent::GameOver { winner });
        self.transition(SessionState::Terminated);

        self.record.winner = Some(winner);
        info!(
            session = %self.id,
            winner = winner.as_str(),
            moves = self.record.moves.len(),
            "== end game (game over) =="
        );
        if let Some(path) = &self.config.record_path {
            if let Err(e) = self.record.append_to(path) {
                warn!(session = %self.id, error = %format!("{e:#}"), "could not write game record");
            }
        }
        SessionOutcome::GameOver { winner }
    }

    fn transition(&mut self, to: SessionState) {
        if self.state != to {
            debug!(session = %self.id, from = ?self.state, to = ?to, "session state");
            self.state = to;
        }
    }

    fn emit(&self, event: GameEvent) {
        self.channels.events.put(Envelope {
            session: self.id,
            event,
        });
    }
}

/// Runs on the way out of the session thread, including during a panic.
struct ExitGuard {
    channels: Arc<Channels>,
    session: SessionId,
    clean: bool,
}

impl Drop for ExitGuard {
    fn drop(&mut self) {
        if !self.clean {
            self.channels.events.put(Envelope {
                session: self.session,
                event: GameEvent::Aborted,
            });
        }
        self.channels.commands.detach_consumer();
    }
}

/// Handle to a running session thread: start, request cancel, join.
pub struct SessionHandle {
    id: SessionId,
    channels: Arc<Channels>,
    thread: JoinHandle<Result<SessionOutcome>>,
}

impl SessionHandle {
    /// Spawn `session` on a new named thread.
    pub fn start(session: SessionThread) -> Result<Self> {
        let id = session.id();
        let channels = Arc::clone(&session.channels);
        channels.commands.attach_consumer();

        let guard_channels = Arc::clone(&channels);
        let spawned = thread::Builder::new()
            .name(format!("session-{}", id.0))
            .spawn(move || {
                let mut guard = ExitGuard {
                    channels: guard_channels,
                    session: id,
                    clean: false,
                };
                let result = session.run();
                match &result {
                    Ok(_) => guard.clean = true,
                    Err(e) => error!(session = %id, error = %format!("{e:#}"), "session thread failed"),
                }
                result
            });

        match spawned {
            Ok(thread) => Ok(Self {
                id,
                channels,
                thread,
            }),
            Err(e) => {
                channels.commands.detach_consumer();
                Err(e).context("spawn session thread")
            }
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Post the poison pill. Does not wait.
    pub fn request_cancel(&self) {
        self.channels.commands.put(Command::Cancel);
    }

    /// Wait for the thread to exit. A panic becomes an error.
    pub fn join(self) -> Result<SessionOutcome> {
        match self.thread.join() {
            Ok(result) => result,
            Err(payload) => {
                let msg = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".to_string());
                Err(anyhow!("session {} panicked: {msg}", self.id))
            }
        }
    }
}
