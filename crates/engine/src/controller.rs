//! Starting and tearing down sessions from the presentation thread.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::channel::Channels;
use crate::config::SessionConfig;
use crate::core::{Engine, IsolationBoard};
use crate::gate::MoveGate;
use crate::message::SessionId;
use crate::session::{SessionHandle, SessionOutcome, SessionThread};
use crate::strategy::{Human, PlayerStrategy, Scripted};
use crate::types::{Controller, GameMode};

type EngineFactory = Box<dyn Fn() -> Box<dyn Engine> + Send>;

/// Owns the (at most one) live session.
///
/// Starting a game always cancels and joins the previous one first, so two
/// session threads never run at once.
pub struct SessionController {
    channels: Arc<Channels>,
    config: SessionConfig,
    engine_factory: EngineFactory,
    current: Option<SessionHandle>,
    next_id: u64,
}

impl SessionController {
    pub fn new(channels: Arc<Channels>, config: SessionConfig) -> Self {
        Self {
            channels,
            config,
            engine_factory: Box::new(|| Box::new(IsolationBoard::new()) as Box<dyn Engine>),
            current: None,
            next_id: 1,
        }
    }

    /// Build each game's engine with `factory` instead of a fresh Isolation board.
    pub fn with_engine_factory(
        mut self,
        factory: impl Fn() -> Box<dyn Engine> + Send + 'static,
    ) -> Self {
        self.engine_factory = Box::new(factory);
        self
    }

    pub fn channels(&self) -> &Arc<Channels> {
        &self.channels
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Id of the live session, if any.
    pub fn current(&self) -> Option<SessionId> {
        self.current.as_ref().map(|h| h.id())
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Cancel any running game, then start `mode` on a fresh engine.
    pub fn new_game(&mut self, mode: GameMode) -> Result<SessionId> {
        self.start_with(|id, channels, config, engine| {
            let players = seats_for(mode, id, &channels, config.seed);
            SessionThread::new(id, engine, players, channels)
                .with_mode(mode)
                .with_config(config)
        })
    }

    /// Cancel any running game, then start the session built by `build`.
    ///
    /// `build` receives the new id, the shared channels, the config and a
    /// fresh engine from the factory.
    pub fn start_with(
        &mut self,
        build: impl FnOnce(SessionId, Arc<Channels>, SessionConfig, Box<dyn Engine>) -> SessionThread,
    ) -> Result<SessionId> {
        self.kill_game();

        let id = SessionId(self.next_id);
        self.next_id += 1;

        let session = build(
            id,
            Arc::clone(&self.channels),
            self.config.clone(),
            (self.engine_factory)(),
        );
        self.current = Some(SessionHandle::start(session)?);
        info!(session = %id, "session started");
        Ok(id)
    }

    /// Cancel the live session and wait until it is gone.
    ///
    /// Posts one cancellation token, blocks until the command backlog is
    /// acknowledged (or its consumer has exited), joins the thread and clears
    /// the handle. Returns `None` without blocking when nothing is running.
    pub fn kill_game(&mut self) -> Option<SessionOutcome> {
        let handle = self.current.take()?;
        let id = handle.id();

        handle.request_cancel();
        let waited = self.channels.commands.join_consumer();

        let outcome = match handle.join() {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(session = %id, error = %format!("{e:#}"), "session ended abnormally");
                SessionOutcome::Aborted
            }
        };

        // Whatever is left had no consumer; acknowledge it here.
        let stale = self.channels.commands.drain();
        debug!(session = %id, ?waited, stale = stale.len(), ?outcome, "session joined");
        Some(outcome)
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.kill_game();
    }
}

fn seats_for(
    mode: GameMode,
    id: SessionId,
    channels: &Arc<Channels>,
    seed: u32,
) -> [Box<dyn PlayerStrategy>; 2] {
    let [first, second] = mode.controllers();
    [
        seat(first, 1, id, channels, seed),
        seat(second, 2, id, channels, seed),
    ]
}

fn seat(
    controller: Controller,
    number: u32,
    id: SessionId,
    channels: &Arc<Channels>,
    seed: u32,
) -> Box<dyn PlayerStrategy> {
    match controller {
        Controller::Human => Box::new(Human::new(
            format!("human {number}"),
            MoveGate::new(Arc::clone(channels), id),
        )),
        Controller::Scripted => {
            let stream = seed
                .wrapping_add((id.0 as u32).wrapping_mul(7919))
                .wrapping_add(number);
            Box::new(Scripted::new(format!("scripted {number}"), stream))
        }
    }
}
