//! The presentation loop's state: what is on screen and what to forward.
//!
//! Nothing here blocks except [`SessionController::kill_game`], which is
//! called on a mode switch, quit, game over or abort. Events are taken one at
//! a time with a non-blocking read, and every one is acknowledged.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::engine::{Channels, Command, Envelope, GameEvent, SessionController};
use crate::input::{move_cursor, Input};
use crate::term::{BoardView, FrameBuffer, Scene, Viewport};
use crate::types::{BoardSnapshot, Coordinate, Player, BOARD_HEIGHT, BOARD_WIDTH};

/// What the main loop should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct PresentationLoop {
    controller: SessionController,
    channels: Arc<Channels>,
    view: BoardView,
    board: Option<BoardSnapshot>,
    input_mode: bool,
    cursor: Coordinate,
    winner: Option<Player>,
    banner: Option<String>,
}

impl PresentationLoop {
    pub fn new(controller: SessionController) -> Self {
        let channels = Arc::clone(controller.channels());
        Self {
            controller,
            channels,
            view: BoardView::default(),
            board: None,
            input_mode: false,
            cursor: Coordinate::new(BOARD_HEIGHT as i8 / 2, BOARD_WIDTH as i8 / 2),
            winner: None,
            banner: None,
        }
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn board(&self) -> Option<&BoardSnapshot> {
        self.board.as_ref()
    }

    pub fn input_mode(&self) -> bool {
        self.input_mode
    }

    pub fn cursor(&self) -> Coordinate {
        self.cursor
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Handle at most one pending event. Returns whether there was one.
    pub fn poll_event(&mut self) -> bool {
        let Some(envelope) = self.channels.events.try_get() else {
            return false;
        };
        self.handle_event(envelope);
        self.channels.events.task_done();
        true
    }

    fn handle_event(&mut self, envelope: Envelope) {
        if self.controller.current() != Some(envelope.session) {
            debug!(session = %envelope.session, kind = envelope.event.kind(), "dropping event from a finished session");
            return;
        }

        match envelope.event {
            GameEvent::SetBoard(board) => self.board = Some(board),
            GameEvent::Draw => {
                // The next frame shows the current board; let the turn start.
                self.channels.commands.put(Command::Proceed);
            }
            GameEvent::MoveWaitStart => self.input_mode = true,
            GameEvent::MoveWaitEnd => self.input_mode = false,
            GameEvent::GameOver { winner } => {
                info!(session = %envelope.session, winner = winner.as_str(), "game over");
                self.input_mode = false;
                self.winner = Some(winner);
                self.controller.kill_game();
            }
            GameEvent::Aborted => {
                self.input_mode = false;
                self.banner = Some("Session aborted. Press 1-4 for a new game.".to_string());
                self.controller.kill_game();
            }
        }
    }

    pub fn handle_input(&mut self, input: Input, viewport: Viewport) -> Result<Flow> {
        match input {
            Input::Quit => {
                self.controller.kill_game();
                return Ok(Flow::Quit);
            }
            Input::SelectMode(mode) => {
                self.input_mode = false;
                self.winner = None;
                self.banner = None;
                let id = self.controller.new_game(mode)?;
                info!(session = %id, mode = mode.as_str(), "new game");
            }
            Input::MoveCursor(dir) => {
                let (w, h) = self.board_dims();
                self.cursor = move_cursor(self.cursor, dir, w, h);
            }
            Input::Submit => self.submit(self.cursor),
            Input::Click { column, row } => {
                if let Some(at) = self.cell_at(viewport, column, row) {
                    self.cursor = at;
                    self.submit(at);
                }
            }
            Input::Hover { column, row } => {
                if let Some(at) = self.cell_at(viewport, column, row) {
                    self.cursor = at;
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Cancel whatever is running. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        self.controller.kill_game();
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            board: self.board.as_ref(),
            input_mode: self.input_mode,
            cursor: self.cursor,
            winner: self.winner,
            banner: self.banner.as_deref(),
        }
    }

    pub fn render_into(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        self.view.render_into(&self.scene(), viewport, fb);
    }

    /// Board coordinates only go to the session while a human move is open.
    fn submit(&mut self, at: Coordinate) {
        if self.input_mode {
            self.channels.commands.put(Command::Move(at));
        }
    }

    fn cell_at(&self, viewport: Viewport, column: u16, row: u16) -> Option<Coordinate> {
        let board = self.board.as_ref()?;
        self.view.cell_at(viewport, board, column, row)
    }

    fn board_dims(&self) -> (u8, u8) {
        self.board
            .as_ref()
            .map(|b| (b.width, b.height))
            .unwrap_or((BOARD_WIDTH, BOARD_HEIGHT))
    }
}
