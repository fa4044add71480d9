//! Terminal Isolation runner.
//!
//! One presentation thread drives a fixed-tick loop: take at most one event
//! from the session, poll input until the tick ends, redraw. Games run on a
//! session thread started and cancelled through the controller.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use tui_isolation::engine::{Channels, SessionConfig, SessionController};
use tui_isolation::input::{map_key, map_mouse};
use tui_isolation::logging::{self, LogConfig};
use tui_isolation::term::{FrameBuffer, TerminalRenderer, Viewport};
use tui_isolation::types::TICK_MS;
use tui_isolation::{Flow, PresentationLoop};

fn main() -> Result<()> {
    logging::init(&LogConfig::from_env())?;

    let channels = Arc::new(Channels::new());
    let config = SessionConfig::from_env();
    info!(time_limit_ms = config.time_limit.as_millis() as u64, seed = config.seed, "starting");
    let mut app = PresentationLoop::new(SessionController::new(channels, config));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    app.shutdown();
    info!("exiting");
    result
}

fn run(term: &mut TerminalRenderer, app: &mut PresentationLoop) -> Result<()> {
    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        app.poll_event();
        app.render_into(viewport, &mut fb);
        term.draw(&fb)?;

        let timeout = tick.checked_sub(last_tick.elapsed()).unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            let input = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key),
                Event::Mouse(mouse) => map_mouse(mouse),
                Event::Resize(..) => {
                    term.invalidate();
                    None
                }
                _ => None,
            };
            if let Some(input) = input {
                if app.handle_input(input, viewport)? == Flow::Quit {
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
        }
    }
}
