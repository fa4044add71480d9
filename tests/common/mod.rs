//! Shared fixtures for the session integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use tui_isolation::core::Engine;
use tui_isolation::engine::{Channels, Envelope, GameEvent};
use tui_isolation::types::{BoardSnapshot, CellState, Coordinate, Player};

/// Generous upper bound for anything that should finish "promptly".
pub const DEADLINE: Duration = Duration::from_secs(5);

/// Engine whose legal moves are scripted per move number.
///
/// `script[n]` is the legal-move list after `n` moves; past the end of the
/// script the active player is stuck.
pub struct FixedEngine {
    script: Vec<Vec<Coordinate>>,
    applied: Vec<Coordinate>,
    last_moves: [Option<Coordinate>; 2],
    live: Option<Arc<AtomicUsize>>,
}

impl FixedEngine {
    pub fn new(script: Vec<Vec<Coordinate>>) -> Self {
        Self {
            script,
            applied: Vec::new(),
            last_moves: [None, None],
            live: None,
        }
    }

    /// No legal moves from the start.
    pub fn stuck() -> Self {
        Self::new(Vec::new())
    }

    /// One forced move per turn, `n` turns long.
    pub fn forced(n: usize) -> Self {
        Self::new((0..n).map(|i| vec![Coordinate::new((i % 7) as i8, (i / 7) as i8)]).collect())
    }

    /// Count this engine in `live` until it is dropped.
    pub fn counted(mut self, live: &Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        self.live = Some(Arc::clone(live));
        self
    }
}

impl Drop for FixedEngine {
    fn drop(&mut self) {
        if let Some(live) = &self.live {
            live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl Engine for FixedEngine {
    fn legal_moves(&self) -> Vec<Coordinate> {
        self.script.get(self.applied.len()).cloned().unwrap_or_default()
    }

    fn apply_move(&mut self, mv: Coordinate) {
        let player = self.active_player();
        self.last_moves[player.index()] = Some(mv);
        self.applied.push(mv);
    }

    fn active_player(&self) -> Player {
        if self.applied.len() % 2 == 0 {
            Player::One
        } else {
            Player::Two
        }
    }

    fn inactive_player(&self) -> Player {
        self.active_player().other()
    }

    fn last_move(&self, player: Player) -> Option<Coordinate> {
        self.last_moves[player.index()]
    }

    fn move_count(&self) -> u32 {
        self.applied.len() as u32
    }

    fn snapshot(&self) -> BoardSnapshot {
        let mut snap = BoardSnapshot::empty(7, 7);
        for (i, at) in self.applied.iter().enumerate() {
            let player = if i % 2 == 0 { Player::One } else { Player::Two };
            let idx = at.row as usize * 7 + at.col as usize;
            snap.cells[idx] = CellState::Visited(player);
        }
        snap.last_moves = self.last_moves;
        snap.active = self.active_player();
        snap.legal_moves = self.legal_moves();
        snap.move_count = self.move_count();
        snap
    }
}

/// Take the next event, waiting up to `timeout`. Acknowledges it.
pub fn next_event(channels: &Channels, timeout: Duration) -> Option<Envelope> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(envelope) = channels.events.try_get() {
            channels.events.task_done();
            return Some(envelope);
        }
        if Instant::now() >= deadline {
            return None;
        }
        thread::sleep(Duration::from_millis(1));
    }
}

/// Take events until one matches `pred`, returning everything seen.
pub fn events_until(
    channels: &Channels,
    mut pred: impl FnMut(&GameEvent) -> bool,
) -> Vec<Envelope> {
    let deadline = Instant::now() + DEADLINE;
    let mut seen = Vec::new();
    while Instant::now() < deadline {
        let Some(envelope) = next_event(channels, Duration::from_millis(50)) else {
            continue;
        };
        let done = pred(&envelope.event);
        seen.push(envelope);
        if done {
            return seen;
        }
    }
    panic!(
        "timed out waiting for event; saw {:?}",
        seen.iter().map(|e| e.event.kind()).collect::<Vec<_>>()
    );
}

/// Everything currently queued, acknowledged.
pub fn drain_events(channels: &Channels) -> Vec<Envelope> {
    std::iter::from_fn(|| {
        let envelope = channels.events.try_get()?;
        channels.events.task_done();
        Some(envelope)
    })
    .collect()
}

/// Run `f` on a helper thread and fail the test if it does not return in time.
pub fn within<T: Send + 'static>(timeout: Duration, f: impl FnOnce() -> T + Send + 'static) -> T {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(f());
    });
    rx.recv_timeout(timeout)
        .unwrap_or_else(|_| panic!("operation did not finish within {timeout:?}"))
}
