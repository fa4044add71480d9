//! Session lifecycle: game over, pacing, failures and teardown.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Result};
use common::{drain_events, events_until, within, FixedEngine, DEADLINE};
use tui_isolation::core::Engine;
use tui_isolation::engine::{
    Channels, Command, GameEvent, PlayerStrategy, Scripted, SessionConfig, SessionController,
    SessionId, SessionOutcome, SessionThread, TimeBudget,
};
use tui_isolation::types::{Coordinate, GameMode, Player};

struct Failing;

impl PlayerStrategy for Failing {
    fn select_move(&mut self, _: &dyn Engine, _: &[Coordinate], _: &TimeBudget) -> Result<Coordinate> {
        bail!("evaluation blew up")
    }

    fn name(&self) -> &str {
        "failing"
    }
}

struct Panicking;

impl PlayerStrategy for Panicking {
    fn select_move(&mut self, _: &dyn Engine, _: &[Coordinate], _: &TimeBudget) -> Result<Coordinate> {
        panic!("strategy bug")
    }

    fn name(&self) -> &str {
        "panicking"
    }
}

/// Reads the budget twice with a pause in between.
struct Probe {
    readings: Arc<Mutex<Vec<i64>>>,
}

impl PlayerStrategy for Probe {
    fn select_move(&mut self, _: &dyn Engine, legal: &[Coordinate], time_left: &TimeBudget) -> Result<Coordinate> {
        let first = time_left.time_left_ms();
        thread::sleep(Duration::from_millis(20));
        let second = time_left.time_left_ms();
        self.readings.lock().unwrap().extend([first, second]);
        Ok(legal[0])
    }

    fn name(&self) -> &str {
        "probe"
    }
}

fn scripted_pair() -> [Box<dyn PlayerStrategy>; 2] {
    [Box::new(Scripted::new("a", 11)), Box::new(Scripted::new("b", 12))]
}

/// Answer every draw with a proceed until the session says it is done.
fn pump_until_terminal(channels: &Channels) -> Vec<GameEvent> {
    events_until(channels, |e| {
        matches!(e, GameEvent::GameOver { .. } | GameEvent::Aborted)
            || {
                if *e == GameEvent::Draw {
                    channels.commands.put(Command::Proceed);
                }
                false
            }
    })
    .into_iter()
    .map(|e| e.event)
    .collect()
}

#[test]
fn stuck_first_player_ends_with_one_game_over() {
    let channels = Arc::new(Channels::new());
    let session = SessionThread::new(
        SessionId(1),
        Box::new(FixedEngine::stuck()),
        scripted_pair(),
        Arc::clone(&channels),
    );

    assert_eq!(session.run().unwrap(), SessionOutcome::GameOver { winner: Player::Two });

    let events: Vec<_> = drain_events(&channels).into_iter().map(|e| e.event).collect();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], GameEvent::SetBoard(_)));
    assert_eq!(events[1], GameEvent::GameOver { winner: Player::Two });
}

#[test]
fn scripted_players_finish_a_forced_game() {
    let channels = Arc::new(Channels::new());
    let mut controller = SessionController::new(Arc::clone(&channels), SessionConfig::default())
        .with_engine_factory(|| Box::new(FixedEngine::forced(3)));
    controller.new_game(GameMode::ScriptedVsScripted).unwrap();

    let events = pump_until_terminal(&channels);
    // Three moves, so player two is to move and stuck.
    assert_eq!(events.last(), Some(&GameEvent::GameOver { winner: Player::One }));
    let boards = events.iter().filter(|e| matches!(e, GameEvent::SetBoard(_))).count();
    assert_eq!(boards, 4);
    let draws = events.iter().filter(|e| **e == GameEvent::Draw).count();
    assert_eq!(draws, 3);

    // The thread is already gone; teardown must not wait on it.
    let outcome = within(DEADLINE, move || controller.kill_game());
    assert_eq!(outcome, Some(SessionOutcome::GameOver { winner: Player::One }));
    assert_eq!(channels.commands.unfinished(), 0);
    assert!(drain_events(&channels).is_empty());
}

#[test]
fn scripted_players_finish_a_real_board() {
    let channels = Arc::new(Channels::new());
    let config = SessionConfig {
        seed: 42,
        ..SessionConfig::default()
    };
    let mut controller = SessionController::new(Arc::clone(&channels), config);
    controller.new_game(GameMode::ScriptedVsScripted).unwrap();

    let events = pump_until_terminal(&channels);
    let Some(GameEvent::GameOver { winner }) = events.last() else {
        panic!("expected game over, got {:?}", events.last());
    };

    let last_board = events
        .iter()
        .rev()
        .find_map(|e| match e {
            GameEvent::SetBoard(b) => Some(b),
            _ => None,
        })
        .unwrap();
    assert!(last_board.legal_moves.is_empty());
    assert_eq!(*winner, last_board.active.other());
    assert!(last_board.move_count >= 2 && last_board.move_count <= 49);

    controller.kill_game();
}

#[test]
fn at_most_one_session_is_alive() {
    let live = Arc::new(AtomicUsize::new(0));
    let channels = Arc::new(Channels::new());
    let factory_live = Arc::clone(&live);
    let mut controller = SessionController::new(Arc::clone(&channels), SessionConfig::default())
        .with_engine_factory(move || Box::new(FixedEngine::forced(10).counted(&factory_live)));

    for mode in [
        GameMode::HumanVsHuman,
        GameMode::HumanFirst,
        GameMode::ScriptedVsScripted,
        GameMode::HumanSecond,
    ] {
        controller.new_game(mode).unwrap();
        assert_eq!(live.load(Ordering::SeqCst), 1);
        // Let each session get somewhere before it is replaced.
        channels.commands.put(Command::Proceed);
        thread::sleep(Duration::from_millis(10));
    }

    controller.kill_game();
    assert_eq!(live.load(Ordering::SeqCst), 0);
    assert_eq!(channels.commands.unfinished(), 0);
}

#[test]
fn failing_strategy_aborts_and_teardown_does_not_block() {
    let channels = Arc::new(Channels::new());
    let mut controller = SessionController::new(Arc::clone(&channels), SessionConfig::default())
        .with_engine_factory(|| Box::new(FixedEngine::forced(5)));
    controller
        .start_with(|id, channels, config, engine| {
            SessionThread::new(id, engine, [Box::new(Failing), Box::new(Scripted::new("b", 1))], channels)
                .with_config(config)
        })
        .unwrap();

    let events = pump_until_terminal(&channels);
    assert_eq!(events.last(), Some(&GameEvent::Aborted));

    let outcome = within(DEADLINE, move || {
        let outcome = controller.kill_game();
        assert!(!controller.is_active());
        outcome
    });
    assert_eq!(outcome, Some(SessionOutcome::Aborted));
    assert_eq!(channels.commands.unfinished(), 0);
}

#[test]
fn panicking_strategy_aborts_the_session() {
    let channels = Arc::new(Channels::new());
    let mut controller = SessionController::new(Arc::clone(&channels), SessionConfig::default())
        .with_engine_factory(|| Box::new(FixedEngine::forced(5)));
    controller
        .start_with(|id, channels, _, engine| {
            SessionThread::new(id, engine, [Box::new(Panicking), Box::new(Panicking)], channels)
        })
        .unwrap();

    let events = pump_until_terminal(&channels);
    assert_eq!(events.last(), Some(&GameEvent::Aborted));

    let outcome = within(DEADLINE, move || controller.kill_game());
    assert_eq!(outcome, Some(SessionOutcome::Aborted));
}

#[test]
fn time_left_shrinks_during_a_turn() {
    let readings = Arc::new(Mutex::new(Vec::new()));
    let channels = Arc::new(Channels::new());
    let mut controller = SessionController::new(Arc::clone(&channels), SessionConfig::default())
        .with_engine_factory(|| Box::new(FixedEngine::forced(1)));
    let probe_readings = Arc::clone(&readings);
    controller
        .start_with(move |id, channels, config, engine| {
            SessionThread::new(
                id,
                engine,
                [Box::new(Probe { readings: probe_readings }), Box::new(Scripted::new("b", 1))],
                channels,
            )
            .with_config(config)
        })
        .unwrap();

    pump_until_terminal(&channels);
    controller.kill_game();

    let readings = readings.lock().unwrap();
    assert_eq!(readings.len(), 2);
    assert!(readings[0] <= 500);
    assert!(readings[1] < readings[0], "{readings:?}");
}

#[test]
fn over_budget_move_is_still_applied() {
    let channels = Arc::new(Channels::new());
    let config = SessionConfig {
        time_limit: Duration::from_millis(1),
        ..SessionConfig::default()
    };
    let mut controller = SessionController::new(Arc::clone(&channels), config)
        .with_engine_factory(|| Box::new(FixedEngine::forced(1)));
    controller
        .start_with(|id, channels, config, engine| {
            SessionThread::new(
                id,
                engine,
                [
                    Box::new(Probe {
                        readings: Arc::new(Mutex::new(Vec::new())),
                    }),
                    Box::new(Scripted::new("b", 1)),
                ],
                channels,
            )
            .with_config(config)
        })
        .unwrap();

    let events = pump_until_terminal(&channels);
    assert_eq!(events.last(), Some(&GameEvent::GameOver { winner: Player::One }));
    controller.kill_game();
}

#[test]
fn finished_game_is_appended_to_the_record_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.jsonl");
    let channels = Arc::new(Channels::new());
    let config = SessionConfig {
        record_path: Some(path.clone()),
        ..SessionConfig::default()
    };
    let mut controller = SessionController::new(Arc::clone(&channels), config)
        .with_engine_factory(|| Box::new(FixedEngine::forced(3)));

    controller.new_game(GameMode::ScriptedVsScripted).unwrap();
    pump_until_terminal(&channels);
    controller.kill_game();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 1);
    let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record["mode"], "ScriptedVsScripted");
    assert_eq!(record["winner"], "One");
    assert_eq!(record["moves"].as_array().unwrap().len(), 3);
    assert_eq!(record["moves"][1]["player"], "Two");
}
