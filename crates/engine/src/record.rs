//! Per-game move history, optionally appended to a JSON-lines file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::{Coordinate, GameMode, Player};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveEntry {
    pub player: Player,
    pub at: Coordinate,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub session: u64,
    pub mode: Option<GameMode>,
    pub moves: Vec<MoveEntry>,
    pub winner: Option<Player>,
}

impl GameRecord {
    pub fn new(session: u64, mode: Option<GameMode>) -> Self {
        Self {
            session,
            mode,
            moves: Vec::new(),
            winner: None,
        }
    }

    pub fn push(&mut self, player: Player, at: Coordinate, elapsed_ms: u64) {
        self.moves.push(MoveEntry {
            player,
            at,
            elapsed_ms,
        });
    }

    pub fn to_json_line(&self) -> Result<String> {
        serde_json::to_string(self).context("serialize game record")
    }

    /// Append as a single line, creating the file if needed.
    pub fn append_to(&self, path: &Path) -> Result<()> {
        let line = self.to_json_line()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open record file {}", path.display()))?;
        writeln!(file, "{line}").with_context(|| format!("write record file {}", path.display()))?;
        Ok(())
    }
}
