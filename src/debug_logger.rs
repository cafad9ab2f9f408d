// Debug logging module for per-turn game state logging
//
// Each turn's state (as seen before the move) and the chosen move are
// appended as one JSON line, so a game can be replayed offline with the
// `replay` tool.

use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;

use crate::game::Game;
use crate::types::Direction;

/// Represents a single debug log entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DebugLogEntry {
    pub turn: u32,
    pub chosen_move: String,
    pub game: Game,
    pub timestamp: String,
}

pub struct DebugLogger {
    file: Option<File>,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DebugLogger::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                info!("Debug logging enabled: {}", log_file_path);
                DebugLogger { file: Some(file) }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                DebugLogger::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger { file: None }
    }

    /// Appends one entry. Failures are logged and otherwise ignored.
    pub fn log_move(&mut self, turn: u32, game: &Game, chosen_move: Direction) {
        let file = match self.file.as_mut() {
            Some(file) => file,
            None => return,
        };

        let entry = DebugLogEntry {
            turn,
            chosen_move: chosen_move.as_str().to_string(),
            game: game.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        match serde_json::to_string(&entry) {
            Ok(json_line) => {
                if let Err(e) = writeln!(file, "{}", json_line).and_then(|_| file.flush()) {
                    error!("Failed to write debug log entry: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
            }
        }
    }
}
