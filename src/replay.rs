// Offline re-run of logged decisions
//
// Every debug log line holds the state the bot searched and the token it sent.
// Replaying searches that state again under the current config and reports
// the turns where the answer changed. Searches are wall-clock bounded, so a
// replay on a slower or faster machine can legitimately differ.

use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::bot::Bot;
use crate::config::Config;
use crate::debug_logger::DebugLogEntry;
use crate::search::SearchResult;
use crate::types::Direction;

#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: u32,
    pub logged: Direction,
    pub replayed: Direction,
    pub search: SearchResult,
}

impl ReplayResult {
    pub fn matches(&self) -> bool {
        self.logged == self.replayed
    }
}

/// Reads a JSONL debug log. Blank lines are skipped; any malformed line,
/// including a state whose board or players do not add up, is an error.
pub fn load_log<P: AsRef<Path>>(path: P) -> Result<Vec<DebugLogEntry>, String> {
    let file = File::open(path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

    let mut entries = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read line {}: {}", index + 1, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let entry = serde_json::from_str(&line)
            .map_err(|e| format!("Bad entry on line {}: {}", index + 1, e))?;
        entries.push(entry);
    }

    info!("Loaded {} log entries", entries.len());
    Ok(entries)
}

pub struct ReplayEngine {
    config: Config,
}

impl ReplayEngine {
    pub fn new(config: Config) -> Self {
        ReplayEngine { config }
    }

    /// Searches one logged state again
    pub fn replay_entry(&self, entry: &DebugLogEntry) -> Result<ReplayResult, String> {
        let logged = Direction::parse(&entry.chosen_move)
            .map_err(|e| format!("Turn {}: {}", entry.turn, e))?;

        let mut bot = Bot::from_game(self.config.clone(), entry.game.clone());
        let (replayed, search) = bot.decide();

        debug!(
            "Turn {}: logged {}, replayed {} ({:?}, value {:.4}, {} nodes)",
            entry.turn,
            logged.as_str(),
            replayed.as_str(),
            search.choice,
            search.value,
            search.nodes
        );

        Ok(ReplayResult {
            turn: entry.turn,
            logged,
            replayed,
            search,
        })
    }

    /// Replays the requested turns, or every entry when `turns` is `None`
    pub fn replay(
        &self,
        entries: &[DebugLogEntry],
        turns: Option<&[u32]>,
    ) -> Result<Vec<ReplayResult>, String> {
        match turns {
            None => entries.iter().map(|entry| self.replay_entry(entry)).collect(),
            Some(turns) => turns
                .iter()
                .map(|turn| {
                    let entry = entries
                        .iter()
                        .find(|entry| entry.turn == *turn)
                        .ok_or_else(|| format!("Turn {} not found in log file", turn))?;
                    self.replay_entry(entry)
                })
                .collect(),
        }
    }
}

pub fn print_report(results: &[ReplayResult]) {
    let matched = results.iter().filter(|r| r.matches()).count();
    println!("Replayed {} turns, {} matched", results.len(), matched);

    for result in results.iter().filter(|r| !r.matches()) {
        println!(
            "  turn {}: logged {}, replayed {} ({:?}, value {:.4}, {} nodes)",
            result.turn,
            result.logged.as_str(),
            result.replayed.as_str(),
            result.search.choice,
            result.search.value,
            result.search.nodes
        );
    }
}
