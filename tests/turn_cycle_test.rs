//! Turn Cycle Integration Tests
//!
//! Drives the bot through the arena text protocol the way the binary does,
//! and checks the debug log can be replayed.

use std::io::Cursor;

use tron_cycle_bot::bot::Bot;
use tron_cycle_bot::config::Config;
use tron_cycle_bot::protocol::{read_turn, write_move};
use tron_cycle_bot::replay::{load_log, ReplayEngine};
use tron_cycle_bot::types::{Coord, Direction};

fn fast_config() -> Config {
    let mut config = Config::default_hardcoded();
    config.timing.time_budget_ms = 20;
    config
}

fn play(config: Config, input: &str) -> (Vec<String>, Bot) {
    let mut reader = Cursor::new(input.to_string());
    let mut output = Vec::new();
    let mut bot: Option<Bot> = None;

    while let Some(turn) = read_turn(&mut reader).expect("well-formed input") {
        let bot = bot.get_or_insert_with(|| Bot::new(config.clone(), &turn));
        let direction = bot.get_move(&turn);
        write_move(&mut output, direction).unwrap();
    }

    let lines = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| l.to_string())
        .collect();
    (lines, bot.expect("at least one turn"))
}

#[test]
fn test_one_token_per_turn() {
    let input = "\
2 0
5 10 5 10
24 10 24 10
2 0
5 10 6 10
24 10 23 10
2 0
5 10 7 10
24 10 22 10
";
    let (lines, bot) = play(fast_config(), input);

    assert_eq!(lines.len(), 3);
    for line in &lines {
        assert!(Direction::parse(line).is_ok(), "unexpected token {}", line);
        assert_eq!(line, &line.to_uppercase());
    }
    assert_eq!(bot.turn(), 3);
    assert_eq!(bot.game().head(0), Some(Coord::new(10, 7)));
    assert_eq!(bot.game().head(1), Some(Coord::new(10, 22)));
}

#[test]
fn test_corner_start_never_picks_a_wall() {
    let input = "1 0\n0 0 0 0\n";
    let (lines, _) = play(fast_config(), input);
    assert!(lines[0] == "RIGHT" || lines[0] == "DOWN");
}

#[test]
fn test_opponent_elimination_is_tracked() {
    let input = "\
2 0
3 3 3 3
8 8 8 8
2 0
3 3 4 3
-1 -1 -1 -1
";
    let (lines, bot) = play(fast_config(), input);
    assert_eq!(lines.len(), 2);
    assert!(!bot.game().players[1].is_alive());
    assert!(bot.game().players[0].is_alive());
}

#[test]
fn test_debug_log_can_be_replayed() {
    let log_path = std::env::temp_dir().join(format!("tron_debug_{}.jsonl", std::process::id()));
    let mut config = fast_config();
    config.debug.enabled = true;
    config.debug.log_file_path = log_path.to_string_lossy().to_string();

    let input = "\
2 0
0 0 0 0
29 19 29 19
2 0
0 0 1 0
29 19 28 19
";
    let (lines, bot) = play(config.clone(), input);
    drop(bot);

    let entries = load_log(&log_path).expect("log should load");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].turn, 0);
    assert_eq!(entries[1].turn, 1);
    assert_eq!(entries[1].chosen_move, lines[1]);
    assert_eq!(entries[1].game.head(0), Some(Coord::new(0, 1)));

    let results = ReplayEngine::new(config).replay(&entries, None).unwrap();
    assert_eq!(results.len(), 2);

    let _ = std::fs::remove_file(&log_path);
}
