// Re-runs the decisions recorded in a light-cycle debug log
//
// Usage:
//   replay <log_file> [--turns 3,7] [--config Tron.toml]
//
// Per-turn details are logged at debug level (RUST_LOG=debug).

use std::env;
use std::process;

use tron_cycle_bot::config::Config;
use tron_cycle_bot::replay::{self, ReplayEngine};

const USAGE: &str = "usage: replay <log_file> [--turns T1,T2,...] [--config <path>]";

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    eprintln!("{}", USAGE);
    process::exit(1);
}

fn parse_turns(s: &str) -> Result<Vec<u32>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<u32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", t, e))
        })
        .collect()
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let mut args = env::args().skip(1);
    let mut log_file = None;
    let mut config_path = "Tron.toml".to_string();
    let mut turns = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--turns" => {
                let value = args.next().unwrap_or_else(|| fail("--turns needs a value"));
                turns = Some(parse_turns(&value).unwrap_or_else(|e| fail(&e)));
            }
            "--config" => {
                config_path = args.next().unwrap_or_else(|| fail("--config needs a value"));
            }
            "--help" => {
                println!("{}", USAGE);
                return;
            }
            _ if log_file.is_none() && !arg.starts_with("--") => log_file = Some(arg.clone()),
            other => fail(&format!("Unexpected argument: {}", other)),
        }
    }

    let log_file = log_file.unwrap_or_else(|| fail("missing log file"));
    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        log::warn!("{}, using hardcoded defaults", e);
        Config::default_hardcoded()
    });

    let entries = replay::load_log(&log_file).unwrap_or_else(|e| fail(&e));
    let results = ReplayEngine::new(config)
        .replay(&entries, turns.as_deref())
        .unwrap_or_else(|e| fail(&e));

    replay::print_report(&results);
}
