use log::{error, info};
use std::env;
use std::io::{self, BufWriter};
use std::process;

use tron_cycle_bot::bot::Bot;
use tron_cycle_bot::config::Config;
use tron_cycle_bot::protocol::{read_turn, write_move};

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead. Logs go to stderr, stdout is reserved for moves.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting light-cycle bot...");

    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    // Load configuration once at startup
    let config = match env::var("TRON_CONFIG") {
        Ok(path) => Config::from_file(&path)?,
        Err(_) => Config::load_or_default(),
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = BufWriter::new(io::stdout());

    let mut bot: Option<Bot> = None;
    while let Some(turn) = read_turn(&mut input)? {
        let bot = bot.get_or_insert_with(|| Bot::new(config.clone(), &turn));
        let direction = bot.get_move(&turn);
        write_move(&mut output, direction)?;
    }

    info!("Input closed, GAME OVER");
    Ok(())
}
