// Turn controller for the light-cycle bot
//
// One decision cycle: ingest the positions reported by the arena, run exactly
// one search against the per-turn budget, and turn its outcome into a
// direction token. There are no retries.

use log::{debug, info, warn};
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::game::Game;
use crate::protocol::TurnInput;
use crate::search::{Choice, SearchEngine, SearchResult};
use crate::simple_profiler;
use crate::types::{Cell, Direction};

pub struct Bot {
    config: Config,
    engine: SearchEngine,
    game: Game,
    turn: u32,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates the bot from the first turn the arena sends
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the game
    /// * `first_turn` - Player count, controlled index and start cells
    pub fn new(config: Config, first_turn: &TurnInput) -> Self {
        let game = Game::new(
            config.arena.width,
            config.arena.height,
            &first_turn.starts(),
            first_turn.my_index,
        );
        let debug_logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path);

        info!(
            "GAME START: {}x{} arena, {} players, controlling player {}",
            config.arena.width,
            config.arena.height,
            first_turn.player_count(),
            first_turn.my_index
        );

        let mut bot = Bot {
            engine: SearchEngine::from_config(&config.timing),
            config,
            game,
            turn: 0,
            debug_logger,
        };
        bot.observe(first_turn);
        bot
    }

    /// Creates a bot around an existing game state, without debug logging.
    /// Used to re-run decisions on logged states.
    pub fn from_game(config: Config, game: Game) -> Self {
        Bot {
            engine: SearchEngine::from_config(&config.timing),
            config,
            game,
            turn: 0,
            debug_logger: DebugLogger::disabled(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Brings the game in line with the positions reported for this turn.
    /// Start and current cells are both marked so the first turn needs no
    /// special casing; `-1` coordinates eliminate the player.
    pub fn observe(&mut self, input: &TurnInput) {
        for (player, observation) in input.players.iter().enumerate() {
            if player >= self.game.player_count() {
                warn!("Ignoring unknown player {}", player);
                continue;
            }

            if observation.is_eliminated() {
                if self.game.players[player].is_alive() {
                    info!("Player {} eliminated", player);
                    self.game.update(player, None);
                }
                continue;
            }

            if self.game.board.in_bounds(observation.start) {
                self.game.board.set(observation.start, Cell::Trail(player));
            }
            self.game.update(player, Some(observation.current));
        }
    }

    /// Runs one decision cycle for the given turn and returns the move to play
    pub fn get_move(&mut self, input: &TurnInput) -> Direction {
        let start_time = Instant::now();
        simple_profiler::reset();

        self.observe(input);
        debug!("Turn {}:\n{}", self.turn, self.game);

        let (direction, result) = self.decide_from(start_time);
        let elapsed = start_time.elapsed().as_millis() as u64;

        info!(
            "Turn {}: Chose {} ({:?}, value: {:.4}, nodes: {}, time: {}ms)",
            self.turn,
            direction.as_str(),
            result.choice,
            result.value,
            result.nodes,
            elapsed
        );
        simple_profiler::print_report(elapsed);

        self.debug_logger.log_move(self.turn, &self.game, direction);
        self.turn += 1;
        direction
    }

    /// Searches the current state without ingesting anything
    pub fn decide(&mut self) -> (Direction, SearchResult) {
        self.decide_from(Instant::now())
    }

    fn decide_from(&mut self, start_time: Instant) -> (Direction, SearchResult) {
        let result = self.engine.search_from(&mut self.game, start_time);
        (self.resolve(&result), result)
    }

    /// Turns a search outcome into a token the arena accepts
    fn resolve(&self, result: &SearchResult) -> Direction {
        match result.choice {
            Choice::Move(direction) => direction,
            Choice::GiveUp => {
                let fallback = self.config.fallback.give_up_direction;
                warn!("No legal move left, answering {}", fallback.as_str());
                fallback
            }
            Choice::Cutoff | Choice::Eliminated => {
                let first_legal = self
                    .game
                    .legal_moves(self.game.me)
                    .first()
                    .map(|(direction, _)| *direction);
                warn!(
                    "Search ended without a move ({:?}), using first legal move",
                    result.choice
                );
                first_legal.unwrap_or(self.config.fallback.give_up_direction)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::PlayerObservation;
    use crate::types::Coord;

    fn config(width: i32, height: i32) -> Config {
        let mut config = Config::default_hardcoded();
        config.arena.width = width;
        config.arena.height = height;
        config
    }

    fn turn(my_index: usize, players: &[(i32, i32, i32, i32)]) -> TurnInput {
        TurnInput {
            my_index,
            players: players
                .iter()
                .map(|&(x0, y0, x1, y1)| PlayerObservation {
                    start: Coord::new(y0, x0),
                    current: Coord::new(y1, x1),
                })
                .collect(),
        }
    }

    #[test]
    fn test_observe_marks_start_and_current() {
        let first = turn(0, &[(0, 0, 0, 0), (4, 4, 4, 4)]);
        let mut bot = Bot::new(config(5, 5), &first);

        bot.observe(&turn(0, &[(0, 0, 1, 0), (4, 4, 4, 3)]));

        assert_eq!(bot.game().head(0), Some(Coord::new(0, 1)));
        assert_eq!(bot.game().head(1), Some(Coord::new(3, 4)));
        assert_eq!(bot.game().board.cell(Coord::new(0, 0)), Cell::Trail(0));
        assert_eq!(bot.game().board.cell(Coord::new(4, 4)), Cell::Trail(1));
    }

    #[test]
    fn test_observe_elimination() {
        let first = turn(0, &[(0, 0, 0, 0), (4, 4, 4, 4)]);
        let mut bot = Bot::new(config(5, 5), &first);

        bot.observe(&turn(0, &[(0, 0, 1, 0), (-1, -1, -1, -1)]));

        assert!(!bot.game().players[1].is_alive());
        assert_eq!(bot.game().board.cell(Coord::new(4, 4)), Cell::Trail(1));
        assert!(bot.game().is_free(Coord::new(4, 4)));
    }

    #[test]
    fn test_get_move_returns_legal_direction() {
        let first = turn(0, &[(0, 0, 0, 0), (2, 2, 2, 2)]);
        let mut bot = Bot::new(config(3, 3), &first);

        let direction = bot.get_move(&first);
        assert!(direction == Direction::Right || direction == Direction::Down);
        assert_eq!(bot.turn(), 1);
    }

    #[test]
    fn test_boxed_in_uses_fallback() {
        // Player 1 walls off (0,1) and (1,0)
        let first = turn(0, &[(0, 0, 0, 0), (1, 0, 0, 1)]);
        let mut bot = Bot::new(config(3, 3), &first);

        let (direction, result) = bot.decide();
        assert_eq!(result.choice, Choice::GiveUp);
        assert_eq!(direction, Direction::Up);
    }

    #[test]
    fn test_zero_budget_still_answers_with_legal_move() {
        let first = turn(0, &[(0, 0, 0, 0)]);
        let mut config = config(4, 4);
        config.timing.time_budget_ms = 0;
        let mut bot = Bot::new(config, &first);

        let (direction, result) = bot.decide();
        assert_eq!(result.choice, Choice::Cutoff);
        assert_eq!(result.nodes, 1);
        assert_eq!(direction, Direction::Right);
    }
}
