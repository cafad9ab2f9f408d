// Time- and depth-bounded alpha-beta search
//
// Players move one at a time in round-robin order. The controlled player is
// the maximiser whenever it is its turn; every opponent is folded into a single
// minimising side sharing one alpha/beta window ("me" versus "the rest").
//
// Depth accounting is asymmetric: the maximiser hands its children
// `depth - number_of_legal_moves`, everyone else hands `depth - 1`. Together
// with the wall-clock deadline this caps the effort spent per decision.

use log::debug;
use std::time::{Duration, Instant};

use crate::config::TimingConfig;
use crate::evaluator::{Evaluator, TerritoryEvaluator};
use crate::game::Game;
use crate::profile;
use crate::simple_profiler;
use crate::types::{next_player, Direction, PlayerId};

/// Strictly below any evaluation
const LOWER_BOUND: f64 = -2.0;
/// Strictly above any evaluation
const UPPER_BOUND: f64 = 2.0;

/// What a search node decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Best move found for the player to move
    Move(Direction),
    /// No legal move for the controlled player at the root
    GiveUp,
    /// Static evaluation returned because of the deadline or the depth limit
    Cutoff,
    /// The player to move had no legal move and was eliminated
    Eliminated,
}

impl Choice {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Choice::Move(direction) => Some(*direction),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub value: f64,
    pub choice: Choice,
    /// Nodes visited, root included
    pub nodes: usize,
}

/// Per-decision bookkeeping
struct SearchContext {
    started: Instant,
    nodes: usize,
}

pub struct SearchEngine<E: Evaluator = TerritoryEvaluator> {
    evaluator: E,
    budget: Duration,
    initial_depth: i32,
}

impl SearchEngine<TerritoryEvaluator> {
    /// Territory-evaluating engine using the configured budget and depth
    pub fn from_config(timing: &TimingConfig) -> Self {
        SearchEngine::new(
            TerritoryEvaluator::new(),
            Duration::from_millis(timing.time_budget_ms),
            timing.initial_depth,
        )
    }
}

impl<E: Evaluator> SearchEngine<E> {
    pub fn new(evaluator: E, budget: Duration, initial_depth: i32) -> Self {
        SearchEngine {
            evaluator,
            budget,
            initial_depth,
        }
    }

    /// Searches for the controlled player's move, starting the clock now
    pub fn search(&self, game: &mut Game) -> SearchResult {
        self.search_from(game, Instant::now())
    }

    /// Searches for the controlled player's move against a deadline of
    /// `started + budget`. The game is left exactly as it was found.
    pub fn search_from(&self, game: &mut Game, started: Instant) -> SearchResult {
        let mut ctx = SearchContext { started, nodes: 0 };
        let me = game.me;

        if game.legal_moves(me).is_empty() {
            return SearchResult {
                value: self.evaluator.evaluate(game),
                choice: Choice::GiveUp,
                nodes: 1,
            };
        }

        let (value, choice) =
            self.alphabeta(game, &mut ctx, me, self.initial_depth, LOWER_BOUND, UPPER_BOUND);

        debug!(
            "Search finished: {:?} value={:.4} nodes={} elapsed={}µs",
            choice,
            value,
            ctx.nodes,
            ctx.started.elapsed().as_micros()
        );

        SearchResult {
            value,
            choice,
            nodes: ctx.nodes,
        }
    }

    fn alphabeta(
        &self,
        game: &mut Game,
        ctx: &mut SearchContext,
        player: PlayerId,
        depth: i32,
        mut alpha: f64,
        mut beta: f64,
    ) -> (f64, Choice) {
        profile!("alpha_beta", {
            ctx.nodes += 1;

            if ctx.started.elapsed() >= self.budget || depth <= 0 {
                return (self.evaluator.evaluate(game), Choice::Cutoff);
            }

            let next = next_player(player, game.player_count());
            let moves = game.legal_moves(player);

            if moves.is_empty() {
                let mut child = game.apply(player, None);
                let (value, _) = self.alphabeta(&mut child, ctx, next, depth - 1, alpha, beta);
                return (value, Choice::Eliminated);
            }

            let maximising = player == game.me;
            let child_depth = if maximising {
                depth - moves.len() as i32
            } else {
                depth - 1
            };

            let mut value = if maximising { LOWER_BOUND } else { UPPER_BOUND };
            let mut best = Choice::GiveUp;

            for (direction, target) in moves {
                simple_profiler::record_apply_move();
                let move_value = {
                    let mut child = game.apply(player, Some(target));
                    self.alphabeta(&mut child, ctx, next, child_depth, alpha, beta).0
                };

                // Bounds only tighten: alpha never drops below what the parent
                // passed in, beta never rises above it
                if maximising {
                    if move_value > value {
                        value = move_value;
                        best = Choice::Move(direction);
                        alpha = alpha.max(value);
                    }
                } else if move_value < value {
                    value = move_value;
                    best = Choice::Move(direction);
                    beta = beta.min(value);
                }

                if alpha > beta {
                    simple_profiler::record_alpha_beta_cutoff();
                    break;
                }
            }

            (value, best)
        })
    }
}
