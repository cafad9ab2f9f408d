// Static position evaluation
//
// Territory is estimated with a simultaneous multi-source flood fill: every
// living head grows its own BFS frontier one ring per round, and a cell goes
// to whichever frontier reaches it first. Within a round players expand in id
// order, so equal-distance cells go to the lower id.

use crate::game::Game;
use crate::profile;
use crate::types::Coord;

/// Scores a position from the controlled player's point of view.
/// Implementations must not leave any trace on the game.
pub trait Evaluator {
    fn evaluate(&self, game: &Game) -> f64;
}

/// Cells claimed by each side in a territory fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Territory {
    pub mine: usize,
    pub enemy: usize,
}

impl Territory {
    /// (mine - enemy) / (mine + enemy + 1), always strictly inside (-1, 1)
    pub fn score(&self) -> f64 {
        let mine = self.mine as f64;
        let enemy = self.enemy as f64;
        (mine - enemy) / (mine + enemy + 1.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TerritoryEvaluator;

impl TerritoryEvaluator {
    pub fn new() -> Self {
        TerritoryEvaluator
    }

    /// Runs the lock-step flood fill and counts claimed cells per side.
    /// Head cells are seeds, not claims.
    pub fn territory(&self, game: &Game) -> Territory {
        let board = &game.board;
        let width = board.width;
        let mut claimed = vec![false; board.area()];
        let index = |coord: Coord| (coord.row * width + coord.col) as usize;

        let mut frontiers: Vec<(usize, Vec<Coord>)> = game
            .players
            .iter()
            .filter_map(|player| player.head.map(|head| (player.id, vec![head])))
            .collect();
        for (_, frontier) in &frontiers {
            for head in frontier {
                claimed[index(*head)] = true;
            }
        }

        let mut territory = Territory::default();
        while frontiers.iter().any(|(_, frontier)| !frontier.is_empty()) {
            for (player, frontier) in frontiers.iter_mut() {
                let mut next = Vec::new();
                for cell in frontier.iter() {
                    for (_, neighbor) in game.free_neighbors(*cell) {
                        let idx = index(neighbor);
                        if claimed[idx] {
                            continue;
                        }
                        claimed[idx] = true;
                        next.push(neighbor);
                        if *player == game.me {
                            territory.mine += 1;
                        } else {
                            territory.enemy += 1;
                        }
                    }
                }
                *frontier = next;
            }
        }

        territory
    }
}

impl Evaluator for TerritoryEvaluator {
    fn evaluate(&self, game: &Game) -> f64 {
        profile!("eval", { self.territory(game).score() })
    }
}
