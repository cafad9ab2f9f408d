// Game aggregate: the board plus every player's head
//
// The search explores by mutating one Game in place. Every mutation goes
// through `update`, which hands back an `UndoRecord`; `apply` wraps that in a
// `MoveGuard` that rolls the mutation back when it goes out of scope.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::grid::{player_symbol, Board, FREE_SYMBOL, HEAD_SYMBOL, WALL_SYMBOL};
use crate::types::{Cell, Coord, Direction, PlayerId};

/// A light cycle. `head == None` is the DEAD sentinel.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub head: Option<Coord>,
}

impl Player {
    pub fn is_alive(&self) -> bool {
        self.head.is_some()
    }
}

/// Everything needed to revert one `Game::update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRecord {
    player: PlayerId,
    previous_head: Option<Coord>,
    touched: Option<(Coord, Cell)>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "GameData")]
pub struct Game {
    pub board: Board,
    pub players: Vec<Player>,
    /// The player this bot controls
    pub me: PlayerId,
}

/// Unchecked wire form of a `Game`
#[derive(Deserialize)]
struct GameData {
    board: Board,
    players: Vec<Player>,
    me: PlayerId,
}

impl TryFrom<GameData> for Game {
    type Error = String;

    fn try_from(data: GameData) -> Result<Self, Self::Error> {
        if data.me >= data.players.len() {
            return Err(format!(
                "Controlled player {} out of range for {} players",
                data.me,
                data.players.len()
            ));
        }
        for (index, player) in data.players.iter().enumerate() {
            if player.id != index {
                return Err(format!("Player at index {} has id {}", index, player.id));
            }
            if let Some(head) = player.head {
                if !data.board.in_bounds(head) {
                    return Err(format!("Player {} head {:?} is off the board", index, head));
                }
            }
        }
        Ok(Game {
            board: data.board,
            players: data.players,
            me: data.me,
        })
    }
}

impl Game {
    /// Creates a game with each player placed on its start cell.
    /// Off-board starts produce a dead player.
    pub fn new(width: i32, height: i32, starts: &[Coord], me: PlayerId) -> Self {
        let mut game = Game {
            board: Board::new(width, height),
            players: (0..starts.len())
                .map(|id| Player { id, head: None })
                .collect(),
            me,
        };
        for (player, start) in starts.iter().enumerate() {
            game.update(player, Some(*start));
        }
        game
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn head(&self, player: PlayerId) -> Option<Coord> {
        self.players.get(player).and_then(|p| p.head)
    }

    fn is_dead(&self, player: PlayerId) -> bool {
        self.players.get(player).map_or(false, |p| !p.is_alive())
    }

    /// A cell is traversable when untouched, or when its trail belongs to an
    /// eliminated player (eliminated trails vanish from the arena).
    pub fn is_free(&self, coord: Coord) -> bool {
        match self.board.cell(coord) {
            Cell::Free => true,
            Cell::Wall => false,
            Cell::Trail(owner) => self.is_dead(owner),
        }
    }

    /// Neighbours of `coord` that pass `is_free`, in RIGHT, DOWN, LEFT, UP order
    pub fn free_neighbors(&self, coord: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        self.board
            .neighbors(coord)
            .into_iter()
            .filter(move |(_, neighbor)| self.is_free(*neighbor))
    }

    /// Moves available to `player`; empty for a dead player
    pub fn legal_moves(&self, player: PlayerId) -> Vec<(Direction, Coord)> {
        match self.head(player) {
            Some(head) => self.free_neighbors(head).collect(),
            None => Vec::new(),
        }
    }

    /// Moves `player` to `target`, or marks it DEAD when `target` is `None`
    /// or off the board. The DEAD case leaves the board untouched.
    pub fn update(&mut self, player: PlayerId, target: Option<Coord>) -> UndoRecord {
        let previous_head = self.players[player].head;

        let touched = match target {
            Some(coord) if self.board.in_bounds(coord) => {
                let previous = self.board.set(coord, Cell::Trail(player));
                self.players[player].head = Some(coord);
                Some((coord, previous))
            }
            _ => {
                self.players[player].head = None;
                None
            }
        };

        UndoRecord {
            player,
            previous_head,
            touched,
        }
    }

    /// Reverts a single `update`. Records must be rolled back in LIFO order.
    pub fn rollback(&mut self, record: UndoRecord) {
        if let Some((coord, previous)) = record.touched {
            self.board.set(coord, previous);
        }
        self.players[record.player].head = record.previous_head;
    }

    /// Scoped version of `update`: the returned guard derefs to the game and
    /// rolls the move back when dropped.
    pub fn apply(&mut self, player: PlayerId, target: Option<Coord>) -> MoveGuard<'_> {
        let undo = self.update(player, target);
        MoveGuard {
            game: self,
            undo: Some(undo),
        }
    }

    /// True while at least one player is alive
    pub fn running(&self) -> bool {
        self.players.iter().any(Player::is_alive)
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive()).count()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.board.height {
            for col in 0..self.board.width {
                let coord = Coord::new(row, col);
                let symbol = if self.players.iter().any(|p| p.head == Some(coord)) {
                    HEAD_SYMBOL
                } else {
                    match self.board.cell(coord) {
                        Cell::Free => FREE_SYMBOL,
                        Cell::Wall => WALL_SYMBOL,
                        Cell::Trail(player) => player_symbol(player),
                    }
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Speculative move that is undone on drop
pub struct MoveGuard<'a> {
    game: &'a mut Game,
    undo: Option<UndoRecord>,
}

impl Deref for MoveGuard<'_> {
    type Target = Game;

    fn deref(&self) -> &Game {
        self.game
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Game {
        self.game
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.game.rollback(undo);
        }
    }
}
