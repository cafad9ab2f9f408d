// Core value types shared by the grid, the search and the protocol layer

use serde::{Deserialize, Serialize};

/// Index of a player in the round-robin turn order
pub type PlayerId = usize;

/// 2D coordinate on the board (row grows downwards, col grows rightwards)
///
/// Signed so that off-board neighbours can be represented and reported as walls.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub fn new(row: i32, col: i32) -> Self {
        Coord { row, col }
    }
}

/// Content of a single board cell
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Cell {
    Free,
    /// Only ever produced for out-of-bounds coordinates
    Wall,
    /// Light trail left by a player (heads included)
    Trail(PlayerId),
}

/// Represents the four possible movement directions of a light cycle
///
/// Serialized as the arena token (`"UP"`); the capitalised names are still
/// accepted on input.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[serde(alias = "Right")]
    Right,
    #[serde(alias = "Down")]
    Down,
    #[serde(alias = "Left")]
    Left,
    #[serde(alias = "Up")]
    Up,
}

impl Direction {
    /// Returns all directions in move-ordering order.
    /// The order decides ties in the search: the first move reaching the best score wins.
    pub fn all() -> [Direction; 4] {
        [Direction::Right, Direction::Down, Direction::Left, Direction::Up]
    }

    /// (row delta, col delta)
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
        }
    }

    /// Converts direction to the token expected by the arena
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Right => "RIGHT",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Up => "UP",
        }
    }

    /// Case-insensitive inverse of `as_str`
    pub fn parse(s: &str) -> Result<Direction, String> {
        match s.trim().to_uppercase().as_str() {
            "RIGHT" => Ok(Direction::Right),
            "DOWN" => Ok(Direction::Down),
            "LEFT" => Ok(Direction::Left),
            "UP" => Ok(Direction::Up),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: Coord) -> Coord {
        let (d_row, d_col) = self.delta();
        Coord {
            row: coord.row + d_row,
            col: coord.col + d_col,
        }
    }
}

/// The player moving after `current` in a game of `count` players
pub fn next_player(current: PlayerId, count: usize) -> PlayerId {
    (current + 1) % count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_order_is_right_down_left_up() {
        assert_eq!(
            Direction::all(),
            [Direction::Right, Direction::Down, Direction::Left, Direction::Up]
        );
    }

    #[test]
    fn test_apply_moves_one_cell() {
        let origin = Coord::new(5, 5);
        assert_eq!(Direction::Right.apply(origin), Coord::new(5, 6));
        assert_eq!(Direction::Down.apply(origin), Coord::new(6, 5));
        assert_eq!(Direction::Left.apply(origin), Coord::new(5, 4));
        assert_eq!(Direction::Up.apply(origin), Coord::new(4, 5));
    }

    #[test]
    fn test_parse_direction() {
        for dir in Direction::all() {
            assert_eq!(Direction::parse(dir.as_str()).unwrap(), dir);
        }
        assert_eq!(Direction::parse("left").unwrap(), Direction::Left);
        assert!(Direction::parse("sideways").is_err());
    }

    #[test]
    fn test_next_player_wraps() {
        assert_eq!(next_player(0, 3), 1);
        assert_eq!(next_player(2, 3), 0);
        assert_eq!(next_player(0, 1), 0);
    }
}
