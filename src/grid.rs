// Bounded arena grid
//
// Cells are stored row-major. Anything outside [0, height) x [0, width) is an
// implicit wall, so callers never need to bounds-check before asking.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Cell, Coord, Direction};

pub const FREE_SYMBOL: char = '·';
pub const WALL_SYMBOL: char = '█';
pub const HEAD_SYMBOL: char = '■';
const PLAYER_SYMBOLS: [char; 4] = ['o', '+', 'x', '¤'];

/// Glyph used to render a trail cell of the given player
pub fn player_symbol(player: usize) -> char {
    PLAYER_SYMBOLS
        .get(player)
        .copied()
        .or_else(|| std::char::from_digit((player % 10) as u32, 10))
        .unwrap_or('?')
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "BoardData")]
pub struct Board {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>,
}

/// Unchecked wire form of a `Board`
#[derive(Deserialize)]
struct BoardData {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl TryFrom<BoardData> for Board {
    type Error = String;

    fn try_from(data: BoardData) -> Result<Self, Self::Error> {
        if data.width < 0 || data.height < 0 {
            return Err(format!(
                "Negative board dimensions {}x{}",
                data.width, data.height
            ));
        }
        let expected = data.width as usize * data.height as usize;
        if data.cells.len() != expected {
            return Err(format!(
                "Board {}x{} needs {} cells, got {}",
                data.width,
                data.height,
                expected,
                data.cells.len()
            ));
        }
        Ok(Board {
            width: data.width,
            height: data.height,
            cells: data.cells,
        })
    }
}

impl Board {
    /// Creates an empty board
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width.max(0) as usize) * (height.max(0) as usize);
        Board {
            width,
            height,
            cells: vec![Cell::Free; size],
        }
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row >= 0 && coord.row < self.height && coord.col >= 0 && coord.col < self.width
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some((coord.row * self.width + coord.col) as usize)
        } else {
            None
        }
    }

    /// Content of a cell; `Wall` for every out-of-bounds coordinate
    pub fn cell(&self, coord: Coord) -> Cell {
        match self.index(coord) {
            Some(idx) => self.cells[idx],
            None => Cell::Wall,
        }
    }

    /// Overwrites a cell and returns its previous content.
    /// Out-of-bounds writes are ignored and report `Wall`.
    pub fn set(&mut self, coord: Coord, content: Cell) -> Cell {
        match self.index(coord) {
            Some(idx) => std::mem::replace(&mut self.cells[idx], content),
            None => Cell::Wall,
        }
    }

    /// The four orthogonal neighbours in RIGHT, DOWN, LEFT, UP order.
    /// Off-board neighbours are included; `cell` reports them as walls.
    pub fn neighbors(&self, coord: Coord) -> [(Direction, Coord); 4] {
        let dirs = Direction::all();
        [
            (dirs[0], dirs[0].apply(coord)),
            (dirs[1], dirs[1].apply(coord)),
            (dirs[2], dirs[2].apply(coord)),
            (dirs[3], dirs[3].apply(coord)),
        ]
    }

    pub fn area(&self) -> usize {
        self.cells.len()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let symbol = match self.cell(Coord::new(row, col)) {
                    Cell::Free => FREE_SYMBOL,
                    Cell::Wall => WALL_SYMBOL,
                    Cell::Trail(player) => player_symbol(player),
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_is_wall() {
        let board = Board::new(4, 3);
        for row in -2..6 {
            for col in -2..7 {
                let coord = Coord::new(row, col);
                let inside = row >= 0 && row < 3 && col >= 0 && col < 4;
                if inside {
                    assert_eq!(board.cell(coord), Cell::Free);
                } else {
                    assert_eq!(board.cell(coord), Cell::Wall, "{:?} should be a wall", coord);
                }
            }
        }
    }

    #[test]
    fn test_set_returns_previous_content() {
        let mut board = Board::new(3, 3);
        let coord = Coord::new(1, 2);
        assert_eq!(board.set(coord, Cell::Trail(1)), Cell::Free);
        assert_eq!(board.cell(coord), Cell::Trail(1));
        assert_eq!(board.set(coord, Cell::Free), Cell::Trail(1));
    }

    #[test]
    fn test_set_out_of_bounds_is_ignored() {
        let mut board = Board::new(2, 2);
        let before = board.clone();
        assert_eq!(board.set(Coord::new(-1, 0), Cell::Trail(0)), Cell::Wall);
        assert_eq!(board, before);
    }

    #[test]
    fn test_neighbor_order() {
        let board = Board::new(3, 3);
        let dirs: Vec<Direction> = board
            .neighbors(Coord::new(1, 1))
            .iter()
            .map(|(dir, _)| *dir)
            .collect();
        assert_eq!(dirs, Direction::all().to_vec());
    }

    #[test]
    fn test_deserialize_checks_cell_count() {
        let board = Board::new(2, 2);
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);

        let truncated = r#"{"width":2,"height":2,"cells":["Free","Free","Free"]}"#;
        let err = serde_json::from_str::<Board>(truncated).unwrap_err();
        assert!(err.to_string().contains("needs 4 cells, got 3"));

        let negative = r#"{"width":-1,"height":2,"cells":[]}"#;
        assert!(serde_json::from_str::<Board>(negative).is_err());
    }

    #[test]
    fn test_display_renders_trails() {
        let mut board = Board::new(3, 2);
        board.set(Coord::new(0, 0), Cell::Trail(0));
        board.set(Coord::new(1, 2), Cell::Trail(1));
        assert_eq!(board.to_string(), "o··\n··+\n");
    }
}
