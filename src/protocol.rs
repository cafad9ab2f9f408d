// Per-turn text protocol of the light-cycle arena
//
// Every turn the arena sends:
//   N P            player count, index of the controlled player
//   X0 Y0 X1 Y1    N times: start cell and current cell of each player
// X is the column and Y the row. An eliminated player is reported as -1s.
// The bot answers with a single direction token per line.

use std::io::{BufRead, Write};

use crate::types::{Coord, Direction, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerObservation {
    pub start: Coord,
    pub current: Coord,
}

impl PlayerObservation {
    pub fn is_eliminated(&self) -> bool {
        self.current.row < 0 || self.current.col < 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnInput {
    pub my_index: PlayerId,
    pub players: Vec<PlayerObservation>,
}

impl TurnInput {
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn starts(&self) -> Vec<Coord> {
        self.players.iter().map(|p| p.start).collect()
    }
}

fn parse_ints(line: &str, expected: usize) -> Result<Vec<i32>, String> {
    let values = line
        .split_whitespace()
        .map(|token| {
            token
                .parse::<i32>()
                .map_err(|e| format!("Invalid integer '{}': {}", token, e))
        })
        .collect::<Result<Vec<i32>, String>>()?;

    if values.len() != expected {
        return Err(format!(
            "Expected {} integers, got {} in line '{}'",
            expected,
            values.len(),
            line.trim()
        ));
    }
    Ok(values)
}

fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>, String> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| format!("Failed to read input: {}", e))?;
    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

/// Reads one turn. Returns `Ok(None)` when the input ends before a new turn.
pub fn read_turn<R: BufRead>(reader: &mut R) -> Result<Option<TurnInput>, String> {
    let header = loop {
        match read_line(reader)? {
            None => return Ok(None),
            Some(line) if line.trim().is_empty() => continue,
            Some(line) => break line,
        }
    };

    let header = parse_ints(&header, 2)?;
    let (count, my_index) = (header[0], header[1]);
    if count <= 0 || my_index < 0 || my_index >= count {
        return Err(format!(
            "Invalid turn header: {} players, controlled index {}",
            count, my_index
        ));
    }

    let mut players = Vec::with_capacity(count as usize);
    for player in 0..count {
        let line = read_line(reader)?
            .ok_or_else(|| format!("Input ended before player {} of {}", player, count))?;
        let values = parse_ints(&line, 4)?;
        players.push(PlayerObservation {
            start: Coord::new(values[1], values[0]),
            current: Coord::new(values[3], values[2]),
        });
    }

    Ok(Some(TurnInput {
        my_index: my_index as PlayerId,
        players,
    }))
}

/// Writes the answer for one turn and flushes, the arena waits on it
pub fn write_move<W: Write>(writer: &mut W, direction: Direction) -> Result<(), String> {
    writeln!(writer, "{}", direction.as_str())
        .and_then(|_| writer.flush())
        .map_err(|e| format!("Failed to write move: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_consecutive_turns() {
        let mut input = Cursor::new("2 1\n0 0 3 0\n29 19 29 18\n2 1\n0 0 4 0\n-1 -1 -1 -1\n");

        let first = read_turn(&mut input).unwrap().unwrap();
        assert_eq!(first.my_index, 1);
        assert_eq!(first.player_count(), 2);
        assert_eq!(first.players[0].start, Coord::new(0, 0));
        assert_eq!(first.players[0].current, Coord::new(0, 3));
        assert_eq!(first.players[1].current, Coord::new(18, 29));
        assert!(!first.players[1].is_eliminated());

        let second = read_turn(&mut input).unwrap().unwrap();
        assert!(second.players[1].is_eliminated());

        assert_eq!(read_turn(&mut input).unwrap(), None);
    }

    #[test]
    fn test_rejects_malformed_lines() {
        assert!(read_turn(&mut Cursor::new("2 0\n1 2 x 4\n0 0 0 0\n")).is_err());
        assert!(read_turn(&mut Cursor::new("1 0\n1 2 3\n")).is_err());
        assert!(read_turn(&mut Cursor::new("2 2\n")).is_err());
        assert!(read_turn(&mut Cursor::new("2 0\n1 1 1 1\n")).is_err());
    }

    #[test]
    fn test_write_move() {
        let mut out = Vec::new();
        write_move(&mut out, Direction::Left).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "LEFT\n");
    }
}
