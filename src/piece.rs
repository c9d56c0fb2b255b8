//! Value types shared by the rules engine and the players

use anyhow::{anyhow, Result};

use std::fmt;
use std::str::FromStr;

/// One of the two sides
///
/// White connects the left and right edges, Black connects the top and bottom edges.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// The content of a single board cell
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    White,
    Black,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Cell::White,
            Color::Black => Cell::Black,
        }
    }
}

/// A cell together with its position on the board
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Piece {
    pub x: usize,
    pub y: usize,
    pub cell: Cell,
}

impl Piece {
    pub fn new(x: usize, y: usize, cell: Cell) -> Self {
        Self { x, y, cell }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self.cell {
            Cell::White => "White",
            Cell::Black => "Black",
            Cell::Empty => "Empty",
        };
        write!(f, "{} piece at ({}, {})", status, self.x, self.y)
    }
}

/// A move intent, as exchanged with a game driver
///
/// Coordinates are zero-based. A `Step` moves the piece at `(from_x, from_y)` to the
/// empty cell `(to_x, to_y)`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Move {
    Add {
        x: usize,
        y: usize,
    },
    Step {
        to_x: usize,
        to_y: usize,
        from_x: usize,
        from_y: usize,
    },
    Quit,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Add { x, y } => write!(f, "{} {}", x, y),
            Move::Step {
                to_x,
                to_y,
                from_x,
                from_y,
            } => write!(f, "{} {} {} {}", to_x, to_y, from_x, from_y),
            Move::Quit => write!(f, "quit"),
        }
    }
}

/// Parses `"x y"` as an add, `"x y fx fy"` as a step and `"quit"` as a quit
impl FromStr for Move {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            return Ok(Move::Quit);
        }

        let coordinates = input
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<usize>()
                    .map_err(|_| anyhow!("could not parse '{}' as a coordinate", token))
            })
            .collect::<Result<Vec<_>>>()?;

        match coordinates.as_slice() {
            &[x, y] => Ok(Move::Add { x, y }),
            &[to_x, to_y, from_x, from_y] => Ok(Move::Step {
                to_x,
                to_y,
                from_x,
                from_y,
            }),
            _ => Err(anyhow!(
                "invalid move '{}', expected 'x y', 'x y from_x from_y' or 'quit'",
                input
            )),
        }
    }
}
