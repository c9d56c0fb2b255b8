//! Static evaluation of Network positions

use crate::{board::Board, piece::*};

/// The score of a completed network
pub const WIN_SCORE: f64 = 1.0;

/// Scale of heuristic scores, keeping them strictly inside the win scores
pub const HEURISTIC_SCALE: f64 = 0.99;

// one direction of every line, so each connected pair is seen from one end only
const FORWARD: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Scores a position between -1 and 1, positive favouring White
///
/// A completed White network scores 1 and a completed Black network -1. A step
/// can complete networks for both sides at once, those go to the side that moved
/// last. Otherwise the score compares how many connected pairs each side has,
/// scaled into (-0.99, 0.99), and an empty board scores exactly 0.
pub fn evaluate(board: &Board) -> f64 {
    let last_mover = board.next_player().other();
    for &color in [last_mover, last_mover.other()].iter() {
        if board.is_win(color) {
            return win_score(color);
        }
    }

    let (white, black) = connections(board);
    if white == 0 && black == 0 {
        return 0.0;
    }
    HEURISTIC_SCALE * (white as f64 - black as f64) / (white + black) as f64
}

fn win_score(winner: Color) -> f64 {
    match winner {
        Color::White => WIN_SCORE,
        Color::Black => -WIN_SCORE,
    }
}

/// Scores a position from the point of view of `color`
pub fn evaluate_for(board: &Board, color: Color) -> f64 {
    match color {
        Color::White => evaluate(board),
        Color::Black => -evaluate(board),
    }
}

/// Counts the connected pairs of each side as `(white, black)`
///
/// Two pieces of the same colour are connected when they share a row, column or
/// diagonal with only empty cells between them.
pub fn connections(board: &Board) -> (usize, usize) {
    let mut counts = (0, 0);
    for x in 0..board.size() {
        for y in 0..board.size() {
            let cell = board.cell(x, y);
            let total = match cell {
                Cell::White => &mut counts.0,
                Cell::Black => &mut counts.1,
                Cell::Empty => continue,
            };
            *total += FORWARD
                .iter()
                .filter(|&&direction| connection_in_direction(board, x, y, direction).is_some())
                .count();
        }
    }
    counts
}

/// The piece connected to `(x, y)` in `direction`, if any
pub fn connection_in_direction(
    board: &Board,
    x: usize,
    y: usize,
    direction: (isize, isize),
) -> Option<Piece> {
    let own = board.cell(x, y);
    let mut position = board.offset(x, y, direction);
    while let Some((nx, ny)) = position {
        match board.cell(nx, ny) {
            Cell::Empty => position = board.offset(nx, ny, direction),
            cell if cell == own => return Some(Piece::new(nx, ny, cell)),
            _ => return None,
        }
    }
    None
}
