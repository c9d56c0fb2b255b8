//! The game board and the placement/movement rules

use anyhow::{anyhow, Result};

use std::fmt;

use crate::{piece::*, BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE, PLACEMENT_MOVES};

/// The eight directions to a neighbouring cell, as `(dx, dy)`
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A square Network board
///
/// # Notes
/// The grid is dense: every cell holds a `Cell`, `Cell::Empty` for vacant cells.
/// The move counter and the player to move follow every applied and undone move,
/// so a search can explore alternatives by applying a move, recursing and undoing
/// that exact move instead of copying the board.
///
/// # Goal areas
/// White owns the left and right columns, Black owns the top and bottom rows.
/// The four corners belong to nobody and can never be occupied through a move.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    // cells are stored column by column, index x * MAX_BOARD_SIZE + y
    cells: [Cell; MAX_BOARD_SIZE * MAX_BOARD_SIZE],
    size: usize,
    num_moves: usize,
    next_player: Color,
}

impl Board {
    /// Creates an empty board of the default size, White to move
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; MAX_BOARD_SIZE * MAX_BOARD_SIZE],
            size: BOARD_SIZE,
            num_moves: 0,
            next_player: Color::White,
        }
    }

    /// Creates an empty board with `size` cells per side
    pub fn with_size(size: usize) -> Result<Self> {
        if size < MIN_BOARD_SIZE || size > MAX_BOARD_SIZE {
            return Err(anyhow!(
                "Invalid board size {}. Sizes must be between {} and {}",
                size,
                MIN_BOARD_SIZE,
                MAX_BOARD_SIZE
            ));
        }
        Ok(Self {
            size,
            ..Self::new()
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    pub fn next_player(&self) -> Color {
        self.next_player
    }

    /// Whether only `Add` moves are legal (otherwise only `Step` moves are)
    pub fn in_placement_phase(&self) -> bool {
        self.num_moves < PLACEMENT_MOVES
    }

    pub(crate) fn index(x: usize, y: usize) -> usize {
        x * MAX_BOARD_SIZE + y
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    /// Returns the content of `(x, y)`, which must be on the board
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        debug_assert!(self.in_bounds(x, y), "({}, {}) is off the board", x, y);
        self.cells[Self::index(x, y)]
    }

    /// Returns the piece at `(x, y)`, or `None` off the board
    pub fn piece(&self, x: usize, y: usize) -> Option<Piece> {
        if self.in_bounds(x, y) {
            Some(Piece::new(x, y, self.cell(x, y)))
        } else {
            None
        }
    }

    /// Returns the cell one step from `(x, y)` in direction `(dx, dy)`, if it is on the board
    pub fn offset(&self, x: usize, y: usize, (dx, dy): (isize, isize)) -> Option<(usize, usize)> {
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        if nx < 0 || ny < 0 || !self.in_bounds(nx as usize, ny as usize) {
            None
        } else {
            Some((nx as usize, ny as usize))
        }
    }

    /// Writes a cell directly, bypassing every rule and leaving the move counter
    /// and the player to move untouched. Intended for setting up positions.
    pub fn place(&mut self, x: usize, y: usize, cell: Cell) {
        assert!(self.in_bounds(x, y), "({}, {}) is off the board", x, y);
        self.cells[Self::index(x, y)] = cell;
    }

    /// All pieces of `color` in column-major order
    pub fn pieces(&self, color: Color) -> Vec<Piece> {
        self.cells_matching(Cell::from(color))
    }

    /// All vacant cells in column-major order
    pub fn empty_cells(&self) -> Vec<Piece> {
        self.cells_matching(Cell::Empty)
    }

    fn cells_matching(&self, target: Cell) -> Vec<Piece> {
        let mut found = Vec::new();
        for x in 0..self.size {
            for y in 0..self.size {
                if self.cell(x, y) == target {
                    found.push(Piece::new(x, y, target));
                }
            }
        }
        found
    }

    pub fn piece_count(&self, color: Color) -> usize {
        let target = Cell::from(color);
        (0..self.size)
            .flat_map(|x| (0..self.size).map(move |y| (x, y)))
            .filter(|&(x, y)| self.cell(x, y) == target)
            .count()
    }

    pub fn is_corner(&self, x: usize, y: usize) -> bool {
        let last = self.size - 1;
        (x == 0 || x == last) && (y == 0 || y == last)
    }

    /// Whether `(x, y)` lies in one of the two goal lines owned by `color`, corners excluded
    pub fn in_goal_area(&self, x: usize, y: usize, color: Color) -> bool {
        if self.is_corner(x, y) {
            return false;
        }
        let last = self.size - 1;
        match color {
            Color::White => x == 0 || x == last,
            Color::Black => y == 0 || y == last,
        }
    }

    /// Whether `(x, y)` is on the goal line `color` starts its networks from
    pub fn in_start_area(&self, x: usize, y: usize, color: Color) -> bool {
        match color {
            Color::White => x == 0,
            Color::Black => y == 0,
        }
    }

    /// Whether `(x, y)` is on the goal line `color` ends its networks on
    pub fn in_end_area(&self, x: usize, y: usize, color: Color) -> bool {
        let last = self.size - 1;
        match color {
            Color::White => x == last,
            Color::Black => y == last,
        }
    }

    /// Checks whether a piece of `color` at `(x, y)` would be part of a cluster.
    ///
    /// A cluster is a piece with two or more same-coloured neighbours, or a
    /// same-coloured neighbour that has a same-coloured neighbour of its own.
    /// `vacated` is a cell treated as empty, the source of a step.
    pub fn forms_cluster(
        &self,
        x: usize,
        y: usize,
        color: Color,
        vacated: Option<(usize, usize)>,
    ) -> bool {
        let target = Cell::from(color);
        let same = |cx: usize, cy: usize| {
            (cx, cy) != (x, y) && Some((cx, cy)) != vacated && self.cell(cx, cy) == target
        };

        let mut count = 0;
        for &direction in DIRECTIONS.iter() {
            let (nx, ny) = match self.offset(x, y, direction) {
                Some(neighbour) if same(neighbour.0, neighbour.1) => neighbour,
                _ => continue,
            };
            count += 1;
            if count > 1 {
                return true;
            }
            // a neighbour that already touches another piece of ours
            let crowded = DIRECTIONS.iter().any(|&second| {
                self.offset(nx, ny, second)
                    .map_or(false, |(sx, sy)| same(sx, sy))
            });
            if crowded {
                return true;
            }
        }
        false
    }

    fn can_place(&self, x: usize, y: usize, color: Color, vacated: Option<(usize, usize)>) -> bool {
        self.in_bounds(x, y)
            && !self.is_corner(x, y)
            && !self.in_goal_area(x, y, color.other())
            && self.cell(x, y).is_empty()
            && !self.forms_cluster(x, y, color, vacated)
    }

    fn can_lift(&self, x: usize, y: usize, color: Color) -> bool {
        self.in_bounds(x, y)
            && !self.is_corner(x, y)
            && !self.in_goal_area(x, y, color.other())
            && self.cell(x, y) == Cell::from(color)
    }

    /// Checks whether `color` may play `candidate` in the current position
    pub fn is_legal(&self, candidate: Move, color: Color) -> bool {
        match candidate {
            Move::Quit => true,
            Move::Add { x, y } => self.in_placement_phase() && self.can_place(x, y, color, None),
            Move::Step {
                to_x,
                to_y,
                from_x,
                from_y,
            } => {
                !self.in_placement_phase()
                    && (to_x, to_y) != (from_x, from_y)
                    && self.can_lift(from_x, from_y, color)
                    && self.can_place(to_x, to_y, color, Some((from_x, from_y)))
            }
        }
    }

    /// Plays `candidate` for `color` if it is legal
    ///
    /// Returns false and leaves the board untouched for an illegal move. `Quit`
    /// always succeeds and changes nothing. Every other move passes the turn on,
    /// even one played out of turn.
    pub fn apply_move(&mut self, candidate: Move, color: Color) -> bool {
        if !self.is_legal(candidate, color) {
            return false;
        }
        match candidate {
            Move::Quit => return true,
            Move::Add { x, y } => self.place(x, y, Cell::from(color)),
            Move::Step {
                to_x,
                to_y,
                from_x,
                from_y,
            } => {
                self.place(from_x, from_y, Cell::Empty);
                self.place(to_x, to_y, Cell::from(color));
            }
        }
        self.next_player = self.next_player.other();
        self.num_moves += 1;
        true
    }

    /// Reverses `candidate`, previously applied for `color` to this exact position
    ///
    /// No legality checks are made. The turn passes back, so the board is left
    /// exactly as it was before `apply_move`.
    pub fn undo_move(&mut self, candidate: Move, color: Color) {
        match candidate {
            Move::Quit => return,
            Move::Add { x, y } => self.place(x, y, Cell::Empty),
            Move::Step {
                to_x,
                to_y,
                from_x,
                from_y,
            } => {
                self.place(to_x, to_y, Cell::Empty);
                self.place(from_x, from_y, Cell::from(color));
            }
        }
        self.next_player = self.next_player.other();
        self.num_moves -= 1;
    }

    /// Lists every legal move for `color`
    ///
    /// Adds are listed in column-major order of the target cell. Steps are listed
    /// by source piece, then by target cell, both in column-major order.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        if self.in_placement_phase() {
            for x in 0..self.size {
                for y in 0..self.size {
                    let candidate = Move::Add { x, y };
                    if self.is_legal(candidate, color) {
                        moves.push(candidate);
                    }
                }
            }
        } else {
            let empty_cells = self.empty_cells();
            for from in self.pieces(color) {
                for to in empty_cells.iter() {
                    let candidate = Move::Step {
                        to_x: to.x,
                        to_y: to.y,
                        from_x: from.x,
                        from_y: from.y,
                    };
                    if self.is_legal(candidate, color) {
                        moves.push(candidate);
                    }
                }
            }
        }
        moves
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "----".repeat(self.size);
        write!(f, "{}", rule)?;
        for y in 0..self.size {
            write!(f, "\n|")?;
            for x in 0..self.size {
                let status = match self.cell(x, y) {
                    Cell::White => " W |",
                    Cell::Black => " B |",
                    Cell::Empty => "   |",
                };
                write!(f, "{}", status)?;
            }
            write!(f, "\n{}", rule)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_corners_and_opponent_goals() {
        let board = Board::new();
        for &(x, y) in [(0, 0), (0, 7), (7, 0), (7, 7)].iter() {
            assert!(!board.is_legal(Move::Add { x, y }, Color::White));
            assert!(!board.is_legal(Move::Add { x, y }, Color::Black));
        }
        // White may use the left and right columns but not the top and bottom rows
        assert!(board.is_legal(Move::Add { x: 0, y: 3 }, Color::White));
        assert!(!board.is_legal(Move::Add { x: 3, y: 0 }, Color::White));
        assert!(board.is_legal(Move::Add { x: 3, y: 7 }, Color::Black));
        assert!(!board.is_legal(Move::Add { x: 7, y: 3 }, Color::Black));
        assert!(!board.is_legal(Move::Add { x: 8, y: 3 }, Color::Black));
    }

    #[test]
    fn rejects_occupied_cells() {
        let mut board = Board::new();
        assert!(board.apply_move(Move::Add { x: 3, y: 3 }, Color::White));
        assert!(!board.apply_move(Move::Add { x: 3, y: 3 }, Color::Black));
        assert_eq!(board.cell(3, 3), Cell::White);
    }

    #[test]
    fn rejects_clusters() {
        let mut board = Board::new();
        board.place(2, 2, Cell::White);
        board.place(4, 2, Cell::White);

        // two neighbours at once
        assert!(board.forms_cluster(3, 2, Color::White, None));
        assert!(!board.is_legal(Move::Add { x: 3, y: 3 }, Color::White));
        // a single neighbour is fine
        assert!(board.is_legal(Move::Add { x: 1, y: 1 }, Color::White));
        // other colours do not count
        assert!(board.is_legal(Move::Add { x: 3, y: 3 }, Color::Black));

        board.place(1, 1, Cell::White);
        // the neighbour at (1, 1) already has a neighbour
        assert!(!board.is_legal(Move::Add { x: 0, y: 1 }, Color::White));
        assert!(!board.is_legal(Move::Add { x: 2, y: 1 }, Color::White));
        assert!(board.is_legal(Move::Add { x: 5, y: 5 }, Color::White));
    }

    #[test]
    fn phase_gates_move_kinds() {
        let mut board = Board::new();
        board.place(3, 3, Cell::White);
        let step = Move::Step {
            to_x: 5,
            to_y: 5,
            from_x: 3,
            from_y: 3,
        };
        assert!(!board.is_legal(step, Color::White));

        board.num_moves = PLACEMENT_MOVES;
        assert!(board.is_legal(step, Color::White));
        assert!(!board.is_legal(Move::Add { x: 5, y: 5 }, Color::White));
        assert!(board
            .legal_moves(Color::White)
            .iter()
            .all(|candidate| matches!(candidate, Move::Step { .. })));
    }

    #[test]
    fn step_validates_source() {
        let mut board = Board::new();
        board.num_moves = PLACEMENT_MOVES;
        board.place(3, 3, Cell::White);
        board.place(0, 0, Cell::White);

        let from = |from_x, from_y| Move::Step {
            to_x: 5,
            to_y: 5,
            from_x,
            from_y,
        };
        assert!(board.is_legal(from(3, 3), Color::White));
        // wrong colour, empty source, corner source
        assert!(!board.is_legal(from(3, 3), Color::Black));
        assert!(!board.is_legal(from(4, 4), Color::White));
        assert!(!board.is_legal(from(0, 0), Color::White));
        // stepping onto itself
        assert!(!board.is_legal(
            Move::Step {
                to_x: 3,
                to_y: 3,
                from_x: 3,
                from_y: 3
            },
            Color::White
        ));
    }

    #[test]
    fn step_ignores_its_own_source_for_clusters() {
        let mut board = Board::new();
        board.num_moves = PLACEMENT_MOVES;
        board.place(2, 2, Cell::Black);
        board.place(4, 2, Cell::Black);

        // sliding (4, 2) next to (2, 2) leaves a single pair
        let slide = Move::Step {
            to_x: 3,
            to_y: 2,
            from_x: 4,
            from_y: 2,
        };
        assert!(board.apply_move(slide, Color::Black));
        assert_eq!(board.cell(4, 2), Cell::Empty);
        assert_eq!(board.cell(3, 2), Cell::Black);
    }

    #[test]
    fn undo_restores_position() {
        let mut board = Board::new();
        assert!(board.apply_move(Move::Add { x: 1, y: 3 }, Color::White));
        let before = board.clone();

        let reply = Move::Add { x: 4, y: 6 };
        assert!(board.apply_move(reply, Color::Black));
        assert_eq!(board.num_moves(), 2);
        assert_eq!(board.next_player(), Color::White);

        board.undo_move(reply, Color::Black);
        assert_eq!(board, before);
        assert_eq!(board.next_player(), Color::Black);
    }

    #[test]
    fn undo_restores_turn_after_out_of_turn_move() {
        let mut board = Board::new();
        let before = board.clone();
        let early = Move::Add { x: 3, y: 3 };
        assert!(board.apply_move(early, Color::Black));
        assert_eq!(board.next_player(), Color::Black);

        board.undo_move(early, Color::Black);
        assert_eq!(board, before);
        assert_eq!(board.next_player(), Color::White);

        board.num_moves = PLACEMENT_MOVES;
        board.place(3, 3, Cell::Black);
        let before = board.clone();
        let step = Move::Step {
            to_x: 5,
            to_y: 5,
            from_x: 3,
            from_y: 3,
        };
        assert!(board.apply_move(step, Color::Black));
        board.undo_move(step, Color::Black);
        assert_eq!(board, before);
    }

    #[test]
    fn quit_changes_nothing() {
        let mut board = Board::new();
        let before = board.clone();
        assert!(board.apply_move(Move::Quit, Color::Black));
        assert_eq!(board, before);
    }

    #[test]
    fn enumerates_adds_in_order() {
        let board = Board::new();
        let moves = board.legal_moves(Color::White);
        // 64 cells less 4 corners less 12 cells in Black's rows
        assert_eq!(moves.len(), 48);
        assert_eq!(moves[0], Move::Add { x: 0, y: 1 });
        assert_eq!(moves[1], Move::Add { x: 0, y: 2 });
        assert_eq!(moves[47], Move::Add { x: 7, y: 6 });
    }

    #[test]
    fn enumerates_steps_by_source_then_target() -> Result<()> {
        let mut board = Board::with_size(4)?;
        board.num_moves = PLACEMENT_MOVES;
        board.place(1, 1, Cell::White);
        board.place(2, 2, Cell::White);
        board.place(1, 2, Cell::Black);

        let step = |from_x, from_y, to_x, to_y| Move::Step {
            to_x,
            to_y,
            from_x,
            from_y,
        };
        let moves = board.legal_moves(Color::White);
        assert_eq!(
            moves[..5],
            [
                step(1, 1, 0, 1),
                step(1, 1, 0, 2),
                step(1, 1, 2, 1),
                step(1, 1, 3, 1),
                step(1, 1, 3, 2)
            ]
        );
        assert_eq!(moves[5], step(2, 2, 0, 1));
        assert_eq!(moves.len(), 10);
        Ok(())
    }

    #[test]
    fn board_sizes_are_checked() {
        assert!(Board::with_size(MIN_BOARD_SIZE - 1).is_err());
        assert!(Board::with_size(MAX_BOARD_SIZE + 1).is_err());
        let board = Board::with_size(6).unwrap();
        assert_eq!(board.size(), 6);
        assert!(board.is_corner(5, 5));
        assert!(board.in_goal_area(5, 3, Color::White));
        assert_eq!(board.legal_moves(Color::Black).len(), 36 - 4 - 8);
    }

    #[test]
    fn renders_grid() {
        let mut board = Board::with_size(3).unwrap();
        board.place(1, 0, Cell::Black);
        board.place(0, 1, Cell::White);
        let text = board.to_string();
        assert!(text.contains("|   | B |   |"));
        assert!(text.contains("| W |   |   |"));
    }
}
