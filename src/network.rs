//! Detection of winning networks
//!
//! A network is a chain of same-coloured pieces from a side's start line to its end
//! line, where consecutive pieces see each other along a row, column or diagonal
//! without an opposing piece in between. It wins when it holds at least
//! `MIN_NETWORK_LENGTH` pieces and never passes straight through a piece.
//!
//! Nothing is cached: every query walks the current position from scratch, which
//! makes these walks the dominant cost of a search.

use crate::{board::*, piece::*, MIN_NETWORK_LENGTH};

/// An ordered chain of distinct pieces, each connected to the next
pub type Path = Vec<Piece>;

impl Board {
    /// Pieces of `color` on its start line, corners excluded
    pub fn goal_start(&self, color: Color) -> Vec<Piece> {
        self.goal_line(color, |board, x, y| board.in_start_area(x, y, color))
    }

    /// Pieces of `color` on its end line, corners excluded
    pub fn goal_end(&self, color: Color) -> Vec<Piece> {
        self.goal_line(color, |board, x, y| board.in_end_area(x, y, color))
    }

    fn goal_line<F>(&self, color: Color, on_line: F) -> Vec<Piece>
    where
        F: Fn(&Self, usize, usize) -> bool,
    {
        self.pieces(color)
            .into_iter()
            .filter(|piece| !self.is_corner(piece.x, piece.y) && on_line(self, piece.x, piece.y))
            .collect()
    }

    /// The pieces `piece` connects to for `color`
    ///
    /// Scans outwards in all eight directions. An opposing piece blocks the
    /// direction, the first piece of `color` is a connection unless it sits on the
    /// start line. A piece on the end line has no connections.
    pub fn adjacent(&self, piece: Piece, color: Color) -> Vec<Piece> {
        let mut edges = Vec::new();
        if self.in_end_area(piece.x, piece.y, color) {
            return edges;
        }

        let own = Cell::from(color);
        let opponent = Cell::from(color.other());
        for &direction in DIRECTIONS.iter() {
            let mut position = self.offset(piece.x, piece.y, direction);
            while let Some((x, y)) = position {
                let cell = self.cell(x, y);
                if cell == opponent {
                    break;
                }
                if cell == own {
                    if !self.in_start_area(x, y, color) {
                        edges.push(Piece::new(x, y, cell));
                    }
                    break;
                }
                position = self.offset(x, y, direction);
            }
        }
        edges
    }

    /// Every simple path from a start piece to an end piece of `color`
    ///
    /// Length and straightness are not considered, see `valid_networks`.
    pub fn all_paths(&self, color: Color) -> Vec<Path> {
        let mut paths = Vec::new();
        self.walk_paths(color, &mut |path: &[Piece]| {
            paths.push(path.to_vec());
            false
        });
        paths
    }

    /// Whether `color` has completed a winning network
    pub fn is_win(&self, color: Color) -> bool {
        let mut won = false;
        self.walk_paths(color, &mut |path: &[Piece]| {
            won = is_network(path);
            won
        });
        won
    }

    /// Depth-first walk over all start-to-end paths of `color`
    ///
    /// `visit` is called with each complete path and returns true to stop the walk.
    fn walk_paths<F>(&self, color: Color, visit: &mut F)
    where
        F: FnMut(&[Piece]) -> bool,
    {
        let mut path = Vec::with_capacity(self.size() * self.size());
        for start in self.goal_start(color) {
            if self.extend_path(start, color, 0, &mut path, visit) {
                return;
            }
        }
    }

    // on_path marks the pieces of the current path only, it is cleared on backtrack
    fn extend_path<F>(
        &self,
        piece: Piece,
        color: Color,
        on_path: u64,
        path: &mut Path,
        visit: &mut F,
    ) -> bool
    where
        F: FnMut(&[Piece]) -> bool,
    {
        let on_path = on_path | 1 << Board::index(piece.x, piece.y);
        path.push(piece);

        let stop = if self.in_end_area(piece.x, piece.y, color) {
            !self.is_corner(piece.x, piece.y) && visit(path)
        } else {
            self.adjacent(piece, color)
                .into_iter()
                .filter(|next| on_path & 1 << Board::index(next.x, next.y) == 0)
                .any(|next| self.extend_path(next, color, on_path, path, visit))
        };

        path.pop();
        stop
    }
}

/// The direction from one piece to the next, as a unit step
fn direction(from: &Piece, to: &Piece) -> (isize, isize) {
    let dx = to.x as isize - from.x as isize;
    let dy = to.y as isize - from.y as isize;
    assert!(
        (dx, dy) != (0, 0) && (dx == 0 || dy == 0 || dx.abs() == dy.abs()),
        "malformed path: {} does not line up with {}",
        from,
        to
    );
    (dx.signum(), dy.signum())
}

/// Whether `path` is long enough and never runs straight through a piece
pub fn is_network(path: &[Piece]) -> bool {
    if path.len() < MIN_NETWORK_LENGTH {
        return false;
    }
    let directions: Vec<_> = path.windows(2).map(|pair| direction(&pair[0], &pair[1])).collect();
    directions.windows(2).all(|turn| turn[0] != turn[1])
}

/// Keeps only the paths that are winning networks
pub fn valid_networks(paths: Vec<Path>) -> Vec<Path> {
    paths.into_iter().filter(|path| is_network(path)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(white: &[(usize, usize)], black: &[(usize, usize)]) -> Board {
        let mut board = Board::new();
        for &(x, y) in white {
            board.place(x, y, Cell::White);
        }
        for &(x, y) in black {
            board.place(x, y, Cell::Black);
        }
        board
    }

    fn positions(pieces: &[Piece]) -> Vec<(usize, usize)> {
        pieces.iter().map(Piece::position).collect()
    }

    #[test]
    fn goal_lines_skip_corners() {
        let board = board_with(&[(0, 0), (0, 3), (7, 5), (3, 3)], &[(2, 0), (5, 7), (7, 7)]);
        assert_eq!(positions(&board.goal_start(Color::White)), vec![(0, 3)]);
        assert_eq!(positions(&board.goal_end(Color::White)), vec![(7, 5)]);
        assert_eq!(positions(&board.goal_start(Color::Black)), vec![(2, 0)]);
        assert_eq!(positions(&board.goal_end(Color::Black)), vec![(5, 7)]);
    }

    #[test]
    fn adjacency_is_line_of_sight() {
        let board = board_with(&[(1, 1), (1, 5), (5, 5), (4, 1), (0, 3)], &[(3, 3)]);
        let edges = positions(&board.adjacent(Piece::new(1, 1, Cell::White), Color::White));
        // (5, 5) is hidden behind the black piece, (0, 3) is not on a line
        assert_eq!(edges, vec![(4, 1), (1, 5)]);
    }

    #[test]
    fn adjacency_skips_start_line_and_stops_at_end_line() {
        let board = board_with(&[(0, 2), (2, 2), (7, 2)], &[]);
        assert!(board
            .adjacent(Piece::new(2, 2, Cell::White), Color::White)
            .iter()
            .all(|piece| piece.x != 0));
        assert!(board
            .adjacent(Piece::new(7, 2, Cell::White), Color::White)
            .is_empty());
    }

    #[test]
    fn straight_runs_are_rejected() {
        let piece = |x, y| Piece::new(x, y, Cell::White);
        let zigzag = vec![
            piece(0, 1),
            piece(2, 1),
            piece(2, 4),
            piece(3, 4),
            piece(3, 1),
            piece(7, 1),
        ];
        assert!(is_network(&zigzag));
        assert!(!is_network(&zigzag[..5]));

        let straight = vec![
            piece(0, 1),
            piece(2, 1),
            piece(4, 1),
            piece(4, 4),
            piece(6, 4),
            piece(7, 5),
        ];
        assert!(!is_network(&straight));
        assert_eq!(valid_networks(vec![straight, zigzag.clone()]), vec![zigzag]);
    }

    #[test]
    #[should_panic(expected = "malformed path")]
    fn misaligned_paths_are_bugs() {
        let piece = |x, y| Piece::new(x, y, Cell::Black);
        is_network(&[
            piece(1, 0),
            piece(2, 3),
            piece(2, 5),
            piece(4, 5),
            piece(4, 6),
            piece(5, 7),
        ]);
    }

    #[test]
    fn paths_never_repeat_pieces() {
        let board = board_with(&[(0, 2), (2, 2), (2, 5), (4, 5), (4, 2), (7, 2)], &[]);
        let paths = board.all_paths(Color::White);
        assert!(!paths.is_empty());
        for path in paths.iter() {
            let mut seen = positions(path);
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), path.len());
            assert_eq!(path[0].x, 0);
            assert_eq!(path[path.len() - 1].x, 7);
        }
    }
}
