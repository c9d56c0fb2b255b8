//! An agent choosing Network moves by game tree search

use anyhow::{anyhow, Result};

use crate::{
    board::Board,
    eval::{evaluate_for, WIN_SCORE},
    piece::*,
    player::Player,
    DEFAULT_SEARCH_DEPTH, DEPTH_REDUCTION, PLACEMENT_MOVES,
};

/// Factor applied to a score for every ply it lies in the future, preferring quicker wins
pub const DISCOUNT: f64 = 0.99;

/// The outcome of a search: the best move found and its score
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Best {
    pub best_move: Option<Move>,
    pub score: f64,
}

impl Best {
    fn leaf(score: f64) -> Self {
        Self {
            best_move: None,
            score,
        }
    }
}

/// A Network player searching a fixed number of plies ahead
///
/// # Notes
/// The search is a depth-limited minimax with alpha-beta pruning. The player owns
/// a single board which the search mutates in place, undoing every move before
/// trying the next one.
///
/// # Position Scoring
/// Scores are seen from this player's side: 1 for a completed network of ours, -1
/// for one of the opponent's, heuristic values strictly in between otherwise. A
/// score reached `n` plies ahead is discounted by `DISCOUNT` to the power `n`, so
/// nearer wins score higher than distant ones.
pub struct MachinePlayer {
    board: Board,
    color: Color,
    max_depth: usize,

    /// The number of nodes searched by this `MachinePlayer` so far (for diagnostics only)
    pub node_count: usize,
}

impl MachinePlayer {
    /// Creates a player with the default search depth on an empty board
    pub fn new(color: Color) -> Self {
        Self::with_depth(color, DEFAULT_SEARCH_DEPTH)
    }

    /// Creates a player with a given search depth on an empty board
    pub fn with_depth(color: Color, max_depth: usize) -> Self {
        Self::with_board(color, max_depth, Board::new())
    }

    /// Creates a player continuing from an existing position
    pub fn with_board(color: Color, max_depth: usize, board: Board) -> Self {
        Self {
            board,
            color,
            max_depth,
            node_count: 0,
        }
    }

    /// Creates a player from externally supplied settings
    pub fn with_config(color: Color, max_depth: usize, board_size: usize) -> Result<Self> {
        if max_depth == 0 {
            return Err(anyhow!("Invalid search depth 0, the search must look at least one move ahead"));
        }
        Ok(Self::with_board(color, max_depth, Board::with_size(board_size)?))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The depth the next search will use, never less than one move
    ///
    /// Once the placement phase is over every piece can step to many cells, so the
    /// search runs shallower to keep the tree manageable.
    pub fn search_depth(&self) -> usize {
        let depth = if self.board.num_moves() > PLACEMENT_MOVES {
            self.max_depth.saturating_sub(DEPTH_REDUCTION)
        } else {
            self.max_depth
        };
        depth.max(1)
    }

    /// Performs game tree search with `side` to move
    ///
    /// `alpha` and `beta` bound the scores of interest: a result at or below `alpha`
    /// (or at or above `beta`) only says the true score lies beyond that bound.
    /// `best_move` is `None` for leaves and when no move improved on the window.
    pub fn search(&mut self, side: Color, alpha: f64, beta: f64, depth: usize) -> Best {
        self.node_count += 1;

        let score = evaluate_for(&self.board, self.color);
        if depth == 0 || score.abs() == WIN_SCORE {
            return Best::leaf(score);
        }

        let moves = self.board.legal_moves(side);
        if moves.is_empty() {
            return Best {
                best_move: Some(Move::Quit),
                score: 0.0,
            };
        }

        let maximizing = side == self.color;
        // the window as seen by the replies, which are discounted on the way up
        let (lower, upper) = (alpha / DISCOUNT, beta / DISCOUNT);
        let (mut child_alpha, mut child_beta) = (lower, upper);
        let mut best_move = None;
        let mut best_reply = if maximizing { lower } else { upper };

        for candidate in moves {
            let applied = self.board.apply_move(candidate, side);
            assert!(applied, "enumerated move {} rejected for {}", candidate, side);
            let reply = self
                .search(side.other(), child_alpha, child_beta, depth - 1)
                .score;
            self.board.undo_move(candidate, side);

            if maximizing && reply > best_reply {
                best_move = Some(candidate);
                best_reply = reply;
                child_alpha = reply;
            } else if !maximizing && reply < best_reply {
                best_move = Some(candidate);
                best_reply = reply;
                child_beta = reply;
            }
            // the opponent will never allow this line
            if child_alpha >= child_beta {
                break;
            }
        }

        // bounds must stay bounds after discounting, or the parent takes them for scores
        let discounted = DISCOUNT * best_reply;
        let score = if best_reply <= lower {
            discounted.min(alpha)
        } else if best_reply >= upper {
            discounted.max(beta)
        } else {
            discounted
        };
        Best { best_move, score }
    }

    /// Searches for the best move of this player and plays it on the player's board
    pub fn choose_move_verbose(&mut self) -> Move {
        self._choose_move(false)
    }

    fn _choose_move(&mut self, silent: bool) -> Move {
        let depth = self.search_depth();
        let start_nodes = self.node_count;
        let best = self.search(self.color, -WIN_SCORE, WIN_SCORE, depth);

        let chosen = match best.best_move {
            Some(chosen) => chosen,
            None => {
                // only a finished game leaves the root without a move
                assert!(
                    best.score.abs() == WIN_SCORE,
                    "search found no move in an undecided position:\n{}",
                    self.board
                );
                Move::Quit
            }
        };

        // log progress to stdout
        if !silent {
            println!(
                "{} search depth: {}, nodes: {}, score: {:.4}, move: {}",
                self.color,
                depth,
                self.node_count - start_nodes,
                best.score,
                chosen
            );
        }

        let applied = self.board.apply_move(chosen, self.color);
        assert!(applied, "chosen move {} rejected for {}", chosen, self.color);
        chosen
    }
}

impl Player for MachinePlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn choose_move(&mut self) -> Move {
        self._choose_move(true)
    }

    fn opponent_move(&mut self, opponent_move: Move) -> bool {
        self.board.apply_move(opponent_move, self.color.other())
    }

    fn force_move(&mut self, forced_move: Move) -> bool {
        self.board.apply_move(forced_move, self.color)
    }
}
