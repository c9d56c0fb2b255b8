//! The interface a game driver uses to talk to an agent

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{board::Board, piece::*};

/// An agent that keeps its own board and can be asked for moves
pub trait Player {
    /// The colour this player moves for
    fn color(&self) -> Color;

    /// Chooses a move for this player and records it on the player's board
    fn choose_move(&mut self) -> Move;

    /// Records a move by the opponent, returns false without changes if it is illegal
    fn opponent_move(&mut self, opponent_move: Move) -> bool;

    /// Records a move as this player's own, returns false without changes if it is illegal
    fn force_move(&mut self, forced_move: Move) -> bool;
}

/// A player choosing uniformly among its legal moves
pub struct RandomPlayer<R: Rng = StdRng> {
    board: Board,
    color: Color,
    rng: R,
}

impl RandomPlayer<StdRng> {
    /// Creates a random player seeded from system entropy
    pub fn new(color: Color) -> Self {
        Self::with_rng(color, StdRng::from_entropy())
    }

    /// Creates a reproducible random player
    pub fn seeded(color: Color, seed: u64) -> Self {
        Self::with_rng(color, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomPlayer<R> {
    pub fn with_rng(color: Color, rng: R) -> Self {
        Self {
            board: Board::new(),
            color,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

impl<R: Rng> Player for RandomPlayer<R> {
    fn color(&self) -> Color {
        self.color
    }

    fn choose_move(&mut self) -> Move {
        let moves = self.board.legal_moves(self.color);
        let chosen = match moves.choose(&mut self.rng) {
            Some(&chosen) => chosen,
            None => return Move::Quit,
        };
        let applied = self.board.apply_move(chosen, self.color);
        assert!(applied, "enumerated move {} rejected for {}", chosen, self.color);
        chosen
    }

    fn opponent_move(&mut self, opponent_move: Move) -> bool {
        self.board.apply_move(opponent_move, self.color.other())
    }

    fn force_move(&mut self, forced_move: Move) -> bool {
        self.board.apply_move(forced_move, self.color)
    }
}
