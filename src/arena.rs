//! Refereeing games between players, and parallel self-play tournaments

use indicatif::*;
use rayon::prelude::*;

use std::time::Instant;

use crate::{board::Board, piece::*, player::*, search::MachinePlayer};

/// The default number of moves after which a game is declared a draw
pub const MAX_GAME_MOVES: usize = 200;

/// Why a game ended
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Ending {
    /// The winner completed a network
    Network,
    /// The loser quit, having no legal move
    Quit,
    /// The loser attempted an illegal move
    IllegalMove,
    /// The move limit was reached
    MoveLimit,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Outcome {
    /// `None` for a draw
    pub winner: Option<Color>,
    pub ending: Ending,
    /// Number of moves played, including the final one
    pub moves: usize,
}

/// Plays a game between two players, White moving first, on a board of the default size
///
/// The referee keeps its own board and relays every accepted move to the other
/// player. A move completing networks for both sides counts for the mover.
pub fn play_game<'a>(
    white: &mut (dyn Player + 'a),
    black: &mut (dyn Player + 'a),
    max_moves: usize,
) -> Outcome {
    let mut board = Board::new();
    let mut moves = 0;

    loop {
        if moves >= max_moves {
            return Outcome {
                winner: None,
                ending: Ending::MoveLimit,
                moves,
            };
        }

        let mover = board.next_player();
        let (player, opponent) = match mover {
            Color::White => (&mut *white, &mut *black),
            Color::Black => (&mut *black, &mut *white),
        };
        let chosen = player.choose_move();
        moves += 1;

        let ending = if chosen == Move::Quit {
            Some((mover.other(), Ending::Quit))
        } else if !board.apply_move(chosen, mover) || !opponent.opponent_move(chosen) {
            Some((mover.other(), Ending::IllegalMove))
        } else if board.is_win(mover) {
            Some((mover, Ending::Network))
        } else if board.is_win(mover.other()) {
            Some((mover.other(), Ending::Network))
        } else {
            None
        };

        if let Some((winner, ending)) = ending {
            return Outcome {
                winner: Some(winner),
                ending,
                moves,
            };
        }
    }
}

/// Aggregate results of a tournament, from the machine player's side
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct Summary {
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub total_moves: usize,
}

impl Summary {
    fn record(mut self, outcome: Outcome, machine: Color) -> Self {
        match outcome.winner {
            Some(winner) if winner == machine => self.wins += 1,
            Some(_) => self.losses += 1,
            None => self.draws += 1,
        }
        self.total_moves += outcome.moves;
        self
    }

    pub fn games(&self) -> usize {
        self.wins + self.losses + self.draws
    }
}

/// Plays `games` games of a `MachinePlayer` against a `RandomPlayer` in parallel
///
/// The machine takes White in even games and Black in odd ones, and each random
/// player is seeded from `seed` and the game index so results are reproducible.
pub fn tournament(games: usize, depth: usize, seed: u64) -> Summary {
    _tournament(games, depth, seed, true)
}

/// Runs a tournament, logging progress and results to stdout
pub fn tournament_verbose(games: usize, depth: usize, seed: u64) -> Summary {
    _tournament(games, depth, seed, false)
}

fn _tournament(games: usize, depth: usize, seed: u64, silent: bool) -> Summary {
    let start = Instant::now();

    let progress = if silent {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(games as u64)
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let outcomes: Vec<(Outcome, Color)> = (0..games)
        .into_par_iter()
        .map(|game| {
            let machine_color = if game % 2 == 0 {
                Color::White
            } else {
                Color::Black
            };
            let mut machine = MachinePlayer::with_depth(machine_color, depth);
            let mut random = RandomPlayer::seeded(machine_color.other(), seed.wrapping_add(game as u64));

            let outcome = match machine_color {
                Color::White => play_game(&mut machine, &mut random, MAX_GAME_MOVES),
                Color::Black => play_game(&mut random, &mut machine, MAX_GAME_MOVES),
            };
            progress.inc(1);
            (outcome, machine_color)
        })
        .collect();

    progress.finish();

    let summary = outcomes
        .into_iter()
        .fold(Summary::default(), |summary, (outcome, machine)| {
            summary.record(outcome, machine)
        });

    if !silent {
        println!(
            "Machine (depth {}) vs random: {} wins, {} losses, {} draws in {} games, {}",
            depth,
            summary.wins,
            summary.losses,
            summary.draws,
            summary.games(),
            HumanDuration(Instant::now() - start)
        );
    }
    summary
}
