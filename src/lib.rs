//! An autonomous player for the board game 'Network'
//!
//! Players take turns placing (and later stepping) pieces on a square grid, and
//! win by linking their two goal edges with a chain of at least six pieces that
//! never runs straight through three pieces in a row.
//!
//! This agent chooses moves with a depth-limited minimax search with alpha-beta
//! pruning over the rules engine and a connectivity heuristic.
//!
//! # Basic Usage
//!
//! ```
//! use network_ai::{piece::*, player::Player, search::MachinePlayer};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut player = MachinePlayer::with_depth(Color::White, 1);
//!
//! let chosen = player.choose_move();
//! assert_eq!(chosen, Move::Add { x: 0, y: 1 });
//!
//! // the opponent cannot reuse an occupied cell
//! assert!(!player.opponent_move(chosen));
//! assert!(player.opponent_move("3 3".parse()?));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod piece;

pub mod board;

pub mod network;

pub mod eval;

pub mod player;

pub mod search;

pub mod arena;


/// The default side length of the game board in cells
pub const BOARD_SIZE: usize = 8;

/// The largest supported side length
pub const MAX_BOARD_SIZE: usize = 8;

/// The smallest supported side length
pub const MIN_BOARD_SIZE: usize = 3;

/// The number of moves (both sides together) before pieces must be stepped rather than added
pub const PLACEMENT_MOVES: usize = 20;

/// The minimum number of pieces in a winning network
pub const MIN_NETWORK_LENGTH: usize = 6;

/// The default search depth of a `MachinePlayer`, in plies
pub const DEFAULT_SEARCH_DEPTH: usize = 3;

/// How much shallower the search runs once the placement phase is over
pub const DEPTH_REDUCTION: usize = 2;

// ensure that every cell fits in a u64 for the on-path marker of the network search
const_assert!(MAX_BOARD_SIZE * MAX_BOARD_SIZE <= 64);
const_assert!(MIN_BOARD_SIZE <= BOARD_SIZE && BOARD_SIZE <= MAX_BOARD_SIZE);
