//! A depth-limited move selector for the board game 'Connect 4'
//!
//! This agent looks a fixed number of moves ahead with a negamax search
//! and scores the positions it cannot see past with a tuned pattern heuristic.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{grid::Grid, minimax::Minimax};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player one has three in a row along the bottom, player two must block
//! let grid = Grid::from_moves("17273")?;
//! let mut minimax = Minimax::new(grid, 2)?;
//!
//! assert_eq!(minimax.select_move()?, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod grid;

pub mod evaluation;

pub mod opening;

pub mod minimax;


pub use error::{GridError, SearchError};
pub use grid::{Cell, Grid, Player};
pub use minimax::{select_move, Minimax};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The magnitude of a score for a completed four-in-a-row, before the depth adjustment
pub const WIN_SCORE: i32 = 100_000_000;

// the search and the heuristic tables are written for the standard board
const_assert_eq!(WIDTH * HEIGHT, 42);
// heuristic scores must never reach the range of terminal scores
const_assert!(WIN_SCORE > 1_000_000);
