//! Fixed replies for the first two moves of a game
//!
//! The search is skipped entirely for these positions.

use crate::grid::{Grid, Player};

/// Column played on an empty board
pub const FIRST_MOVE: usize = 1;

/// Reply to a single opponent tile, given the column that tile was played in
pub fn reply_to(opponent_column: usize) -> usize {
    match opponent_column {
        2 => 3,
        4 => 1,
        _ => 2,
    }
}

/// Looks up a book move for `engine`, if the position is still in the book
pub fn opening_move(grid: &Grid, engine: Player) -> Option<usize> {
    match grid.stone_count() {
        0 => Some(FIRST_MOVE),
        1 => grid
            .occupied()
            .find(|&(_, _, owner)| owner == engine.other())
            .map(|(column, _, _)| reply_to(column)),
        _ => None,
    }
}
