use crate::{HEIGHT, WIDTH};

/// Errors that can occur while building or mutating a [`Grid`](crate::grid::Grid).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("could not parse '{0}' as a valid move")]
    InvalidMove(char),

    #[error("Invalid move, column {0} out of range. Columns must be between 1 and {max}", max = WIDTH)]
    ColumnOutOfRange(usize),

    #[error("Invalid move, column {0} full")]
    ColumnFull(usize),

    #[error("Invalid position, game is over")]
    GameOver,

    #[error("expected {expected} rows, found {found}", expected = HEIGHT)]
    RowCount { found: usize },

    #[error("row {row} has {found} cells, expected {expected}", expected = WIDTH)]
    RowWidth { row: usize, found: usize },

    #[error("unknown cell '{cell}' in row {row}, expected '.', 'X' or 'O'")]
    InvalidCell { row: usize, cell: char },

    #[error("stone in column {column} is floating above an empty cell")]
    FloatingStone { column: usize },
}

/// Errors that can occur while selecting a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("search depth must be at least 1")]
    InvalidDepth,

    #[error("position is already decided, there is no move to select")]
    GameOver,

    #[error("no legal column at depth {depth} in a position that is neither won nor full")]
    NoLegalMove { depth: usize },
}
