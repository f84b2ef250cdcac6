//! A depth-limited negamax agent for Connect 4

use log::debug;

use crate::{
    error::SearchError,
    evaluation::evaluate,
    grid::{Grid, Player},
    opening::opening_move,
    WIDTH, WIN_SCORE,
};

/// An agent that picks moves by looking a fixed number of plies ahead
///
/// # Position Scoring
/// Every node is scored from the point of view of the player to move there.
/// A four-in-a-row scores `WIN_SCORE - depth` in favour of the player who made
/// it, so quicker wins and slower losses are preferred. A full board scores 0.
/// At the depth limit the position is handed to [`evaluate`], with the depth
/// subtracted from any non-zero result.
///
/// There is no pruning: every legal column is searched to the full depth, and
/// ties between columns go to the rightmost one.
#[derive(Clone)]
pub struct Minimax {
    grid: Grid,
    max_depth: usize,
    engine: Player,

    /// The number of nodes searched by this `Minimax` so far (for diagnostics only)
    pub node_count: usize,
}

impl Minimax {
    /// Creates a new `Minimax` searching `max_depth` plies ahead, playing as [`Player::Two`]
    pub fn new(grid: Grid, max_depth: usize) -> Result<Self, SearchError> {
        if max_depth == 0 {
            return Err(SearchError::InvalidDepth);
        }
        Ok(Self {
            grid,
            max_depth,
            engine: Player::Two,
            node_count: 0,
        })
    }

    /// Sets the player the agent moves for
    pub fn with_engine(mut self, engine: Player) -> Self {
        self.engine = engine;
        self
    }

    /// The player the agent moves for
    pub fn engine(&self) -> Player {
        self.engine
    }

    /// The number of plies searched below the root
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The player about to move at a node with the given color
    fn player_to_move(&self, color: i32) -> Player {
        if color == 1 {
            self.engine
        } else {
            self.engine.other()
        }
    }

    /// Picks the column to play, using the opening book when it applies
    pub fn select_move(&mut self) -> Result<usize, SearchError> {
        if self.grid.has_winning_alignment() || self.grid.is_full() {
            return Err(SearchError::GameOver);
        }
        if let Some(column) = opening_move(&self.grid, self.engine) {
            debug!("book move {} for player {}", column, self.engine);
            return Ok(column);
        }
        let (column, _) = self.choose_move()?;
        Ok(column)
    }

    /// Performs a root search, bypassing the opening book
    ///
    /// Returns the best column and its score
    pub fn choose_move(&mut self) -> Result<(usize, i32), SearchError> {
        if self.grid.has_winning_alignment() || self.grid.is_full() {
            return Err(SearchError::GameOver);
        }
        self.node_count += 1;
        let (column, score) = self.best_child(self.grid, 0, 1)?;
        debug!(
            "player {} plays column {} (score {}, {} nodes, depth {})",
            self.engine, column, score, self.node_count, self.max_depth
        );
        Ok((column, score))
    }

    /// Scores a non-root node for the player to move there
    pub fn score_node(&mut self, grid: Grid, depth: usize, color: i32) -> Result<i32, SearchError> {
        self.node_count += 1;
        let depth_offset = depth as i32;

        if let Some(winner) = grid.winning_player() {
            return Ok(if winner == self.engine {
                color * (WIN_SCORE - depth_offset)
            } else {
                color * (-WIN_SCORE + depth_offset)
            });
        }

        // check for draw
        if grid.is_full() {
            return Ok(0);
        }

        if depth == self.max_depth {
            let value = evaluate(&grid, self.player_to_move(color));
            return Ok(if value != 0 { value - depth_offset } else { value });
        }

        let (_, score) = self.best_child(grid, depth, color)?;
        Ok(score)
    }

    /// Searches every legal column and returns the best one with its score
    fn best_child(&mut self, grid: Grid, depth: usize, color: i32) -> Result<(usize, i32), SearchError> {
        if !(0..WIDTH).any(|column| grid.playable(column)) {
            return Err(SearchError::NoLegalMove { depth });
        }

        let player = self.player_to_move(color);
        let mut best: Option<(usize, i32)> = None;
        for column in 0..WIDTH {
            let mut next = grid;
            if next.drop(column, player).is_none() {
                continue;
            }
            // the score is flipped for the other player
            let score = -self.score_node(next, depth + 1, -color)?;
            // ties go to the later column
            if best.map_or(true, |(_, best_score)| score >= best_score) {
                best = Some((column, score));
            }
        }
        best.ok_or(SearchError::NoLegalMove { depth })
    }
}

/// Picks a move for [`Player::Two`] on `grid`, searching `max_depth` plies ahead
pub fn select_move(grid: &Grid, max_depth: usize) -> Result<usize, SearchError> {
    Minimax::new(*grid, max_depth)?.select_move()
}
