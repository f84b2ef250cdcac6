//! The game-state model: a 7x6 board with gravity drops and alignment checks

use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::fmt;
use std::io::{stdout, Write};
use std::str::FromStr;

use crate::{error::GridError, HEIGHT, WIDTH};

/// The four alignment directions as (column, row) steps: horizontal, vertical, `/` and `\`
pub const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "1"),
            Player::Two => write!(f, "2"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn player(&self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Cell::PlayerOne => 'X',
            Cell::PlayerTwo => 'O',
            Cell::Empty => '.',
        }
    }

    fn colour(&self) -> Color {
        match self {
            Cell::PlayerOne => Color::Red,
            Cell::PlayerTwo => Color::Yellow,
            Cell::Empty => Color::Grey,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::Playing)
    }
}

/// A Connect 4 board
///
/// Cells are stored left-to-right, bottom-to-top, so row 0 is the bottom row.
/// The grid does not track whose turn it is; callers pass the [`Player`] with
/// every drop.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Grid {
    cells: [Cell; WIDTH * HEIGHT],
    heights: [usize; WIDTH],
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; WIDTH * HEIGHT],
            heights: [0; WIDTH],
        }
    }

    /// Builds a grid from a string of 1-indexed column digits, alternating
    /// players and starting with [`Player::One`]
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self, GridError> {
        let mut grid = Self::new();
        let mut player = Player::One;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10) {
                Some(column) => {
                    let _ = grid.play_checked(column as usize, player)?;
                    player = player.other();
                }
                _ => return Err(GridError::InvalidMove(column_char)),
            }
        }
        Ok(grid)
    }

    /// Plays a 1-indexed column for `player`, rejecting moves that are out of range,
    /// into a full column, or made after the game has ended
    pub fn play_checked(
        &mut self,
        column_one_indexed: usize,
        player: Player,
    ) -> Result<GameState, GridError> {
        if column_one_indexed < 1 || column_one_indexed > WIDTH {
            return Err(GridError::ColumnOutOfRange(column_one_indexed));
        }
        if self.state().is_over() {
            return Err(GridError::GameOver);
        }
        let column = column_one_indexed - 1;
        if self.drop(column, player).is_none() {
            return Err(GridError::ColumnFull(column_one_indexed));
        }
        Ok(self.state())
    }

    /// Places a tile for `player` in the lowest empty cell of `column`
    ///
    /// Returns the landing row, or `None` if the column is full or does not exist,
    /// in which case the grid is left untouched.
    pub fn drop(&mut self, column: usize, player: Player) -> Option<usize> {
        if !self.playable(column) {
            return None;
        }
        let row = self.heights[column];
        self.cells[column + WIDTH * row] = player.cell();
        self.heights[column] += 1;
        Some(row)
    }

    pub fn playable(&self, column: usize) -> bool {
        column < WIDTH && self.heights[column] < HEIGHT
    }

    pub fn height(&self, column: usize) -> usize {
        self.heights[column]
    }

    pub fn cell(&self, column: usize, row: usize) -> Cell {
        self.cells[column + WIDTH * row]
    }

    /// Signed lookup for scanning windows, `None` when off the board
    pub fn get(&self, column: isize, row: isize) -> Option<Cell> {
        if column < 0 || row < 0 || column >= WIDTH as isize || row >= HEIGHT as isize {
            return None;
        }
        Some(self.cell(column as usize, row as usize))
    }

    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&height| height == HEIGHT)
    }

    pub fn stone_count(&self) -> usize {
        self.heights.iter().sum()
    }

    pub fn stones(&self, player: Player) -> usize {
        self.cells.iter().filter(|&&cell| cell == player.cell()).count()
    }

    /// Iterates over occupied cells as (column, row, owner)
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Player)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.player().map(|p| (idx % WIDTH, idx / WIDTH, p)))
    }

    /// Finds the owner of a four-in-a-row, if there is one
    pub fn winning_player(&self) -> Option<Player> {
        for &(dx, dy) in DIRECTIONS.iter() {
            for row in 0..HEIGHT as isize {
                for column in 0..WIDTH as isize {
                    let owner = match self.get(column, row).and_then(|c| c.player()) {
                        Some(owner) => owner,
                        None => continue,
                    };
                    if (1..4).all(|i| self.get(column + i * dx, row + i * dy) == Some(owner.cell()))
                    {
                        return Some(owner);
                    }
                }
            }
        }
        None
    }

    pub fn has_winning_alignment(&self) -> bool {
        self.winning_player().is_some()
    }

    pub fn state(&self) -> GameState {
        match self.winning_player() {
            Some(Player::One) => GameState::PlayerOneWin,
            Some(Player::Two) => GameState::PlayerTwoWin,
            None if self.is_full() => GameState::Draw,
            None => GameState::Playing,
        }
    }

    /// Prints the grid in colour under a row of column numbers, top row first
    pub fn display(&self) -> anyhow::Result<()> {
        let mut out = stdout();

        let header: String = (1..=WIDTH).map(|column| column.to_string()).collect();
        out.queue(PrintStyledContent(style(header + "\n")))?;
        for row in (0..HEIGHT).rev() {
            for column in 0..WIDTH {
                let cell = self.cell(column, row);
                out.queue(PrintStyledContent(
                    style(cell.symbol())
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(cell.colour()),
                ))?;
            }
            out.queue(PrintStyledContent(style("\n")))?;
        }
        out.flush()?;
        Ok(())
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses six rows of seven cells, top row first: `.` empty, `X` player one, `O` player two
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != HEIGHT {
            return Err(GridError::RowCount { found: rows.len() });
        }

        let mut grid = Self::new();
        for (line, text) in rows.iter().enumerate() {
            let width = text.chars().count();
            if width != WIDTH {
                return Err(GridError::RowWidth { row: line, found: width });
            }
            let row = HEIGHT - 1 - line;
            for (column, symbol) in text.chars().enumerate() {
                grid.cells[column + WIDTH * row] = match symbol {
                    '.' => Cell::Empty,
                    'X' => Cell::PlayerOne,
                    'O' => Cell::PlayerTwo,
                    cell => return Err(GridError::InvalidCell { row: line, cell }),
                };
            }
        }

        for column in 0..WIDTH {
            let height = (0..HEIGHT)
                .take_while(|&row| !grid.cell(column, row).is_empty())
                .count();
            if (height..HEIGHT).any(|row| !grid.cell(column, row).is_empty()) {
                return Err(GridError::FloatingStone { column });
            }
            grid.heights[column] = height;
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..HEIGHT).rev() {
            let line: String = (0..WIDTH).map(|column| self.cell(column, row).symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
