//! Static evaluation of positions the search cannot see past
//!
//! A position is scored by matching short windows of cells against tables of
//! two- and three-in-a-row shapes, once for the scored player (added) and once
//! for the opponent (subtracted). The tables are tuned by hand and are
//! deliberately not symmetric between the two players.

use log::trace;

use crate::grid::{Cell, Grid, Player};
use crate::{HEIGHT, WIDTH};

/// Orientation weights
pub const VERTICAL: i32 = 1;
pub const DIAGONAL: i32 = 2;
pub const HORIZONTAL: i32 = 3;

/// Base values for the scored player's shapes
pub const TWO_IN: i32 = 10;
pub const THREE_IN: i32 = 1000;

/// Base values for the opponent's shapes
pub const REVERSE_TWO_IN: i32 = 10;
pub const REVERSE_THREE_IN: i32 = 1000;

/// A window shape
///
/// `P` is a tile of the scored player, `O` a tile of the opponent and `_` an
/// empty cell. A shape with `support` only matches when the cell at that offset
/// from the window start is occupied; offsets below the bottom row count as the floor.
pub struct Pattern {
    cells: &'static [u8],
    value: i32,
    support: Option<(isize, isize)>,
}

const fn shape(cells: &'static [u8], value: i32) -> Pattern {
    Pattern {
        cells,
        value,
        support: None,
    }
}

const fn supported(cells: &'static [u8], value: i32, support: (isize, isize)) -> Pattern {
    Pattern {
        cells,
        value,
        support: Some(support),
    }
}

/// A group of shapes scanned over every window of one direction
///
/// Only the first matching shape in a group scores for a given window.
pub struct Rule {
    pub name: &'static str,
    direction: (isize, isize),
    weight: i32,
    sign: i32,
    patterns: &'static [Pattern],
}

// directions as (column, row) steps, row 0 being the bottom
const RIGHT: (isize, isize) = (1, 0);
const UP: (isize, isize) = (0, 1);
const RISING: (isize, isize) = (1, 1);
const FALLING: (isize, isize) = (1, -1);

const HORIZONTAL_TWOS: &[Pattern] = &[
    shape(b"PP__", TWO_IN),
    shape(b"P_P_", TWO_IN),
    shape(b"P__P", TWO_IN),
    shape(b"_PP_", 2 * TWO_IN),
    shape(b"_P_P", TWO_IN),
    shape(b"__PP", TWO_IN),
];
const HORIZONTAL_TWOS_AGAINST: &[Pattern] = &[
    shape(b"_OO_", 2 * REVERSE_TWO_IN),
    shape(b"OO__", REVERSE_TWO_IN),
    shape(b"O_O_", REVERSE_TWO_IN),
    shape(b"__OO", REVERSE_TWO_IN),
    shape(b"_O_O", REVERSE_TWO_IN),
    shape(b"O__O", REVERSE_TWO_IN),
];
const VERTICAL_TWOS: &[Pattern] = &[shape(b"PP_", TWO_IN)];
const VERTICAL_TWOS_AGAINST: &[Pattern] = &[shape(b"OO_", REVERSE_TWO_IN)];
const RISING_TWOS: &[Pattern] = &[
    shape(b"PP__", TWO_IN),
    shape(b"P__P", TWO_IN),
    shape(b"__PP", TWO_IN),
    shape(b"_P_P", TWO_IN),
    shape(b"P_P_", TWO_IN),
    shape(b"_PP_", 2 * TWO_IN),
];
const RISING_TWOS_AGAINST: &[Pattern] = &[
    shape(b"OO__", REVERSE_TWO_IN),
    shape(b"_OO_", 2 * REVERSE_TWO_IN),
    shape(b"O__O", 2 * REVERSE_TWO_IN),
    shape(b"O_O_", 2 * REVERSE_TWO_IN),
    shape(b"_O_O", REVERSE_TWO_IN),
    shape(b"__OO", REVERSE_TWO_IN),
];
const FALLING_TWOS: &[Pattern] = &[
    shape(b"PP__", TWO_IN),
    shape(b"P__P", TWO_IN),
    shape(b"__PP", TWO_IN),
    shape(b"_P_P", TWO_IN),
    shape(b"P_P_", TWO_IN),
    shape(b"_PP_", 5 * TWO_IN),
];
const FALLING_TWOS_AGAINST: &[Pattern] = &[
    shape(b"OO__", REVERSE_TWO_IN),
    shape(b"_OO_", 2 * REVERSE_TWO_IN),
    shape(b"__OO", REVERSE_TWO_IN),
    shape(b"_O_O", REVERSE_TWO_IN),
    shape(b"O__O", REVERSE_TWO_IN),
    shape(b"O_O_", REVERSE_TWO_IN),
];

const HORIZONTAL_THREES: &[Pattern] = &[
    shape(b"PP_P", THREE_IN),
    shape(b"P_PP", THREE_IN),
    shape(b"_PPP", THREE_IN),
    shape(b"PPP_", THREE_IN),
];
const HORIZONTAL_THREES_AGAINST: &[Pattern] = &[
    shape(b"_OOO", REVERSE_THREE_IN),
    shape(b"O_OO", REVERSE_THREE_IN),
    shape(b"OO_O", REVERSE_THREE_IN),
    shape(b"OOO_", REVERSE_THREE_IN),
];
// the support of `_PPP` is under the last cell, not the gap
const HORIZONTAL_PLAYABLE_THREES: &[Pattern] = &[
    supported(b"_PPP", 5 * THREE_IN, (3, -1)),
    supported(b"P_PP", 5 * THREE_IN, (1, -1)),
    supported(b"PP_P", 5 * THREE_IN, (2, -1)),
    supported(b"PPP_", 5 * THREE_IN, (3, -1)),
];
const VERTICAL_THREES: &[Pattern] = &[shape(b"PPP_", THREE_IN)];
const VERTICAL_THREES_AGAINST: &[Pattern] = &[shape(b"OOO_", 5 * REVERSE_THREE_IN)];
const RISING_THREES: &[Pattern] = &[
    shape(b"PPP_", THREE_IN),
    shape(b"PP_P", THREE_IN),
    shape(b"P_PP", THREE_IN),
    shape(b"_PPP", THREE_IN),
];
const RISING_THREES_AGAINST: &[Pattern] = &[
    shape(b"OOO_", REVERSE_THREE_IN),
    shape(b"OO_O", REVERSE_THREE_IN),
    shape(b"O_OO", REVERSE_THREE_IN),
    shape(b"_OOO", REVERSE_THREE_IN),
];
const RISING_PLAYABLE_THREES: &[Pattern] = &[
    supported(b"PPP_", 5 * THREE_IN, (3, 2)),
    supported(b"PP_P", 5 * THREE_IN, (2, 1)),
    supported(b"P_PP", 5 * THREE_IN, (1, 0)),
];
const FALLING_THREES: &[Pattern] = &[
    shape(b"_PPP", THREE_IN),
    shape(b"P_PP", THREE_IN),
    shape(b"PP_P", THREE_IN),
    shape(b"PPP_", THREE_IN),
];
// supports sit one row above the gap
const FALLING_PLAYABLE_THREES: &[Pattern] = &[
    supported(b"PPP_", 5 * THREE_IN, (3, -2)),
    supported(b"PP_P", 5 * THREE_IN, (2, -1)),
    supported(b"P_PP", 5 * THREE_IN, (1, 0)),
];
const FALLING_THREES_AGAINST: &[Pattern] = &[
    shape(b"_OOO", REVERSE_THREE_IN),
    shape(b"O_OO", REVERSE_THREE_IN),
    shape(b"OO_O", REVERSE_THREE_IN),
    shape(b"OOO_", REVERSE_THREE_IN),
];

const HORIZONTAL_OPEN_THREES: &[Pattern] = &[shape(b"_PPP_", 2 * THREE_IN)];
const HORIZONTAL_OPEN_THREES_AGAINST: &[Pattern] = &[shape(b"_OOO_", 5 * REVERSE_THREE_IN)];
const FALLING_OPEN_THREES: &[Pattern] = &[shape(b"_P___", 2 * THREE_IN)];
const FALLING_OPEN_THREES_AGAINST: &[Pattern] = &[shape(b"_O___", 2 * REVERSE_THREE_IN)];
const RISING_OPEN_THREES: &[Pattern] = &[shape(b"_PPP_", 5 * THREE_IN)];
const RISING_OPEN_THREES_AGAINST: &[Pattern] = &[shape(b"_OOO_", 5 * REVERSE_THREE_IN)];

const fn rule(
    name: &'static str,
    direction: (isize, isize),
    weight: i32,
    sign: i32,
    patterns: &'static [Pattern],
) -> Rule {
    Rule {
        name,
        direction,
        weight,
        sign,
        patterns,
    }
}

/// Every rule group the evaluation sums over
pub const RULES: &[Rule] = &[
    rule("horizontal twos", RIGHT, HORIZONTAL, 1, HORIZONTAL_TWOS),
    rule("horizontal twos against", RIGHT, HORIZONTAL, -1, HORIZONTAL_TWOS_AGAINST),
    rule("vertical twos", UP, VERTICAL, 1, VERTICAL_TWOS),
    rule("vertical twos against", UP, VERTICAL, -1, VERTICAL_TWOS_AGAINST),
    rule("rising twos", RISING, DIAGONAL, 1, RISING_TWOS),
    rule("rising twos against", RISING, DIAGONAL, -1, RISING_TWOS_AGAINST),
    rule("falling twos", FALLING, DIAGONAL, 1, FALLING_TWOS),
    rule("falling twos against", FALLING, DIAGONAL, -1, FALLING_TWOS_AGAINST),
    rule("horizontal threes", RIGHT, HORIZONTAL, 1, HORIZONTAL_THREES),
    rule("horizontal threes against", RIGHT, HORIZONTAL, -1, HORIZONTAL_THREES_AGAINST),
    rule("horizontal playable threes", RIGHT, HORIZONTAL, 1, HORIZONTAL_PLAYABLE_THREES),
    rule("vertical threes", UP, VERTICAL, 1, VERTICAL_THREES),
    rule("vertical threes against", UP, VERTICAL, -1, VERTICAL_THREES_AGAINST),
    rule("rising threes", RISING, DIAGONAL, 1, RISING_THREES),
    rule("rising threes against", RISING, DIAGONAL, -1, RISING_THREES_AGAINST),
    rule("rising playable threes", RISING, DIAGONAL, 1, RISING_PLAYABLE_THREES),
    rule("falling threes", FALLING, DIAGONAL, 1, FALLING_THREES),
    rule("falling playable threes", FALLING, DIAGONAL, 1, FALLING_PLAYABLE_THREES),
    rule("falling threes against", FALLING, DIAGONAL, -1, FALLING_THREES_AGAINST),
    rule("horizontal open threes", RIGHT, HORIZONTAL, 1, HORIZONTAL_OPEN_THREES),
    rule("horizontal open threes against", RIGHT, HORIZONTAL, -1, HORIZONTAL_OPEN_THREES_AGAINST),
    rule("falling open threes", FALLING, DIAGONAL, 1, FALLING_OPEN_THREES),
    rule("falling open threes against", FALLING, DIAGONAL, -1, FALLING_OPEN_THREES_AGAINST),
    rule("rising open threes", RISING, DIAGONAL, 1, RISING_OPEN_THREES),
    rule("rising open threes against", RISING, DIAGONAL, -1, RISING_OPEN_THREES_AGAINST),
];

impl Pattern {
    fn matches(&self, grid: &Grid, player: Player, start: (isize, isize), step: (isize, isize)) -> bool {
        let (column, row) = start;
        let shape_fits = self.cells.iter().enumerate().all(|(i, &symbol)| {
            let i = i as isize;
            let cell = match grid.get(column + i * step.0, row + i * step.1) {
                Some(cell) => cell,
                None => return false,
            };
            match symbol {
                b'P' => cell == player.cell(),
                b'O' => cell == player.other().cell(),
                _ => cell == Cell::Empty,
            }
        });
        if !shape_fits {
            return false;
        }
        match self.support {
            Some((dx, dy)) => grid
                .get(column + dx, row + dy)
                .map_or(true, |cell| !cell.is_empty()),
            None => true,
        }
    }
}

impl Rule {
    /// Signed, weighted score of this group over every window on the grid
    pub fn score(&self, grid: &Grid, player: Player) -> i32 {
        let (dx, dy) = self.direction;
        // patterns in a group share a length
        let reach = match self.patterns.first() {
            Some(pattern) => pattern.cells.len() as isize - 1,
            None => return 0,
        };
        let mut total = 0;
        for row in 0..HEIGHT as isize {
            for column in 0..WIDTH as isize {
                if grid.get(column + reach * dx, row + reach * dy).is_none() {
                    continue;
                }
                if let Some(pattern) = self
                    .patterns
                    .iter()
                    .find(|pattern| pattern.matches(grid, player, (column, row), self.direction))
                {
                    total += self.sign * pattern.value * self.weight;
                }
            }
        }
        total
    }
}

/// Scores `grid` from the point of view of `player`
///
/// Positive values favour `player`. Only meaningful for positions without a
/// four-in-a-row; completed alignments are scored by the search instead.
pub fn evaluate(grid: &Grid, player: Player) -> i32 {
    let value: i32 = RULES
        .iter()
        .map(|rule| {
            let score = rule.score(grid, player);
            if score != 0 {
                trace!("{}: {}", rule.name, score);
            }
            score
        })
        .sum();
    trace!("evaluation for player {}: {}", player, value);
    value
}
