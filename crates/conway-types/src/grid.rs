//! The rectangular boolean board.
//!
//! A [`Grid`] is stored as a flat row-major `Vec<bool>` with explicit
//! dimensions. Cells are addressed by `(x, y)` where `x` selects the row
//! (`0..width`) and `y` the column (`0..height`), matching the nested
//! wire form `grid[x][y]`.
//!
//! On the wire a grid is a JSON array of rows, each row an array of
//! booleans. Deserialization rejects ragged input, so a `Grid` value is
//! always rectangular. Zero-sized grids are representable on purpose:
//! rejecting them is the validator's job, not the codec's.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Character used for a live cell in the text form of a grid.
const LIVE_CHAR: char = '#';

/// Character used for a dead cell in the text form of a grid.
const DEAD_CHAR: char = '.';

/// Errors raised while building a [`Grid`] from external input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A row's length differs from the first row's length.
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Length of the offending row.
        len: usize,
        /// Length of the first row.
        expected: usize,
    },

    /// The text form contained a character other than `#` or `.`.
    #[error("invalid cell character {0:?}, expected '#' or '.'")]
    InvalidCell(char),
}

/// A rectangular matrix of live (`true`) and dead (`false`) cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width.saturating_mul(height)],
        }
    }

    /// Build a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut cells = Vec::with_capacity(width.saturating_mul(height));
        for x in 0..width {
            for y in 0..height {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Build a grid from nested rows, `rows[x][y]`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::RaggedRows`] if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, GridError> {
        let width = rows.len();
        let height = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width.saturating_mul(height));

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != height {
                return Err(GridError::RaggedRows {
                    row,
                    len: values.len(),
                    expected: height,
                });
            }
            cells.extend(values);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of rows (extent along `x`).
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of columns (extent along `y`).
    pub const fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            x.checked_mul(self.height)?.checked_add(y)
        } else {
            None
        }
    }

    /// State of the cell at `(x, y)`. Out-of-bounds cells read as dead.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.index(x, y)
            .and_then(|i| self.cells.get(i))
            .copied()
            .unwrap_or(false)
    }

    /// Mutable access to the cell at `(x, y)`, or `None` if out of bounds.
    pub fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut bool> {
        let i = self.index(x, y)?;
        self.cells.get_mut(i)
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of every live cell, in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let height = self.height;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .filter_map(move |(i, _)| Some((i.checked_div(height)?, i.checked_rem(height)?)))
    }

    /// Nested row form, `rows[x][y]`.
    pub fn rows(&self) -> Vec<Vec<bool>> {
        if self.height == 0 {
            return vec![Vec::new(); self.width];
        }
        self.cells.chunks(self.height).map(<[bool]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<bool>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<bool>> {
    fn from(grid: Grid) -> Self {
        grid.rows()
    }
}

/// Renders one line per row, `#` for live and `.` for dead.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (x, row) in self.rows().iter().enumerate() {
            if x > 0 {
                writeln!(f)?;
            }
            for &alive in row {
                write!(f, "{}", if alive { LIVE_CHAR } else { DEAD_CHAR })?;
            }
        }
        Ok(())
    }
}

/// Parses the [`Display`](fmt::Display) form. Blank lines and surrounding
/// whitespace are ignored so indented literals work.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| match c {
                        LIVE_CHAR => Ok(true),
                        DEAD_CHAR => Ok(false),
                        other => Err(GridError::InvalidCell(other)),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows)
    }
}
