//! Admission checks for uploaded boards.
//!
//! A board is accepted only if both dimensions lie in
//! `1..=`[`MAX_DIMENSION`] and its population lies in
//! [`MIN_POPULATION`]`..=`[`MAX_POPULATION`]. The engine trusts these
//! bounds afterwards and never re-validates.

use conway_types::Grid;

/// Largest accepted width or height.
pub const MAX_DIMENSION: usize = 100;

/// Fewest live cells an accepted board may have.
pub const MIN_POPULATION: usize = 1;

/// Most live cells an accepted board may have.
pub const MAX_POPULATION: usize = 1000;

/// Reasons a board is rejected at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidBoardError {
    /// Width or height is zero or above [`MAX_DIMENSION`].
    #[error("board size {width}x{height} is invalid, board must be between 1x1 and 100x100")]
    BadDimensions {
        /// Rows in the rejected board.
        width: usize,
        /// Columns in the rejected board.
        height: usize,
    },

    /// Fewer than [`MIN_POPULATION`] live cells.
    #[error("board must have at least one live cell")]
    Underpopulated,

    /// More than [`MAX_POPULATION`] live cells.
    #[error("board has {population} live cells, at most 1000 are allowed")]
    Overpopulated {
        /// Live cells in the rejected board.
        population: usize,
    },
}

/// Check whether `grid` may enter the system.
///
/// Dimensions are checked before any cell is counted.
///
/// # Errors
///
/// Returns the first [`InvalidBoardError`] that applies.
pub fn validate(grid: &Grid) -> Result<(), InvalidBoardError> {
    let (width, height) = (grid.width(), grid.height());
    let dimension_ok = |d: usize| (1..=MAX_DIMENSION).contains(&d);
    if !dimension_ok(width) || !dimension_ok(height) {
        return Err(InvalidBoardError::BadDimensions { width, height });
    }

    let population = grid.population();
    if population < MIN_POPULATION {
        return Err(InvalidBoardError::Underpopulated);
    }
    if population > MAX_POPULATION {
        return Err(InvalidBoardError::Overpopulated { population });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A grid whose first `live` cells (row-major) are alive.
    fn grid_with_population(width: usize, height: usize, live: usize) -> Grid {
        let mut remaining = live;
        Grid::from_fn(width, height, |_, _| {
            if remaining > 0 {
                remaining = remaining.saturating_sub(1);
                true
            } else {
                false
            }
        })
    }

    #[test]
    fn zero_sized_board_has_bad_dimensions() {
        assert_eq!(
            validate(&Grid::new(0, 0)),
            Err(InvalidBoardError::BadDimensions {
                width: 0,
                height: 0
            })
        );
    }

    #[test]
    fn board_with_rows_but_no_columns_has_bad_dimensions() {
        assert!(matches!(
            validate(&Grid::new(3, 0)),
            Err(InvalidBoardError::BadDimensions { .. })
        ));
    }

    #[test]
    fn largest_board_with_one_live_cell_passes() {
        assert_eq!(validate(&grid_with_population(100, 100, 1)), Ok(()));
    }

    #[test]
    fn oversized_board_fails_in_either_direction() {
        assert_eq!(
            validate(&grid_with_population(101, 100, 1)),
            Err(InvalidBoardError::BadDimensions {
                width: 101,
                height: 100
            })
        );
        assert!(matches!(
            validate(&grid_with_population(100, 101, 1)),
            Err(InvalidBoardError::BadDimensions { .. })
        ));
    }

    #[test]
    fn dimensions_are_checked_before_population() {
        // Empty and oversized: the size problem wins.
        assert!(matches!(
            validate(&Grid::new(101, 1)),
            Err(InvalidBoardError::BadDimensions { .. })
        ));
    }

    #[test]
    fn empty_board_is_underpopulated() {
        assert_eq!(
            validate(&Grid::new(5, 5)),
            Err(InvalidBoardError::Underpopulated)
        );
    }

    #[test]
    fn population_limit_is_inclusive() {
        assert_eq!(validate(&grid_with_population(40, 40, 1000)), Ok(()));
        assert_eq!(
            validate(&grid_with_population(40, 40, 1001)),
            Err(InvalidBoardError::Overpopulated { population: 1001 })
        );
    }
}
