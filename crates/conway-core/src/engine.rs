//! Game of Life transitions on a bounded grid.
//!
//! Every function here is pure: inputs are borrowed, results are fresh
//! [`Grid`] values, and nothing is logged or stored. Cells outside the
//! grid count as dead (no wraparound).
//!
//! [`step`] only re-evaluates cells that are live or adjacent to a live
//! cell. Every other cell is dead now and stays dead, so it is copied
//! through unchanged. [`step_exhaustive`] evaluates every cell and exists
//! as the reference the sparse path is tested against.

use conway_types::{BoardId, Grid};

/// Relative positions of the eight Moore neighbours.
const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The search for a still life ran out of attempts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StabilityError {
    /// No step within the budget produced an unchanged grid.
    #[error("unable to find a final state for board {board_id} after {max_attempts} attempts")]
    MaxAttemptsExceeded {
        /// The board being simulated.
        board_id: BoardId,
        /// The exhausted budget.
        max_attempts: usize,
    },
}

/// A still life and the step that reached it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StableOutcome {
    /// The grid that equals its own successor.
    pub grid: Grid,
    /// 1-based number of the step that produced `grid`.
    pub attempts: usize,
}

/// The standard B3/S23 rule.
const fn next_cell_state(alive: bool, live_neighbours: usize) -> bool {
    matches!((alive, live_neighbours), (true, 2 | 3) | (false, 3))
}

/// In-bounds Moore neighbours of `(x, y)`.
fn neighbours(grid: &Grid, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
    NEIGHBOUR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < grid.width() && ny < grid.height()).then_some((nx, ny))
    })
}

fn live_neighbours(grid: &Grid, x: usize, y: usize) -> usize {
    neighbours(grid, x, y)
        .filter(|&(nx, ny)| grid.get(nx, ny))
        .count()
}

/// Mask of the cells that can change: live cells and their neighbours.
fn active_cells(grid: &Grid) -> Grid {
    let mut active = Grid::new(grid.width(), grid.height());
    for (x, y) in grid.live_cells() {
        let candidates = core::iter::once((x, y)).chain(neighbours(grid, x, y));
        for (ax, ay) in candidates {
            if let Some(cell) = active.cell_mut(ax, ay) {
                *cell = true;
            }
        }
    }
    active
}

/// Compute the next generation of `grid`.
pub fn step(grid: &Grid) -> Grid {
    let mut next = grid.clone();
    for (x, y) in active_cells(grid).live_cells() {
        if let Some(cell) = next.cell_mut(x, y) {
            *cell = next_cell_state(grid.get(x, y), live_neighbours(grid, x, y));
        }
    }
    next
}

/// Compute the next generation by evaluating every cell.
///
/// Produces the same output as [`step`] for every input.
pub fn step_exhaustive(grid: &Grid) -> Grid {
    Grid::from_fn(grid.width(), grid.height(), |x, y| {
        next_cell_state(grid.get(x, y), live_neighbours(grid, x, y))
    })
}

/// Apply [`step`] exactly `generations` times.
///
/// There is no early exit when the grid stops changing.
pub fn advance(grid: &Grid, generations: usize) -> Grid {
    (0..generations).fold(grid.clone(), |current, _| step(&current))
}

/// Step until a generation equals its predecessor, for at most
/// `max_attempts` steps.
///
/// The input itself is never reported stable without stepping it at least
/// once, so `max_attempts == 0` always fails. Oscillators with period
/// above 1 never compare equal and exhaust the budget.
///
/// # Errors
///
/// Returns [`StabilityError::MaxAttemptsExceeded`] when the budget is spent.
pub fn advance_until_stable(
    grid: &Grid,
    max_attempts: usize,
    board_id: BoardId,
) -> Result<StableOutcome, StabilityError> {
    let mut current = grid.clone();
    for attempts in 1..=max_attempts {
        let next = step(&current);
        if next == current {
            return Ok(StableOutcome {
                grid: next,
                attempts,
            });
        }
        current = next;
    }

    Err(StabilityError::MaxAttemptsExceeded {
        board_id,
        max_attempts,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    fn vertical_blinker() -> Grid {
        grid(
            ".#.
             .#.
             .#.",
        )
    }

    fn horizontal_blinker() -> Grid {
        grid(
            "...
             ###
             ...",
        )
    }

    fn block_in_border() -> Grid {
        grid(
            "....
             .##.
             .##.
             ....",
        )
    }

    #[test]
    fn lonely_cell_dies() {
        assert_eq!(step(&grid("#")), grid("."));
    }

    #[test]
    fn block_is_a_still_life() {
        let block = grid("##\n##");
        assert_eq!(step(&block), block);
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let once = step(&vertical_blinker());
        assert_eq!(once, horizontal_blinker());
        assert_eq!(step(&once), vertical_blinker());
    }

    #[test]
    fn dead_cell_with_three_neighbours_is_born() {
        // The corner has exactly three live neighbours.
        let before = grid(
            ".#
             ##",
        );
        assert_eq!(step(&before), grid("##\n##"));
    }

    #[test]
    fn crowded_cell_dies() {
        // Centre has four neighbours.
        let before = grid(
            "#.#
             .#.
             #.#",
        );
        let after = step(&before);
        assert!(!after.get(1, 1));
    }

    #[test]
    fn edges_do_not_wrap() {
        // A blinker on the left edge. On a torus the right column would
        // also see three live neighbours and be born.
        let before = grid(
            "#..
             #..
             #..",
        );
        assert_eq!(step(&before), grid("...\n##.\n..."));
    }

    #[test]
    fn step_preserves_dimensions_and_input() {
        let input = grid(
            "#....
             .#...
             ..###",
        );
        let snapshot = input.clone();
        let next = step(&input);
        assert_eq!((next.width(), next.height()), (3, 5));
        assert_eq!(input, snapshot);
    }

    #[test]
    fn sparse_step_matches_exhaustive_step_on_glider() {
        let mut current = grid(
            ".#......
             ..#.....
             ###.....
             ........
             ........
             ........",
        );
        for _ in 0..20 {
            let sparse = step(&current);
            assert_eq!(sparse, step_exhaustive(&current));
            current = sparse;
        }
    }

    #[test]
    fn advance_zero_is_identity() {
        let input = vertical_blinker();
        assert_eq!(advance(&input, 0), input);
    }

    #[test]
    fn advance_matches_repeated_steps() {
        let input = grid(
            "......
             .##...
             .#....
             ....#.
             ...##.
             ......",
        );
        let mut expected = input.clone();
        for n in 0..6 {
            assert_eq!(advance(&input, n), expected);
            expected = step(&expected);
        }
    }

    #[test]
    fn advance_does_not_stop_at_extinction() {
        let lonely = grid("#..\n...\n...");
        assert_eq!(advance(&lonely, 5), Grid::new(3, 3));
    }

    #[test]
    fn block_in_border_is_stable_on_first_step() {
        let outcome = advance_until_stable(&block_in_border(), 10, BoardId::new()).unwrap();
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.grid, block_in_border());
    }

    #[test]
    fn settling_pattern_reports_first_stable_step() {
        // An L-tromino becomes a block after one step, which is then
        // confirmed stable on the second.
        let tromino = grid(
            "....
             .##.
             .#..
             ....",
        );
        let outcome = advance_until_stable(&tromino, 10, BoardId::new()).unwrap();
        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.grid, block_in_border());
    }

    #[test]
    fn blinker_exhausts_budget() {
        let board_id = BoardId::new();
        let err = advance_until_stable(&vertical_blinker(), 1, board_id).unwrap_err();
        assert_eq!(
            err,
            StabilityError::MaxAttemptsExceeded {
                board_id,
                max_attempts: 1
            }
        );

        assert!(advance_until_stable(&vertical_blinker(), 50, board_id).is_err());
    }

    #[test]
    fn zero_attempts_always_fails() {
        let board_id = BoardId::new();
        for input in [block_in_border(), vertical_blinker(), grid("#")] {
            assert_eq!(
                advance_until_stable(&input, 0, board_id),
                Err(StabilityError::MaxAttemptsExceeded {
                    board_id,
                    max_attempts: 0
                })
            );
        }
    }

    #[test]
    fn extinction_counts_as_stable() {
        // Dies on step 1, the empty grid is confirmed on step 2.
        let outcome = advance_until_stable(&grid("#..\n...\n..."), 5, BoardId::new()).unwrap();
        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.grid.population(), 0);
    }
}
