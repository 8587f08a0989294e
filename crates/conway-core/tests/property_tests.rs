//! Property tests for the Life engine.
//!
//! The sparse step skips cells far from any live cell. These tests check
//! it against full evaluation on arbitrary boards, including boards with
//! live cells on every edge.

use conway_core::engine::{advance, step, step_exhaustive};
use conway_types::Grid;
use proptest::prelude::*;

/// Arbitrary rectangular grid up to 24x24 with roughly `density`% live cells.
fn arb_grid() -> impl Strategy<Value = Grid> {
    (1usize..=24, 1usize..=24, 0u8..=100).prop_flat_map(|(width, height, density)| {
        proptest::collection::vec(
            proptest::bool::weighted(f64::from(density) / 100.0),
            width * height,
        )
        .prop_map(move |cells| {
            let mut cells = cells.into_iter();
            Grid::from_fn(width, height, |_, _| cells.next().unwrap_or(false))
        })
    })
}

proptest! {
    #[test]
    fn sparse_step_matches_exhaustive_step(grid in arb_grid()) {
        prop_assert_eq!(step(&grid), step_exhaustive(&grid));
    }

    #[test]
    fn step_preserves_dimensions(grid in arb_grid()) {
        let next = step(&grid);
        prop_assert_eq!((next.width(), next.height()), (grid.width(), grid.height()));
    }

    #[test]
    fn advance_composes(grid in arb_grid(), a in 0usize..6, b in 0usize..6) {
        prop_assert_eq!(advance(&advance(&grid, a), b), advance(&grid, a + b));
    }
}
