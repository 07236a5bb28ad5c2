//! Fixture grids shared by the unit tests.

use gcdoku_core::{GRID_SIZE, Grid};

use crate::RowCandidates;

/// A valid grid omitting 1 whose rows are all multiples of 12345679.
pub(crate) fn pattern_grid() -> Grid {
    "
    987654320 654320987 320987654
    876543209 543209876 209876543
    765432098 432098765 098765432
    "
    .parse()
    .unwrap()
}

/// A valid grid omitting 9 whose row numerals have GCD 27.
pub(crate) fn shuffled_grid() -> Grid {
    "
    025134678 134678025 678025134
    251346780 346780251 780251346
    513467802 467802513 802513467
    "
    .parse()
    .unwrap()
}

/// Each row may take its row from either fixture grid.
///
/// Exactly two assignments are consistent: the two fixture grids themselves.
pub(crate) fn two_grid_candidates() -> RowCandidates {
    let first = pattern_grid();
    let second = shuffled_grid();
    RowCandidates::new(std::array::from_fn(|row| {
        vec![first.row(row), second.row(row)]
    }))
}

/// Only the pattern grid's own rows, with rows 0 and 1 each allowed either value.
///
/// Swapping two rows inside a band keeps the grid valid, so two assignments
/// are consistent.
pub(crate) fn swappable_candidates() -> RowCandidates {
    let grid = pattern_grid();
    let mut rows: [Vec<_>; GRID_SIZE] = std::array::from_fn(|row| vec![grid.row(row)]);
    rows[0].push(grid.row(1));
    rows[1].insert(0, grid.row(0));
    RowCandidates::new(rows)
}
