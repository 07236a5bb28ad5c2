//! Column and block occupancy tracking for the backtracking assigner.

use std::ops::{Deref, DerefMut};

use gcdoku_core::{BLOCK_OF, GRID_SIZE, Grid, Sequence, SymbolSet};

/// Symbols already placed in each column and each block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct OccupancyMasks {
    columns: [SymbolSet; GRID_SIZE],
    blocks: [SymbolSet; GRID_SIZE],
}

impl OccupancyMasks {
    /// Returns `true` if placing `sequence` in `row` would repeat a symbol in
    /// some column or block.
    #[inline]
    pub(crate) fn conflicts(&self, row: usize, sequence: &Sequence) -> bool {
        sequence.symbols().iter().enumerate().any(|(column, &symbol)| {
            self.columns[column].contains(symbol) || self.blocks[BLOCK_OF[row][column]].contains(symbol)
        })
    }

    fn commit(&mut self, row: usize, sequence: &Sequence) {
        for (column, &symbol) in sequence.symbols().iter().enumerate() {
            let fresh_column = self.columns[column].insert(symbol);
            let fresh_block = self.blocks[BLOCK_OF[row][column]].insert(symbol);
            debug_assert!(fresh_column && fresh_block, "committed a conflicting row");
        }
    }

    fn release(&mut self, row: usize, sequence: &Sequence) {
        for (column, &symbol) in sequence.symbols().iter().enumerate() {
            let was_column = self.columns[column].remove(symbol);
            let was_block = self.blocks[BLOCK_OF[row][column]].remove(symbol);
            debug_assert!(was_column && was_block, "released a row that was not committed");
        }
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.columns.iter().chain(&self.blocks).all(|set| set.is_empty())
    }
}

/// The grid under construction together with its occupancy masks.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Board {
    pub(crate) masks: OccupancyMasks,
    pub(crate) grid: Grid,
}

impl Board {
    /// Places `sequence` in `row` until the returned guard is dropped.
    ///
    /// The caller must have checked [`OccupancyMasks::conflicts`] first.
    pub(crate) fn place(&mut self, row: usize, sequence: Sequence) -> Placement<'_> {
        self.masks.commit(row, &sequence);
        let previous = self.grid.replace_row(row, sequence);
        Placement {
            board: self,
            row,
            sequence,
            previous,
        }
    }
}

/// A committed row that is rolled back on drop.
///
/// Dereferences to the [`Board`] so deeper rows can be placed while this one
/// is held.
#[derive(Debug)]
pub(crate) struct Placement<'a> {
    board: &'a mut Board,
    row: usize,
    sequence: Sequence,
    previous: Sequence,
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.masks.release(self.row, &self.sequence);
        self.board.grid.replace_row(self.row, self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_place_and_roll_back() {
        let grid = testing::pattern_grid();
        let mut board = Board::default();
        {
            let mut first = board.place(0, grid.row(0));
            assert!(first.masks.conflicts(0, &grid.row(0)));
            // Same row again in the band clashes on blocks and columns.
            assert!(first.masks.conflicts(1, &grid.row(0)));
            assert!(!first.masks.conflicts(1, &grid.row(1)));
            {
                let second = first.place(1, grid.row(1));
                assert_eq!(second.grid.row(1), grid.row(1));
                assert!(second.masks.conflicts(2, &grid.row(1)));
            }
            assert_eq!(first.grid.row(1), Sequence::default());
            assert!(!first.masks.conflicts(1, &grid.row(1)));
        }
        assert!(board.masks.is_empty());
        assert_eq!(board.grid, Grid::default());
    }

    #[test]
    fn test_full_grid_commits_cleanly() {
        fn fill(board: &mut Board, grid: &Grid, row: usize) -> Grid {
            if row == GRID_SIZE {
                return board.grid;
            }
            assert!(!board.masks.conflicts(row, &grid.row(row)));
            let mut placed = board.place(row, grid.row(row));
            fill(&mut placed, grid, row + 1)
        }

        let grid = testing::pattern_grid();
        let mut board = Board::default();
        assert_eq!(fill(&mut board, &grid, 0), grid);
        assert!(board.masks.is_empty());
    }

    #[test]
    fn test_block_conflict_without_column_conflict() {
        let grid = testing::pattern_grid();
        let mut board = Board::default();
        let placed = board.place(0, grid.row(0));
        // Row 3 fits every column of row 0 but shares block 0 symbols when moved into band 0.
        assert!(placed.masks.conflicts(1, &grid.row(3)));
        assert!(!placed.masks.conflicts(3, &grid.row(3)));
    }
}
