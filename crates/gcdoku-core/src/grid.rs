//! Completed (or in-progress) 9×9 grids.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{Sequence, SequenceParseError, Symbol, SymbolSet, sequence::SEQUENCE_LEN};

/// Number of rows, columns and blocks in a grid.
pub const GRID_SIZE: usize = 9;

/// Block index (0-8, left to right, top to bottom) of every `[row][column]` cell.
pub const BLOCK_OF: [[usize; GRID_SIZE]; GRID_SIZE] = {
    let mut table = [[0; GRID_SIZE]; GRID_SIZE];
    let mut row = 0;
    while row < GRID_SIZE {
        let mut column = 0;
        while column < GRID_SIZE {
            table[row][column] = block_index(row, column);
            column += 1;
        }
        row += 1;
    }
    table
};

/// Returns the 3×3 block containing the cell at `(row, column)`.
#[must_use]
#[inline]
pub const fn block_index(row: usize, column: usize) -> usize {
    (row / 3) * 3 + column / 3
}

/// A 9×9 grid stored as one [`Sequence`] per row.
///
/// Rows are distinct by construction; columns and blocks are only guaranteed
/// distinct once [`Grid::check_consistency`] succeeds.
///
/// # Examples
///
/// ```
/// use gcdoku_core::{Grid, Symbol};
///
/// let grid: Grid = "
///     987654320 654320987 320987654
///     876543209 543209876 209876543
///     765432098 432098765 098765432
/// "
/// .parse()?;
/// assert!(grid.check_consistency().is_ok());
/// assert_eq!(grid.get(8, 0), Symbol::S0);
/// assert_eq!(grid.row_gcd(), 12_345_679);
/// # Ok::<(), gcdoku_core::GridParseError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: [Sequence; GRID_SIZE],
}

impl Grid {
    /// Creates a grid from its rows.
    #[must_use]
    pub const fn from_rows(rows: [Sequence; GRID_SIZE]) -> Self {
        Self { rows }
    }

    /// Returns all rows, top to bottom.
    #[must_use]
    pub const fn rows(&self) -> &[Sequence; GRID_SIZE] {
        &self.rows
    }

    /// Returns the row at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not in the range 0-8.
    #[must_use]
    pub fn row(&self, row: usize) -> Sequence {
        self.rows[row]
    }

    /// Replaces the row at `row`, returning the previous one.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not in the range 0-8.
    #[inline]
    pub fn replace_row(&mut self, row: usize, sequence: Sequence) -> Sequence {
        std::mem::replace(&mut self.rows[row], sequence)
    }

    /// Returns the symbol at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is not in the range 0-8.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Symbol {
        self.rows[row][column]
    }

    /// Iterates over the symbols of `column`, top to bottom.
    pub fn column(&self, column: usize) -> impl Iterator<Item = Symbol> + '_ {
        self.rows.iter().map(move |row| row[column])
    }

    /// Iterates over the symbols of `block`, row-major within the block.
    pub fn block(&self, block: usize) -> impl Iterator<Item = Symbol> + '_ {
        let top = (block / 3) * 3;
        let left = (block % 3) * 3;
        (top..top + 3).flat_map(move |row| (left..left + 3).map(move |column| self.get(row, column)))
    }

    /// Returns `true` if `symbol` occurs in any of the first `columns` columns.
    #[must_use]
    pub fn contains_in_leading_columns(&self, symbol: Symbol, columns: usize) -> bool {
        self.rows
            .iter()
            .any(|row| row.symbols()[..columns.min(SEQUENCE_LEN)].contains(&symbol))
    }

    /// Returns the decimal value of every row.
    #[must_use]
    pub fn row_numerals(&self) -> [u64; GRID_SIZE] {
        self.rows.map(|row| row.numeral())
    }

    /// Returns the greatest common divisor of the row numerals.
    #[must_use]
    pub fn row_gcd(&self) -> u64 {
        self.row_numerals().into_iter().fold(0, gcd)
    }

    /// Checks that no column and no block repeats a symbol.
    ///
    /// # Errors
    ///
    /// Returns the first duplicate found, scanning columns before blocks.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        for column in 0..GRID_SIZE {
            if let Some(symbol) = first_duplicate(self.column(column)) {
                return Err(ConsistencyError::DuplicateInColumn { column, symbol });
            }
        }
        for block in 0..GRID_SIZE {
            if let Some(symbol) = first_duplicate(self.block(block)) {
                return Err(ConsistencyError::DuplicateInBlock { block, symbol });
            }
        }
        Ok(())
    }
}

fn first_duplicate(mut symbols: impl Iterator<Item = Symbol>) -> Option<Symbol> {
    let mut seen = SymbolSet::new();
    symbols.find(|&symbol| !seen.insert(symbol))
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            Display::fmt(row, f)?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridParseError;

    /// Parses nine whitespace-separated rows of nine digits each.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.len() != GRID_SIZE {
            return Err(GridParseError::RowCount { len: tokens.len() });
        }
        let mut rows = [Sequence::default(); GRID_SIZE];
        for (row, (slot, token)) in rows.iter_mut().zip(tokens).enumerate() {
            *slot = token
                .parse()
                .map_err(|source| GridParseError::InvalidRow { row, source })?;
        }
        Ok(Self { rows })
    }
}

/// A repeated symbol in a column or block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConsistencyError {
    /// A column contains `symbol` twice.
    #[display("symbol {symbol} repeated in column {column}")]
    DuplicateInColumn {
        /// Column index (0-8).
        column: usize,
        /// The repeated symbol.
        symbol: Symbol,
    },
    /// A block contains `symbol` twice.
    #[display("symbol {symbol} repeated in block {block}")]
    DuplicateInBlock {
        /// Block index (0-8).
        block: usize,
        /// The repeated symbol.
        symbol: Symbol,
    },
}

/// Errors produced when parsing a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridParseError {
    /// The input did not contain exactly nine rows.
    #[display("expected 9 rows, got {len}")]
    RowCount {
        /// Number of rows found.
        len: usize,
    },
    /// A row was not a valid sequence.
    #[display("row {row}: {source}")]
    InvalidRow {
        /// Row index (0-8).
        row: usize,
        /// Why the row was rejected.
        source: SequenceParseError,
    },
}
