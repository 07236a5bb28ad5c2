//! Per-row narrowing of the candidate pool.
//!
//! A [`RowSpec`] collects the clues and disallowed symbols of one grid row and
//! compiles them to [`RowFilter`]s. Filters only ever remove sequences and keep
//! the relative order of the survivors, so applying them in any order yields
//! the same result.

use std::num::NonZeroU32;

use gcdoku_core::{GRID_SIZE, InvalidSymbolError, SEQUENCE_LEN, Sequence, Symbol, SymbolSet};

/// A single narrowing condition on one column of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFilter {
    /// The column must hold `symbol`.
    Fixed {
        /// Column index (0-8).
        column: usize,
        /// The required symbol.
        symbol: Symbol,
    },
    /// The column must not hold any of `symbols`.
    Disallowed {
        /// Column index (0-8).
        column: usize,
        /// The rejected symbols.
        symbols: SymbolSet,
    },
}

impl RowFilter {
    /// Returns `true` if `sequence` satisfies this condition.
    #[must_use]
    #[inline]
    pub fn matches(&self, sequence: &Sequence) -> bool {
        match *self {
            Self::Fixed { column, symbol } => sequence[column] == symbol,
            Self::Disallowed { column, symbols } => !symbols.contains(sequence[column]),
        }
    }

    /// Drops the sequences violating this condition, keeping the order of the rest.
    pub fn apply(&self, sequences: &mut Vec<Sequence>) {
        sequences.retain(|sequence| self.matches(sequence));
    }
}

/// A fixed cell of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clue {
    /// Column index (0-8).
    pub column: usize,
    /// The symbol the cell must hold.
    pub symbol: Symbol,
}

/// Clues and disallowed symbols for one grid row.
///
/// # Examples
///
/// ```
/// use gcdoku_core::Symbol;
/// use gcdoku_solver::RowSpec;
///
/// let spec = RowSpec::new()
///     .with_clue(7, Symbol::S2)?
///     .with_disallowed(2, [Symbol::S0])?;
///
/// assert!(!spec.admits(&"130456729".parse()?));
/// assert!(spec.admits(&"103456729".parse()?));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSpec {
    clues: Vec<Clue>,
    disallowed: [SymbolSet; SEQUENCE_LEN],
}

impl RowSpec {
    /// Creates a spec admitting every sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fixed clue.
    ///
    /// # Errors
    ///
    /// Returns [`RowSpecError::ColumnOutOfRange`] for a column outside 0-8 and
    /// [`RowSpecError::ConflictingClue`] if the column already has a different clue.
    pub fn with_clue(mut self, column: usize, symbol: Symbol) -> Result<Self, RowSpecError> {
        check_column(column)?;
        if let Some(existing) = self.clues.iter().find(|clue| clue.column == column) {
            if existing.symbol != symbol {
                return Err(RowSpecError::ConflictingClue {
                    column,
                    first: existing.symbol,
                    second: symbol,
                });
            }
            return Ok(self);
        }
        self.clues.push(Clue { column, symbol });
        Ok(self)
    }

    /// Disallows `symbols` at `column`, merging with any earlier entry.
    ///
    /// # Errors
    ///
    /// Returns [`RowSpecError::ColumnOutOfRange`] for a column outside 0-8.
    pub fn with_disallowed(
        mut self,
        column: usize,
        symbols: impl IntoIterator<Item = Symbol>,
    ) -> Result<Self, RowSpecError> {
        check_column(column)?;
        self.disallowed[column].extend(symbols);
        Ok(self)
    }

    /// Returns the fixed clues in insertion order.
    #[must_use]
    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    /// Returns the symbols disallowed at `column`.
    ///
    /// # Panics
    ///
    /// Panics if `column` is not in the range 0-8.
    #[must_use]
    pub fn disallowed(&self, column: usize) -> SymbolSet {
        self.disallowed[column]
    }

    /// Returns the spec as filters: clues first, then disallowed sets by column.
    ///
    /// Clues come first because they are the most selective.
    pub fn filters(&self) -> impl Iterator<Item = RowFilter> + '_ {
        let fixed = self.clues.iter().map(|clue| RowFilter::Fixed {
            column: clue.column,
            symbol: clue.symbol,
        });
        let disallowed = self
            .disallowed
            .iter()
            .enumerate()
            .filter(|(_, symbols)| !symbols.is_empty())
            .map(|(column, &symbols)| RowFilter::Disallowed { column, symbols });
        fixed.chain(disallowed)
    }

    /// Returns `true` if `sequence` satisfies every clue and disallowed set.
    #[must_use]
    pub fn admits(&self, sequence: &Sequence) -> bool {
        self.filters().all(|filter| filter.matches(sequence))
    }

    /// Returns the admitted sequences, in input order.
    ///
    /// The filters from [`filters`](Self::filters) run one after another, so
    /// later passes only see the survivors of the clues.
    #[must_use]
    pub fn filter(&self, sequences: &[Sequence]) -> Vec<Sequence> {
        let mut filtered = sequences.to_vec();
        for filter in self.filters() {
            filter.apply(&mut filtered);
        }
        filtered
    }
}

fn check_column(column: usize) -> Result<(), RowSpecError> {
    if column < SEQUENCE_LEN {
        Ok(())
    } else {
        Err(RowSpecError::ColumnOutOfRange { column })
    }
}

/// Errors detected while building a [`RowSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum RowSpecError {
    /// A clue or disallowed set names a column outside 0-8.
    #[display("column {column} out of range 0-8")]
    #[from(skip)]
    ColumnOutOfRange {
        /// The offending column.
        column: usize,
    },
    /// A clue or disallowed set names a value that is not a symbol.
    #[display("{_0}")]
    InvalidSymbol(#[from] InvalidSymbolError),
    /// Two clues fix different symbols in the same column.
    #[display("column {column} fixed to both {first} and {second}")]
    #[from(skip)]
    ConflictingClue {
        /// The doubly-fixed column.
        column: usize,
        /// The symbol fixed first.
        first: Symbol,
        /// The conflicting symbol.
        second: Symbol,
    },
}

/// The candidate sequences of all nine rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowCandidates {
    rows: [Vec<Sequence>; GRID_SIZE],
}

impl RowCandidates {
    /// Wraps already-filtered per-row candidates.
    #[must_use]
    pub fn new(rows: [Vec<Sequence>; GRID_SIZE]) -> Self {
        Self { rows }
    }

    /// Filters `pool` once per row spec.
    #[must_use]
    pub fn from_specs(pool: &[Sequence], specs: &[RowSpec; GRID_SIZE]) -> Self {
        let rows = std::array::from_fn(|row| specs[row].filter(pool));
        Self { rows }
    }

    /// Returns the candidates of `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not in the range 0-8.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Sequence] {
        &self.rows[row]
    }

    /// Returns the candidate lists of all rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Sequence>; GRID_SIZE] {
        &self.rows
    }

    /// Returns the number of candidates of each row.
    #[must_use]
    pub fn counts(&self) -> [usize; GRID_SIZE] {
        std::array::from_fn(|row| self.rows[row].len())
    }

    /// Returns the first row without candidates, if any.
    #[must_use]
    pub fn first_empty_row(&self) -> Option<usize> {
        self.rows.iter().position(Vec::is_empty)
    }

    /// Narrows every row to the sequences whose numeral is a multiple of `divisor`.
    ///
    /// Stops at the first row left empty and reports it instead.
    ///
    /// # Errors
    ///
    /// Returns the index of the first row with no multiple of `divisor`.
    pub fn restrict_to_divisor(&self, divisor: NonZeroU32) -> Result<Self, usize> {
        let mut rows: [Vec<Sequence>; GRID_SIZE] = Default::default();
        for (row, (slot, candidates)) in rows.iter_mut().zip(&self.rows).enumerate() {
            *slot = candidates
                .iter()
                .filter(|sequence| sequence.is_divisible_by(divisor))
                .copied()
                .collect();
            if slot.is_empty() {
                return Err(row);
            }
        }
        Ok(Self { rows })
    }
}
