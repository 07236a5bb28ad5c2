use gcdoku_core::InvalidSymbolError;

use crate::{DivisorRangeError, RowSpecError};

/// Errors detected while building a [`Puzzle`](crate::Puzzle).
///
/// Every variant is reported before any search work starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PuzzleError {
    /// The puzzle did not describe exactly nine rows.
    #[display("expected 9 row specs, got {len}")]
    #[from(skip)]
    RowCount {
        /// Number of row specs given.
        len: usize,
    },
    /// A row spec was malformed.
    #[display("row {row}: {source}")]
    #[from(skip)]
    InvalidRow {
        /// Row index (0-8).
        row: usize,
        /// Why the row spec was rejected.
        source: RowSpecError,
    },
    /// The divisor bounds were invalid.
    #[display("{_0}")]
    InvalidDivisorRange(#[from] DivisorRangeError),
    /// A required symbol or acceptance symbol was out of range.
    #[display("{_0}")]
    InvalidSymbol(#[from] InvalidSymbolError),
    /// The acceptance rule searched no columns, or more than a row has.
    #[display("acceptance must search 1 to 9 leading columns, got {columns}")]
    #[from(skip)]
    InvalidAcceptanceColumns {
        /// The requested column count.
        columns: usize,
    },
}

#[cfg(test)]
mod tests {
    use gcdoku_core::Symbol;

    use super::*;
    use crate::DivisorRange;

    fn divisors(max: u32, min: u32) -> Result<DivisorRange, PuzzleError> {
        Ok(DivisorRange::new(max, min)?)
    }

    fn symbol(value: u8) -> Result<Symbol, PuzzleError> {
        Ok(Symbol::try_from(value)?)
    }

    #[test]
    fn test_conversions() {
        assert_eq!(
            divisors(3, 0),
            Err(PuzzleError::InvalidDivisorRange(DivisorRangeError::ZeroMinimum))
        );
        assert_eq!(
            symbol(10),
            Err(PuzzleError::InvalidSymbol(InvalidSymbolError::new(10)))
        );
        assert_eq!(
            RowSpecError::from(InvalidSymbolError::new(11)),
            RowSpecError::InvalidSymbol(InvalidSymbolError::new(11))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            PuzzleError::RowCount { len: 8 }.to_string(),
            "expected 9 row specs, got 8"
        );
        let err = PuzzleError::InvalidRow {
            row: 2,
            source: RowSpecError::ColumnOutOfRange { column: 9 },
        };
        assert_eq!(err.to_string(), "row 2: column 9 out of range 0-8");
        assert_eq!(
            PuzzleError::InvalidAcceptanceColumns { columns: 0 }.to_string(),
            "acceptance must search 1 to 9 leading columns, got 0"
        );
    }
}
