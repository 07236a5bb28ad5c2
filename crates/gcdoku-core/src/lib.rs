//! Core data structures for divisor-maximizing sudoku search.
//!
//! The grids handled here use nine of the ten decimal digits: every row,
//! column and 3×3 block holds the same nine distinct symbols, and each row
//! read left to right is a 9-digit numeral.
//!
//! # Overview
//!
//! - [`symbol`]: [`Symbol`], one of the digits 0-9
//! - [`symbol_set`]: [`SymbolSet`], a 10-bit set of symbols
//! - [`sequence`]: [`Sequence`], nine distinct symbols forming one row
//! - [`grid`]: [`Grid`], nine rows plus column/block consistency checks
//!
//! # Examples
//!
//! ```
//! use gcdoku_core::{Sequence, Symbol, SymbolSet};
//!
//! let row: Sequence = "283950617".parse()?;
//! let required = SymbolSet::from_iter([Symbol::S0, Symbol::S2, Symbol::S5]);
//!
//! assert!(row.symbol_set().is_superset(required));
//! assert_eq!(row.omitted(), Symbol::S4);
//! # Ok::<(), gcdoku_core::SequenceParseError>(())
//! ```

pub mod grid;
pub mod sequence;
pub mod symbol;
pub mod symbol_set;

pub use self::{
    grid::{BLOCK_OF, ConsistencyError, GRID_SIZE, Grid, GridParseError, block_index},
    sequence::{SEQUENCE_LEN, Sequence, SequenceParseError},
    symbol::{InvalidSymbolError, Symbol},
    symbol_set::SymbolSet,
};
