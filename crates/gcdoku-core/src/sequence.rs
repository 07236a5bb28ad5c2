//! Candidate row values.
//!
//! A [`Sequence`] is an ordered 9-tuple of distinct [`Symbol`]s, i.e. one
//! permutation of nine of the ten symbols. Each grid row is a sequence, and the
//! decimal numeral it spells is what the divisor search works on.

use std::{
    fmt::{self, Debug, Display},
    num::NonZeroU32,
    ops::Index,
    str::FromStr,
};

use crate::{Symbol, SymbolSet};

/// Number of symbols in a [`Sequence`] (and cells in a grid row).
pub const SEQUENCE_LEN: usize = 9;

/// Sum of all symbol values; the omitted symbol is this minus the row sum.
const ALPHABET_SUM: u8 = 45;

/// Nine distinct symbols in row order.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroU32;
///
/// use gcdoku_core::{Sequence, Symbol};
///
/// let seq: Sequence = "098765432".parse()?;
/// assert_eq!(seq[0], Symbol::S0);
/// assert_eq!(seq.omitted(), Symbol::S1);
/// assert_eq!(seq.numeral(), 98_765_432);
/// assert!(seq.is_divisible_by(NonZeroU32::new(12_345_679).unwrap()));
/// assert_eq!(seq.to_string(), "098765432");
/// # Ok::<(), gcdoku_core::SequenceParseError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sequence {
    symbols: [Symbol; SEQUENCE_LEN],
}

impl Sequence {
    /// Creates a sequence, checking that the symbols are pairwise distinct.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceParseError::DuplicateSymbol`] if a symbol repeats.
    pub fn new(symbols: [Symbol; SEQUENCE_LEN]) -> Result<Self, SequenceParseError> {
        let mut seen = SymbolSet::new();
        for symbol in symbols {
            if !seen.insert(symbol) {
                return Err(SequenceParseError::DuplicateSymbol { symbol });
            }
        }
        Ok(Self { symbols })
    }

    /// Creates a sequence from symbols already known to be distinct.
    ///
    /// Distinctness is only checked in debug builds; callers enumerating
    /// permutations of a 9-symbol alphabet use this on the hot path.
    #[must_use]
    #[inline]
    pub fn from_distinct(symbols: [Symbol; SEQUENCE_LEN]) -> Self {
        debug_assert_eq!(
            symbols.iter().copied().collect::<SymbolSet>().len(),
            SEQUENCE_LEN,
            "symbols must be distinct: {symbols:?}"
        );
        Self { symbols }
    }

    /// Returns the symbols in column order.
    #[must_use]
    pub const fn symbols(&self) -> &[Symbol; SEQUENCE_LEN] {
        &self.symbols
    }

    /// Returns the symbol at `column`, or `None` if it is out of range.
    #[must_use]
    pub fn get(&self, column: usize) -> Option<Symbol> {
        self.symbols.get(column).copied()
    }

    /// Returns the set of symbols used.
    #[must_use]
    pub fn symbol_set(&self) -> SymbolSet {
        self.symbols.iter().copied().collect()
    }

    /// Returns `true` if `symbol` appears anywhere in the sequence.
    #[must_use]
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Returns the one symbol of the alphabet that does not appear.
    #[must_use]
    pub fn omitted(&self) -> Symbol {
        let sum: u8 = self.symbols.iter().map(|s| s.value()).sum();
        Symbol::from_value(ALPHABET_SUM - sum)
    }

    /// Returns the decimal value spelled by the sequence (a leading 0 is allowed).
    #[must_use]
    pub fn numeral(&self) -> u64 {
        self.symbols
            .iter()
            .fold(0, |acc, s| acc * 10 + u64::from(s.value()))
    }

    /// Returns the numeral modulo `divisor`, accumulated digit by digit.
    #[must_use]
    #[inline]
    #[expect(clippy::cast_possible_truncation)]
    pub fn remainder(&self, divisor: NonZeroU32) -> u32 {
        let divisor = u64::from(divisor.get());
        self.symbols
            .iter()
            .fold(0, |rem, s| (rem * 10 + u64::from(s.value())) % divisor) as u32
    }

    /// Returns `true` if the numeral is a multiple of `divisor`.
    #[must_use]
    #[inline]
    pub fn is_divisible_by(&self, divisor: NonZeroU32) -> bool {
        self.remainder(divisor) == 0
    }
}

impl Default for Sequence {
    /// The ascending sequence `012345678`.
    fn default() -> Self {
        Self::from_distinct([
            Symbol::S0,
            Symbol::S1,
            Symbol::S2,
            Symbol::S3,
            Symbol::S4,
            Symbol::S5,
            Symbol::S6,
            Symbol::S7,
            Symbol::S8,
        ])
    }
}

impl Index<usize> for Sequence {
    type Output = Symbol;

    fn index(&self, column: usize) -> &Symbol {
        &self.symbols[column]
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.symbols {
            Display::fmt(&symbol, f)?;
        }
        Ok(())
    }
}

impl Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sequence({self})")
    }
}

impl FromStr for Sequence {
    type Err = SequenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != SEQUENCE_LEN {
            return Err(SequenceParseError::InvalidLength { len });
        }
        let mut symbols = [Symbol::S0; SEQUENCE_LEN];
        for (column, (slot, ch)) in symbols.iter_mut().zip(s.chars()).enumerate() {
            *slot = Symbol::from_char(ch).ok_or(SequenceParseError::InvalidChar { column, ch })?;
        }
        Self::new(symbols)
    }
}

/// Errors produced when building a [`Sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SequenceParseError {
    /// The input did not have exactly nine symbols.
    #[display("expected 9 symbols, got {len}")]
    InvalidLength {
        /// Number of characters found.
        len: usize,
    },
    /// A character was not a decimal digit.
    #[display("invalid symbol {ch:?} at column {column}")]
    InvalidChar {
        /// Column of the offending character.
        column: usize,
        /// The offending character.
        ch: char,
    },
    /// A symbol occurred more than once.
    #[display("symbol {symbol} occurs more than once")]
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: Symbol,
    },
}
