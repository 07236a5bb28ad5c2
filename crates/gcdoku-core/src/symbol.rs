//! Grid symbol representation.

use std::fmt::{self, Display};

/// One of the ten symbols a grid cell can hold (the decimal digits 0-9).
///
/// A completed grid only ever uses nine of the ten symbols, but which one is
/// left out is part of the search, so every symbol is representable.
///
/// # Examples
///
/// ```
/// use gcdoku_core::Symbol;
///
/// let symbol = Symbol::S5;
/// assert_eq!(symbol.value(), 5);
/// assert_eq!(Symbol::from_value(7), Symbol::S7);
/// assert_eq!(Symbol::from_char('0'), Some(Symbol::S0));
/// assert_eq!(Symbol::try_from(10), Err(gcdoku_core::InvalidSymbolError::new(10)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Symbol {
    /// The digit 0.
    S0 = 0,
    /// The digit 1.
    S1 = 1,
    /// The digit 2.
    S2 = 2,
    /// The digit 3.
    S3 = 3,
    /// The digit 4.
    S4 = 4,
    /// The digit 5.
    S5 = 5,
    /// The digit 6.
    S6 = 6,
    /// The digit 7.
    S7 = 7,
    /// The digit 8.
    S8 = 8,
    /// The digit 9.
    S9 = 9,
}

impl Symbol {
    /// Number of symbols in the alphabet.
    pub const COUNT: usize = 10;

    /// All symbols in ascending order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::S0,
        Self::S1,
        Self::S2,
        Self::S3,
        Self::S4,
        Self::S5,
        Self::S6,
        Self::S7,
        Self::S8,
        Self::S9,
    ];

    /// Creates a symbol from a value in the range 0-9.
    ///
    /// # Panics
    ///
    /// Panics if `value` is greater than 9.
    ///
    /// ```should_panic
    /// use gcdoku_core::Symbol;
    ///
    /// let _ = Symbol::from_value(10);
    /// ```
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match Self::try_from_value(value) {
            Some(symbol) => symbol,
            None => panic!("Invalid symbol value: {value}"),
        }
    }

    /// Creates a symbol from a value, returning `None` if it is greater than 9.
    #[must_use]
    pub const fn try_from_value(value: u8) -> Option<Self> {
        if (value as usize) < Self::COUNT {
            Some(Self::ALL[value as usize])
        } else {
            None
        }
    }

    /// Parses an ASCII digit.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        if ch.is_ascii_digit() {
            Self::try_from_value(ch as u8 - b'0')
        } else {
            None
        }
    }

    /// Returns the numeric value of this symbol (0-9).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns the ASCII digit for this symbol.
    #[must_use]
    pub const fn to_char(self) -> char {
        (b'0' + self.value()) as char
    }

    pub(crate) const fn bit(self) -> u16 {
        1 << self.value()
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.value(), f)
    }
}

impl From<Symbol> for u8 {
    fn from(symbol: Symbol) -> u8 {
        symbol.value()
    }
}

impl TryFrom<u8> for Symbol {
    type Error = InvalidSymbolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from_value(value).ok_or(InvalidSymbolError { value })
    }
}

/// A value outside the 0-9 symbol range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid symbol value: {value}")]
pub struct InvalidSymbolError {
    value: u8,
}

impl InvalidSymbolError {
    /// Creates an error for the rejected value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self { value }
    }

    /// Returns the rejected value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        assert_eq!(Symbol::from_value(0), Symbol::S0);
        assert_eq!(Symbol::from_value(9), Symbol::S9);
        assert_eq!(Symbol::S0.value(), 0);
        assert_eq!(Symbol::S9.value(), 9);

        assert_eq!(Symbol::ALL.len(), 10);
        for (i, symbol) in Symbol::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(symbol.value()), i);
            assert_eq!(Symbol::from_value(symbol.value()), symbol);
        }

        assert_eq!(format!("{}", Symbol::S0), "0");
        assert_eq!(format!("{}", Symbol::S7), "7");

        let value: u8 = Symbol::S5.into();
        assert_eq!(value, 5);
    }

    #[test]
    fn test_char_conversion() {
        for symbol in Symbol::ALL {
            assert_eq!(Symbol::from_char(symbol.to_char()), Some(symbol));
        }
        assert_eq!(Symbol::from_char('a'), None);
        assert_eq!(Symbol::from_char(' '), None);
        assert_eq!(Symbol::from_char('٣'), None);
    }

    #[test]
    fn test_try_from() {
        assert_eq!(Symbol::try_from(3), Ok(Symbol::S3));
        let err = Symbol::try_from(42).unwrap_err();
        assert_eq!(err.value(), 42);
        assert_eq!(err.to_string(), "invalid symbol value: 42");
    }

    #[test]
    #[should_panic(expected = "Invalid symbol value: 10")]
    fn test_from_value_ten_panics() {
        let _ = Symbol::from_value(10);
    }
}
