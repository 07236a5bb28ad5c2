//! A set of symbols, stored as a 10-bit mask.
//!
//! [`SymbolSet`] backs every symbol-set concept in the search: the required
//! symbols of the candidate pool, per-column disallowed symbols, and the
//! column/block occupancy masks of the backtracking engine.
//!
//! # Examples
//!
//! ```
//! use gcdoku_core::{Symbol, SymbolSet};
//!
//! let a = SymbolSet::from_iter([Symbol::S0, Symbol::S2, Symbol::S5]);
//! let b = SymbolSet::from_iter([Symbol::S2, Symbol::S3]);
//!
//! assert_eq!(a | b, SymbolSet::from_iter([Symbol::S0, Symbol::S2, Symbol::S3, Symbol::S5]));
//! assert_eq!(a & b, SymbolSet::from_iter([Symbol::S2]));
//! assert_eq!(a.difference(b), SymbolSet::from_iter([Symbol::S0, Symbol::S5]));
//! assert_eq!(a.complement().len(), 7);
//! ```

use std::{
    fmt::{self, Debug, Display},
    iter::FusedIterator,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign},
};

use crate::Symbol;

/// A set of [`Symbol`]s.
///
/// Bit `n` of the backing integer is set when symbol `n` is a member, so all
/// set operations are single integer operations.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SymbolSet {
    bits: u16,
}

impl SymbolSet {
    const MASK: u16 = (1 << Symbol::COUNT) - 1;

    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// The set of all ten symbols.
    pub const FULL: Self = Self { bits: Self::MASK };

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a set from raw bits, returning `None` if any bit above 9 is set.
    #[must_use]
    pub const fn try_from_bits(bits: u16) -> Option<Self> {
        if bits & !Self::MASK == 0 {
            Some(Self { bits })
        } else {
            None
        }
    }

    /// Returns the raw bits of the set.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.bits
    }

    /// Returns `true` if `symbol` is in the set.
    #[must_use]
    #[inline]
    pub const fn contains(self, symbol: Symbol) -> bool {
        self.bits & symbol.bit() != 0
    }

    /// Adds `symbol`, returning `true` if it was not already present.
    #[inline]
    pub fn insert(&mut self, symbol: Symbol) -> bool {
        let added = !self.contains(symbol);
        self.bits |= symbol.bit();
        added
    }

    /// Removes `symbol`, returning `true` if it was present.
    #[inline]
    pub fn remove(&mut self, symbol: Symbol) -> bool {
        let removed = self.contains(symbol);
        self.bits &= !symbol.bit();
        removed
    }

    /// Returns the number of symbols in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if the set has no members.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns the symbols in either set.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Returns the symbols in both sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    /// Returns the symbols in `self` but not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    /// Returns the symbols not in `self`.
    #[must_use]
    pub const fn complement(self) -> Self {
        Self {
            bits: !self.bits & Self::MASK,
        }
    }

    /// Returns `true` if every member of `self` is in `other`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.bits & !other.bits == 0
    }

    /// Returns `true` if every member of `other` is in `self`.
    #[must_use]
    pub const fn is_superset(self, other: Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if the sets have no member in common.
    #[must_use]
    pub const fn is_disjoint(self, other: Self) -> bool {
        self.bits & other.bits == 0
    }

    /// Returns the smallest member, if any.
    #[must_use]
    pub fn first(self) -> Option<Symbol> {
        self.iter().next()
    }

    /// Iterates over the members in ascending order.
    #[must_use]
    pub fn iter(self) -> Iter {
        Iter { bits: self.bits }
    }
}

impl Debug for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Symbol::value)).finish()
    }
}

impl Display for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, symbol) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            Display::fmt(&symbol, f)?;
        }
        f.write_str("}")
    }
}

impl BitOr for SymbolSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for SymbolSet {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl BitAnd for SymbolSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl BitAndAssign for SymbolSet {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.intersection(rhs);
    }
}

impl From<Symbol> for SymbolSet {
    fn from(symbol: Symbol) -> Self {
        Self { bits: symbol.bit() }
    }
}

impl FromIterator<Symbol> for SymbolSet {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<Symbol> for SymbolSet {
    fn extend<T: IntoIterator<Item = Symbol>>(&mut self, iter: T) {
        for symbol in iter {
            self.insert(symbol);
        }
    }
}

impl IntoIterator for SymbolSet {
    type Item = Symbol;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

/// Ascending iterator over the members of a [`SymbolSet`].
#[derive(Debug, Clone)]
pub struct Iter {
    bits: u16,
}

impl Iterator for Iter {
    type Item = Symbol;

    #[inline]
    fn next(&mut self) -> Option<Symbol> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let value = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Symbol::try_from_value(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for Iter {
    #[inline]
    fn next_back(&mut self) -> Option<Symbol> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let value = (15 - self.bits.leading_zeros()) as u8;
        self.bits &= !(1 << value);
        Symbol::try_from_value(value)
    }
}

impl ExactSizeIterator for Iter {}
impl FusedIterator for Iter {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::Symbol::*;

    #[test]
    fn test_constants() {
        assert_eq!(SymbolSet::EMPTY.len(), 0);
        assert!(SymbolSet::EMPTY.is_empty());
        assert_eq!(SymbolSet::FULL.len(), 10);
        for symbol in Symbol::ALL {
            assert!(SymbolSet::FULL.contains(symbol));
            assert!(!SymbolSet::EMPTY.contains(symbol));
        }
    }

    #[test]
    fn test_insert_remove() {
        let mut set = SymbolSet::new();
        assert!(set.insert(S0));
        assert!(!set.insert(S0));
        assert!(set.insert(S9));
        assert_eq!(set.len(), 2);
        assert!(set.remove(S0));
        assert!(!set.remove(S0));
        assert_eq!(set, SymbolSet::from(S9));
    }

    #[test]
    fn test_iteration_order() {
        let set = SymbolSet::from_iter([S9, S0, S5, S3]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![S0, S3, S5, S9]);
        assert_eq!(set.iter().rev().collect::<Vec<_>>(), vec![S9, S5, S3, S0]);
        assert_eq!(set.iter().len(), 4);
        assert_eq!(set.first(), Some(S0));
        assert_eq!(SymbolSet::EMPTY.first(), None);
    }

    #[test]
    fn test_try_from_bits() {
        assert_eq!(SymbolSet::try_from_bits(0x3ff), Some(SymbolSet::FULL));
        assert_eq!(SymbolSet::try_from_bits(0x400), None);
    }

    #[test]
    fn test_formatting() {
        let set = SymbolSet::from_iter([S0, S2, S5]);
        assert_eq!(set.to_string(), "{0,2,5}");
        assert_eq!(format!("{set:?}"), "{0, 2, 5}");
        assert_eq!(SymbolSet::EMPTY.to_string(), "{}");
    }

    fn symbol_set() -> impl Strategy<Value = SymbolSet> {
        (0u16..0x400).prop_map(|bits| SymbolSet::try_from_bits(bits).unwrap())
    }

    proptest! {
        #[test]
        fn prop_union_and_intersection_bound_both(a in symbol_set(), b in symbol_set()) {
            let union = a | b;
            let intersection = a & b;
            prop_assert!(union.is_superset(a) && union.is_superset(b));
            prop_assert!(intersection.is_subset(a) && intersection.is_subset(b));
            prop_assert_eq!(union.len() + intersection.len(), a.len() + b.len());
        }

        #[test]
        fn prop_difference_is_disjoint(a in symbol_set(), b in symbol_set()) {
            let diff = a.difference(b);
            prop_assert!(diff.is_disjoint(b));
            prop_assert_eq!(diff | (a & b), a);
        }

        #[test]
        fn prop_complement_partitions_alphabet(a in symbol_set()) {
            prop_assert!(a.is_disjoint(a.complement()));
            prop_assert_eq!(a | a.complement(), SymbolSet::FULL);
        }

        #[test]
        fn prop_iter_matches_contains(a in symbol_set()) {
            let members: Vec<_> = a.iter().collect();
            prop_assert_eq!(members.len(), a.len());
            for symbol in Symbol::ALL {
                prop_assert_eq!(members.contains(&symbol), a.contains(symbol));
            }
            prop_assert_eq!(SymbolSet::from_iter(members), a);
        }
    }
}
