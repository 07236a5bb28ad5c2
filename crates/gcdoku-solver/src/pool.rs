//! Enumeration of every admissible row value.

use std::time::Instant;

use gcdoku_core::{SEQUENCE_LEN, Sequence, Symbol, SymbolSet};
use rayon::prelude::*;

/// Every sequence of nine distinct symbols that contains a required set.
///
/// The pool is partitioned by the omitted symbol. A symbol in the required set
/// is never omitted, so every partition contains the required symbols by
/// construction and holds all `9!` permutations of its alphabet. The pool size
/// is therefore `(10 - |required|) × 9!`, and a required set of all ten symbols
/// yields an empty pool.
///
/// # Examples
///
/// ```
/// use gcdoku_core::{Symbol, SymbolSet};
/// use gcdoku_solver::CandidatePool;
///
/// let required = SymbolSet::from_iter(Symbol::ALL.into_iter().skip(1));
/// let pool = CandidatePool::generate(required);
///
/// // Only the partition omitting 0 remains.
/// assert_eq!(pool.len(), 362_880);
/// assert!(pool.admits(&"123456789".parse()?));
/// assert!(!pool.admits(&"023456789".parse()?));
/// # Ok::<(), gcdoku_core::SequenceParseError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CandidatePool {
    required: SymbolSet,
    sequences: Vec<Sequence>,
}

impl CandidatePool {
    /// Generates the pool, one parallel task per omitted symbol.
    ///
    /// Partitions are concatenated in ascending order of the omitted symbol and
    /// each partition is in lexicographic order, so the result is deterministic
    /// regardless of scheduling.
    #[must_use]
    pub fn generate(required: SymbolSet) -> Self {
        let start = Instant::now();
        let omittable: Vec<Symbol> = required.complement().iter().collect();
        let partitions: Vec<Vec<Sequence>> = omittable
            .par_iter()
            .map(|&omitted| partition(omitted, required))
            .collect();
        let sequences = partitions.concat();
        log::info!(
            "generated {} candidate sequences containing {required} in {:?}",
            sequences.len(),
            start.elapsed()
        );
        Self {
            required,
            sequences,
        }
    }

    /// Returns the symbols every member contains.
    #[must_use]
    pub fn required(&self) -> SymbolSet {
        self.required
    }

    /// Returns the members in generation order.
    #[must_use]
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Returns `true` if the pool has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Returns `true` if `sequence` belongs to the pool, i.e. it contains every
    /// required symbol.
    #[must_use]
    pub fn admits(&self, sequence: &Sequence) -> bool {
        sequence.symbol_set().is_superset(self.required)
    }
}

fn partition(omitted: Symbol, required: SymbolSet) -> Vec<Sequence> {
    debug_assert!(!required.contains(omitted));
    let mut alphabet = [Symbol::S0; SEQUENCE_LEN];
    for (slot, symbol) in alphabet
        .iter_mut()
        .zip(Symbol::ALL.into_iter().filter(|&s| s != omitted))
    {
        *slot = symbol;
    }

    let mut sequences = Vec::with_capacity(FACTORIAL_9);
    loop {
        sequences.push(Sequence::from_distinct(alphabet));
        if !next_permutation(&mut alphabet) {
            break;
        }
    }
    log::debug!("omitting {omitted}: {} sequences", sequences.len());
    sequences
}

const FACTORIAL_9: usize = 362_880;

/// Rearranges `items` into the next lexicographic permutation.
///
/// Returns `false` (leaving `items` sorted ascending) once the last
/// permutation has been passed.
pub(crate) fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    let Some(pivot) = items.windows(2).rposition(|w| w[0] < w[1]) else {
        items.reverse();
        return false;
    };
    let Some(successor) = items.iter().rposition(|item| *item > items[pivot]) else {
        return false;
    };
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use gcdoku_core::Symbol::*;

    use super::*;

    #[test]
    fn test_next_permutation_order() {
        let mut items = [1, 2, 3];
        let mut seen = vec![items];
        while next_permutation(&mut items) {
            seen.push(items);
        }
        assert_eq!(
            seen,
            vec![
                [1, 2, 3],
                [1, 3, 2],
                [2, 1, 3],
                [2, 3, 1],
                [3, 1, 2],
                [3, 2, 1]
            ]
        );
        assert_eq!(items, [1, 2, 3]);
    }

    #[test]
    fn test_next_permutation_edge_cases() {
        let mut empty: [u8; 0] = [];
        assert!(!next_permutation(&mut empty));
        let mut single = [7];
        assert!(!next_permutation(&mut single));
    }

    #[test]
    fn test_partition_size_and_order() {
        let required = SymbolSet::from_iter([S0, S2, S5]);
        let sequences = partition(S9, required);
        assert_eq!(sequences.len(), FACTORIAL_9);
        assert_eq!(sequences[0].to_string(), "012345678");
        assert_eq!(sequences[FACTORIAL_9 - 1].to_string(), "876543210");
        assert!(sequences.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_generate_size() {
        let required = SymbolSet::from_iter([S0, S2, S5]);
        let pool = CandidatePool::generate(required);
        assert_eq!(pool.len(), 7 * FACTORIAL_9);
        assert_eq!(pool.required(), required);

        for sequence in pool.sequences().iter().step_by(997) {
            assert_eq!(sequence.symbol_set().len(), 9);
            assert!(sequence.symbol_set().is_superset(required));
            assert!(!required.contains(sequence.omitted()));
        }

        // Partitions appear in ascending order of the omitted symbol.
        let omitted: Vec<Symbol> = pool
            .sequences()
            .chunks(FACTORIAL_9)
            .map(|chunk| chunk[0].omitted())
            .collect();
        assert_eq!(omitted, vec![S1, S3, S4, S6, S7, S8, S9]);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let required = SymbolSet::from_iter([S0, S1, S2, S3, S4, S5, S6, S7]);
        let first = CandidatePool::generate(required);
        let second = CandidatePool::generate(required);
        assert_eq!(first.len(), 2 * FACTORIAL_9);
        assert_eq!(first.sequences(), second.sequences());
    }

    #[test]
    fn test_all_symbols_required_gives_empty_pool() {
        let pool = CandidatePool::generate(SymbolSet::FULL);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_admits() {
        let pool = CandidatePool {
            required: SymbolSet::from_iter([S0, S2, S5]),
            sequences: Vec::new(),
        };
        let accepted: Sequence = "135246790".parse().unwrap();
        let missing_zero: Sequence = "135246798".parse().unwrap();
        assert!(pool.admits(&accepted));
        assert!(!pool.admits(&missing_zero));
    }
}
