//! Candidate divisor enumeration.

use std::{iter::FusedIterator, num::NonZeroU32};

/// Inclusive range of divisors to try, largest first.
///
/// By default only divisors ending in 1, 3, 7 or 9 are produced. This is a
/// pruning policy for the digit distributions searched here, not a property of
/// divisibility in general; disable it with
/// [`with_coprime_to_ten`](Self::with_coprime_to_ten) when the required
/// symbols or alphabet change.
///
/// # Examples
///
/// ```
/// use gcdoku_solver::DivisorRange;
///
/// let range = DivisorRange::new(30, 20)?;
/// let divisors: Vec<u32> = range.candidates().map(|d| d.get()).collect();
/// assert_eq!(divisors, vec![29, 27, 23, 21]);
///
/// let all = range.with_coprime_to_ten(false).candidates().count();
/// assert_eq!(all, 11);
/// # Ok::<(), gcdoku_solver::DivisorRangeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivisorRange {
    max: NonZeroU32,
    min: NonZeroU32,
    coprime_to_ten: bool,
}

impl DivisorRange {
    /// Creates the range `max` down to `min`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`DivisorRangeError::ZeroMinimum`] if `min` is 0 and
    /// [`DivisorRangeError::Inverted`] if `max < min`.
    pub fn new(max: u32, min: u32) -> Result<Self, DivisorRangeError> {
        let min = NonZeroU32::new(min).ok_or(DivisorRangeError::ZeroMinimum)?;
        if max < min.get() {
            return Err(DivisorRangeError::Inverted { max, min: min.get() });
        }
        let max = NonZeroU32::new(max).ok_or(DivisorRangeError::ZeroMinimum)?;
        Ok(Self {
            max,
            min,
            coprime_to_ten: true,
        })
    }

    /// Enables or disables the last-digit policy.
    #[must_use]
    pub fn with_coprime_to_ten(self, coprime_to_ten: bool) -> Self {
        Self {
            coprime_to_ten,
            ..self
        }
    }

    /// Returns the largest divisor in the range.
    #[must_use]
    pub fn max(&self) -> u32 {
        self.max.get()
    }

    /// Returns the smallest divisor in the range.
    #[must_use]
    pub fn min(&self) -> u32 {
        self.min.get()
    }

    /// Returns `true` if divisors sharing a factor with 10 are skipped.
    #[must_use]
    pub fn coprime_to_ten(&self) -> bool {
        self.coprime_to_ten
    }

    /// Returns how many divisors [`candidates`](Self::candidates) yields,
    /// computed from the bounds alone.
    #[must_use]
    pub fn len(&self) -> u64 {
        let max = u64::from(self.max.get());
        let min = u64::from(self.min.get());
        if self.coprime_to_ten {
            coprime_to_ten_up_to(max) - coprime_to_ten_up_to(min - 1)
        } else {
            max - min + 1
        }
    }

    /// Returns `true` if no divisor in the range passes the last-digit policy.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the divisors to try, strictly descending.
    #[must_use]
    pub fn candidates(&self) -> Divisors {
        Divisors {
            next: Some(self.max.get()),
            min: self.min.get(),
            coprime_to_ten: self.coprime_to_ten,
        }
    }
}

/// Returns `true` if `value` ends in 1, 3, 7 or 9.
#[must_use]
pub fn is_coprime_to_ten(value: u32) -> bool {
    matches!(value % 10, 1 | 3 | 7 | 9)
}

/// Counts the values in `1..=n` ending in 1, 3, 7 or 9.
fn coprime_to_ten_up_to(n: u64) -> u64 {
    let tail = match n % 10 {
        0 => 0,
        1 | 2 => 1,
        3..=6 => 2,
        7 | 8 => 3,
        _ => 4,
    };
    4 * (n / 10) + tail
}

/// Descending iterator over a [`DivisorRange`].
#[derive(Debug, Clone)]
pub struct Divisors {
    next: Option<u32>,
    min: u32,
    coprime_to_ten: bool,
}

impl Iterator for Divisors {
    type Item = NonZeroU32;

    fn next(&mut self) -> Option<NonZeroU32> {
        while let Some(value) = self.next {
            self.next = value.checked_sub(1).filter(|&next| next >= self.min);
            if !self.coprime_to_ten || is_coprime_to_ten(value) {
                return NonZeroU32::new(value);
            }
        }
        None
    }
}

impl FusedIterator for Divisors {}

/// Errors detected while building a [`DivisorRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DivisorRangeError {
    /// The smallest divisor was 0.
    #[display("divisor range must not include 0")]
    ZeroMinimum,
    /// The largest divisor was below the smallest.
    #[display("divisor range is inverted: max {max} < min {min}")]
    Inverted {
        /// The requested largest divisor.
        max: u32,
        /// The requested smallest divisor.
        min: u32,
    },
}
