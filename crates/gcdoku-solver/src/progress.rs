//! Live counters shared between a running search and an observer thread.

use portable_atomic::{AtomicU64, Ordering};

/// Counters a search publishes while it runs.
///
/// All updates use relaxed ordering. An observer sees monotonically
/// increasing values but no consistent cross-field snapshot, which is enough
/// for periodic status reporting.
#[derive(Debug, Default)]
pub struct Progress {
    divisor: AtomicU64,
    divisors_tried: AtomicU64,
    tries: AtomicU64,
    solutions: AtomicU64,
}

impl Progress {
    /// Creates a zeroed set of counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the search moved on to `divisor`.
    pub fn start_divisor(&self, divisor: u32) {
        self.divisor.store(u64::from(divisor), Ordering::Relaxed);
        self.divisors_tried.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds `count` row placement attempts.
    pub fn add_tries(&self, count: u64) {
        self.tries.fetch_add(count, Ordering::Relaxed);
    }

    /// Adds `count` accepted solutions.
    pub fn add_solutions(&self, count: u64) {
        self.solutions.fetch_add(count, Ordering::Relaxed);
    }

    /// Reads the current counter values.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            divisor: self.divisor.load(Ordering::Relaxed),
            divisors_tried: self.divisors_tried.load(Ordering::Relaxed),
            tries: self.tries.load(Ordering::Relaxed),
            solutions: self.solutions.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`Progress`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Divisor currently being tried, or 0 before the first one.
    pub divisor: u64,
    /// Number of divisors started so far.
    pub divisors_tried: u64,
    /// Row placement attempts so far, across all divisors.
    pub tries: u64,
    /// Accepted solutions found so far.
    pub solutions: u64,
}
