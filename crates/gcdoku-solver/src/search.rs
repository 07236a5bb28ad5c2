//! The descending divisor loop.

use std::{num::NonZeroU32, time::Instant};

use gcdoku_core::Grid;

use crate::{
    Acceptance, AssignerStats, Assignment, BacktrackingAssigner, DivisorRange, Progress,
    RowCandidates,
};

/// Every accepted grid for the largest feasible divisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solutions {
    divisor: NonZeroU32,
    grids: Vec<Grid>,
}

impl Solutions {
    /// Returns the divisor shared by every row of every grid.
    #[must_use]
    pub fn divisor(&self) -> NonZeroU32 {
        self.divisor
    }

    /// Returns the accepted grids in discovery order. Never empty.
    #[must_use]
    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }
}

/// The result of a whole [`DivisorSearch::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The first divisor, counting down, that admits an accepted grid.
    Solved(Solutions),
    /// No divisor in the range admits an accepted grid.
    NoFeasibleDivisor,
}

impl SearchOutcome {
    /// Returns the solutions, if any.
    #[must_use]
    pub fn solutions(&self) -> Option<&Solutions> {
        match self {
            Self::Solved(solutions) => Some(solutions),
            Self::NoFeasibleDivisor => None,
        }
    }
}

/// The result of a single [`DivisorSearch::trial`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialOutcome {
    /// `row` has no candidate divisible by the divisor; the assigner was not run.
    EmptyRow {
        /// Index of the first empty row.
        row: usize,
    },
    /// The assigner ran to exhaustion without an accepted grid.
    Exhausted(AssignerStats),
    /// The assigner found at least one accepted grid.
    Solved(Assignment),
}

/// Counters accumulated over a [`DivisorSearch::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    divisors_tried: u64,
    empty_row_skips: u64,
    assigner_runs: u64,
    tries: u64,
}

impl SearchStats {
    /// Returns how many divisors were examined, including the solved one.
    #[must_use]
    pub fn divisors_tried(&self) -> u64 {
        self.divisors_tried
    }

    /// Returns how many divisors were skipped because a row had no multiple.
    #[must_use]
    pub fn empty_row_skips(&self) -> u64 {
        self.empty_row_skips
    }

    /// Returns how many divisors reached the backtracking assigner.
    #[must_use]
    pub fn assigner_runs(&self) -> u64 {
        self.assigner_runs
    }

    /// Returns the total candidate tries across all assigner runs.
    #[must_use]
    pub fn tries(&self) -> u64 {
        self.tries
    }

    fn record(&mut self, outcome: &TrialOutcome) {
        self.divisors_tried += 1;
        match outcome {
            TrialOutcome::EmptyRow { .. } => self.empty_row_skips += 1,
            TrialOutcome::Exhausted(stats) => {
                self.assigner_runs += 1;
                self.tries += stats.tries();
            }
            TrialOutcome::Solved(assignment) => {
                self.assigner_runs += 1;
                self.tries += assignment.stats().tries();
            }
        }
    }
}

/// Finds the largest divisor for which the base candidates admit an accepted grid.
///
/// Divisors are tried strictly in descending order and the search stops at the
/// first success, so the reported divisor is maximal within the range.
///
/// # Examples
///
/// ```
/// use gcdoku_core::Grid;
/// use gcdoku_solver::{AcceptAll, DivisorRange, DivisorSearch, RowCandidates, SearchOutcome};
///
/// let grid: Grid = "
///     987654320 654320987 320987654
///     876543209 543209876 209876543
///     765432098 432098765 098765432
/// "
/// .parse()?;
/// let base = RowCandidates::new(grid.rows().map(|row| vec![row]));
/// let range = DivisorRange::new(100, 1).unwrap();
///
/// let (outcome, stats) = DivisorSearch::new(&base, range, &AcceptAll).run();
/// let SearchOutcome::Solved(solutions) = outcome else {
///     panic!("expected a solution");
/// };
/// assert_eq!(solutions.divisor().get(), 37);
/// assert_eq!(solutions.grids(), &[grid]);
/// assert_eq!(stats.divisors_tried(), 26);
/// # Ok::<(), gcdoku_core::GridParseError>(())
/// ```
#[derive(Debug)]
pub struct DivisorSearch<'a, A: ?Sized> {
    base: &'a RowCandidates,
    range: DivisorRange,
    acceptance: &'a A,
    progress: Option<&'a Progress>,
}

impl<'a, A> DivisorSearch<'a, A>
where
    A: Acceptance + ?Sized,
{
    /// Creates a search over `range` starting from the unrestricted `base` candidates.
    #[must_use]
    pub fn new(base: &'a RowCandidates, range: DivisorRange, acceptance: &'a A) -> Self {
        Self {
            base,
            range,
            acceptance,
            progress: None,
        }
    }

    /// Publishes the current divisor and assigner counters to `progress`.
    #[must_use]
    pub fn with_progress(self, progress: &'a Progress) -> Self {
        Self {
            progress: Some(progress),
            ..self
        }
    }

    /// Runs the descending search.
    #[must_use]
    pub fn run(&self) -> (SearchOutcome, SearchStats) {
        let mut stats = SearchStats::default();
        if let Some(row) = self.base.first_empty_row() {
            log::info!("row {row} has no candidates before divisor filtering");
            return (SearchOutcome::NoFeasibleDivisor, stats);
        }

        log::info!(
            "searching {} divisors from {} down to {}",
            self.range.len(),
            self.range.max(),
            self.range.min()
        );

        let start = Instant::now();
        for divisor in self.range.candidates() {
            let outcome = self.trial(divisor);
            stats.record(&outcome);
            if let TrialOutcome::Solved(assignment) = outcome {
                let grids = assignment.into_solutions();
                log::info!(
                    "divisor {divisor} admits {} solution(s) after {} divisors in {:?}",
                    grids.len(),
                    stats.divisors_tried,
                    start.elapsed()
                );
                return (SearchOutcome::Solved(Solutions { divisor, grids }), stats);
            }
        }

        log::info!(
            "no feasible divisor after {} divisors in {:?}",
            stats.divisors_tried,
            start.elapsed()
        );
        (SearchOutcome::NoFeasibleDivisor, stats)
    }

    /// Runs one divisor trial: restrict every row, then assign if no row is empty.
    #[must_use]
    pub fn trial(&self, divisor: NonZeroU32) -> TrialOutcome {
        if let Some(progress) = self.progress {
            progress.start_divisor(divisor.get());
        }

        let candidates = match self.base.restrict_to_divisor(divisor) {
            Ok(candidates) => candidates,
            Err(row) => {
                log::trace!("divisor {divisor}: row {row} has no multiple");
                return TrialOutcome::EmptyRow { row };
            }
        };
        log::debug!("divisor {divisor}: row counts {:?}", candidates.counts());

        let mut assigner = BacktrackingAssigner::new(self.acceptance);
        if let Some(progress) = self.progress {
            assigner = assigner.with_progress(progress);
        }
        let assignment = assigner.assign(&candidates);
        let stats = assignment.stats();
        log::debug!(
            "divisor {divisor}: {} tries, {} complete grids, {} rejected",
            stats.tries(),
            stats.completed(),
            stats.rejected()
        );

        if assignment.solutions().is_empty() {
            TrialOutcome::Exhausted(stats)
        } else {
            TrialOutcome::Solved(assignment)
        }
    }
}

#[cfg(test)]
mod tests {
    use gcdoku_core::Symbol::*;

    use super::*;
    use crate::{AcceptAll, SymbolInLeadingColumns, testing};

    fn nz(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).unwrap()
    }

    #[test]
    fn test_stops_at_largest_divisor() {
        let base = testing::two_grid_candidates();
        let range = DivisorRange::new(100, 1).unwrap();
        let (outcome, stats) = DivisorSearch::new(&base, range, &AcceptAll).run();

        let solutions = outcome.solutions().unwrap();
        assert_eq!(solutions.divisor(), nz(37));
        assert_eq!(solutions.grids(), &[testing::pattern_grid()]);
        assert_eq!(stats.divisors_tried(), 26);
        assert_eq!(
            stats.empty_row_skips() + stats.assigner_runs(),
            stats.divisors_tried()
        );
    }

    #[test]
    fn test_below_first_hit() {
        let base = testing::two_grid_candidates();
        let range = DivisorRange::new(36, 1).unwrap();
        let (outcome, _) = DivisorSearch::new(&base, range, &AcceptAll).run();
        let solutions = outcome.solutions().unwrap();
        assert_eq!(solutions.divisor(), nz(27));
        assert_eq!(solutions.grids(), &[testing::shuffled_grid()]);
    }

    #[test]
    fn test_rejected_grids_do_not_stop_search() {
        let base = testing::two_grid_candidates();
        let range = DivisorRange::new(36, 1).unwrap();
        let acceptance = SymbolInLeadingColumns {
            symbol: S9,
            columns: 3,
        };
        let progress = Progress::new();
        let (outcome, stats) = DivisorSearch::new(&base, range, &acceptance)
            .with_progress(&progress)
            .run();

        let solutions = outcome.solutions().unwrap();
        assert_eq!(solutions.divisor(), nz(1));
        assert_eq!(solutions.grids(), &[testing::pattern_grid()]);

        let snapshot = progress.snapshot();
        assert_eq!(snapshot.divisor, 1);
        assert_eq!(snapshot.divisors_tried, stats.divisors_tried());
        assert_eq!(snapshot.tries, stats.tries());
        assert_eq!(snapshot.solutions, 1);
    }

    #[test]
    fn test_rerun_is_identical() {
        let base = testing::two_grid_candidates();
        let range = DivisorRange::new(36, 1).unwrap().with_coprime_to_ten(false);
        let search = DivisorSearch::new(&base, range, &AcceptAll);
        assert_eq!(search.run(), search.run());
    }

    #[test]
    fn test_no_feasible_divisor() {
        let base = testing::two_grid_candidates();
        let range = DivisorRange::new(36, 28).unwrap();
        let (outcome, stats) = DivisorSearch::new(&base, range, &AcceptAll).run();
        assert_eq!(outcome, SearchOutcome::NoFeasibleDivisor);
        assert_eq!(stats.divisors_tried(), 3);
    }

    #[test]
    fn test_empty_base_row_skips_every_divisor() {
        let mut rows = testing::two_grid_candidates().rows().clone();
        rows[8].clear();
        let base = RowCandidates::new(rows);
        let range = DivisorRange::new(u32::MAX, 1).unwrap();
        let (outcome, stats) = DivisorSearch::new(&base, range, &AcceptAll).run();
        assert_eq!(outcome, SearchOutcome::NoFeasibleDivisor);
        assert_eq!(stats, SearchStats::default());
    }

    #[test]
    fn test_single_trials() {
        let base = testing::two_grid_candidates();
        let range = DivisorRange::new(1, 1).unwrap();

        let search = DivisorSearch::new(&base, range, &AcceptAll);
        // Both row-1 candidates are odd.
        assert_eq!(search.trial(nz(2)), TrialOutcome::EmptyRow { row: 1 });
        let TrialOutcome::Solved(assignment) = search.trial(nz(27)) else {
            panic!("27 should be solved");
        };
        assert_eq!(assignment.solutions(), &[testing::shuffled_grid()]);

        let reject_all = |_: &Grid| false;
        let search = DivisorSearch::new(&base, range, &reject_all);
        let TrialOutcome::Exhausted(stats) = search.trial(nz(27)) else {
            panic!("27 should be exhausted");
        };
        assert_eq!(stats.completed(), 1);
        assert_eq!(stats.rejected(), 1);
    }
}
