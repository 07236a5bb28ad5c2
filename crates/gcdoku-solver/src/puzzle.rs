//! A complete, validated puzzle description and the pipeline that solves it.

use std::time::Instant;

use gcdoku_core::{GRID_SIZE, SEQUENCE_LEN, SymbolSet};

use crate::{
    AcceptanceRule, CandidatePool, DivisorRange, DivisorSearch, Progress, PuzzleError,
    RowCandidates, RowSpec, SearchOutcome, SearchStats,
};

/// Everything needed to run a search.
///
/// # Examples
///
/// ```
/// use gcdoku_core::{Symbol, SymbolSet};
/// use gcdoku_solver::{AcceptanceRule, DivisorRange, Puzzle, RowSpec};
///
/// let required = SymbolSet::from_iter(Symbol::ALL.into_iter().take(9));
/// let rows = vec![RowSpec::new(); 9];
/// let puzzle = Puzzle::new(required, rows, DivisorRange::new(100, 1)?, AcceptanceRule::Any)?;
/// assert_eq!(puzzle.divisors().max(), 100);
///
/// let short = Puzzle::new(required, vec![RowSpec::new(); 8], DivisorRange::new(100, 1)?, AcceptanceRule::Any);
/// assert!(short.is_err());
/// # Ok::<(), gcdoku_solver::PuzzleError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    required: SymbolSet,
    rows: [RowSpec; GRID_SIZE],
    divisors: DivisorRange,
    acceptance: AcceptanceRule,
}

impl Puzzle {
    /// Validates and assembles a puzzle.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::RowCount`] unless exactly nine row specs are
    /// given, and [`PuzzleError::InvalidAcceptanceColumns`] if the acceptance
    /// rule searches no columns or more than nine.
    pub fn new(
        required: SymbolSet,
        rows: Vec<RowSpec>,
        divisors: DivisorRange,
        acceptance: AcceptanceRule,
    ) -> Result<Self, PuzzleError> {
        let len = rows.len();
        let rows: [RowSpec; GRID_SIZE] = rows
            .try_into()
            .map_err(|_| PuzzleError::RowCount { len })?;
        if let AcceptanceRule::SymbolInLeadingColumns(rule) = acceptance
            && !(1..=SEQUENCE_LEN).contains(&rule.columns)
        {
            return Err(PuzzleError::InvalidAcceptanceColumns {
                columns: rule.columns,
            });
        }
        Ok(Self {
            required,
            rows,
            divisors,
            acceptance,
        })
    }

    /// Returns the symbols every row must contain.
    #[must_use]
    pub fn required(&self) -> SymbolSet {
        self.required
    }

    /// Returns the per-row clues and disallowed sets.
    #[must_use]
    pub fn rows(&self) -> &[RowSpec; GRID_SIZE] {
        &self.rows
    }

    /// Returns the divisors to search.
    #[must_use]
    pub fn divisors(&self) -> DivisorRange {
        self.divisors
    }

    /// Returns the final check applied to complete grids.
    #[must_use]
    pub fn acceptance(&self) -> AcceptanceRule {
        self.acceptance
    }

    /// Replaces the divisor range.
    #[must_use]
    pub fn with_divisors(self, divisors: DivisorRange) -> Self {
        Self { divisors, ..self }
    }

    /// Generates the pool, filters every row and runs the divisor search.
    #[must_use]
    pub fn solve(&self, progress: &Progress) -> PuzzleReport {
        let start = Instant::now();
        let pool = CandidatePool::generate(self.required);
        let base = RowCandidates::from_specs(pool.sequences(), &self.rows);
        let base_counts = base.counts();
        log::info!("base row candidates: {base_counts:?} ({:?})", start.elapsed());
        log::info!("accepting {}", self.acceptance);

        let (outcome, stats) = DivisorSearch::new(&base, self.divisors, &self.acceptance)
            .with_progress(progress)
            .run();
        PuzzleReport {
            pool_size: pool.len(),
            base_counts,
            outcome,
            stats,
        }
    }
}

/// What [`Puzzle::solve`] found, with the figures worth reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleReport {
    pool_size: usize,
    base_counts: [usize; GRID_SIZE],
    outcome: SearchOutcome,
    stats: SearchStats,
}

impl PuzzleReport {
    /// Returns the number of sequences in the candidate pool.
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Returns each row's candidate count before divisor filtering.
    #[must_use]
    pub fn base_counts(&self) -> [usize; GRID_SIZE] {
        self.base_counts
    }

    /// Returns the search result.
    #[must_use]
    pub fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    /// Returns the search counters.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}
