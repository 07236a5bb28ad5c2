//! Depth-first assignment of one candidate sequence per row.

use std::fmt::{self, Display};

use gcdoku_core::{GRID_SIZE, Grid, Symbol};

use crate::{
    Progress, RowCandidates,
    masks::{Board, Placement},
};

/// A final check applied to every complete, consistent grid.
///
/// Acceptance is evaluated only once all nine rows are placed; it never prunes
/// partial assignments.
pub trait Acceptance {
    /// Returns `true` if `grid` is a solution.
    fn accepts(&self, grid: &Grid) -> bool;
}

impl<F> Acceptance for F
where
    F: Fn(&Grid) -> bool,
{
    fn accepts(&self, grid: &Grid) -> bool {
        self(grid)
    }
}

/// Accepts every consistent grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptAll;

impl Acceptance for AcceptAll {
    fn accepts(&self, _grid: &Grid) -> bool {
        true
    }
}

/// Accepts grids in which `symbol` appears in one of the first `columns` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolInLeadingColumns {
    /// The symbol that must appear.
    pub symbol: Symbol,
    /// How many leading columns are searched (1-9).
    pub columns: usize,
}

impl Acceptance for SymbolInLeadingColumns {
    fn accepts(&self, grid: &Grid) -> bool {
        grid.contains_in_leading_columns(self.symbol, self.columns)
    }
}

/// An acceptance rule chosen at run time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AcceptanceRule {
    /// See [`AcceptAll`].
    #[default]
    Any,
    /// See [`SymbolInLeadingColumns`].
    SymbolInLeadingColumns(SymbolInLeadingColumns),
}

impl Acceptance for AcceptanceRule {
    fn accepts(&self, grid: &Grid) -> bool {
        match self {
            Self::Any => AcceptAll.accepts(grid),
            Self::SymbolInLeadingColumns(rule) => rule.accepts(grid),
        }
    }
}

impl Display for AcceptanceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any consistent grid"),
            Self::SymbolInLeadingColumns(SymbolInLeadingColumns { symbol, columns }) => {
                write!(f, "symbol {symbol} within the first {columns} columns")
            }
        }
    }
}

/// The order in which rows are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowOrder {
    rows: [usize; GRID_SIZE],
}

impl RowOrder {
    /// Visits rows top to bottom.
    #[must_use]
    pub fn top_to_bottom() -> Self {
        Self {
            rows: std::array::from_fn(|row| row),
        }
    }

    /// Visits rows with fewer candidates first; ties keep row index order.
    ///
    /// # Examples
    ///
    /// ```
    /// use gcdoku_solver::{RowCandidates, RowOrder};
    ///
    /// let mut rows: [Vec<_>; 9] = Default::default();
    /// rows[3].push("012345678".parse()?);
    /// let order = RowOrder::most_constrained_first(&RowCandidates::new(rows));
    /// assert_eq!(order.rows(), &[0, 1, 2, 4, 5, 6, 7, 8, 3]);
    /// # Ok::<(), gcdoku_core::SequenceParseError>(())
    /// ```
    #[must_use]
    pub fn most_constrained_first(candidates: &RowCandidates) -> Self {
        let counts = candidates.counts();
        let mut order = Self::top_to_bottom();
        order.rows.sort_by_key(|&row| counts[row]);
        order
    }

    /// Returns the row indices in visiting order.
    #[must_use]
    pub fn rows(&self) -> &[usize; GRID_SIZE] {
        &self.rows
    }
}

/// Counters collected by one [`BacktrackingAssigner::assign`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignerStats {
    tries: u64,
    commits: u64,
    completed: u64,
    rejected: u64,
}

impl AssignerStats {
    /// Returns how many candidates were checked against the occupancy masks.
    #[must_use]
    pub fn tries(&self) -> u64 {
        self.tries
    }

    /// Returns how many candidates were placed without conflict.
    #[must_use]
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Returns how many complete, consistent grids were reached.
    #[must_use]
    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// Returns how many complete grids the acceptance rule turned down.
    #[must_use]
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}

/// The result of [`BacktrackingAssigner::assign`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    solutions: Vec<Grid>,
    stats: AssignerStats,
}

impl Assignment {
    /// Returns the accepted grids in discovery order.
    #[must_use]
    pub fn solutions(&self) -> &[Grid] {
        &self.solutions
    }

    /// Consumes the assignment, returning the accepted grids.
    #[must_use]
    pub fn into_solutions(self) -> Vec<Grid> {
        self.solutions
    }

    /// Returns the search counters.
    #[must_use]
    pub fn stats(&self) -> AssignerStats {
        self.stats
    }
}

/// Tries are published to [`Progress`] in batches of this size.
const PROGRESS_BATCH: u64 = 4096;

/// Enumerates every grid that takes one candidate per row, repeats no symbol in
/// any column or block, and satisfies an [`Acceptance`] rule.
///
/// Rows are visited in [`RowOrder::most_constrained_first`] order, computed
/// from the candidates passed to [`assign`](Self::assign).
///
/// # Examples
///
/// ```
/// use gcdoku_core::Grid;
/// use gcdoku_solver::{AcceptAll, BacktrackingAssigner, RowCandidates};
///
/// let grid: Grid = "
///     987654320 654320987 320987654
///     876543209 543209876 209876543
///     765432098 432098765 098765432
/// "
/// .parse()?;
/// let candidates = RowCandidates::new(grid.rows().map(|row| vec![row]));
///
/// let assignment = BacktrackingAssigner::new(&AcceptAll).assign(&candidates);
/// assert_eq!(assignment.solutions(), &[grid]);
/// assert_eq!(assignment.stats().tries(), 9);
/// # Ok::<(), gcdoku_core::GridParseError>(())
/// ```
#[derive(Debug)]
pub struct BacktrackingAssigner<'a, A: ?Sized> {
    acceptance: &'a A,
    progress: Option<&'a Progress>,
}

impl<'a, A> BacktrackingAssigner<'a, A>
where
    A: Acceptance + ?Sized,
{
    /// Creates an assigner that keeps grids accepted by `acceptance`.
    #[must_use]
    pub fn new(acceptance: &'a A) -> Self {
        Self {
            acceptance,
            progress: None,
        }
    }

    /// Publishes tries and solutions to `progress` while assigning.
    #[must_use]
    pub fn with_progress(self, progress: &'a Progress) -> Self {
        Self {
            progress: Some(progress),
            ..self
        }
    }

    /// Enumerates all accepted assignments of `candidates`.
    ///
    /// Returns no solutions and zeroed stats if any row has no candidates.
    #[must_use]
    pub fn assign(&self, candidates: &RowCandidates) -> Assignment {
        if candidates.first_empty_row().is_some() {
            return Assignment::default();
        }

        let mut walk = Walk {
            candidates,
            order: RowOrder::most_constrained_first(candidates),
            acceptance: self.acceptance,
            progress: self.progress,
            unpublished: 0,
            assignment: Assignment::default(),
        };
        walk.descend(&mut Board::default(), 0);
        walk.publish();
        walk.assignment
    }
}

struct Walk<'a, A: ?Sized> {
    candidates: &'a RowCandidates,
    order: RowOrder,
    acceptance: &'a A,
    progress: Option<&'a Progress>,
    unpublished: u64,
    assignment: Assignment,
}

impl<A> Walk<'_, A>
where
    A: Acceptance + ?Sized,
{
    fn descend(&mut self, board: &mut Board, depth: usize) {
        let Some(&row) = self.order.rows().get(depth) else {
            self.complete(board.grid);
            return;
        };

        let candidates = self.candidates;
        for &sequence in candidates.row(row) {
            self.count_try();
            if board.masks.conflicts(row, &sequence) {
                continue;
            }
            self.assignment.stats.commits += 1;
            let mut placed: Placement<'_> = board.place(row, sequence);
            self.descend(&mut placed, depth + 1);
        }
    }

    fn complete(&mut self, grid: Grid) {
        debug_assert_eq!(grid.check_consistency(), Ok(()));
        let stats = &mut self.assignment.stats;
        stats.completed += 1;
        if self.acceptance.accepts(&grid) {
            self.assignment.solutions.push(grid);
            if let Some(progress) = self.progress {
                progress.add_solutions(1);
            }
        } else {
            stats.rejected += 1;
        }
    }

    fn count_try(&mut self) {
        self.assignment.stats.tries += 1;
        self.unpublished += 1;
        if self.unpublished >= PROGRESS_BATCH {
            self.publish();
        }
    }

    fn publish(&mut self) {
        if let Some(progress) = self.progress {
            progress.add_tries(self.unpublished);
        }
        self.unpublished = 0;
    }
}
