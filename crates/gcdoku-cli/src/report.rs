//! Human-readable output of a finished search.

use std::io::{self, Write};

use gcdoku_solver::{PuzzleReport, SearchOutcome};

/// Writes `report` to `out`, showing row `answer_row` of each grid as the answer.
pub(crate) fn write_report(
    out: &mut impl Write,
    report: &PuzzleReport,
    answer_row: usize,
) -> io::Result<()> {
    writeln!(out, "Candidate pool:")?;
    writeln!(out, "  {} sequences", report.pool_size())?;
    writeln!(out)?;

    writeln!(out, "Row candidates:")?;
    for (row, count) in report.base_counts().into_iter().enumerate() {
        writeln!(out, "  row {row}: {count}")?;
    }
    writeln!(out)?;

    let stats = report.stats();
    writeln!(out, "Search:")?;
    writeln!(out, "  Divisors tried: {}", stats.divisors_tried())?;
    writeln!(out, "  Skipped for an empty row: {}", stats.empty_row_skips())?;
    writeln!(out, "  Assigner runs: {}", stats.assigner_runs())?;
    writeln!(out, "  Candidate tries: {}", stats.tries())?;
    writeln!(out)?;

    match report.outcome() {
        SearchOutcome::Solved(solutions) => {
            writeln!(
                out,
                "Found {} solution(s) with GCD {}",
                solutions.grids().len(),
                solutions.divisor()
            )?;
            for (i, grid) in solutions.grids().iter().enumerate() {
                writeln!(out)?;
                writeln!(out, "Solution {}:", i + 1)?;
                for row in grid.rows() {
                    writeln!(out, "  {row}")?;
                }
                writeln!(out, "Answer (row {answer_row}): {}", grid.row(answer_row))?;
            }
        }
        SearchOutcome::NoFeasibleDivisor => {
            writeln!(out, "No feasible divisor: no accepted grid for any divisor in range")?;
        }
    }
    Ok(())
}
