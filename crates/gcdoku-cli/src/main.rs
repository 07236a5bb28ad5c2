//! Finds the grid whose rows share the largest possible common divisor.
//!
//! # Usage
//!
//! Solve the bundled Somewhat Square puzzle:
//!
//! ```sh
//! cargo run --release --bin gcdoku
//! ```
//!
//! Solve a puzzle described in JSON, trying every divisor from 5000 down:
//!
//! ```sh
//! cargo run --release --bin gcdoku -- --puzzle my-puzzle.json --max-divisor 5000 --all-divisors
//! ```
//!
//! Logging is controlled with `RUST_LOG` (default `info`).

use std::{
    io,
    num::NonZeroUsize,
    path::PathBuf,
    process::ExitCode,
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use clap::Parser;
use gcdoku_solver::{DivisorRange, Progress, Puzzle, PuzzleError, PuzzleReport, SearchOutcome};

use crate::error::CliError;

mod config;
mod error;
mod report;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Puzzle description in JSON. Defaults to the bundled Somewhat Square puzzle.
    #[arg(long, value_name = "PATH")]
    puzzle: Option<PathBuf>,

    /// Largest divisor to try, overriding the puzzle.
    #[arg(long, value_name = "N")]
    max_divisor: Option<u32>,

    /// Smallest divisor to try, overriding the puzzle.
    #[arg(long, value_name = "N")]
    min_divisor: Option<u32>,

    /// Also try divisors ending in 0, 2, 4, 5, 6 or 8.
    #[arg(long)]
    all_divisors: bool,

    /// Worker threads for candidate generation. Defaults to all cores but one.
    #[arg(long, value_name = "COUNT")]
    threads: Option<NonZeroUsize>,

    /// Seconds between progress log lines; 0 disables them.
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    progress_interval: u64,

    /// Row whose numeral is printed as the answer.
    #[arg(
        long,
        value_name = "ROW",
        default_value_t = 4,
        value_parser = clap::value_parser!(u8).range(0..9),
    )]
    answer_row: u8,
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether a solution was found.
fn run(args: &Args) -> Result<bool, CliError> {
    let threads = args.threads.map_or_else(default_threads, NonZeroUsize::get);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()?;
    log::info!("using {threads} worker thread(s)");

    let puzzle = config::load(args.puzzle.as_deref())?;
    let puzzle = override_divisors(puzzle, args)?;

    let interval = (args.progress_interval > 0).then(|| Duration::from_secs(args.progress_interval));
    let report = solve(&puzzle, interval);

    report::write_report(&mut io::stdout().lock(), &report, usize::from(args.answer_row))
        .map_err(CliError::WriteReport)?;
    Ok(matches!(report.outcome(), SearchOutcome::Solved(_)))
}

fn default_threads() -> usize {
    thread::available_parallelism().map_or(1, |n| n.get().saturating_sub(1).max(1))
}

fn override_divisors(puzzle: Puzzle, args: &Args) -> Result<Puzzle, PuzzleError> {
    if args.max_divisor.is_none() && args.min_divisor.is_none() && !args.all_divisors {
        return Ok(puzzle);
    }
    let current = puzzle.divisors();
    let divisors = DivisorRange::new(
        args.max_divisor.unwrap_or(current.max()),
        args.min_divisor.unwrap_or(current.min()),
    )?
    .with_coprime_to_ten(current.coprime_to_ten() && !args.all_divisors);
    Ok(puzzle.with_divisors(divisors))
}

/// Runs the search, logging a progress line every `interval` from a side thread.
fn solve(puzzle: &Puzzle, interval: Option<Duration>) -> PuzzleReport {
    let progress = Progress::new();
    let Some(interval) = interval else {
        return puzzle.solve(&progress);
    };

    let (stop, stopped) = mpsc::channel::<()>();
    thread::scope(|scope| {
        let progress = &progress;
        scope.spawn(move || log_progress(progress, interval, &stopped));
        let report = puzzle.solve(progress);
        drop(stop);
        report
    })
}

fn log_progress(progress: &Progress, interval: Duration, stopped: &Receiver<()>) {
    let start = Instant::now();
    while let Err(RecvTimeoutError::Timeout) = stopped.recv_timeout(interval) {
        let snapshot = progress.snapshot();
        log::info!(
            "{:.0?} elapsed: divisor {} ({} tried), {} tries, {} solution(s)",
            start.elapsed(),
            snapshot.divisor,
            snapshot.divisors_tried,
            snapshot.tries,
            snapshot.solutions
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("gcdoku").chain(args.iter().copied()))
    }

    #[test]
    fn test_args_defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.progress_interval, 30);
        assert_eq!(args.answer_row, 4);
        assert!(args.puzzle.is_none());
        assert!(!args.all_divisors);

        assert!(parse(&["--answer-row", "9"]).is_err());
        assert!(parse(&["--threads", "0"]).is_err());
    }

    #[test]
    fn test_override_divisors() {
        let puzzle = config::load(None).unwrap();

        let args = parse(&[]).unwrap();
        let same = override_divisors(puzzle.clone(), &args).unwrap();
        assert_eq!(same, puzzle);

        let args = parse(&["--max-divisor", "5000", "--all-divisors"]).unwrap();
        let divisors = override_divisors(puzzle.clone(), &args).unwrap().divisors();
        assert_eq!(divisors.max(), 5000);
        assert_eq!(divisors.min(), 337);
        assert!(!divisors.coprime_to_ten());

        let args = parse(&["--min-divisor", "0"]).unwrap();
        assert!(override_divisors(puzzle, &args).is_err());
    }
}
