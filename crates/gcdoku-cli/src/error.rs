use std::{io, path::PathBuf};

use gcdoku_solver::PuzzleError;

/// Anything that stops the binary before or instead of a search.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub(crate) enum CliError {
    #[display("failed to read {}: {source}", path.display())]
    #[from(skip)]
    ReadPuzzle { path: PathBuf, source: io::Error },
    #[display("invalid puzzle JSON: {_0}")]
    ParsePuzzle(#[from] serde_json::Error),
    #[display("invalid puzzle: {_0}")]
    InvalidPuzzle(#[from] PuzzleError),
    #[display("failed to write report: {_0}")]
    #[from(skip)]
    WriteReport(io::Error),
    #[display("failed to build thread pool: {_0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
