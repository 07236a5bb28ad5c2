//! Search engine for the largest divisor shared by every row of a grid.
//!
//! The pipeline runs in four stages:
//!
//! 1. [`CandidatePool`] enumerates every row value containing the required
//!    symbols.
//! 2. [`RowSpec`] narrows the pool per row, producing [`RowCandidates`].
//! 3. [`DivisorSearch`] counts divisors down from the top of a
//!    [`DivisorRange`], keeping only multiples in each row.
//! 4. [`BacktrackingAssigner`] enumerates consistent grids for one divisor
//!    and keeps those passing an [`Acceptance`] rule.
//!
//! [`Puzzle`] bundles the inputs and drives all four stages.

pub use self::{
    assigner::*, divisor::*, error::*, filter::*, pool::*, progress::*, puzzle::*, search::*,
};

mod assigner;
mod divisor;
mod error;
mod filter;
mod masks;
mod pool;
mod progress;
mod puzzle;
mod search;

#[cfg(test)]
mod testing;
