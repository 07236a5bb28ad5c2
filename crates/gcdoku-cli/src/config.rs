//! JSON puzzle descriptions.

use std::{fs, path::Path};

use gcdoku_core::{Symbol, SymbolSet};
use gcdoku_solver::{
    AcceptanceRule, DivisorRange, Puzzle, PuzzleError, RowSpec, RowSpecError,
    SymbolInLeadingColumns,
};
use serde::Deserialize;

use crate::CliError;

const SOMEWHAT_SQUARE: &str = include_str!("../puzzles/somewhat-square.json");

/// Loads the puzzle at `path`, or the bundled one.
pub(crate) fn load(path: Option<&Path>) -> Result<Puzzle, CliError> {
    let json = match path {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::ReadPuzzle {
            path: path.to_owned(),
            source,
        })?,
        None => {
            log::info!("using the bundled Somewhat Square puzzle");
            SOMEWHAT_SQUARE.to_owned()
        }
    };
    parse(&json)
}

pub(crate) fn parse(json: &str) -> Result<Puzzle, CliError> {
    let config: PuzzleConfig = serde_json::from_str(json)?;
    Ok(Puzzle::try_from(config)?)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PuzzleConfig {
    required: Vec<u8>,
    rows: Vec<RowConfig>,
    divisors: DivisorConfig,
    #[serde(default)]
    acceptance: AcceptanceConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RowConfig {
    #[serde(default)]
    clues: Vec<ClueConfig>,
    #[serde(default)]
    disallowed: Vec<DisallowedConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClueConfig {
    column: usize,
    symbol: u8,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DisallowedConfig {
    column: usize,
    symbols: Vec<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DivisorConfig {
    max: u32,
    min: u32,
    #[serde(default = "coprime_to_ten_default")]
    coprime_to_ten: bool,
}

fn coprime_to_ten_default() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
enum AcceptanceConfig {
    #[default]
    Any,
    SymbolInLeadingColumns {
        symbol: u8,
        columns: usize,
    },
}

impl TryFrom<RowConfig> for RowSpec {
    type Error = RowSpecError;

    fn try_from(config: RowConfig) -> Result<Self, Self::Error> {
        let mut spec = RowSpec::new();
        for clue in config.clues {
            spec = spec.with_clue(clue.column, Symbol::try_from(clue.symbol)?)?;
        }
        for entry in config.disallowed {
            let symbols = entry
                .symbols
                .into_iter()
                .map(Symbol::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            spec = spec.with_disallowed(entry.column, symbols)?;
        }
        Ok(spec)
    }
}

impl TryFrom<AcceptanceConfig> for AcceptanceRule {
    type Error = PuzzleError;

    fn try_from(config: AcceptanceConfig) -> Result<Self, Self::Error> {
        Ok(match config {
            AcceptanceConfig::Any => Self::Any,
            AcceptanceConfig::SymbolInLeadingColumns { symbol, columns } => {
                Self::SymbolInLeadingColumns(SymbolInLeadingColumns {
                    symbol: Symbol::try_from(symbol)?,
                    columns,
                })
            }
        })
    }
}

impl TryFrom<PuzzleConfig> for Puzzle {
    type Error = PuzzleError;

    fn try_from(config: PuzzleConfig) -> Result<Self, Self::Error> {
        let required = config
            .required
            .into_iter()
            .map(Symbol::try_from)
            .collect::<Result<SymbolSet, _>>()?;
        let rows = config
            .rows
            .into_iter()
            .enumerate()
            .map(|(row, spec)| {
                RowSpec::try_from(spec).map_err(|source| PuzzleError::InvalidRow { row, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let divisors = DivisorRange::new(config.divisors.max, config.divisors.min)?
            .with_coprime_to_ten(config.divisors.coprime_to_ten);
        let acceptance = AcceptanceRule::try_from(config.acceptance)?;
        Puzzle::new(required, rows, divisors, acceptance)
    }
}
