//! Error types for loading puzzles and running the command-line tools.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A puzzle description that could not be turned into a valid initial state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("line {line}: expected {expected}, found end of input")]
    MissingLine { line: usize, expected: &'static str },

    #[error("line {line}: expected {expected} values, found {found}")]
    TokenCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: '{token}' is not a valid number")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: unknown cell symbol '{symbol}'")]
    InvalidSymbol { line: usize, symbol: String },

    #[error("{what} {row},{col} lies outside the {rows}x{cols} board")]
    OffBoard {
        what: &'static str,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("the explorer must start on a crate, but {row},{col} is empty")]
    StartNotOnCrate { row: usize, col: usize },

    #[error("the explorer must stand on a crate, but {row},{col} is empty")]
    ExplorerNotOnCrate { row: usize, col: usize },

    #[error("board must be square: row {row} has {found} cells, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("board must have at least one row and one column")]
    EmptyBoard,

    #[error("clock must have at least one hour")]
    NoHours,

    #[error("{what} hour {hour} is not on a {hours}-hour clock")]
    HourOutOfRange {
        what: &'static str,
        hour: u32,
        hours: u32,
    },

    #[error("at least one bucket is required")]
    NoBuckets,

    #[error("bucket {index} has zero capacity")]
    ZeroCapacity { index: usize },

    #[error("expected {expected} bucket levels, found {found}")]
    LevelCount { expected: usize, found: usize },

    #[error("bucket {index} holds {level} but only fits {capacity}")]
    Overfull {
        index: usize,
        level: u32,
        capacity: u32,
    },
}

/// Top-level error for the binary and the interactive session.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to load {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("invalid puzzle: {0}")]
    Puzzle(#[from] LoadError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
