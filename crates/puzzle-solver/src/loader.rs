//! Plain-text board loaders for the grid puzzles.
//!
//! Tilt boards start with the side length followed by that many rows of
//! space-separated symbols:
//!
//! ```text
//! 3
//! G . O
//! . * .
//! B . .
//! ```
//!
//! Tip-over boards start with `rows cols startRow startCol goalRow goalCol`
//! followed by `rows` lines of crate heights:
//!
//! ```text
//! 2 3 0 0 1 2
//! 2 0 0
//! 0 0 1
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, LoadError, Result};
use crate::grid::Position;
use crate::tilt::{TiltCell, TiltState};
use crate::tipover::TipOverState;

type ParseResult<T> = std::result::Result<T, LoadError>;

/// Non-blank lines paired with their 1-based line numbers.
struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
    last: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate(),
            last: 0,
        }
    }

    fn next_tokens(&mut self, expected: &'static str) -> ParseResult<(usize, Vec<&'a str>)> {
        for (index, line) in self.inner.by_ref() {
            self.last = index + 1;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if !tokens.is_empty() {
                return Ok((self.last, tokens));
            }
        }
        Err(LoadError::MissingLine {
            line: self.last + 1,
            expected,
        })
    }
}

fn expect_count(line: usize, tokens: &[&str], expected: usize) -> ParseResult<()> {
    if tokens.len() != expected {
        return Err(LoadError::TokenCount {
            line,
            expected,
            found: tokens.len(),
        });
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(line: usize, token: &str) -> ParseResult<T> {
    token.parse().map_err(|_| LoadError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

/// Parse a tilt board.
pub fn parse_tilt(text: &str) -> ParseResult<TiltState> {
    let mut lines = Lines::new(text);

    let (line, header) = lines.next_tokens("board size")?;
    expect_count(line, &header, 1)?;
    let size: usize = parse_number(line, header[0])?;
    if size == 0 {
        return Err(LoadError::EmptyBoard);
    }

    let mut cells = Vec::new();
    for _ in 0..size {
        let (line, tokens) = lines.next_tokens("a row of cells")?;
        expect_count(line, &tokens, size)?;
        let row = tokens
            .iter()
            .map(|&symbol| {
                TiltCell::from_symbol(symbol).ok_or_else(|| LoadError::InvalidSymbol {
                    line,
                    symbol: symbol.to_string(),
                })
            })
            .collect::<ParseResult<Vec<_>>>()?;
        cells.push(row);
    }

    TiltState::new(cells)
}

/// Parse a tip-over board.
pub fn parse_tipover(text: &str) -> ParseResult<TipOverState> {
    let mut lines = Lines::new(text);

    let (line, header) = lines.next_tokens("board header")?;
    expect_count(line, &header, 6)?;
    let values = header
        .iter()
        .map(|token| parse_number::<usize>(line, token))
        .collect::<ParseResult<Vec<_>>>()?;
    let (rows, cols) = (values[0], values[1]);
    let start = Position::new(values[2], values[3]);
    let goal = Position::new(values[4], values[5]);
    if rows == 0 || cols == 0 {
        return Err(LoadError::EmptyBoard);
    }

    let mut heights = Vec::new();
    for _ in 0..rows {
        let (line, tokens) = lines.next_tokens("a row of heights")?;
        expect_count(line, &tokens, cols)?;
        let row = tokens
            .iter()
            .map(|token| parse_number::<u32>(line, token))
            .collect::<ParseResult<Vec<_>>>()?;
        heights.push(row);
    }

    TipOverState::new(heights, start, goal)
}

fn read(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

fn with_path(path: &Path) -> impl FnOnce(LoadError) -> Error + '_ {
    move |source| Error::Load {
        path: path.to_path_buf(),
        source,
    }
}

/// Load a tilt board from a file.
pub fn load_tilt(path: &Path) -> Result<TiltState> {
    let state = parse_tilt(&read(path)?).map_err(with_path(path))?;
    debug!(?path, size = state.size(), greens = state.greens_remaining(), "loaded tilt board");
    Ok(state)
}

/// Load a tip-over board from a file.
pub fn load_tipover(path: &Path) -> Result<TipOverState> {
    let state = parse_tipover(&read(path)?).map_err(with_path(path))?;
    debug!(
        ?path,
        rows = state.rows(),
        cols = state.cols(),
        start = %state.start(),
        goal = %state.goal(),
        "loaded tip-over board"
    );
    Ok(state)
}
