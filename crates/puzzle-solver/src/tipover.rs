//! The tip-over puzzle.
//!
//! The board is a grid of crate stacks (height 0 means the cell is empty).
//! The explorer stands on a stack and may step onto a neighbouring stack, or
//! tip its own stack over so it lies as a row of single crates in the cells
//! next to it. The puzzle is solved when the explorer reaches the goal cell.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::grid::{Direction, Position};
use crate::state::{SearchState, Successors};

/// Order in which moves are generated.
const MOVE_ORDER: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

/// Why a move was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    #[error("Move goes off the board.")]
    OffBoard,
    #[error("No crate or tower there.")]
    NoCrate,
    #[error("Tower cannot be tipped over.")]
    CannotTip,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TipOverRecord")]
pub struct TipOverState {
    start: Position,
    goal: Position,
    heights: Vec<Vec<u32>>,
    explorer: Position,
}

impl TipOverState {
    /// The explorer starts on `start`, which must hold a crate.
    pub fn new(heights: Vec<Vec<u32>>, start: Position, goal: Position) -> Result<Self, LoadError> {
        check_board(&heights, &[("start", start), ("goal", goal)])?;
        if heights[start.row][start.col] == 0 {
            return Err(LoadError::StartNotOnCrate {
                row: start.row,
                col: start.col,
            });
        }
        Ok(Self {
            start,
            goal,
            heights,
            explorer: start,
        })
    }

    pub fn rows(&self) -> usize {
        self.heights.len()
    }

    pub fn cols(&self) -> usize {
        self.heights[0].len()
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn explorer(&self) -> Position {
        self.explorer
    }

    pub fn heights(&self) -> &[Vec<u32>] {
        &self.heights
    }

    pub fn height(&self, position: Position) -> u32 {
        self.heights[position.row][position.col]
    }

    fn neighbour(&self, position: Position, direction: Direction) -> Option<Position> {
        position.step(direction, self.rows(), self.cols())
    }

    /// Explorer moved onto the neighbouring stack, if there is one.
    fn step(&self, direction: Direction) -> Option<TipOverState> {
        let next = self.neighbour(self.explorer, direction)?;
        (self.height(next) > 0).then(|| TipOverState {
            explorer: next,
            ..self.clone()
        })
    }

    /// The current stack tipped over toward `direction`, if it is taller
    /// than one crate and every cell it lands on is empty and on the board.
    fn tip(&self, direction: Direction) -> Option<TipOverState> {
        let height = self.height(self.explorer);
        if height <= 1 {
            return None;
        }

        let mut heights = self.heights.clone();
        let mut at = self.explorer;
        for _ in 0..height {
            at = self.neighbour(at, direction)?;
            if heights[at.row][at.col] != 0 {
                return None;
            }
            heights[at.row][at.col] = 1;
        }
        heights[self.explorer.row][self.explorer.col] = 0;

        let landing = self.neighbour(self.explorer, direction)?;
        Some(TipOverState {
            start: self.start,
            goal: self.goal,
            heights,
            explorer: landing,
        })
    }

    /// A single player move: step onto the neighbouring stack if there is
    /// one, otherwise try to tip the current stack that way.
    pub fn move_toward(&self, direction: Direction) -> Result<TipOverState, MoveRejection> {
        self.neighbour(self.explorer, direction)
            .ok_or(MoveRejection::OffBoard)?;
        if let Some(stepped) = self.step(direction) {
            return Ok(stepped);
        }
        if self.height(self.explorer) <= 1 {
            return Err(MoveRejection::NoCrate);
        }
        self.tip(direction).ok_or(MoveRejection::CannotTip)
    }
}

/// Rectangular, non-empty, and every named position on it.
fn check_board(heights: &[Vec<u32>], positions: &[(&'static str, Position)]) -> Result<(), LoadError> {
    let rows = heights.len();
    let cols = heights.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        return Err(LoadError::EmptyBoard);
    }
    for (line, row) in heights.iter().enumerate() {
        if row.len() != cols {
            return Err(LoadError::TokenCount {
                line: line + 2,
                expected: cols,
                found: row.len(),
            });
        }
    }
    for &(what, position) in positions {
        if position.row >= rows || position.col >= cols {
            return Err(LoadError::OffBoard {
                what,
                row: position.row,
                col: position.col,
                rows,
                cols,
            });
        }
    }
    Ok(())
}

#[derive(Deserialize)]
struct TipOverRecord {
    start: Position,
    goal: Position,
    heights: Vec<Vec<u32>>,
    explorer: Position,
}

impl TryFrom<TipOverRecord> for TipOverState {
    type Error = LoadError;

    /// The start cell may be empty once its stack has been tipped.
    fn try_from(record: TipOverRecord) -> Result<Self, LoadError> {
        let TipOverRecord {
            start,
            goal,
            heights,
            explorer,
        } = record;
        check_board(
            &heights,
            &[("start", start), ("goal", goal), ("explorer", explorer)],
        )?;
        if heights[explorer.row][explorer.col] == 0 {
            return Err(LoadError::ExplorerNotOnCrate {
                row: explorer.row,
                col: explorer.col,
            });
        }
        Ok(TipOverState {
            start,
            goal,
            heights,
            explorer,
        })
    }
}

impl SearchState for TipOverState {
    fn is_goal(&self) -> bool {
        self.explorer == self.goal
    }

    fn successors(&self) -> Successors<Self> {
        let steps = MOVE_ORDER.into_iter().filter_map(|d| self.step(d));
        let tips = MOVE_ORDER.into_iter().filter_map(|d| self.tip(d));
        steps.chain(tips).collect()
    }
}

impl fmt::Display for TipOverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    ")?;
        for col in 0..self.cols() {
            write!(f, "  {}", col)?;
        }
        write!(f, "\n    {}", "___".repeat(self.cols()))?;

        for (r, row) in self.heights.iter().enumerate() {
            write!(f, "\n {} |", r)?;
            for (c, &height) in row.iter().enumerate() {
                let here = Position::new(r, c);
                let marker = if here == self.explorer {
                    '*'
                } else if here == self.goal {
                    '!'
                } else {
                    ' '
                };
                if height == 0 {
                    write!(f, " {}_", marker)?;
                } else {
                    write!(f, " {}{}", marker, height)?;
                }
            }
        }
        writeln!(f)
    }
}
