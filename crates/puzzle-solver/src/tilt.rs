//! The tilt puzzle.
//!
//! A square board holds blue and green sliders, blocked cells and holes.
//! Tilting the board slides every slider as far as it can go toward one
//! edge. Green sliders that reach a hole drop out of the puzzle; the puzzle
//! is solved once every green slider is gone. A tilt that would drop a blue
//! slider into a hole is illegal.
//!
//! Sliders are processed in sweep order, nearest to the destination edge
//! first, so a slider never collides with one that has yet to move:
//!
//! | Direction | Sweep order                         |
//! |-----------|-------------------------------------|
//! | North     | rows ascending, columns ascending   |
//! | East      | columns descending, rows descending |
//! | South     | rows descending, columns descending |
//! | West      | columns ascending, rows ascending   |

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::LoadError;
use crate::grid::{Direction, Position};
use crate::state::{SearchState, Successors};

/// Contents of one board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TiltCell {
    #[serde(rename = ".")]
    Empty,
    #[serde(rename = "*")]
    Blocked,
    #[serde(rename = "O")]
    Hole,
    #[serde(rename = "B")]
    Blue,
    #[serde(rename = "G")]
    Green,
}

impl TiltCell {
    pub fn from_symbol(symbol: &str) -> Option<TiltCell> {
        match symbol {
            "." => Some(TiltCell::Empty),
            "*" => Some(TiltCell::Blocked),
            "O" => Some(TiltCell::Hole),
            "B" => Some(TiltCell::Blue),
            "G" => Some(TiltCell::Green),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            TiltCell::Empty => '.',
            TiltCell::Blocked => '*',
            TiltCell::Hole => 'O',
            TiltCell::Blue => 'B',
            TiltCell::Green => 'G',
        }
    }

    /// Whether tilting moves this cell
    pub fn is_slider(self) -> bool {
        matches!(self, TiltCell::Blue | TiltCell::Green)
    }
}

/// Why a tilt was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TiltRejection {
    #[error("Illegal move. A blue slider will fall through the hole!")]
    BlueFallsThrough,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TiltRecord")]
pub struct TiltState {
    size: usize,
    greens_remaining: usize,
    cells: Vec<Vec<TiltCell>>,
}

impl TiltState {
    /// Build a board from rows of cells. The board must be square.
    pub fn new(cells: Vec<Vec<TiltCell>>) -> Result<Self, LoadError> {
        let size = cells.len();
        if size == 0 {
            return Err(LoadError::EmptyBoard);
        }
        for (row, cells_in_row) in cells.iter().enumerate() {
            if cells_in_row.len() != size {
                return Err(LoadError::NotSquare {
                    row,
                    expected: size,
                    found: cells_in_row.len(),
                });
            }
        }
        let greens_remaining = cells
            .iter()
            .flatten()
            .filter(|&&c| c == TiltCell::Green)
            .count();
        Ok(Self {
            size,
            greens_remaining,
            cells,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn greens_remaining(&self) -> usize {
        self.greens_remaining
    }

    pub fn cells(&self) -> &[Vec<TiltCell>] {
        &self.cells
    }

    pub fn cell(&self, position: Position) -> TiltCell {
        self.cells[position.row][position.col]
    }

    /// Sliders in the order a tilt toward `direction` processes them.
    fn sweep(&self, direction: Direction) -> SmallVec<[Position; 32]> {
        let n = self.size;
        let ordered = |outer: usize, inner: usize| -> Position {
            match direction {
                Direction::North => Position::new(outer, inner),
                Direction::South => Position::new(n - 1 - outer, n - 1 - inner),
                Direction::West => Position::new(inner, outer),
                Direction::East => Position::new(n - 1 - inner, n - 1 - outer),
            }
        };

        let mut sliders = SmallVec::new();
        for outer in 0..n {
            for inner in 0..n {
                let position = ordered(outer, inner);
                if self.cell(position).is_slider() {
                    sliders.push(position);
                }
            }
        }
        sliders
    }

    /// The board after tilting toward `direction`, or `None` when a blue
    /// slider would fall through a hole.
    pub fn tilt(&self, direction: Direction) -> Option<TiltState> {
        let mut cells = self.cells.clone();
        let mut greens_remaining = self.greens_remaining;

        for start in self.sweep(direction) {
            let slider = cells[start.row][start.col];
            let mut at = start;
            while let Some(next) = at.step(direction, self.size, self.size) {
                match cells[next.row][next.col] {
                    TiltCell::Empty => {
                        cells[next.row][next.col] = slider;
                        cells[at.row][at.col] = TiltCell::Empty;
                        at = next;
                    }
                    TiltCell::Hole if slider == TiltCell::Green => {
                        cells[at.row][at.col] = TiltCell::Empty;
                        greens_remaining -= 1;
                        break;
                    }
                    TiltCell::Hole => return None,
                    _ => break,
                }
            }
        }

        Some(TiltState {
            size: self.size,
            greens_remaining,
            cells,
        })
    }

    /// Like [`TiltState::tilt`], reporting why a tilt is refused.
    pub fn try_tilt(&self, direction: Direction) -> Result<TiltState, TiltRejection> {
        self.tilt(direction).ok_or(TiltRejection::BlueFallsThrough)
    }
}

/// Only the cells are read back; the counts are derived from them.
#[derive(Deserialize)]
struct TiltRecord {
    cells: Vec<Vec<TiltCell>>,
}

impl TryFrom<TiltRecord> for TiltState {
    type Error = LoadError;

    fn try_from(record: TiltRecord) -> Result<Self, LoadError> {
        TiltState::new(record.cells)
    }
}

impl SearchState for TiltState {
    fn is_goal(&self) -> bool {
        self.greens_remaining == 0
    }

    fn successors(&self) -> Successors<Self> {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.tilt(direction))
            .collect()
    }
}

impl fmt::Display for TiltState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.cells.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{} ", cell.symbol())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{solve, SearchStatus, SolverConfig};

    fn board(rows: &[&str]) -> TiltState {
        let cells = rows
            .iter()
            .map(|row| {
                row.split_whitespace()
                    .map(|s| TiltCell::from_symbol(s).unwrap())
                    .collect()
            })
            .collect();
        TiltState::new(cells).unwrap()
    }

    fn render(state: &TiltState) -> Vec<String> {
        state
            .cells
            .iter()
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    #[test]
    fn test_counts_greens() {
        let state = board(&["G . G", "B O .", ". . G"]);
        assert_eq!(state.greens_remaining(), 3);
        assert!(!state.is_goal());
    }

    #[test]
    fn test_green_next_to_hole_is_consumed() {
        let state = board(&["O G", ". ."]);
        let tilted = state.tilt(Direction::West).unwrap();

        assert_eq!(tilted.greens_remaining(), state.greens_remaining() - 1);
        assert_eq!(render(&tilted), vec!["O.", ".."]);
        assert!(tilted.is_goal());
    }

    #[test]
    fn test_green_slides_then_drops() {
        let state = board(&["G . . O", ". . . .", ". . . .", ". . . ."]);
        let tilted = state.tilt(Direction::East).unwrap();
        assert_eq!(tilted.greens_remaining(), 0);
        assert_eq!(render(&tilted)[0], "...O");
    }

    #[test]
    fn test_green_without_hole_in_path() {
        let state = board(&["G .", ". O"]);

        // already against the west edge
        assert_eq!(state.tilt(Direction::West).unwrap(), state);

        let south = state.tilt(Direction::South).unwrap();
        assert_eq!(render(&south), vec!["..", "GO"]);
        assert_eq!(south.greens_remaining(), 1);
    }

    #[test]
    fn test_blue_into_hole_is_illegal() {
        let state = board(&["B O", "G ."]);
        assert_eq!(state.tilt(Direction::East), None);
        assert_eq!(
            state.try_tilt(Direction::East),
            Err(TiltRejection::BlueFallsThrough)
        );

        let successors = state.successors();
        assert_eq!(successors.len(), 3);
    }

    #[test]
    fn test_blue_rejection_discards_green_progress() {
        // green drops first in the sweep, then the blue falls
        let state = board(&[". . .", "O G .", "O B ."]);
        assert_eq!(state.tilt(Direction::West), None);
        assert_eq!(state.greens_remaining(), 1);
    }

    #[test]
    fn test_sliders_stack_against_blocks() {
        let state = board(&["* . .", "G . .", "B . ."]);
        let north = state.tilt(Direction::North).unwrap();
        assert_eq!(render(&north), vec!["*..", "G..", "B.."]);

        let state = board(&[". * .", ". . .", "G B ."]);
        let east = state.tilt(Direction::East).unwrap();
        assert_eq!(render(&east), vec![".*.", "...", ".GB"]);
    }

    #[test]
    fn test_column_of_sliders_moves_together() {
        let state = board(&["G . .", "B . .", "G . ."]);
        let south = state.tilt(Direction::South).unwrap();
        assert_eq!(render(&south), vec!["G..", "B..", "G.."]);

        let state = board(&[". . .", "G . .", "B . ."]);
        let north = state.tilt(Direction::North).unwrap();
        assert_eq!(render(&north), vec!["G..", "B..", "..."]);
    }

    #[test]
    fn test_trailing_slider_stops_behind_leader() {
        let state = board(&["G B . .", ". . . .", ". . . .", ". . . ."]);
        let east = state.tilt(Direction::East).unwrap();
        assert_eq!(render(&east)[0], "..GB");

        let west = east.tilt(Direction::West).unwrap();
        assert_eq!(render(&west)[0], "GB..");
    }

    #[test]
    fn test_successors_are_fresh_boards() {
        let state = board(&["G . O", ". . .", "B . ."]);
        let before = state.clone();
        let successors = state.successors();

        assert_eq!(state, before);
        assert_eq!(successors.len(), 4);
        for next in &successors {
            assert_ne!(next.cells.as_ptr(), state.cells.as_ptr());
        }
    }

    #[test]
    fn test_solves_small_board() {
        let state = board(&["G . .", ". * .", "B . O"]);
        let result = solve(state, &SolverConfig::default());

        assert_eq!(result.status, SearchStatus::Solved);
        let path = result.path.as_ref().unwrap();
        assert!(path.last().unwrap().is_goal());
        // east straight away would drop the blue, so it is parked first
        assert_eq!(result.moves(), Some(3));
    }

    #[test]
    fn test_unsolvable_board() {
        let state = board(&["G B", "* O"]);
        // the only way to the hole drops the blue first
        let result = solve(state, &SolverConfig::default());
        assert_eq!(result.status, SearchStatus::NoSolution);
    }

    #[test]
    fn test_rejects_non_square() {
        let cells = vec![vec![TiltCell::Empty, TiltCell::Green], vec![TiltCell::Empty]];
        assert_eq!(
            TiltState::new(cells),
            Err(LoadError::NotSquare {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(TiltState::new(vec![]), Err(LoadError::EmptyBoard));
    }

    #[test]
    fn test_display() {
        let state = board(&["G .", "* O"]);
        assert_eq!(state.to_string(), "G . \n* O ");
    }

    #[test]
    fn test_deserialize_recounts_greens() {
        // a stale count in the input is ignored
        let state: TiltState = serde_json::from_str(
            r#"{"size":2,"greens_remaining":0,"cells":[["G","O"],[".","."]]}"#,
        )
        .unwrap();
        assert_eq!(state.size(), 2);
        assert_eq!(state.greens_remaining(), 1);
        assert!(!state.is_goal());
        assert!(state.tilt(Direction::East).unwrap().is_goal());

        assert!(serde_json::from_str::<TiltState>(r#"{"cells":[]}"#).is_err());
        assert!(serde_json::from_str::<TiltState>(r#"{"cells":[["G","."],["."]]}"#).is_err());
    }
}
