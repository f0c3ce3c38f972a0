//! The modular clock puzzle: move the hand one hour at a time, in either
//! direction, until it points at the goal hour.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::state::{SearchState, Successors};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ClockRecord")]
pub struct ClockState {
    hours: u32,
    start: u32,
    goal: u32,
    position: u32,
}

impl ClockState {
    /// A clock with `hours` positions (numbered `1..=hours`) whose hand
    /// starts at `start`.
    pub fn new(hours: u32, start: u32, goal: u32) -> Result<Self, LoadError> {
        if hours == 0 {
            return Err(LoadError::NoHours);
        }
        for (what, hour) in [("start", start), ("goal", goal)] {
            if hour == 0 || hour > hours {
                return Err(LoadError::HourOutOfRange { what, hour, hours });
            }
        }
        Ok(Self {
            hours,
            start,
            goal,
            position: start,
        })
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    fn at(&self, position: u32) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}

#[derive(Deserialize)]
struct ClockRecord {
    hours: u32,
    start: u32,
    goal: u32,
    position: u32,
}

impl TryFrom<ClockRecord> for ClockState {
    type Error = LoadError;

    fn try_from(record: ClockRecord) -> Result<Self, LoadError> {
        let clock = ClockState::new(record.hours, record.start, record.goal)?;
        if record.position == 0 || record.position > record.hours {
            return Err(LoadError::HourOutOfRange {
                what: "position",
                hour: record.position,
                hours: record.hours,
            });
        }
        Ok(clock.at(record.position))
    }
}

impl SearchState for ClockState {
    fn is_goal(&self) -> bool {
        self.position == self.goal
    }

    fn successors(&self) -> Successors<Self> {
        let back = if self.position == 1 {
            self.hours
        } else {
            self.position - 1
        };
        let forward = if self.position == self.hours {
            1
        } else {
            self.position + 1
        };

        let mut result = Successors::new();
        result.push(self.at(back));
        result.push(self.at(forward));
        result
    }
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{solve, SolverConfig};

    #[test]
    fn test_successors_wrap_both_ways() {
        let low = ClockState::new(12, 1, 6).unwrap();
        let positions: Vec<u32> = low.successors().iter().map(|s| s.position()).collect();
        assert_eq!(positions, vec![12, 2]);

        let high = ClockState::new(12, 12, 6).unwrap();
        let positions: Vec<u32> = high.successors().iter().map(|s| s.position()).collect();
        assert_eq!(positions, vec![11, 1]);
    }

    #[test]
    fn test_successors_keep_configuration() {
        let clock = ClockState::new(5, 3, 4).unwrap();
        for next in clock.successors() {
            assert_eq!(next.hours(), 5);
            assert_eq!(next.start(), 3);
            assert_eq!(next.goal(), 4);
        }
    }

    #[test]
    fn test_shortest_path_goes_forward() {
        let clock = ClockState::new(12, 7, 12).unwrap();
        let result = solve(clock, &SolverConfig::default());

        let path = result.path.as_ref().expect("clock is always solvable");
        let hours: Vec<u32> = path.iter().map(|s| s.position()).collect();
        assert_eq!(hours, vec![7, 8, 9, 10, 11, 12]);
        assert_eq!(result.moves(), Some(5));
    }

    #[test]
    fn test_shortest_path_wraps_backwards() {
        let clock = ClockState::new(12, 2, 11).unwrap();
        let result = solve(clock, &SolverConfig::default());

        let hours: Vec<u32> = result.path.unwrap().iter().map(|s| s.position()).collect();
        assert_eq!(hours, vec![2, 1, 12, 11]);
    }

    #[test]
    fn test_start_at_goal() {
        let clock = ClockState::new(4, 3, 3).unwrap();
        assert!(clock.is_goal());
        let result = solve(clock, &SolverConfig::default());
        assert_eq!(result.moves(), Some(0));
        assert_eq!(result.total_generated, 1);
        assert_eq!(result.unique_visited, 1);
    }

    #[test]
    fn test_rejects_bad_hours() {
        assert_eq!(ClockState::new(0, 1, 1), Err(LoadError::NoHours));
        assert_eq!(
            ClockState::new(12, 13, 1),
            Err(LoadError::HourOutOfRange {
                what: "start",
                hour: 13,
                hours: 12
            })
        );
        assert!(ClockState::new(12, 1, 0).is_err());
    }

    #[test]
    fn test_deserialize_validates_position() {
        let clock: ClockState =
            serde_json::from_str(r#"{"hours":12,"start":2,"goal":11,"position":5}"#).unwrap();
        assert_eq!(clock.position(), 5);
        assert_eq!(clock.start(), 2);

        let err = serde_json::from_str::<ClockState>(
            r#"{"hours":12,"start":2,"goal":11,"position":13}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("position hour 13"));
        assert!(serde_json::from_str::<ClockState>(
            r#"{"hours":0,"start":1,"goal":1,"position":1}"#
        )
        .is_err());
    }
}
