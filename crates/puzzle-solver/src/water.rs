//! The water bucket puzzle: fill, empty and pour between buckets of fixed
//! capacity until one of them holds the desired amount.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::state::{SearchState, Successors};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WaterRecord")]
pub struct WaterState {
    desired: u32,
    /// Shared by every state of one puzzle
    capacities: Arc<[u32]>,
    levels: Vec<u32>,
}

impl WaterState {
    /// All buckets start empty.
    pub fn new(desired: u32, capacities: Vec<u32>) -> Result<Self, LoadError> {
        if capacities.is_empty() {
            return Err(LoadError::NoBuckets);
        }
        if let Some(index) = capacities.iter().position(|&c| c == 0) {
            return Err(LoadError::ZeroCapacity { index });
        }
        let levels = vec![0; capacities.len()];
        Ok(Self {
            desired,
            capacities: capacities.into(),
            levels,
        })
    }

    pub fn desired(&self) -> u32 {
        self.desired
    }

    pub fn capacities(&self) -> &[u32] {
        &self.capacities
    }

    pub fn levels(&self) -> &[u32] {
        &self.levels
    }

    fn with_levels(&self, levels: Vec<u32>) -> Self {
        Self {
            desired: self.desired,
            capacities: Arc::clone(&self.capacities),
            levels,
        }
    }

    fn is_full(&self, bucket: usize) -> bool {
        self.levels[bucket] == self.capacities[bucket]
    }

    fn fill(&self, bucket: usize) -> Self {
        let mut levels = self.levels.clone();
        levels[bucket] = self.capacities[bucket];
        self.with_levels(levels)
    }

    fn empty(&self, bucket: usize) -> Self {
        let mut levels = self.levels.clone();
        levels[bucket] = 0;
        self.with_levels(levels)
    }

    /// Pour as much of `from` into `into` as fits.
    fn pour(&self, from: usize, into: usize) -> Self {
        let space = self.capacities[into] - self.levels[into];
        let moved = space.min(self.levels[from]);
        let mut levels = self.levels.clone();
        levels[into] += moved;
        levels[from] -= moved;
        self.with_levels(levels)
    }
}

#[derive(Deserialize)]
struct WaterRecord {
    desired: u32,
    capacities: Vec<u32>,
    levels: Vec<u32>,
}

impl TryFrom<WaterRecord> for WaterState {
    type Error = LoadError;

    fn try_from(record: WaterRecord) -> Result<Self, LoadError> {
        let empty = WaterState::new(record.desired, record.capacities)?;
        if record.levels.len() != empty.levels.len() {
            return Err(LoadError::LevelCount {
                expected: empty.levels.len(),
                found: record.levels.len(),
            });
        }
        let pairs = record.levels.iter().zip(empty.capacities());
        for (index, (&level, &capacity)) in pairs.enumerate() {
            if level > capacity {
                return Err(LoadError::Overfull {
                    index,
                    level,
                    capacity,
                });
            }
        }
        Ok(empty.with_levels(record.levels))
    }
}

impl SearchState for WaterState {
    fn is_goal(&self) -> bool {
        self.levels.contains(&self.desired)
    }

    fn successors(&self) -> Successors<Self> {
        let mut result = Successors::new();
        let count = self.levels.len();

        for bucket in 0..count {
            if !self.is_full(bucket) {
                result.push(self.fill(bucket));
            }
            if self.levels[bucket] != 0 {
                result.push(self.empty(bucket));
            }
            for other in 0..count {
                if other != bucket && self.levels[other] != 0 && !self.is_full(bucket) {
                    result.push(self.pour(other, bucket));
                }
            }
        }
        result
    }
}

impl fmt::Display for WaterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{solve, SearchStatus, SolverConfig};

    fn at_levels(capacities: Vec<u32>, levels: Vec<u32>) -> WaterState {
        let mut state = WaterState::new(99, capacities).unwrap();
        state.levels = levels;
        state
    }

    fn levels_of(states: &[WaterState]) -> Vec<Vec<u32>> {
        states.iter().map(|s| s.levels.clone()).collect()
    }

    #[test]
    fn test_successor_order_from_empty() {
        let start = WaterState::new(2, vec![5, 3]).unwrap();
        assert_eq!(
            levels_of(&start.successors()),
            vec![vec![5, 0], vec![0, 3]]
        );
    }

    #[test]
    fn test_successor_order_with_pours() {
        let state = at_levels(vec![5, 3], vec![4, 1]);
        assert_eq!(
            levels_of(&state.successors()),
            vec![
                vec![5, 1], // fill 0
                vec![0, 1], // empty 0
                vec![5, 0], // pour 1 into 0
                vec![4, 3], // fill 1
                vec![4, 0], // empty 1
                vec![2, 3], // pour 0 into 1, clamped
            ]
        );
    }

    #[test]
    fn test_full_bucket_accepts_no_pour() {
        let state = at_levels(vec![3, 3], vec![3, 2]);
        let successors = levels_of(&state.successors());
        assert!(!successors.contains(&vec![3, 2]));
        assert!(successors.contains(&vec![2, 3]));
        assert_eq!(successors.len(), 4);
    }

    #[test]
    fn test_capacities_are_shared() {
        let start = WaterState::new(2, vec![5, 3]).unwrap();
        for next in start.successors() {
            assert!(Arc::ptr_eq(&start.capacities, &next.capacities));
        }
    }

    #[test]
    fn test_finds_two_litres() {
        let start = WaterState::new(2, vec![5, 3]).unwrap();
        let result = solve(start, &SolverConfig::default());

        assert_eq!(result.status, SearchStatus::Solved);
        let path = result.path.as_ref().unwrap();
        assert!(path.last().unwrap().levels().contains(&2));
        // fill 5, pour into 3 leaves 2
        assert_eq!(result.moves(), Some(2));
        assert_eq!(levels_of(path), vec![vec![0, 0], vec![5, 0], vec![2, 3]]);
    }

    #[test]
    fn test_unreachable_amount() {
        let start = WaterState::new(1, vec![4, 2]).unwrap();
        let result = solve(start, &SolverConfig::default());
        assert_eq!(result.status, SearchStatus::NoSolution);
    }

    #[test]
    fn test_rejects_bad_buckets() {
        assert_eq!(WaterState::new(1, vec![]), Err(LoadError::NoBuckets));
        assert_eq!(
            WaterState::new(1, vec![3, 0]),
            Err(LoadError::ZeroCapacity { index: 1 })
        );
    }

    #[test]
    fn test_deserialize_validates_levels() {
        let state: WaterState =
            serde_json::from_str(r#"{"desired":2,"capacities":[5,3],"levels":[5,1]}"#).unwrap();
        assert_eq!(state.levels(), &[5, 1]);
        assert_eq!(state.capacities(), &[5, 3]);

        let overfull = serde_json::from_str::<WaterState>(
            r#"{"desired":2,"capacities":[5,3],"levels":[5,4]}"#,
        );
        assert!(overfull.unwrap_err().to_string().contains("bucket 1 holds 4"));
        assert!(serde_json::from_str::<WaterState>(
            r#"{"desired":2,"capacities":[5,3],"levels":[0]}"#
        )
        .is_err());
        assert!(serde_json::from_str::<WaterState>(
            r#"{"desired":2,"capacities":[],"levels":[]}"#
        )
        .is_err());
    }
}
