//! Breadth-first solver returning a shortest solution path.
//!
//! The solver explores states level by level from the initial state. A state
//! is recorded together with its predecessor the first time it is
//! discovered, so the first goal taken off the frontier is reached with the
//! fewest possible moves. The predecessor map doubles as the visited set.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::state::SearchState;

/// Limits applied to a single search. Both are off by default.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Stop once more than this many states have been generated
    pub max_generated: Option<usize>,
    /// Stop once this much time has passed
    pub timeout: Option<Duration>,
}

/// How a search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// A goal state was reached
    Solved,
    /// Every reachable state was explored without finding a goal
    NoSolution,
    /// A configured limit was hit first
    BudgetExhausted,
}

/// Result of a search
#[derive(Debug, Clone)]
pub struct SolveResult<S> {
    pub status: SearchStatus,
    /// Initial state through goal state, present only when solved
    pub path: Option<Vec<S>>,
    /// States produced by successor generation, plus the initial state
    pub total_generated: usize,
    /// Distinct states discovered, including the initial state
    pub unique_visited: usize,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

impl<S> SolveResult<S> {
    pub fn is_solved(&self) -> bool {
        self.status == SearchStatus::Solved
    }

    /// Number of moves in the solution path.
    pub fn moves(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }
}

impl SolverConfig {
    fn exceeded(&self, total_generated: usize, start_time: Instant) -> bool {
        if let Some(max) = self.max_generated {
            if total_generated > max {
                return true;
            }
        }
        matches!(self.timeout, Some(limit) if start_time.elapsed() > limit)
    }
}

/// Find a shortest path from `initial` to any goal state.
///
/// Running out of states is a normal outcome and is reported as
/// [`SearchStatus::NoSolution`].
pub fn solve<S: SearchState>(initial: S, config: &SolverConfig) -> SolveResult<S> {
    let start_time = Instant::now();

    let mut total_generated: usize = 1;
    let mut predecessors: HashMap<S, S> = HashMap::new();
    let mut queue: VecDeque<S> = VecDeque::new();
    predecessors.insert(initial.clone(), initial.clone());
    queue.push_back(initial);

    let mut expanded: usize = 0;
    let mut status = SearchStatus::NoSolution;
    let mut goal = None;

    while let Some(current) = queue.pop_front() {
        if current.is_goal() {
            status = SearchStatus::Solved;
            goal = Some(current);
            break;
        }

        if config.exceeded(total_generated, start_time) {
            status = SearchStatus::BudgetExhausted;
            break;
        }

        let successors = current.successors();
        total_generated += successors.len();
        expanded += 1;

        for successor in successors {
            if !predecessors.contains_key(&successor) {
                predecessors.insert(successor.clone(), current.clone());
                queue.push_back(successor);
            }
        }

        if expanded % 10_000 == 0 {
            trace!(
                expanded,
                total_generated,
                unique_visited = predecessors.len(),
                frontier = queue.len(),
                "search progress"
            );
        }
    }

    let path = goal.map(|g| reconstruct_path(&predecessors, g));
    let result = SolveResult {
        status,
        path,
        total_generated,
        unique_visited: predecessors.len(),
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
    };
    debug!(
        status = ?result.status,
        moves = ?result.moves(),
        total_generated = result.total_generated,
        unique_visited = result.unique_visited,
        elapsed_ms = result.time_elapsed_ms,
        "search finished"
    );
    result
}

/// Walk predecessors back from `goal` to the state that is its own
/// predecessor, then reverse.
fn reconstruct_path<S: SearchState>(predecessors: &HashMap<S, S>, goal: S) -> Vec<S> {
    let mut path = vec![goal];
    loop {
        let last = &path[path.len() - 1];
        match predecessors.get(last) {
            Some(previous) if previous != last => {
                let previous = previous.clone();
                path.push(previous);
            }
            _ => break,
        }
    }
    path.reverse();
    path
}
