//! The capability every puzzle state offers to the search engine, and the
//! closed set of puzzles this crate knows about.

use std::fmt;
use std::hash::Hash;

use serde::Serialize;
use smallvec::SmallVec;

use crate::clock::ClockState;
use crate::tilt::TiltState;
use crate::tipover::TipOverState;
use crate::water::WaterState;

/// Successor list returned by [`SearchState::successors`].
///
/// Most puzzles have at most eight moves from any state, so these stay inline.
pub type Successors<S> = SmallVec<[S; 8]>;

/// A snapshot of one puzzle configuration.
///
/// Implementors are immutable values: equal states must hash identically and
/// every successor must be a freshly built value that shares no mutable
/// storage with its parent.
pub trait SearchState: Clone + Eq + Hash {
    /// Whether this configuration solves the puzzle.
    fn is_goal(&self) -> bool;

    /// Every state reachable in one legal move, in a deterministic order.
    ///
    /// The order decides which of several shortest paths the solver returns.
    fn successors(&self) -> Successors<Self>;
}

/// Any of the supported puzzles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Puzzle {
    Clock(ClockState),
    Water(WaterState),
    Tilt(TiltState),
    TipOver(TipOverState),
}

impl Puzzle {
    pub fn name(&self) -> &'static str {
        match self {
            Puzzle::Clock(_) => "clock",
            Puzzle::Water(_) => "water",
            Puzzle::Tilt(_) => "tilt",
            Puzzle::TipOver(_) => "tipover",
        }
    }

    /// Whether a rendered state spans several lines.
    pub fn is_multiline(&self) -> bool {
        matches!(self, Puzzle::Tilt(_) | Puzzle::TipOver(_))
    }
}

fn wrap<S, F>(successors: Successors<S>, variant: F) -> Successors<Puzzle>
where
    F: Fn(S) -> Puzzle,
{
    successors.into_iter().map(variant).collect()
}

impl SearchState for Puzzle {
    fn is_goal(&self) -> bool {
        match self {
            Puzzle::Clock(s) => s.is_goal(),
            Puzzle::Water(s) => s.is_goal(),
            Puzzle::Tilt(s) => s.is_goal(),
            Puzzle::TipOver(s) => s.is_goal(),
        }
    }

    fn successors(&self) -> Successors<Self> {
        match self {
            Puzzle::Clock(s) => wrap(s.successors(), Puzzle::Clock),
            Puzzle::Water(s) => wrap(s.successors(), Puzzle::Water),
            Puzzle::Tilt(s) => wrap(s.successors(), Puzzle::Tilt),
            Puzzle::TipOver(s) => wrap(s.successors(), Puzzle::TipOver),
        }
    }
}

impl From<ClockState> for Puzzle {
    fn from(state: ClockState) -> Self {
        Puzzle::Clock(state)
    }
}

impl From<WaterState> for Puzzle {
    fn from(state: WaterState) -> Self {
        Puzzle::Water(state)
    }
}

impl From<TiltState> for Puzzle {
    fn from(state: TiltState) -> Self {
        Puzzle::Tilt(state)
    }
}

impl From<TipOverState> for Puzzle {
    fn from(state: TipOverState) -> Self {
        Puzzle::TipOver(state)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Puzzle::Clock(s) => fmt::Display::fmt(s, f),
            Puzzle::Water(s) => fmt::Display::fmt(s, f),
            Puzzle::Tilt(s) => fmt::Display::fmt(s, f),
            Puzzle::TipOver(s) => fmt::Display::fmt(s, f),
        }
    }
}
