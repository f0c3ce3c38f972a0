//! Shortest-path puzzle solver.
//!
//! A single breadth-first [`solve`] works over any [`SearchState`]. Four
//! puzzles come with the crate: a modular clock, water buckets, the tilt
//! sliding-block puzzle and the tip-over crate puzzle.

pub mod clock;
pub mod error;
pub mod grid;
pub mod loader;
pub mod session;
pub mod solver;
pub mod state;
pub mod tilt;
pub mod tipover;
pub mod water;

// Re-export main types
pub use clock::ClockState;
pub use error::{Error, LoadError, Result};
pub use grid::{Direction, Position};
pub use loader::{load_tilt, load_tipover, parse_tilt, parse_tipover};
pub use session::{run_repl, Outcome, Playable, Session};
pub use solver::{solve, SearchStatus, SolveResult, SolverConfig};
pub use state::{Puzzle, SearchState, Successors};
pub use tilt::{TiltCell, TiltRejection, TiltState};
pub use tipover::{MoveRejection, TipOverState};
pub use water::WaterState;

/// Install a stderr `tracing` subscriber. `RUST_LOG` overrides `level`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
