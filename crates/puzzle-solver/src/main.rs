//! CLI entry point for the puzzle solver.
//!
//! Usage:
//!   puzzle-solver clock <hours> <start> <goal>
//!   puzzle-solver water <amount> <capacity>...
//!   puzzle-solver tilt <file>
//!   puzzle-solver tipover <file>
//!   puzzle-solver play <tilt|tipover> <file>
//!
//! Options:
//!   --max-generated <n>  Give up after generating this many states
//!   --timeout <seconds>  Give up after this long
//!   --json               Print the result as JSON
//!   --log-level <level>  Log filter when RUST_LOG is unset (default: warn)

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use puzzle_solver::{
    init_logging, load_tilt, load_tipover, run_repl, solve, ClockState, Playable, Puzzle,
    Result, SearchStatus, Session, SolveResult, SolverConfig, WaterState,
};

#[derive(Parser)]
#[command(name = "puzzle-solver")]
#[command(about = "Breadth-first shortest-path solver for clock, water, tilt and tip-over puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Give up after generating this many states
    #[arg(long, global = true)]
    max_generated: Option<usize>,

    /// Give up after this many seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn a clock hand from one hour to another
    Clock {
        /// Number of hours on the clock
        hours: u32,
        /// Starting hour
        start: u32,
        /// Goal hour
        goal: u32,
    },
    /// Measure an amount of water with buckets
    Water {
        /// Amount wanted in any one bucket
        amount: u32,
        /// Bucket capacities
        #[arg(required = true)]
        capacities: Vec<u32>,
    },
    /// Solve a tilt board file
    Tilt {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Solve a tip-over board file
    Tipover {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Play a board interactively on stdin/stdout
    Play {
        kind: PlayKind,
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PlayKind {
    Tilt,
    Tipover,
}

/// Output format for a solve
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput<'a> {
    puzzle: &'static str,
    status: SearchStatus,
    total_generated: usize,
    unique_visited: usize,
    time_elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a [Puzzle]>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = SolverConfig {
        max_generated: cli.max_generated,
        timeout: cli.timeout.map(Duration::from_secs),
    };

    match run(cli.command, &config, cli.json) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

/// Returns whether the puzzle was solved.
fn run(command: Commands, config: &SolverConfig, json: bool) -> Result<bool> {
    let puzzle: Puzzle = match command {
        Commands::Clock { hours, start, goal } => {
            if !json {
                println!("Hours: {}, Start: {}, End: {}", hours, start, goal);
            }
            ClockState::new(hours, start, goal)?.into()
        }
        Commands::Water { amount, capacities } => {
            if !json {
                println!("Amount: {}, Buckets: {:?}", amount, capacities);
            }
            WaterState::new(amount, capacities)?.into()
        }
        Commands::Tilt { file } => {
            let state = load_tilt(&file)?;
            if !json {
                println!("{}", state);
            }
            state.into()
        }
        Commands::Tipover { file } => {
            let state = load_tipover(&file)?;
            if !json {
                println!("File: {}", file.display());
                println!("{}", state);
            }
            state.into()
        }
        Commands::Play { kind, file } => {
            return match kind {
                PlayKind::Tilt => play(load_tilt(&file)?, load_tilt, config),
                PlayKind::Tipover => play(load_tipover(&file)?, load_tipover, config),
            };
        }
    };

    tracing::info!(puzzle = puzzle.name(), "solving");
    let result = solve(puzzle.clone(), config);

    if json {
        print_json(&puzzle, &result)?;
    } else {
        print_text(&puzzle, &result);
    }
    Ok(result.is_solved())
}

fn play<S: Playable>(
    state: S,
    loader: fn(&Path) -> Result<S>,
    config: &SolverConfig,
) -> Result<bool> {
    let mut session = Session::new(state, config.clone());
    run_repl(&mut session, loader, io::stdin().lock(), io::stdout().lock())?;
    Ok(session.current().is_goal())
}

fn print_json(puzzle: &Puzzle, result: &SolveResult<Puzzle>) -> Result<()> {
    let output = SolveOutput {
        puzzle: puzzle.name(),
        status: result.status,
        total_generated: result.total_generated,
        unique_visited: result.unique_visited,
        time_elapsed_ms: result.time_elapsed_ms,
        moves: result.moves(),
        path: result.path.as_deref(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_text(puzzle: &Puzzle, result: &SolveResult<Puzzle>) {
    println!("Total configs: {}", result.total_generated);
    println!("Unique configs: {}", result.unique_visited);

    match (&result.path, result.status) {
        (Some(path), _) => {
            for (step, state) in path.iter().enumerate() {
                if puzzle.is_multiline() {
                    println!("Step {}:\n{}\n", step, state);
                } else {
                    println!("Step {}: {}", step, state);
                }
            }
        }
        (None, SearchStatus::BudgetExhausted) => println!("No solution within the search budget"),
        (None, _) => println!("No solution"),
    }
}
