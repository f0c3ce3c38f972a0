//! Interactive play on top of the solver.
//!
//! A [`Session`] holds the board the player loaded and the board they are
//! currently looking at. Every command returns an [`Outcome`] describing what
//! happened; [`run_repl`] turns text commands into session calls and prints
//! the outcome followed by the board.

use std::fmt;
use std::io::{BufRead, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::grid::Direction;
use crate::solver::{solve, SolverConfig};
use crate::state::SearchState;
use crate::tilt::{TiltRejection, TiltState};
use crate::tipover::{MoveRejection, TipOverState};

/// A puzzle a person can play one directional move at a time.
pub trait Playable: SearchState + fmt::Display {
    type Rejection: fmt::Display;

    /// The state after the player's move toward `direction`.
    fn play(&self, direction: Direction) -> std::result::Result<Self, Self::Rejection>;

    /// Verb shown in the help text.
    fn verb() -> &'static str {
        "move"
    }

    /// Message shown when a move reaches the goal.
    fn victory() -> &'static str {
        "I WON!"
    }
}

impl Playable for TiltState {
    type Rejection = TiltRejection;

    fn play(&self, direction: Direction) -> std::result::Result<Self, Self::Rejection> {
        self.try_tilt(direction)
    }

    fn verb() -> &'static str {
        "tilt"
    }

    fn victory() -> &'static str {
        "You win, congratulations!"
    }
}

impl Playable for TipOverState {
    type Rejection = MoveRejection;

    fn play(&self, direction: Direction) -> std::result::Result<Self, Self::Rejection> {
        self.move_toward(direction)
    }
}

/// What a session command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Loaded(String),
    Reset,
    /// The board moved but is not solved yet
    Advanced(String),
    Won(&'static str),
    AlreadySolved,
    NoSolution,
    /// The move was illegal and the board is unchanged
    Rejected(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Loaded(name) => write!(f, "Loaded {}", name),
            Outcome::Reset => write!(f, "Puzzle reset!"),
            Outcome::Advanced(message) => write!(f, "{}", message),
            Outcome::Won(message) => write!(f, "{}", message),
            Outcome::AlreadySolved => write!(f, "Current board is already solved."),
            Outcome::NoSolution => write!(f, "No solution."),
            Outcome::Rejected(reason) => write!(f, "{}", reason),
        }
    }
}

pub struct Session<S> {
    initial: S,
    current: S,
    config: SolverConfig,
}

impl<S: Playable> Session<S> {
    pub fn new(initial: S, config: SolverConfig) -> Self {
        Self {
            current: initial.clone(),
            initial,
            config,
        }
    }

    pub fn current(&self) -> &S {
        &self.current
    }

    fn advance(&mut self, next: S, message: String) -> Outcome {
        self.current = next;
        if self.current.is_goal() {
            Outcome::Won(S::victory())
        } else {
            Outcome::Advanced(message)
        }
    }

    /// Play the first move of a shortest solution from the current board.
    pub fn hint(&mut self) -> Outcome {
        if self.current.is_goal() {
            return Outcome::AlreadySolved;
        }
        let result = solve(self.current.clone(), &self.config);
        debug!(
            status = ?result.status,
            moves = ?result.moves(),
            unique_visited = result.unique_visited,
            "hint search"
        );
        match result.path.and_then(|path| path.into_iter().nth(1)) {
            Some(next) => self.advance(next, "Next step!".to_string()),
            None => Outcome::NoSolution,
        }
    }

    pub fn play(&mut self, direction: Direction) -> Outcome {
        if self.current.is_goal() {
            return Outcome::AlreadySolved;
        }
        match self.current.play(direction) {
            Ok(next) => self.advance(next, format!("{} {}", capitalize(S::verb()), direction)),
            Err(reason) => Outcome::Rejected(reason.to_string()),
        }
    }

    pub fn reset(&mut self) -> Outcome {
        self.current = self.initial.clone();
        Outcome::Reset
    }

    pub fn load(&mut self, state: S, name: &str) -> Outcome {
        self.initial = state.clone();
        self.current = state;
        Outcome::Loaded(name.to_string())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn help<S: Playable>() -> String {
    let verb = S::verb();
    format!(
        "h(int)              -- hint next move\n\
         l(oad) filename     -- load new puzzle file\n\
         {}({}) {{N|E|S|W}}    -- {} in the given direction\n\
         q(uit)              -- quit the game\n\
         r(eset)             -- reset the current game",
        &verb[..1],
        &verb[1..],
        verb
    )
}

enum Command<'a> {
    Hint,
    Load(&'a str),
    Play(Direction),
    Reset,
    Quit,
    Help,
}

fn parse_command<'a, S: Playable>(line: &'a str) -> Command<'a> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Command::Help;
    };
    let first = first.to_ascii_lowercase();
    let rest: Vec<&str> = words.collect();
    let verb = S::verb();

    match (first.as_str(), rest.as_slice()) {
        ("h" | "hint", []) => Command::Hint,
        ("r" | "reset", []) => Command::Reset,
        ("q" | "quit", []) => Command::Quit,
        ("l" | "load", [file]) => Command::Load(*file),
        (word, [direction]) if word == verb || word == &verb[..1] || word == "m" || word == "move" => {
            match direction.parse() {
                Ok(direction) => Command::Play(direction),
                Err(_) => Command::Help,
            }
        }
        (word, []) => match word.parse() {
            Ok(direction) => Command::Play(direction),
            Err(_) => Command::Help,
        },
        _ => Command::Help,
    }
}

/// Drive a session from text commands until `quit` or end of input.
///
/// `loader` turns the argument of a `load` command into a board; a failed
/// load is reported and leaves the session as it was.
pub fn run_repl<S, L, R, W>(session: &mut Session<S>, loader: L, input: R, mut output: W) -> Result<()>
where
    S: Playable,
    L: Fn(&Path) -> Result<S>,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", help::<S>())?;
    writeln!(output, "{}", session.current())?;

    for line in input.lines() {
        let line = line?;
        debug!(command = line.trim(), "session command");

        let outcome = match parse_command::<S>(&line) {
            Command::Quit => break,
            Command::Help => {
                writeln!(output, "{}", help::<S>())?;
                continue;
            }
            Command::Hint => session.hint(),
            Command::Reset => session.reset(),
            Command::Play(direction) => session.play(direction),
            Command::Load(file) => match loader(Path::new(file)) {
                Ok(state) => session.load(state, file),
                Err(err) => {
                    writeln!(output, "Failed to load {}: {}", file, err)?;
                    continue;
                }
            },
        };

        writeln!(output, "{}\n", outcome)?;
        writeln!(output, "{}", session.current())?;
    }
    Ok(())
}
