//! Text commands for driving an `Agent`.
//!
//! Line format: `NAME [arg1,arg2,...]`.
//! - `NAME` is case-insensitive (`PLACE`, `place`, `Place`).
//! - Arguments are comma-separated; each is a number or a heading name
//!   (heading names are case-sensitive: `NORTH`, never `north`).
//! - Tokens after the argument list are ignored.
//! - Blank lines and lines starting with `#` carry no command.
//!
//! Each command maps to exactly one core operation; parsing happens once,
//! up front, into a closed `Command` enum.

use std::fmt;
use std::str::FromStr;

use crate::agent::{Agent, AgentError, Pose};
use crate::heading::{Heading, Orientation, UnknownHeading};

/// One parsed command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Place {
        x: f64,
        y: f64,
        orientation: Orientation,
    },
    Move {
        distance: f64,
    },
    Spin {
        angle: f64,
    },
    Left,
    Right,
    Report,
}

/// Why a line could not be turned into a `Command`.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseError {
    Empty,
    UnknownCommand(String),
    UnknownHeading(UnknownHeading),
    BadArity {
        command: &'static str,
        expected: &'static str,
        got: usize,
    },
    /// Argument at `index` (0-based) has the wrong kind, e.g. a heading where a number belongs.
    BadArgument {
        command: &'static str,
        index: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty command"),
            ParseError::UnknownCommand(name) => write!(f, "unknown command {:?}", name),
            ParseError::UnknownHeading(e) => write!(f, "{}", e),
            ParseError::BadArity {
                command,
                expected,
                got,
            } => write!(
                f,
                "{} takes {} argument(s), got {}",
                command, expected, got
            ),
            ParseError::BadArgument { command, index } => {
                write!(f, "{} argument {} must be a number", command, index + 1)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::UnknownHeading(e) => Some(e),
            _ => None,
        }
    }
}

impl From<UnknownHeading> for ParseError {
    fn from(e: UnknownHeading) -> Self {
        ParseError::UnknownHeading(e)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Arg {
    Number(f64),
    Heading(Heading),
}

impl Arg {
    fn parse(raw: &str) -> Result<Arg, UnknownHeading> {
        match raw.parse::<f64>() {
            Ok(v) => Ok(Arg::Number(v)),
            Err(_) => Heading::from_name(raw).map(Arg::Heading),
        }
    }
}

impl Command {
    /// Parse a single non-comment line.
    pub fn parse(line: &str) -> Result<Command, ParseError> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next().ok_or(ParseError::Empty)?.to_ascii_lowercase();
        let args = match tokens.next() {
            Some(list) => list
                .split(',')
                .map(Arg::parse)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };
        match name.as_str() {
            "place" => match args[..] {
                [x, y, f] => Ok(Command::Place {
                    x: number("PLACE", 0, x)?,
                    y: number("PLACE", 1, y)?,
                    orientation: match f {
                        Arg::Number(theta) => Orientation::from_angle(theta),
                        Arg::Heading(h) => Orientation::Heading(h),
                    },
                }),
                _ => Err(arity("PLACE", "3", args.len())),
            },
            "move" => match args[..] {
                [] => Ok(Command::Move { distance: 1.0 }),
                [d] => Ok(Command::Move {
                    distance: number("MOVE", 0, d)?,
                }),
                _ => Err(arity("MOVE", "0 or 1", args.len())),
            },
            "spin" => match args[..] {
                [] => Ok(Command::Spin { angle: 0.0 }),
                [a] => Ok(Command::Spin {
                    angle: number("SPIN", 0, a)?,
                }),
                _ => Err(arity("SPIN", "0 or 1", args.len())),
            },
            "left" => no_args("LEFT", &args).map(|_| Command::Left),
            "right" => no_args("RIGHT", &args).map(|_| Command::Right),
            "report" => no_args("REPORT", &args).map(|_| Command::Report),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }

    /// Run the command against `agent`; on success returns the pose afterwards.
    ///
    /// `Report` never fails; it yields `None` for an agent with no pose.
    pub fn apply(&self, agent: &mut Agent<'_>) -> Result<Option<Pose>, AgentError> {
        match *self {
            Command::Place { x, y, orientation } => agent.try_place(x, y, orientation)?,
            Command::Move { distance } => agent.try_move_by(distance)?,
            Command::Spin { angle } => agent.try_spin(angle)?,
            Command::Left => agent.try_left()?,
            Command::Right => agent.try_right()?,
            Command::Report => {}
        }
        Ok(agent.report())
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Place { x, y, orientation } => write!(f, "PLACE {},{},{}", x, y, orientation),
            Command::Move { distance } => write!(f, "MOVE {}", distance),
            Command::Spin { angle } => write!(f, "SPIN {}", angle),
            Command::Left => f.write_str("LEFT"),
            Command::Right => f.write_str("RIGHT"),
            Command::Report => f.write_str("REPORT"),
        }
    }
}

/// Result of feeding one raw input line to an agent.
#[derive(Clone, Debug, PartialEq)]
pub enum LineOutcome {
    /// Blank line or `#` comment.
    Skipped,
    Malformed(ParseError),
    Rejected(Command, AgentError),
    Done(Command, Option<Pose>),
}

/// True for lines that carry no command.
pub fn is_skippable(line: &str) -> bool {
    let t = line.trim();
    t.is_empty() || t.starts_with('#')
}

/// Parse and apply one line.
pub fn execute_line(agent: &mut Agent<'_>, line: &str) -> LineOutcome {
    if is_skippable(line) {
        return LineOutcome::Skipped;
    }
    match Command::parse(line) {
        Err(e) => LineOutcome::Malformed(e),
        Ok(cmd) => match cmd.apply(agent) {
            Ok(pose) => LineOutcome::Done(cmd, pose),
            Err(e) => LineOutcome::Rejected(cmd, e),
        },
    }
}

fn number(command: &'static str, index: usize, arg: Arg) -> Result<f64, ParseError> {
    match arg {
        Arg::Number(v) => Ok(v),
        Arg::Heading(_) => Err(ParseError::BadArgument { command, index }),
    }
}

fn arity(command: &'static str, expected: &'static str, got: usize) -> ParseError {
    ParseError::BadArity {
        command,
        expected,
        got,
    }
}

fn no_args(command: &'static str, args: &[Arg]) -> Result<(), ParseError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(arity(command, "0", args.len()))
    }
}
