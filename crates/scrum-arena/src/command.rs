//! Line commands for the interactive `play` session.

use scrum_core::{Dimensions, InvalidDimensions, ParsePositionError, Position};
use thiserror::Error;

/// Errors from parsing a session line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    Usage {
        command: &'static str,
        expected: &'static str,
    },
    #[error(transparent)]
    Position(#[from] ParsePositionError),
    #[error(transparent)]
    Board(#[from] InvalidDimensions),
}

/// A command typed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin the match.
    Start,
    /// Show the targets of the piece at a cell.
    Select(Position),
    /// Move a piece.
    Move { from: Position, to: Position },
    /// Print the board.
    Board,
    /// Abandon the current match for a fresh one, optionally on another size.
    New(Option<Dimensions>),
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(input: &str) -> Result<Option<Self>, CommandError> {
        let mut parts = input.split_whitespace();
        let Some(cmd) = parts.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = parts.collect();

        let command = match (cmd, args.as_slice()) {
            ("start", []) => Command::Start,
            ("select" | "s", [at]) => Command::Select(at.parse()?),
            ("move" | "m", [from, to]) => Command::Move {
                from: from.parse()?,
                to: to.parse()?,
            },
            ("board" | "b", []) => Command::Board,
            ("new" | "restart", []) => Command::New(None),
            ("new" | "restart", [rows, cols]) => Command::New(Some(parse_size(rows, cols)?)),
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit" | "q", []) => Command::Quit,
            ("start", _) => return Err(usage("start", "no arguments")),
            ("select" | "s", _) => return Err(usage("select", "one cell, e.g. 'select 1,5'")),
            ("move" | "m", _) => return Err(usage("move", "two cells, e.g. 'move 1,5 1,3'")),
            ("board" | "b", _) => return Err(usage("board", "no arguments")),
            ("new" | "restart", _) => return Err(usage("new", NEW_USAGE)),
            ("help" | "?", _) => return Err(usage("help", "no arguments")),
            ("quit" | "exit" | "q", _) => return Err(usage("quit", "no arguments")),
            (other, _) => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

const NEW_USAGE: &str = "nothing or a size, e.g. 'new 10 7'";

fn parse_size(rows: &str, cols: &str) -> Result<Dimensions, CommandError> {
    match (rows.parse::<u8>(), cols.parse::<u8>()) {
        (Ok(rows), Ok(cols)) => Ok(Dimensions::new(rows, cols)?),
        _ => Err(usage("new", NEW_USAGE)),
    }
}

fn usage(command: &'static str, expected: &'static str) -> CommandError {
    CommandError::Usage { command, expected }
}

/// Text printed by the `help` command.
pub const HELP: &str = "\
Commands:
  start             begin the match (White moves first)
  select X,Y        list the cells the piece at X,Y can reach
  move X,Y X,Y      move a piece; landing on an opponent captures it
  board             print the board
  new [ROWS COLS]   start over, keeping or changing the board size
  help              show this text
  quit              leave the session";
