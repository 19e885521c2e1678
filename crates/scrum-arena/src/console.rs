//! Plain-text driver for a single match.
//!
//! Reads [`Command`]s line by line and prints what the match reports back.
//! Advisory and rejection wording lives here; the engine only hands back
//! tagged values.

use crate::command::{Command, HELP};
use scrum_engine::{Advisory, Match, MoveOutcome, Phase};
use std::io::{self, BufRead, Write};

/// Runs a session until `quit` or end of input.
///
/// `new` replaces `game` with a fresh match that keeps its record sink, so
/// several games can be played in one session.
pub fn run_session<R: BufRead, W: Write>(
    game: &mut Match,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(
        out,
        "Scrum Chess on a {} board. Type 'help' for commands.",
        game.dimensions()
    )?;
    write!(out, "{}", game.board())?;

    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        match command {
            Command::Start => match game.start() {
                Ok(()) => writeln!(out, "Match started. {} to move.", game.turn())?,
                Err(rejection) => writeln!(out, "Cannot start: {}.", rejection)?,
            },
            Command::Select(at) => {
                let selection = game.select_piece(at);
                if let Some(advisory) = selection.advisory {
                    writeln!(out, "{}", advisory_message(advisory))?;
                } else if game.board().get(at).is_none() {
                    writeln!(out, "No piece at {}.", at)?;
                } else if selection.targets.is_empty() {
                    writeln!(out, "The piece at {} has no moves.", at)?;
                } else {
                    let cells: Vec<String> =
                        selection.targets.iter().map(|p| p.to_string()).collect();
                    writeln!(out, "Targets: {}", cells.join(" "))?;
                }
            }
            Command::Move { from, to } => match game.apply_move(from, to) {
                Ok(outcome) => {
                    report_move(out, &outcome)?;
                    write!(out, "{}", game.board())?;
                    if game.is_finished() {
                        writeln!(out, "Game over.")?;
                    } else {
                        writeln!(out, "{} to move.", game.turn())?;
                    }
                }
                Err(rejection) => writeln!(out, "Move refused: {}.", rejection)?,
            },
            Command::Board => write!(out, "{}", game.board())?,
            Command::New(size) => {
                let dims = size.unwrap_or_else(|| game.dimensions());
                *game = game.rematch(dims);
                writeln!(out, "New match on a {} board. Type 'start' to begin.", dims)?;
                write!(out, "{}", game.board())?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => break,
        }
    }

    out.flush()
}

/// Wording for an advisory left by a refused selection.
pub fn advisory_message(advisory: Advisory) -> String {
    match advisory {
        Advisory::NotPlayersTurn { turn } => format!("It is {}'s turn to move.", turn),
        Advisory::MatchNotInProgress { phase: Phase::Setup } => {
            "The match has not started. Type 'start' to begin.".to_string()
        }
        Advisory::MatchNotInProgress { phase } => format!("The match is {}.", phase),
    }
}

fn report_move<W: Write>(out: &mut W, outcome: &MoveOutcome) -> io::Result<()> {
    let played = &outcome.played;
    match played.captured {
        Some(victim) => writeln!(
            out,
            "{} {} -> {} captures {}.",
            played.piece, played.from, played.to, victim
        )?,
        None => writeln!(out, "{} {} -> {}.", played.piece, played.from, played.to)?,
    }
    if let Some(winner) = outcome.winner {
        writeln!(out, "{} wins by capturing the Product Owner!", winner)?;
    }
    Ok(())
}
