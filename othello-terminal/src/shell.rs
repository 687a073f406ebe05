//! The interactive loop: render, read a command, forward it to the engine.
//!
//! The shell never edits the board. It asks the engine for legal moves,
//! submits moves through [`GameEngine::play`] and re-renders from the engine.

use anyhow::{Context, Result};
use derive_more::{Display, Error};
use othello_engine::{GameEngine, Location, LocationList, MoveOutcome};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument};

/// One line of user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Play at `(row, col)`, zero-indexed.
    Play { row: usize, col: usize },
    Restart,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, Display, Error)]
#[display("unrecognized command")]
pub struct ParseCommandError;

impl std::str::FromStr for Command {
    type Err = ParseCommandError;

    /// Accepts `restart`, `help`, `quit`, board notation (`d3`) or
    /// zero-indexed `row col` pairs (`2 3`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        match input.to_ascii_lowercase().as_str() {
            "restart" | "r" => return Ok(Command::Restart),
            "help" | "h" | "?" => return Ok(Command::Help),
            "quit" | "q" | "exit" => return Ok(Command::Quit),
            _ => {}
        }

        if let Ok(loc) = input.parse::<Location>() {
            let (row, col) = loc.to_coords();
            return Ok(Command::Play { row, col });
        }

        let mut numbers = input.split_whitespace().map(str::parse::<usize>);
        match (numbers.next(), numbers.next(), numbers.next()) {
            (Some(Ok(row)), Some(Ok(col)), None) => Ok(Command::Play { row, col }),
            _ => Err(ParseCommandError),
        }
    }
}

/// Rendering options.
#[derive(Clone, Copy, Debug)]
pub struct ShellOptions {
    /// Mark the legal moves of the player on turn.
    pub hints: bool,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self { hints: true }
    }
}

const HELP: &str = "Enter a move as a square (d3) or as zero-indexed \"row col\" (2 3).\n\
                    Other commands: restart, help, quit.";

/// Run one game session until `quit` or end of input.
#[instrument(skip_all)]
pub fn run<R: BufRead, W: Write>(
    engine: &mut GameEngine,
    input: R,
    output: &mut W,
    options: ShellOptions,
) -> Result<()> {
    render(engine, output, options)?;
    let mut lines = input.lines();

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            info!("end of input");
            break;
        };
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Play { row, col }) => match engine.play(row, col) {
                Ok(outcome) => {
                    report(&outcome, output)?;
                    render(engine, output, options)?;
                }
                Err(error) => {
                    debug!(%error, "move rejected");
                    writeln!(output, "Rejected: {}.", error)?;
                    if let Some(player) = engine.current_player() {
                        writeln!(output, "Legal moves: {}", engine.legal_moves(player))?;
                    }
                }
            },
            Ok(Command::Restart) => {
                engine.reset();
                render(engine, output, options)?;
            }
            Ok(Command::Help) => writeln!(output, "{}", HELP)?,
            Ok(Command::Quit) => break,
            Err(error) => writeln!(
                output,
                "{} {:?}. Type \"help\" for commands.",
                error,
                line.trim()
            )?,
        }
    }

    Ok(())
}

fn render<W: Write>(engine: &GameEngine, output: &mut W, options: ShellOptions) -> Result<()> {
    let markers = match engine.current_player() {
        Some(player) if options.hints => engine.legal_moves(player),
        _ => LocationList::default(),
    };
    let scores = engine.scores();

    writeln!(output, "{}", engine.board().highlighted(markers))?;
    writeln!(
        output,
        "Black {}  White {}  Empty {}",
        scores.black,
        scores.white,
        engine.count_empty()
    )?;
    writeln!(output, "{}", engine.status_message())?;
    Ok(())
}

fn report<W: Write>(outcome: &MoveOutcome, output: &mut W) -> Result<()> {
    writeln!(
        output,
        "{} plays {}, flipping {}.",
        outcome.player,
        outcome.location,
        outcome.flipped.len()
    )?;
    if let Some(skipped) = outcome.skipped {
        writeln!(output, "{} has no legal move and passes.", skipped)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use othello_engine::Player;
    use std::io::Cursor;

    fn session(engine: &mut GameEngine, script: &str) -> String {
        let mut output = Vec::new();
        run(engine, Cursor::new(script), &mut output, ShellOptions::default()).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parse_commands() {
        assert_eq!("d3".parse(), Ok(Command::Play { row: 2, col: 3 }));
        assert_eq!(" 2 3 ".parse(), Ok(Command::Play { row: 2, col: 3 }));
        assert_eq!("9 9".parse(), Ok(Command::Play { row: 9, col: 9 }));
        assert_eq!("RESTART".parse(), Ok(Command::Restart));
        assert_eq!("q".parse(), Ok(Command::Quit));
        assert_eq!("2 3 4".parse::<Command>(), Err(ParseCommandError));
        assert_eq!("z9".parse::<Command>(), Err(ParseCommandError));
        assert_eq!("".parse::<Command>(), Err(ParseCommandError));
    }

    #[test]
    fn plays_moves_from_input() {
        let mut engine = GameEngine::new();
        let transcript = session(&mut engine, "d3\n2 2\nquit\nd8\n");

        assert!(transcript.contains("Welcome to Othello. Black to play."));
        assert!(transcript.contains("Black plays D3, flipping 1."));
        assert!(transcript.contains("White plays C3, flipping 1."));
        assert_eq!(engine.current_player(), Some(Player::Black));
        assert_eq!(engine.scores().total(), 6);
    }

    #[test]
    fn rejected_moves_list_alternatives() {
        let mut engine = GameEngine::new();
        let transcript = session(&mut engine, "a1\n8 0\nnonsense\n");

        assert!(transcript.contains("Rejected: Black cannot play at A1."));
        assert!(transcript.contains("Rejected: (8, 0) is off the board."));
        assert!(transcript.contains("Legal moves: [D3, C4, F5, E6]"));
        assert!(transcript.contains("unrecognized command \"nonsense\""));
        assert_eq!(engine, GameEngine::new());
    }

    #[test]
    fn restart_resets_engine() {
        let mut engine = GameEngine::new();
        session(&mut engine, "d3\nrestart\n");
        assert_eq!(engine, GameEngine::new());
    }

    #[test]
    fn hints_mark_legal_moves() {
        let mut engine = GameEngine::new();
        let transcript = session(&mut engine, "");
        assert!(transcript.contains(" 3 . . . * . . . . "));

        let mut output = Vec::new();
        run(
            &mut engine,
            Cursor::new(""),
            &mut output,
            ShellOptions { hints: false },
        )
        .unwrap();
        assert!(!String::from_utf8(output).unwrap().contains('*'));
    }
}
