use std::str::FromStr;

use sumfall_core::{Coord, Coord2, Mode};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Start(Mode),
    Tap(Coord2),
    Pause,
    Resume,
    Quit,
    Restart,
    Hint,
    Show,
    Help,
    Exit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("unknown mode `{0}`, expected `classic` or `time`")]
    UnknownMode(String),
    #[error("expected `tap <row> <col>`")]
    MissingCoords,
    #[error("invalid coordinate `{0}`")]
    InvalidCoord(String),
}

pub(crate) const HELP: &str = "\
commands:
  start classic|time   pick a mode and start playing
  tap <row> <col>      select or deselect a tile (row 0 is the top)
  pause | resume       freeze or continue the game
  quit                 abandon the game and go back to the menu
  restart              leave the game over screen
  hint                 show tiles that add up to the target
  show                 print the board again
  exit                 leave the program";

fn parse_mode(word: &str) -> Result<Mode, CommandError> {
    match word.to_ascii_lowercase().as_str() {
        "classic" | "c" => Ok(Mode::Classic),
        "time" | "timeattack" | "time-attack" | "t" => Ok(Mode::TimeAttack),
        _ => Err(CommandError::UnknownMode(word.to_string())),
    }
}

fn parse_coord(word: Option<&str>) -> Result<Coord, CommandError> {
    let word = word.ok_or(CommandError::MissingCoords)?;
    word.parse()
        .map_err(|_| CommandError::InvalidCoord(word.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };

        Ok(match name.to_ascii_lowercase().as_str() {
            "start" | "s" => Command::Start(parse_mode(words.next().unwrap_or("classic"))?),
            "tap" | "t" => {
                let row = parse_coord(words.next())?;
                let col = parse_coord(words.next())?;
                Command::Tap((row, col))
            }
            "pause" | "p" => Command::Pause,
            "resume" | "r" => Command::Resume,
            "quit" | "q" => Command::Quit,
            "restart" => Command::Restart,
            "hint" | "h" => Command::Hint,
            "show" | "ls" => Command::Show,
            "help" | "?" => Command::Help,
            "exit" => Command::Exit,
            _ => return Err(CommandError::Unknown(name.to_string())),
        })
    }
}
