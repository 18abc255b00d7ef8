#![forbid(unsafe_code)]

//! Line commands understood by a demo session.

use std::str::FromStr;

use undoable_runtime::{MutationBehavior, TransitionError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `+ [n]`: add `n` (default 1) to the counter.
    Increment(i64),
    /// `- [n]`: subtract `n` (default 1).
    Decrement(i64),
    /// `set <n>`
    Set(i64),
    /// `silent <n>`: overwrite the present without recording history.
    Silent(i64),
    Undo,
    Redo,
    /// `reset [n]`: start over from `n`, or from the initial value.
    Reset(Option<i64>),
    /// `rebase <n>`: replace the oldest recorded state.
    Rebase(i64),
    /// `behavior <name>`: change the behavior used by later updates.
    Behavior(MutationBehavior),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("`{command}` got an invalid number: {value}")]
    InvalidNumber {
        command: &'static str,
        value: String,
    },

    #[error("`{0}` takes no arguments")]
    UnexpectedArgument(&'static str),

    #[error(transparent)]
    Behavior(#[from] TransitionError),
}

pub const HELP: &str = "\
commands:
  + [n]            add n (default 1)
  - [n]            subtract n (default 1)
  set <n>          record n
  silent <n>       overwrite the present without recording
  undo | redo
  reset [n]        clear history, starting from n or the initial value
  rebase <n>       replace the oldest recorded state
  behavior <name>  mergePastReversed | mergePast | destroyFuture | keepFuture
  show             print the timeline
  help | quit";

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    line.parse().map(Some)
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Unknown(String::new()));
        };
        let arg = words.next();
        if let Some(extra) = words.next() {
            return Err(CommandError::Unknown(format!("{s} ({extra} unexpected)")));
        }

        let command = match head {
            "+" | "inc" => Self::Increment(optional_number("+", arg)?.unwrap_or(1)),
            "-" | "dec" => Self::Decrement(optional_number("-", arg)?.unwrap_or(1)),
            "set" => Self::Set(required_number("set", arg)?),
            "silent" => Self::Silent(required_number("silent", arg)?),
            "undo" => no_argument("undo", arg, Self::Undo)?,
            "redo" => no_argument("redo", arg, Self::Redo)?,
            "reset" => Self::Reset(optional_number("reset", arg)?),
            "rebase" => Self::Rebase(required_number("rebase", arg)?),
            "behavior" => {
                let name = arg.ok_or(CommandError::MissingArgument {
                    command: "behavior",
                    expected: "a behavior name",
                })?;
                Self::Behavior(name.parse()?)
            }
            "show" => no_argument("show", arg, Self::Show)?,
            "help" | "?" => no_argument("help", arg, Self::Help)?,
            "quit" | "exit" | "q" => no_argument("quit", arg, Self::Quit)?,
            other => return Err(CommandError::Unknown(other.to_owned())),
        };
        Ok(command)
    }
}

fn optional_number(command: &'static str, arg: Option<&str>) -> Result<Option<i64>, CommandError> {
    arg.map(|value| {
        value.parse().map_err(|_| CommandError::InvalidNumber {
            command,
            value: value.to_owned(),
        })
    })
    .transpose()
}

fn required_number(command: &'static str, arg: Option<&str>) -> Result<i64, CommandError> {
    optional_number(command, arg)?.ok_or(CommandError::MissingArgument {
        command,
        expected: "a number",
    })
}

fn no_argument(
    command: &'static str,
    arg: Option<&str>,
    parsed: Command,
) -> Result<Command, CommandError> {
    match arg {
        None => Ok(parsed),
        Some(_) => Err(CommandError::UnexpectedArgument(command)),
    }
}
