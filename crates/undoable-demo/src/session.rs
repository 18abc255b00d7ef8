#![forbid(unsafe_code)]

//! A counter driven by line commands.
//!
//! Each command is applied to an [`Undoable<i64>`] and the timeline is
//! printed afterwards:
//!
//! ```text
//! Past:    [0, 1]
//! Present: 2
//! Future:  []
//! ```
//!
//! Engine and command errors are printed and the session continues; only
//! I/O errors end it.

use std::io::{BufRead, Write};

use undoable_runtime::{Timeline, Undoable, UndoableOptions};

use crate::command::{Command, HELP, parse_line};
use crate::error::{DemoError, Result};

/// Whether the session should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<W> {
    counter: Undoable<i64>,
    out: W,
    errors: usize,
}

impl<W: Write> Session<W> {
    pub fn new(initial: i64, options: UndoableOptions, out: W) -> Self {
        Self {
            counter: Undoable::with_options(initial, options),
            out,
            errors: 0,
        }
    }

    #[must_use]
    pub fn counter(&self) -> &Undoable<i64> {
        &self.counter
    }

    /// Commands that failed so far.
    #[must_use]
    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Apply `command`. Failures are returned, not printed.
    pub fn execute(&mut self, command: &Command) -> Result<Flow> {
        let counter = &mut self.counter;
        match *command {
            Command::Increment(n) => counter.update(|c| c.saturating_add(n))?,
            Command::Decrement(n) => counter.update(|c| c.saturating_sub(n))?,
            Command::Set(n) => counter.set(n)?,
            Command::Silent(n) => counter.set_with(n, None, true)?,
            Command::Undo => {
                counter.undo();
            }
            Command::Redo => {
                counter.redo();
            }
            Command::Reset(None) => counter.reset()?,
            Command::Reset(Some(n)) => counter.reset_to(n)?,
            Command::Rebase(n) => counter.reset_initial_state(n)?,
            Command::Behavior(behavior) => {
                let options = counter.options().with_behavior(behavior);
                counter.set_options(options);
                writeln!(self.out, "behavior: {behavior}")?;
            }
            Command::Show => {}
            Command::Help => {
                writeln!(self.out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        self.render()?;
        Ok(Flow::Continue)
    }

    /// Parse and apply one line, printing recoverable errors.
    pub fn feed_line(&mut self, line: &str) -> Result<Flow> {
        let outcome = match parse_line(line) {
            Ok(Some(command)) => self.execute(&command),
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => Err(DemoError::from(err)),
        };
        match outcome {
            Err(err) if err.is_recoverable() => {
                self.errors += 1;
                tracing::debug!(target: "undoable.demo", line, error = %err, "command failed");
                writeln!(self.out, "error: {err}")?;
                Ok(Flow::Continue)
            }
            other => other,
        }
    }

    /// Feed every line of `input` until it ends or a `quit`.
    pub fn run(&mut self, input: impl BufRead) -> Result<()> {
        self.render()?;
        for line in input.lines() {
            if self.feed_line(&line?)? == Flow::Quit {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn render(&mut self) -> Result<()> {
        write_timeline(&mut self.out, self.counter.timeline())?;
        Ok(())
    }
}

/// Print `timeline` as three labelled lines.
pub fn write_timeline<T: std::fmt::Debug>(
    out: &mut impl Write,
    timeline: &Timeline<T>,
) -> std::io::Result<()> {
    writeln!(out, "Past:    {:?}", timeline.past())?;
    writeln!(out, "Present: {:?}", timeline.present())?;
    writeln!(out, "Future:  {:?}", timeline.future())
}
