#![forbid(unsafe_code)]

use std::path::PathBuf;

use undoable_runtime::{ConfigError, TransitionError};

use crate::command::CommandError;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to load options from {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("invalid options: {0}")]
    Options(#[from] ConfigError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

impl DemoError {
    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Config { .. } | Self::Options(_) => 2,
            Self::Transition(_) | Self::Command(_) => 3,
        }
    }

    /// Errors a session reports and survives.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Transition(_) | Self::Command(_))
    }
}

pub type Result<T> = std::result::Result<T, DemoError>;
