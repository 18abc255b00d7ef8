#![forbid(unsafe_code)]

//! Failures surfaced by the transition engine.
//!
//! All of them are local and synchronous: the engine performs no recovery and
//! returns the error to its direct caller. Undoing with an empty past or
//! redoing with an empty future is not an error.

use crate::action::ActionKind;

/// Error returned by [`transition`](crate::transition) and by behavior parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TransitionError {
    /// An update, strict reset, or rebase was dispatched without a payload.
    #[error("{operation} requires a payload")]
    MissingPayload { operation: ActionKind },
    /// A mutation behavior name outside the four known variants.
    #[error(
        "mutation behavior must be one of: mergePastReversed, mergePast, keepFuture, or destroyFuture. Not: {0}"
    )]
    InvalidBehavior(String),
}

impl TransitionError {
    pub(crate) fn missing_payload(operation: ActionKind) -> Self {
        Self::MissingPayload { operation }
    }
}

/// Standard result type for engine operations.
pub type Result<T> = std::result::Result<T, TransitionError>;
