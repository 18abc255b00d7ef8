#![forbid(unsafe_code)]

//! The closed set of timeline transitions.
//!
//! [`Action`] is a sum type over the five kinds, so every kind is handled by
//! an exhaustive match in the engine and no unknown tag can reach it. Payloads
//! are `Option<T>`: only a truly absent payload counts as missing, so `0` or
//! an empty string are ordinary values.

use std::fmt;

use crate::behavior::MutationBehavior;
use crate::bound::HistoryLimit;

/// Kind of an [`Action`], used in errors and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Undo,
    Redo,
    Update,
    Reset,
    RebaseInitial,
}

impl ActionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Update => "update",
            Self::Reset => "reset",
            Self::RebaseInitial => "rebase_initial",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call knobs for an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOptions {
    /// How the redoable future is reconciled. `None` means
    /// [`MutationBehavior::MergePastReversed`].
    pub behavior: Option<MutationBehavior>,
    /// Bound applied to the past this update produces.
    pub history_limit: HistoryLimit,
    /// Treat a payload equal to the present as a no-op.
    pub ignore_identical_mutations: bool,
    /// When an update is ignored as identical, return an equal copy rather
    /// than the same timeline.
    pub clone_state: bool,
    /// Overwrite the present without recording anything in past or future.
    pub suppress_recording: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            behavior: None,
            history_limit: HistoryLimit::default(),
            ignore_identical_mutations: true,
            clone_state: false,
            suppress_recording: false,
        }
    }
}

impl UpdateOptions {
    #[must_use]
    pub fn with_behavior(mut self, behavior: MutationBehavior) -> Self {
        self.behavior = Some(behavior);
        self
    }

    #[must_use]
    pub fn with_history_limit(mut self, limit: HistoryLimit) -> Self {
        self.history_limit = limit;
        self
    }

    #[must_use]
    pub fn with_ignore_identical_mutations(mut self, ignore: bool) -> Self {
        self.ignore_identical_mutations = ignore;
        self
    }

    #[must_use]
    pub fn with_clone_state(mut self, clone_state: bool) -> Self {
        self.clone_state = clone_state;
        self
    }

    #[must_use]
    pub fn with_suppress_recording(mut self, suppress: bool) -> Self {
        self.suppress_recording = suppress;
        self
    }

    /// The behavior that will actually run.
    #[must_use]
    pub fn effective_behavior(&self) -> MutationBehavior {
        self.behavior.unwrap_or_default()
    }
}

/// What a reset does when no payload is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetFallback<T> {
    /// Missing payload is an error.
    Strict,
    /// Missing payload resets to this value.
    Initial(T),
}

impl<T> Default for ResetFallback<T> {
    fn default() -> Self {
        Self::Strict
    }
}

/// A requested timeline transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<T> {
    /// Step back one state.
    Undo,
    /// Step forward one state. The past it grows is still bounded.
    Redo { history_limit: HistoryLimit },
    /// Record a new present.
    Update {
        payload: Option<T>,
        options: UpdateOptions,
    },
    /// Discard all history and start over from a new present.
    Reset {
        payload: Option<T>,
        fallback: ResetFallback<T>,
    },
    /// Replace the oldest recorded state, keeping everything else.
    RebaseInitial { payload: Option<T> },
}

impl<T> Action<T> {
    #[must_use]
    pub fn undo() -> Self {
        Self::Undo
    }

    /// Redo bounded by [`DEFAULT_HISTORY_LIMIT`](crate::DEFAULT_HISTORY_LIMIT).
    ///
    /// The past is trimmed to 100 states even if updates ran unbounded; use
    /// [`redo_bounded`](Self::redo_bounded) with the limit the updates use.
    #[must_use]
    pub fn redo() -> Self {
        Self::Redo {
            history_limit: HistoryLimit::default(),
        }
    }

    #[must_use]
    pub fn redo_bounded(history_limit: HistoryLimit) -> Self {
        Self::Redo { history_limit }
    }

    /// Update with default options.
    #[must_use]
    pub fn update(payload: T) -> Self {
        Self::update_with(payload, UpdateOptions::default())
    }

    #[must_use]
    pub fn update_with(payload: T, options: UpdateOptions) -> Self {
        Self::Update {
            payload: Some(payload),
            options,
        }
    }

    /// Strict reset to `payload`.
    #[must_use]
    pub fn reset(payload: T) -> Self {
        Self::Reset {
            payload: Some(payload),
            fallback: ResetFallback::Strict,
        }
    }

    #[must_use]
    pub fn reset_with_fallback(payload: Option<T>, fallback: ResetFallback<T>) -> Self {
        Self::Reset { payload, fallback }
    }

    #[must_use]
    pub fn rebase_initial(payload: T) -> Self {
        Self::RebaseInitial {
            payload: Some(payload),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Undo => ActionKind::Undo,
            Self::Redo { .. } => ActionKind::Redo,
            Self::Update { .. } => ActionKind::Update,
            Self::Reset { .. } => ActionKind::Reset,
            Self::RebaseInitial { .. } => ActionKind::RebaseInitial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_option_defaults() {
        let options = UpdateOptions::default();
        assert_eq!(options.behavior, None);
        assert_eq!(options.effective_behavior(), MutationBehavior::MergePastReversed);
        assert_eq!(options.history_limit, HistoryLimit::Bounded(100));
        assert!(options.ignore_identical_mutations);
        assert!(!options.clone_state);
        assert!(!options.suppress_recording);
    }

    #[test]
    fn builders_set_fields() {
        let options = UpdateOptions::default()
            .with_behavior(MutationBehavior::KeepFuture)
            .with_history_limit(HistoryLimit::Bounded(5))
            .with_ignore_identical_mutations(false)
            .with_clone_state(true)
            .with_suppress_recording(true);
        assert_eq!(options.effective_behavior(), MutationBehavior::KeepFuture);
        assert_eq!(options.history_limit, HistoryLimit::Bounded(5));
        assert!(!options.ignore_identical_mutations);
        assert!(options.clone_state);
        assert!(options.suppress_recording);
    }

    #[test]
    fn kinds() {
        assert_eq!(Action::<i32>::undo().kind(), ActionKind::Undo);
        assert_eq!(Action::<i32>::redo().kind(), ActionKind::Redo);
        assert_eq!(Action::update(1).kind(), ActionKind::Update);
        assert_eq!(Action::reset(1).kind(), ActionKind::Reset);
        assert_eq!(Action::rebase_initial(1).kind(), ActionKind::RebaseInitial);
    }

    #[test]
    fn plain_redo_uses_default_limit() {
        assert!(matches!(
            Action::<i32>::redo(),
            Action::Redo {
                history_limit: HistoryLimit::Bounded(100)
            }
        ));
        assert!(matches!(
            Action::<i32>::redo_bounded(HistoryLimit::Unbounded),
            Action::Redo {
                history_limit: HistoryLimit::Unbounded
            }
        ));
    }

    #[test]
    fn kind_names() {
        assert_eq!(ActionKind::Update.to_string(), "update");
        assert_eq!(ActionKind::RebaseInitial.to_string(), "rebase_initial");
    }
}
