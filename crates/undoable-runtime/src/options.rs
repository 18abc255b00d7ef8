#![forbid(unsafe_code)]

//! Configuration surface for an [`Undoable`](crate::Undoable) handle.
//!
//! [`UndoableOptions`] is built once by the caller and owned by the handle;
//! there are no process-wide defaults. Each dispatch merges it with
//! [`OptionOverrides`], per-call values taking precedence.
//!
//! # Loading
//!
//! With the `config` feature, options load from TOML or JSON:
//!
//! ```toml
//! # undoable.toml
//! behavior = "keepFuture"
//! history_limit = 50          # or "unbounded"
//! ignore_identical_mutations = true
//! clone_state = false
//! reset_fallback = "strict"   # or "fallbackToInitial"
//! ```
//!
//! ```rust,ignore
//! let options = UndoableOptions::from_toml_file("undoable.toml")?;
//! let options = UndoableOptions::from_json_str(json)?;
//! ```
//!
//! Missing keys take their defaults. Loaded options are validated.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use undoable_core::{HistoryLimit, MutationBehavior, ResetFallback, UpdateOptions};

/// What `reset()` without a value does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "camelCase"))]
pub enum ResetFallbackPolicy {
    /// Resetting without a value is a `MissingPayload` error.
    Strict,
    /// Resetting without a value returns to the handle's initial present.
    #[default]
    FallbackToInitial,
}

/// Handle-wide defaults applied to every dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct UndoableOptions {
    /// Behavior used when a call does not name one.
    pub behavior: MutationBehavior,
    /// Bound on the number of past states.
    pub history_limit: HistoryLimit,
    /// Skip updates equal to the present.
    pub ignore_identical_mutations: bool,
    /// Return an equal copy instead of the same timeline for skipped updates.
    pub clone_state: bool,
    /// Policy for `reset()` without a value.
    pub reset_fallback: ResetFallbackPolicy,
}

impl Default for UndoableOptions {
    fn default() -> Self {
        Self {
            behavior: MutationBehavior::MergePastReversed,
            history_limit: HistoryLimit::default(),
            ignore_identical_mutations: true,
            clone_state: false,
            reset_fallback: ResetFallbackPolicy::default(),
        }
    }
}

/// Per-call overrides. `None` defers to the handle's [`UndoableOptions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionOverrides {
    pub behavior: Option<MutationBehavior>,
    pub history_limit: Option<HistoryLimit>,
    pub ignore_identical_mutations: Option<bool>,
    pub clone_state: Option<bool>,
    /// Overwrite the present without recording history.
    pub suppress_recording: bool,
}

impl OptionOverrides {
    #[must_use]
    pub fn behavior(behavior: MutationBehavior) -> Self {
        Self {
            behavior: Some(behavior),
            ..Self::default()
        }
    }

    /// A silent update: present changes, history does not.
    #[must_use]
    pub fn suppressed() -> Self {
        Self {
            suppress_recording: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_history_limit(mut self, limit: HistoryLimit) -> Self {
        self.history_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_ignore_identical_mutations(mut self, ignore: bool) -> Self {
        self.ignore_identical_mutations = Some(ignore);
        self
    }

    #[must_use]
    pub fn with_clone_state(mut self, clone_state: bool) -> Self {
        self.clone_state = Some(clone_state);
        self
    }
}

impl UndoableOptions {
    #[must_use]
    pub fn with_behavior(mut self, behavior: MutationBehavior) -> Self {
        self.behavior = behavior;
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
    pub fn with_reset_fallback(mut self, policy: ResetFallbackPolicy) -> Self {
        self.reset_fallback = policy;
        self
    }

    /// These options with `overrides` applied on top.
    #[must_use]
    pub fn merge(&self, overrides: &OptionOverrides) -> Self {
        Self {
            behavior: overrides.behavior.unwrap_or(self.behavior),
            history_limit: overrides.history_limit.unwrap_or(self.history_limit),
            ignore_identical_mutations: overrides
                .ignore_identical_mutations
                .unwrap_or(self.ignore_identical_mutations),
            clone_state: overrides.clone_state.unwrap_or(self.clone_state),
            reset_fallback: self.reset_fallback,
        }
    }

    /// Engine options for one update, after merging `overrides`.
    #[must_use]
    pub fn update_options(&self, overrides: &OptionOverrides) -> UpdateOptions {
        let merged = self.merge(overrides);
        UpdateOptions {
            behavior: Some(merged.behavior),
            history_limit: merged.history_limit,
            ignore_identical_mutations: merged.ignore_identical_mutations,
            clone_state: merged.clone_state,
            suppress_recording: overrides.suppress_recording,
        }
    }

    /// Engine fallback for a reset without a value.
    #[must_use]
    pub fn reset_fallback_for<T: Clone>(&self, initial: &T) -> ResetFallback<T> {
        match self.reset_fallback {
            ResetFallbackPolicy::Strict => ResetFallback::Strict,
            ResetFallbackPolicy::FallbackToInitial => ResetFallback::Initial(initial.clone()),
        }
    }

    /// Validate the options.
    ///
    /// Returns a list of validation errors. An empty list means the options
    /// are valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.history_limit == HistoryLimit::Bounded(0) {
            errors.push("history_limit must be > 0 or \"unbounded\"".into());
        }

        errors
    }

    /// `self` if valid, otherwise [`ConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(s)?;
        options.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(s)?;
        options.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when loading options.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation errors.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = UndoableOptions::default();
        assert_eq!(options.behavior, MutationBehavior::MergePastReversed);
        assert_eq!(options.history_limit, HistoryLimit::Bounded(100));
        assert!(options.ignore_identical_mutations);
        assert!(!options.clone_state);
        assert_eq!(options.reset_fallback, ResetFallbackPolicy::FallbackToInitial);
        assert!(options.validate().is_empty());
    }

    #[test]
    fn overrides_take_precedence() {
        let options = UndoableOptions::default()
            .with_behavior(MutationBehavior::KeepFuture)
            .with_history_limit(HistoryLimit::Bounded(10));
        let overrides = OptionOverrides::behavior(MutationBehavior::DestroyFuture)
            .with_clone_state(true);

        let merged = options.merge(&overrides);
        assert_eq!(merged.behavior, MutationBehavior::DestroyFuture);
        assert_eq!(merged.history_limit, HistoryLimit::Bounded(10));
        assert!(merged.ignore_identical_mutations);
        assert!(merged.clone_state);
    }

    #[test]
    fn empty_overrides_change_nothing() {
        let options = UndoableOptions::default().with_clone_state(true);
        assert_eq!(options.merge(&OptionOverrides::default()), options);
    }

    #[test]
    fn update_options_carry_suppression() {
        let options = UndoableOptions::default();
        let update = options.update_options(&OptionOverrides::suppressed());
        assert!(update.suppress_recording);
        assert_eq!(update.behavior, Some(MutationBehavior::MergePastReversed));

        let update = options.update_options(&OptionOverrides::default());
        assert!(!update.suppress_recording);
    }

    #[test]
    fn reset_fallback_follows_policy() {
        let options = UndoableOptions::default();
        assert_eq!(options.reset_fallback_for(&7), ResetFallback::Initial(7));

        let strict = options.with_reset_fallback(ResetFallbackPolicy::Strict);
        assert_eq!(strict.reset_fallback_for(&7), ResetFallback::Strict);
    }

    #[test]
    fn zero_limit_fails_validation() {
        let options = UndoableOptions::default().with_history_limit(HistoryLimit::Bounded(0));
        let errors = options.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("history_limit"));
        assert!(matches!(
            options.validated(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validation_error_display_joins_messages() {
        let err = ConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "validation errors: a; b");
    }
}
