#![forbid(unsafe_code)]

//! The single-owner undo/redo handle.
//!
//! [`Undoable`] owns the authoritative timeline and is the only thing that
//! replaces it. Every mutation goes through [`Undoable::dispatch`], which runs
//! the pure engine and stores the result.
//!
//! # Functional updates
//!
//! [`Undoable::update`] takes a closure over the present. The closure is
//! resolved against the present the handle holds at dispatch time, never
//! against a value captured earlier, so back-to-back updates compose:
//!
//! ```
//! use undoable_runtime::Undoable;
//!
//! let mut count = Undoable::new(0);
//! count.update(|c| c + 1)?;
//! count.update(|c| c + 1)?;
//! assert_eq!(*count.present(), 2);
//! assert_eq!(count.past(), &[0, 1]);
//! # Ok::<(), undoable_runtime::TransitionError>(())
//! ```
//!
//! # Change detection
//!
//! A dispatch that returns the same timeline (undo at the start, an ignored
//! identical update) changes nothing: the version stays put and subscribers
//! are not called. With `clone_state` set, ignored updates hand back an equal
//! copy and therefore do count as a change.

use std::fmt;
use std::sync::Arc;

use undoable_core::{Action, MutationBehavior, Result, Timeline, transition};

use crate::options::{OptionOverrides, UndoableOptions};
use crate::subscription::{Subscribers, Subscription};

/// Per-handle dispatch counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Actions dispatched.
    pub dispatched: u64,
    /// Dispatches that replaced the timeline.
    pub changed: u64,
    /// Dispatches that returned the same timeline.
    pub unchanged: u64,
    /// Dispatches that failed.
    pub failed: u64,
}

/// Undo/redo state plus the options it is driven with.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 each time the timeline is replaced.
/// 2. Subscribers run only when the timeline is replaced, in registration order.
/// 3. `stats.dispatched == stats.changed + stats.unchanged + stats.failed`.
pub struct Undoable<T> {
    timeline: Arc<Timeline<T>>,
    initial: T,
    options: UndoableOptions,
    version: u64,
    stats: DispatchStats,
    subscribers: Subscribers<T>,
}

impl<T: fmt::Debug> fmt::Debug for Undoable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Undoable")
            .field("present", &self.timeline.present())
            .field("past_depth", &self.timeline.past().len())
            .field("future_depth", &self.timeline.future().len())
            .field("version", &self.version)
            .field("options", &self.options)
            .finish()
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for Undoable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> Undoable<T> {
    /// Create a handle with default options.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_options(initial, UndoableOptions::default())
    }

    #[must_use]
    pub fn with_options(initial: T, options: UndoableOptions) -> Self {
        Self {
            timeline: Arc::new(Timeline::new(initial.clone())),
            initial,
            options,
            version: 0,
            stats: DispatchStats::default(),
            subscribers: Subscribers::new(),
        }
    }

    // ====================================================================
    // Query
    // ====================================================================

    #[must_use]
    pub fn present(&self) -> &T {
        self.timeline.present()
    }

    #[must_use]
    pub fn past(&self) -> &[T] {
        self.timeline.past()
    }

    #[must_use]
    pub fn future(&self) -> &[T] {
        self.timeline.future()
    }

    /// The current timeline. Clone the `Arc` to keep a snapshot.
    #[must_use]
    pub fn timeline(&self) -> &Arc<Timeline<T>> {
        &self.timeline
    }

    /// The present this handle was created with.
    #[must_use]
    pub fn initial(&self) -> &T {
        &self.initial
    }

    #[must_use]
    pub fn options(&self) -> &UndoableOptions {
        &self.options
    }

    /// Replace the handle-wide options. History is kept; a lower limit
    /// takes effect on the next update or redo.
    pub fn set_options(&mut self, options: UndoableOptions) {
        self.options = options;
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.timeline.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.timeline.can_redo()
    }

    /// Number of times the timeline has been replaced.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    // ====================================================================
    // Updates
    // ====================================================================

    /// Record `payload` as the new present using the handle's options.
    pub fn set(&mut self, payload: T) -> Result<()> {
        self.set_with_overrides(payload, &OptionOverrides::default())
    }

    /// Record `payload` with an optional behavior. `ignore_action` overwrites
    /// the present without touching history.
    pub fn set_with(
        &mut self,
        payload: T,
        behavior: Option<MutationBehavior>,
        ignore_action: bool,
    ) -> Result<()> {
        let overrides = OptionOverrides {
            behavior,
            suppress_recording: ignore_action,
            ..OptionOverrides::default()
        };
        self.set_with_overrides(payload, &overrides)
    }

    /// Record `payload` with a behavior given by name.
    ///
    /// # Errors
    ///
    /// `InvalidBehavior` if `behavior` is not a known behavior name; nothing
    /// is dispatched in that case.
    pub fn set_with_behavior_name(&mut self, payload: T, behavior: &str) -> Result<()> {
        let behavior = behavior.parse::<MutationBehavior>()?;
        self.set_with(payload, Some(behavior), false)
    }

    pub fn set_with_overrides(&mut self, payload: T, overrides: &OptionOverrides) -> Result<()> {
        let options = self.options.update_options(overrides);
        self.dispatch(Action::update_with(payload, options))
            .map(|_| ())
    }

    /// Record the value `f` computes from the current present.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) -> Result<()> {
        let payload = f(self.timeline.present());
        self.set(payload)
    }

    pub fn update_with(
        &mut self,
        f: impl FnOnce(&T) -> T,
        behavior: Option<MutationBehavior>,
        ignore_action: bool,
    ) -> Result<()> {
        let payload = f(self.timeline.present());
        self.set_with(payload, behavior, ignore_action)
    }

    // ====================================================================
    // Navigation
    // ====================================================================

    /// Step back. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        matches!(self.dispatch(Action::undo()), Ok(true))
    }

    /// Step forward. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        let action = Action::redo_bounded(self.options.history_limit);
        matches!(self.dispatch(action), Ok(true))
    }

    /// Discard all history, returning to the initial present.
    ///
    /// # Errors
    ///
    /// `MissingPayload` when the reset policy is
    /// [`Strict`](crate::ResetFallbackPolicy::Strict).
    pub fn reset(&mut self) -> Result<()> {
        let fallback = self.options.reset_fallback_for(&self.initial);
        self.dispatch(Action::reset_with_fallback(None, fallback))
            .map(|_| ())
    }

    /// Discard all history and start over from `payload`.
    pub fn reset_to(&mut self, payload: T) -> Result<()> {
        self.dispatch(Action::reset(payload)).map(|_| ())
    }

    /// Replace the oldest recorded state with `payload`.
    pub fn reset_initial_state(&mut self, payload: T) -> Result<()> {
        self.dispatch(Action::rebase_initial(payload)).map(|_| ())
    }

    // ====================================================================
    // Dispatch
    // ====================================================================

    /// Run `action` against the current timeline and store the result.
    ///
    /// Returns `Ok(true)` when the timeline was replaced and `Ok(false)` when
    /// the engine handed back the same timeline.
    pub fn dispatch(&mut self, action: Action<T>) -> Result<bool> {
        let kind = action.kind();
        let _span = tracing::debug_span!(
            "undoable.dispatch",
            kind = %kind,
            version = self.version,
        )
        .entered();
        self.stats.dispatched += 1;

        let next = match transition(&self.timeline, action) {
            Ok(next) => next,
            Err(err) => {
                self.stats.failed += 1;
                tracing::warn!(
                    target: "undoable.dispatch",
                    kind = %kind,
                    error = %err,
                    "dispatch failed"
                );
                return Err(err);
            }
        };

        if Arc::ptr_eq(&self.timeline, &next) {
            self.stats.unchanged += 1;
            return Ok(false);
        }

        self.timeline = next;
        self.version += 1;
        self.stats.changed += 1;

        let notified = self.subscribers.notify(&self.timeline);
        tracing::debug!(
            target: "undoable.dispatch",
            kind = %kind,
            version = self.version,
            notified,
            "timeline replaced"
        );
        Ok(true)
    }

    // ====================================================================
    // Subscriptions
    // ====================================================================

    /// Call `callback` with the new timeline after every change.
    ///
    /// Dropping the returned [`Subscription`] unsubscribes.
    pub fn subscribe(&mut self, callback: impl Fn(&Timeline<T>) + 'static) -> Subscription {
        self.subscribers.subscribe(callback)
    }

    /// Registered subscribers, including dropped ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
