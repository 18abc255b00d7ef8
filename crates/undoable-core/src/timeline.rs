#![forbid(unsafe_code)]

//! The past/present/future triple.
//!
//! ```text
//!   past (oldest first)        present        future (nearest first)
//! ┌────┬────┬────┐           ┌────┐          ┌────┬────┐
//! │ s0 │ s1 │ s2 │    undo   │ s3 │   redo   │ s4 │ s5 │
//! └────┴────┴────┘  ◄─────── └────┘ ───────► └────┴────┘
//! ```
//!
//! Timelines are values: a transition builds a new one and leaves the old one
//! intact, so a timeline handed out earlier (e.g. to the last render) stays
//! valid. They are shared as `Arc<Timeline<T>>`, which makes "the same
//! timeline" and "an equal copy" distinguishable with [`Arc::ptr_eq`].
//!
//! [`Arc::ptr_eq`]: std::sync::Arc::ptr_eq

use std::sync::Arc;

use crate::action::Action;
use crate::error::Result;

/// Undo/redo state: everything before, at, and after the present.
///
/// # Invariants
///
/// 1. `past` is in chronological order, oldest first.
/// 2. `future[0]` (if any) is the state immediately after `present`.
/// 3. `past ++ [present] ++ future` is one linear history the user visited,
///    except right after an update whose behavior discards or reorders the
///    future.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Timeline<T> {
    pub(crate) past: Vec<T>,
    pub(crate) present: T,
    pub(crate) future: Vec<T>,
}

impl<T> Timeline<T> {
    /// Fresh timeline with an empty past and future.
    #[must_use]
    pub fn new(present: T) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: Vec::new(),
        }
    }

    /// Build a timeline from explicit parts.
    ///
    /// `past` is oldest first, `future` is nearest first.
    #[must_use]
    pub fn from_parts(past: Vec<T>, present: T, future: Vec<T>) -> Self {
        Self {
            past,
            present,
            future,
        }
    }

    /// States before the present, oldest first.
    #[must_use]
    pub fn past(&self) -> &[T] {
        &self.past
    }

    /// The current value.
    #[must_use]
    pub fn present(&self) -> &T {
        &self.present
    }

    /// Undone states available for redo, nearest first.
    #[must_use]
    pub fn future(&self) -> &[T] {
        &self.future
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Total number of states held, present included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.past.len() + 1 + self.future.len()
    }

    /// Always false: a timeline holds at least its present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Split into `(past, present, future)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, T, Vec<T>) {
        (self.past, self.present, self.future)
    }
}

impl<T: Clone + PartialEq> Timeline<T> {
    /// Method form of [`transition`](crate::transition).
    pub fn apply(self: &Arc<Self>, action: Action<T>) -> Result<Arc<Self>> {
        crate::engine::transition(self, action)
    }
}

impl<T: Default> Default for Timeline<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
