#![forbid(unsafe_code)]

//! Timeline data model and the pure undo/redo transition engine.
//!
//! A [`Timeline`] holds the states before the present (`past`, oldest first),
//! the present itself, and the states that were undone and can be redone
//! (`future`, nearest first). Every change goes through [`transition`], which
//! takes the current timeline and an [`Action`] and returns the next timeline
//! without touching its input.
//!
//! ```
//! use std::sync::Arc;
//! use undoable_core::{Action, Timeline, transition};
//!
//! let t0 = Arc::new(Timeline::new(0));
//! let t1 = transition(&t0, Action::update(1))?;
//! let t2 = transition(&t1, Action::undo())?;
//!
//! assert_eq!(*t2.present(), 0);
//! assert_eq!(t2.future(), &[1]);
//! # Ok::<(), undoable_core::TransitionError>(())
//! ```
//!
//! # Module Structure
//!
//! - [`timeline`]: the past/present/future triple
//! - [`action`]: the closed set of transitions and their per-call options
//! - [`behavior`]: how an update reconciles with a redoable future
//! - [`bound`]: history limits and the `past` trimming rule
//! - [`engine`]: the transition function itself
//! - [`error`]: failures surfaced to the direct caller

pub mod action;
pub mod behavior;
pub mod bound;
pub mod engine;
pub mod error;
pub mod timeline;

pub use action::{Action, ActionKind, ResetFallback, UpdateOptions};
pub use behavior::MutationBehavior;
pub use bound::{DEFAULT_HISTORY_LIMIT, HistoryLimit, ParseHistoryLimitError, bound_past};
pub use engine::transition;
pub use error::{Result, TransitionError};
pub use timeline::Timeline;
