#![forbid(unsafe_code)]

//! Undoable public facade crate.
//!
//! Re-exports the timeline model and transition engine from `undoable-core`
//! and, with the default `runtime` feature, the [`Undoable`] handle from
//! `undoable-runtime`. Most callers only need the prelude:
//!
//! ```
//! use undoable::prelude::*;
//!
//! let mut text = Undoable::new(String::new());
//! text.set("hello".into())?;
//! text.set("hello world".into())?;
//! text.undo();
//! assert_eq!(text.present(), "hello");
//! # Ok::<(), TransitionError>(())
//! ```
//!
//! Callers managing their own state can drive the engine directly:
//!
//! ```
//! use std::sync::Arc;
//! use undoable::{Action, Timeline, transition};
//!
//! let t0 = Arc::new(Timeline::new(1));
//! let t1 = transition(&t0, Action::update(2))?;
//! let t2 = transition(&t1, Action::undo())?;
//! assert_eq!(*t2, *t0);
//! # Ok::<(), undoable::TransitionError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `runtime` (default): the [`Undoable`] handle.
//! - `config`: load handle options from TOML or JSON.
//! - `serde`: serde derives for `MutationBehavior` and `HistoryLimit`.

// --- Core re-exports -------------------------------------------------------

pub use undoable_core::{
    Action, ActionKind, DEFAULT_HISTORY_LIMIT, HistoryLimit, MutationBehavior,
    ParseHistoryLimitError, ResetFallback, Result, Timeline, TransitionError, UpdateOptions,
    bound_past, transition,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use undoable_runtime::{
    ConfigError, DispatchStats, OptionOverrides, ResetFallbackPolicy, Subscription, Undoable,
    UndoableOptions,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{Action, HistoryLimit, MutationBehavior, Timeline, TransitionError};

    #[cfg(feature = "runtime")]
    pub use crate::{OptionOverrides, ResetFallbackPolicy, Undoable, UndoableOptions};

    pub use crate::core;
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use undoable_core as core;
#[cfg(feature = "runtime")]
pub use undoable_runtime as runtime;
