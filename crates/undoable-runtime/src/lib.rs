#![forbid(unsafe_code)]

//! Binding layer for undo/redo timelines.
//!
//! The engine in `undoable-core` is a pure function. This crate wraps it in
//! [`Undoable`], a handle that owns the authoritative timeline, turns
//! handle-wide [`UndoableOptions`] plus per-call [`OptionOverrides`] into
//! engine actions, resolves functional updates against the current present,
//! and tells subscribers when the timeline changed.
//!
//! ```
//! use undoable_runtime::{MutationBehavior, Undoable, UndoableOptions};
//!
//! let options = UndoableOptions::default().with_behavior(MutationBehavior::KeepFuture);
//! let mut doc = Undoable::with_options(String::from("draft"), options);
//!
//! doc.set("draft v2".into())?;
//! doc.undo();
//! assert_eq!(doc.present(), "draft");
//! assert!(doc.can_redo());
//! # Ok::<(), undoable_runtime::TransitionError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `config`: load [`UndoableOptions`] from TOML or JSON.

pub mod options;
pub mod subscription;
pub mod undoable;

pub use options::{ConfigError, OptionOverrides, ResetFallbackPolicy, UndoableOptions};
pub use subscription::Subscription;
pub use undoable::{DispatchStats, Undoable};

pub use undoable_core::{
    Action, ActionKind, HistoryLimit, MutationBehavior, Result, Timeline, TransitionError,
};
