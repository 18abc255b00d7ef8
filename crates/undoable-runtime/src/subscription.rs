#![forbid(unsafe_code)]

//! Change notification for timeline handles.
//!
//! Subscribers are stored as weak references; the strong `Rc` lives in the
//! [`Subscription`] guard handed back to the caller. Dropping the guard stops
//! delivery. Dead entries are pruned lazily on the next notification.

use std::any::Any;
use std::rc::{Rc, Weak};

use undoable_core::Timeline;

type CallbackRc<T> = Rc<dyn Fn(&Timeline<T>)>;
type CallbackWeak<T> = Weak<dyn Fn(&Timeline<T>)>;

/// RAII guard for a registered callback.
///
/// The callback runs until this guard is dropped.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    _guard: Box<dyn Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// Registered callbacks, in registration order.
pub(crate) struct Subscribers<T> {
    callbacks: Vec<CallbackWeak<T>>,
}

impl<T: 'static> Subscribers<T> {
    pub(crate) fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    pub(crate) fn subscribe(&mut self, callback: impl Fn(&Timeline<T>) + 'static) -> Subscription {
        self.prune();
        let strong: CallbackRc<T> = Rc::new(callback);
        self.callbacks.push(Rc::downgrade(&strong));
        // `Rc<dyn Fn>` cannot coerce to `dyn Any` directly; box the Rc instead.
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Registered callbacks, including dead ones not yet pruned.
    pub(crate) fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Call every live callback with `timeline` and prune dead ones.
    ///
    /// Returns the number of callbacks invoked.
    pub(crate) fn notify(&mut self, timeline: &Timeline<T>) -> usize {
        self.prune();
        let live: Vec<CallbackRc<T>> = self.callbacks.iter().filter_map(Weak::upgrade).collect();
        let invoked = live.len();
        for callback in live {
            callback(timeline);
        }
        invoked
    }

    fn prune(&mut self) {
        self.callbacks.retain(|w| w.strong_count() > 0);
    }
}
