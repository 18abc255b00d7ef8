#![forbid(unsafe_code)]

//! The pure transition function.
//!
//! [`transition`] takes the current timeline and an [`Action`] and returns
//! the next timeline. It never mutates its input and has no side effects
//! beyond `tracing` events on the `undoable.transition` target.
//!
//! # Identity
//!
//! When a transition is a no-op (undo with an empty past, redo with an empty
//! future, an update ignored as identical) the input `Arc` itself is
//! returned, so callers can skip work with [`Arc::ptr_eq`]. An identical
//! update with `clone_state` set returns an equal timeline in a fresh `Arc`
//! instead, for callers that only react to a changed reference.
//!
//! # Update precedence
//!
//! 1. `suppress_recording` overwrites the present and returns.
//! 2. The incoming past is trimmed to `history_limit`.
//! 3. `ignore_identical_mutations` with `payload == present` returns the input,
//!    or the trimmed timeline when step 2 dropped states.
//! 4. The behavior builds the new past and future.
//!
//! The past a behavior produces is bounded again, so `past.len() <= limit`
//! holds after the present is appended.

use std::iter;
use std::sync::Arc;

use crate::action::{Action, ResetFallback, UpdateOptions};
use crate::behavior::MutationBehavior;
use crate::bound::{HistoryLimit, bound_past};
use crate::error::{Result, TransitionError};
use crate::timeline::Timeline;

/// Compute the timeline that follows `timeline` under `action`.
///
/// # Errors
///
/// [`TransitionError::MissingPayload`] when an update, a strict reset, or a
/// rebase carries no payload.
pub fn transition<T>(timeline: &Arc<Timeline<T>>, action: Action<T>) -> Result<Arc<Timeline<T>>>
where
    T: Clone + PartialEq,
{
    let kind = action.kind();
    let next = match action {
        Action::Undo => undo(timeline),
        Action::Redo { history_limit } => redo(timeline, history_limit),
        Action::Update { payload, options } => {
            let payload = payload.ok_or(TransitionError::missing_payload(kind))?;
            update(timeline, payload, &options)
        }
        Action::Reset { payload, fallback } => {
            let present = match (payload, fallback) {
                (Some(payload), _) => payload,
                (None, ResetFallback::Initial(initial)) => initial,
                (None, ResetFallback::Strict) => {
                    return Err(TransitionError::missing_payload(kind));
                }
            };
            Arc::new(Timeline::new(present))
        }
        Action::RebaseInitial { payload } => {
            let payload = payload.ok_or(TransitionError::missing_payload(kind))?;
            rebase_initial(timeline, payload)
        }
    };

    tracing::debug!(
        target: "undoable.transition",
        kind = %kind,
        past = next.past.len(),
        future = next.future.len(),
        unchanged = Arc::ptr_eq(timeline, &next),
        "timeline transition"
    );

    Ok(next)
}

fn undo<T: Clone>(timeline: &Arc<Timeline<T>>) -> Arc<Timeline<T>> {
    let Some((previous, rest)) = timeline.past.split_last() else {
        return Arc::clone(timeline);
    };

    let future = iter::once(&timeline.present)
        .chain(&timeline.future)
        .cloned()
        .collect();

    Arc::new(Timeline {
        past: rest.to_vec(),
        present: previous.clone(),
        future,
    })
}

fn redo<T: Clone>(timeline: &Arc<Timeline<T>>, limit: HistoryLimit) -> Arc<Timeline<T>> {
    let Some((next, rest)) = timeline.future.split_first() else {
        return Arc::clone(timeline);
    };

    let past = timeline
        .past
        .iter()
        .chain(iter::once(&timeline.present))
        .cloned()
        .collect();

    Arc::new(Timeline {
        past: bounded(past, limit),
        present: next.clone(),
        future: rest.to_vec(),
    })
}

fn update<T>(timeline: &Arc<Timeline<T>>, payload: T, options: &UpdateOptions) -> Arc<Timeline<T>>
where
    T: Clone + PartialEq,
{
    let Timeline {
        past,
        present,
        future,
    } = &**timeline;

    if options.suppress_recording {
        return Arc::new(Timeline {
            past: past.clone(),
            present: payload,
            future: future.clone(),
        });
    }

    let kept = trim(past, options.history_limit);
    let trimmed = kept.len() < past.len();

    if options.ignore_identical_mutations && payload == *present {
        return if trimmed {
            Arc::new(Timeline {
                past: kept.to_vec(),
                present: present.clone(),
                future: future.clone(),
            })
        } else if options.clone_state {
            Arc::new(Timeline::clone(timeline))
        } else {
            Arc::clone(timeline)
        };
    }

    let recorded = kept.iter().chain(iter::once(present));
    let (past, future) = match options.effective_behavior() {
        MutationBehavior::MergePastReversed => (
            kept.iter()
                .chain(future.iter().rev())
                .chain(iter::once(present))
                .cloned()
                .collect(),
            Vec::new(),
        ),
        MutationBehavior::MergePast => (recorded.chain(future).cloned().collect(), Vec::new()),
        MutationBehavior::DestroyFuture => (recorded.cloned().collect(), Vec::new()),
        MutationBehavior::KeepFuture => (recorded.cloned().collect(), future.clone()),
    };

    Arc::new(Timeline {
        past: bounded(past, options.history_limit),
        present: payload,
        future,
    })
}

fn rebase_initial<T: Clone>(timeline: &Arc<Timeline<T>>, payload: T) -> Arc<Timeline<T>> {
    let mut past = timeline.past.clone();
    match past.first_mut() {
        Some(oldest) => *oldest = payload,
        None => past.push(payload),
    }

    Arc::new(Timeline {
        past,
        present: timeline.present.clone(),
        future: timeline.future.clone(),
    })
}

/// [`bound_past`] on the past an update starts from.
fn trim<T>(past: &[T], limit: HistoryLimit) -> &[T] {
    let kept = bound_past(past, limit);
    trace_dropped(past.len() - kept.len(), limit);
    kept
}

/// Apply [`bound_past`] to a freshly built past, reusing its allocation.
fn bounded<T>(mut past: Vec<T>, limit: HistoryLimit) -> Vec<T> {
    let dropped = past.len() - bound_past(&past, limit).len();
    trace_dropped(dropped, limit);
    past.drain(..dropped);
    past
}

fn trace_dropped(dropped: usize, limit: HistoryLimit) {
    if dropped > 0 {
        tracing::trace!(
            target: "undoable.transition",
            dropped,
            limit = %limit,
            "history limit reached, dropping oldest states"
        );
    }
}
