#![forbid(unsafe_code)]

//! Property tests for [`transition`] invariants.
//!
//! Validates:
//! - Undo and redo are inverses whenever they apply.
//! - Undo/redo at a boundary return the input timeline itself.
//! - History limits are never exceeded after any update or redo, even when
//!   the limit is lowered below the current past.
//! - Identical updates leave the timeline content untouched.
//! - Without trimming, no visited state is lost by the merge behaviors.

use std::sync::Arc;

use proptest::prelude::*;

use undoable_core::{
    Action, HistoryLimit, MutationBehavior, Timeline, UpdateOptions, transition,
};

// ============================================================================
// Strategy helpers
// ============================================================================

/// Operations driven against a timeline.
#[derive(Debug, Clone)]
enum Op {
    Update(i64, MutationBehavior),
    Undo,
    Redo,
}

fn behavior_strategy() -> impl Strategy<Value = MutationBehavior> {
    prop::sample::select(MutationBehavior::ALL.to_vec())
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<i64>(), behavior_strategy()).prop_map(|(v, b)| Op::Update(v, b)),
        2 => Just(Op::Undo),
        2 => Just(Op::Redo),
    ]
}

fn ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 1..=max_len)
}

fn timeline_strategy() -> impl Strategy<Value = Timeline<i32>> {
    (
        prop::collection::vec(any::<i32>(), 0..20),
        any::<i32>(),
        prop::collection::vec(any::<i32>(), 0..20),
    )
        .prop_map(|(past, present, future)| Timeline::from_parts(past, present, future))
}

fn apply(
    timeline: &Arc<Timeline<i64>>,
    op: &Op,
    limit: HistoryLimit,
) -> Arc<Timeline<i64>> {
    let action = match op {
        Op::Update(v, behavior) => Action::update_with(
            *v,
            UpdateOptions::default()
                .with_behavior(*behavior)
                .with_history_limit(limit),
        ),
        Op::Undo => Action::undo(),
        Op::Redo => Action::redo_bounded(limit),
    };
    transition(timeline, action).expect("payload is always present")
}

// ============================================================================
// Invariant 1: Redo(Undo(t)) == t and Undo(Redo(t)) == t
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn redo_inverts_undo(t in timeline_strategy()) {
        prop_assume!(t.can_undo());
        let t = Arc::new(t);
        let back = transition(&t, Action::undo()).unwrap();
        let forth = transition(&back, Action::redo_bounded(HistoryLimit::Unbounded)).unwrap();
        prop_assert_eq!(&*forth, &*t);
    }

    #[test]
    fn undo_inverts_redo(t in timeline_strategy()) {
        prop_assume!(t.can_redo());
        let t = Arc::new(t);
        let forth = transition(&t, Action::redo_bounded(HistoryLimit::Unbounded)).unwrap();
        let back = transition(&forth, Action::undo()).unwrap();
        prop_assert_eq!(&*back, &*t);
    }
}

// ============================================================================
// Invariant 2: boundary undo/redo are identity
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn undo_at_start_is_identity(
        present in any::<i32>(),
        future in prop::collection::vec(any::<i32>(), 0..10)
    ) {
        let t = Arc::new(Timeline::from_parts(Vec::new(), present, future));
        let next = transition(&t, Action::undo()).unwrap();
        prop_assert!(Arc::ptr_eq(&t, &next));
    }

    #[test]
    fn redo_at_end_is_identity(
        past in prop::collection::vec(any::<i32>(), 0..10),
        present in any::<i32>()
    ) {
        let t = Arc::new(Timeline::from_parts(past, present, Vec::new()));
        let next = transition(&t, Action::redo()).unwrap();
        prop_assert!(Arc::ptr_eq(&t, &next));
    }
}

// ============================================================================
// Invariant 3: history limit is never exceeded
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn history_limit_always_enforced(
        limit in 1usize..20,
        ops in ops_strategy(100)
    ) {
        let limit = HistoryLimit::Bounded(limit);
        let mut t = Arc::new(Timeline::new(0i64));

        for op in &ops {
            t = apply(&t, op, limit);
            prop_assert!(
                t.past().len() <= limit.get().unwrap(),
                "past length {} exceeds limit {} after {:?}",
                t.past().len(), limit, op
            );
        }
    }

    #[test]
    fn future_never_outgrows_undos(ops in ops_strategy(100)) {
        let mut t = Arc::new(Timeline::new(0i64));
        let mut undone = 0usize;

        for op in &ops {
            let before = t.future().len();
            t = apply(&t, op, HistoryLimit::Unbounded);
            if matches!(op, Op::Undo) && t.future().len() > before {
                undone += 1;
            }
            prop_assert!(t.future().len() <= undone);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn lowered_limit_applies_to_any_update(
        past in prop::collection::vec(any::<i32>(), 0..40),
        present in any::<i32>(),
        future in prop::collection::vec(any::<i32>(), 0..10),
        limit in 1usize..10,
        identical in any::<bool>(),
        behavior in behavior_strategy(),
        clone_state in any::<bool>(),
        payload in any::<i32>()
    ) {
        let t = Arc::new(Timeline::from_parts(past, present, future));
        let payload = if identical { present } else { payload };
        let options = UpdateOptions::default()
            .with_behavior(behavior)
            .with_clone_state(clone_state)
            .with_history_limit(HistoryLimit::Bounded(limit));
        let next = transition(&t, Action::update_with(payload, options)).unwrap();

        prop_assert!(
            next.past().len() <= limit,
            "past length {} exceeds limit {}",
            next.past().len(), limit
        );
        if payload == present {
            let kept = &t.past()[t.past().len().saturating_sub(limit)..];
            prop_assert_eq!(next.past(), kept);
            prop_assert_eq!(next.future(), t.future());
        }
    }
}

// ============================================================================
// Invariant 4: identical updates are content no-ops
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn identical_update_preserves_content(
        t in timeline_strategy(),
        behavior in behavior_strategy(),
        clone_state in any::<bool>()
    ) {
        let t = Arc::new(t);
        let options = UpdateOptions::default()
            .with_behavior(behavior)
            .with_clone_state(clone_state);
        let next = transition(&t, Action::update_with(*t.present(), options)).unwrap();
        prop_assert_eq!(&*next, &*t);
        prop_assert_eq!(Arc::ptr_eq(&t, &next), !clone_state);
    }
}

// ============================================================================
// Invariant 5: merge behaviors keep every state when nothing is trimmed
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn merges_preserve_all_states(
        t in timeline_strategy(),
        reversed in any::<bool>(),
        payload in any::<i32>()
    ) {
        prop_assume!(payload != *t.present());
        let behavior = if reversed {
            MutationBehavior::MergePastReversed
        } else {
            MutationBehavior::MergePast
        };
        let t = Arc::new(t);
        let options = UpdateOptions::default()
            .with_behavior(behavior)
            .with_history_limit(HistoryLimit::Unbounded);
        let next = transition(&t, Action::update_with(payload, options)).unwrap();

        prop_assert!(next.future().is_empty());
        prop_assert_eq!(next.past().len(), t.len());

        let mut before: Vec<i32> = t.past().iter().chain(t.future()).copied().collect();
        before.push(*t.present());
        let mut after = next.past().to_vec();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn keep_future_only_appends_present(
        t in timeline_strategy(),
        payload in any::<i32>()
    ) {
        prop_assume!(payload != *t.present());
        let t = Arc::new(t);
        let options = UpdateOptions::default()
            .with_behavior(MutationBehavior::KeepFuture)
            .with_history_limit(HistoryLimit::Unbounded);
        let next = transition(&t, Action::update_with(payload, options)).unwrap();

        prop_assert_eq!(next.future(), t.future());
        prop_assert_eq!(&next.past()[..t.past().len()], t.past());
        prop_assert_eq!(next.past().last(), Some(t.present()));
    }
}
