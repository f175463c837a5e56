//! Kani Proofs for the Decision Stack
//!
//! Bounded checks of the select/pop protocol on small frames.

#![cfg(kani)]

use super::{ChoiceFrame, DecisionStack};

/// A single depth with `n` siblings is exhausted after exactly `n` selections.
#[kani::proof]
#[kani::unwind(6)]
fn proof_single_frame_exhausts() {
    let n: u64 = kani::any();
    kani::assume(n >= 1 && n <= 4);

    let mut stack = DecisionStack::new();
    for _ in 0..n {
        let picked = stack.select(0, || ChoiceFrame::new(0..n));
        assert!(picked.is_some());
    }

    assert!(stack.is_fully_exhausted());
    assert!(stack.select(0, || ChoiceFrame::new(0..n)).is_none());
}

/// Popping never leaves an exhausted frame above an open one.
#[kani::proof]
#[kani::unwind(6)]
fn proof_pop_leaves_open_top() {
    let mut stack = DecisionStack::new();
    stack.select(0, || ChoiceFrame::new([0u64, 1]));
    stack.select(1, || ChoiceFrame::new([0u64]));

    stack.pop_exhausted_tail();

    assert_eq!(stack.len(), 1);
    assert!(stack.frame(0).map_or(false, |f| f.exhausted_count() == 1));
    assert!(!stack.is_fully_exhausted());
}
