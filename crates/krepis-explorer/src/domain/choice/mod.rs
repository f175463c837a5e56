//! Choice Records and the Decision Stack
//!
//! # Overview
//!
//! The systematic strategy explores an unbounded decision tree one root-to-leaf
//! path per iteration. It never materializes the tree; instead it keeps, for
//! every depth it has visited, the set of sibling choices available there and
//! which of them have been tried.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────┐
//! │ DecisionStack<T>           │  one frame per depth, shared across iterations
//! ├────────────────────────────┤
//! │ frames[0]: ChoiceFrame<T>  │  [ A* , B  , C  ]   (* = exhausted)
//! │ frames[1]: ChoiceFrame<T>  │  [ A* , B* ]
//! │ frames[2]: ChoiceFrame<T>  │  [ B  ]
//! └────────────────────────────┘
//! ```
//!
//! A frame's sibling order is fixed when the depth is first visited and is
//! never re-derived, even if the runtime later reports a different eligible
//! set at that depth. The backtracker depends on that constancy.
//!
//! # Backtracking Order
//!
//! The pop/reopen order implemented by [`DecisionStack`] is load-bearing for
//! search completeness:
//!
//! 1. `select` at depth `d > 0` reopens the last exhausted sibling of frame
//!    `d - 1`, so only the deepest pick of a path stays marked.
//! 2. `pop_exhausted_tail` removes fully exhausted trailing frames and closes
//!    the first open sibling of each parent it exposes.

pub mod record;
pub mod stack;

#[cfg(kani)]
pub mod proof;

pub use record::{Choice, ChoiceFrame, NondetValue};
pub use stack::DecisionStack;
