//! Operation Module - Operation-Bounding Strategy Family
//!
//! # Overview
//!
//! Entities that exist because of one originating action share an
//! [`OperationId`](crate::domain::entity::OperationId). Scheduling at that
//! coarser granularity keeps interleavings bounded: the strategy decides
//! which *operation* makes progress, then which of its entities runs.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ OperationBoundingStrategy<P>                 │
//! │   completion → eligibility → discovery       │
//! │   OperationState { rng, priorities, steps }  │
//! ├──────────────────────────────────────────────┤
//! │ P: OperationPolicy                           │
//! │   RandomPolicy       uniform op, round-robin │
//! │   PrioritizedPolicy  change points (PCT)     │
//! │   ExhaustivePolicy   delay odometers         │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Type Aliases
//!
//! ```rust
//! use krepis_explorer::domain::operation::{
//!     PrioritizedOperationBoundingStrategy, PrioritizedPolicy,
//! };
//! use krepis_explorer::domain::strategy::SchedulingStrategy;
//!
//! let strategy = PrioritizedOperationBoundingStrategy::new(PrioritizedPolicy::new(2), 7, 0);
//! assert!(!strategy.has_finished());
//! ```

pub mod bounding;
pub mod exhaustive;
pub mod odometer;
pub mod prioritized;
pub mod priority;
pub mod random;

#[cfg(kani)]
mod proof;

pub use bounding::{OperationBoundingStrategy, OperationPolicy, OperationState};
pub use exhaustive::ExhaustivePolicy;
pub use odometer::DelayOdometer;
pub use prioritized::PrioritizedPolicy;
pub use priority::PriorityList;
pub use random::RandomPolicy;

/// Operation-bounding with uniform operation choice
pub type RandomOperationBoundingStrategy = OperationBoundingStrategy<RandomPolicy>;

/// Operation-bounding with PCT-style priority change points
pub type PrioritizedOperationBoundingStrategy = OperationBoundingStrategy<PrioritizedPolicy>;

/// Operation-bounding with enumerated delay placements
pub type ExhaustiveOperationBoundingStrategy = OperationBoundingStrategy<ExhaustivePolicy>;
