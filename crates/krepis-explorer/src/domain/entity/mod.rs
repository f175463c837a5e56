//! Entity Module - Read-only View of Schedulable Entities
//!
//! # Overview
//!
//! The execution runtime owns the actors of the program under test. At every
//! decision point it hands the strategy a snapshot of what it knows about
//! them: identity, the operation each entity belongs to, and status flags.
//! Strategies never mutate this view.
//!
//! # Eligibility Rule
//!
//! ```text
//! eligible = { e | enabled(e) ∧ ¬blocked(e) ∧ ¬waiting_to_receive(e) }
//! if eligible = ∅ then eligible = { e | waiting_to_receive(e) }
//! ```
//!
//! Every strategy uses the same rule through [`eligible_entities`].

pub mod types;

pub use types::{eligible_entities, EntityId, EntityStatus, OperationId, SchedulableEntity};
