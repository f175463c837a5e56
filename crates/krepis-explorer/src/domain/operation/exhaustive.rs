//! Exhaustive Operation Policy
//!
//! Replaces sampled change points with odometers that enumerate every sorted
//! placement of a fixed number of delays.
//!
//! # Two Odometers
//!
//! ```text
//! operation delays   k = max_operation_delays   demote the highest operation
//! plain delays       k = max_delays             rotate entity choice by one
//! ```
//!
//! Between iterations the operation odometer is the fast digit. When it wraps
//! it returns to zero and the plain odometer advances; when both wrap the
//! search is finished. Digits are capped at
//! `min(depth_bound, max_explored_steps)`, or just `max_explored_steps` when
//! unbounded.
//!
//! With `max_delays == 0`, entity choice inside an operation is uniform
//! random as in the prioritized policy. Otherwise it is deterministic
//! (ascending id) so that plain delays enumerate entity orders.

use super::bounding::{OperationPolicy, OperationState};
use super::odometer::DelayOdometer;
use crate::domain::config::StrategyKind;
use crate::domain::entity::{EntityId, OperationId, SchedulableEntity};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Odometer-driven delay policy
#[derive(Debug, Clone)]
pub struct ExhaustivePolicy {
    operation_delays: DelayOdometer,
    delays: DelayOdometer,
    pending_operation_delays: VecDeque<usize>,
    pending_delays: VecDeque<usize>,
    finished: bool,
}

impl ExhaustivePolicy {
    /// Create a policy with the given slot counts
    pub fn new(max_operation_delays: usize, max_delays: usize) -> Self {
        let mut policy = Self {
            operation_delays: DelayOdometer::new(max_operation_delays),
            delays: DelayOdometer::new(max_delays),
            pending_operation_delays: VecDeque::new(),
            pending_delays: VecDeque::new(),
            finished: false,
        };
        policy.load_pending();
        policy
    }

    /// Operation-delay odometer
    pub fn operation_delays(&self) -> &DelayOdometer {
        &self.operation_delays
    }

    /// Plain-delay odometer
    pub fn delays(&self) -> &DelayOdometer {
        &self.delays
    }

    fn load_pending(&mut self) {
        self.pending_operation_delays = self.operation_delays.sorted_delays().into();
        self.pending_delays = self.delays.sorted_delays().into();
    }

    fn advance(&mut self, bound: usize) -> bool {
        if self.operation_delays.advance(bound) {
            return true;
        }
        self.operation_delays.reset();
        self.delays.advance(bound)
    }
}

/// Pop every queued delay equal to `step`
fn take_due(queue: &mut VecDeque<usize>, step: usize) -> usize {
    let mut due = 0;
    while queue.front() == Some(&step) {
        queue.pop_front();
        due += 1;
    }
    due
}

/// Re-queue `count` delays at `step + 1`
///
/// Everything left in the queue is already past `step`, so pushing to the
/// front keeps it sorted.
fn defer(queue: &mut VecDeque<usize>, step: usize, count: usize) {
    for _ in 0..count {
        queue.push_front(step + 1);
    }
}

impl OperationPolicy for ExhaustivePolicy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ExhaustiveOperationBounding
    }

    fn select_operation(
        &mut self,
        state: &mut OperationState,
        operations: &[OperationId],
    ) -> OperationId {
        let step = state.explored_steps;
        let due = take_due(&mut self.pending_operation_delays, step);

        if due > 0 && operations.len() == 1 {
            defer(&mut self.pending_operation_delays, step, due);
        } else {
            for _ in 0..due {
                let demoted = state.priorities.highest_among(operations);
                state.priorities.demote(demoted);
                info!(operation = %demoted, step, "operation delayed");
            }
        }

        state.priorities.highest_among(operations)
    }

    fn select_entity(
        &mut self,
        state: &mut OperationState,
        _operation: OperationId,
        candidates: &[&SchedulableEntity],
    ) -> EntityId {
        if self.delays.is_empty() {
            return candidates[state.rng.index(candidates.len())].id;
        }

        let mut ids: Vec<EntityId> = candidates.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        let due = take_due(&mut self.pending_delays, state.explored_steps);
        ids[due % ids.len()]
    }

    fn on_nondet_step(&mut self, state: &mut OperationState) {
        let step = state.explored_steps;
        let due = take_due(&mut self.pending_operation_delays, step);
        defer(&mut self.pending_operation_delays, step, due);
        let due = take_due(&mut self.pending_delays, step);
        defer(&mut self.pending_delays, step, due);
    }

    fn configure(&mut self, state: &mut OperationState) {
        let bound = match state.depth_bound {
            0 => state.max_explored_steps,
            depth => depth.min(state.max_explored_steps),
        };

        if !self.finished && !self.advance(bound) {
            self.finished = true;
            info!("exhausted every delay placement");
        }
        self.load_pending();
        debug!(
            operation_delays = ?self.operation_delays.slots(),
            delays = ?self.delays.slots(),
            "configured delays"
        );
    }

    fn reset(&mut self, _state: &mut OperationState) {
        self.operation_delays.reset();
        self.delays.reset();
        self.finished = false;
        self.load_pending();
    }

    fn has_finished(&self) -> bool {
        self.finished
    }

    fn describe(&self, _state: &OperationState) -> String {
        format!(
            "exhaustive operation-bounding, operation delays {:?}, delays {:?}",
            self.operation_delays.sorted_delays(),
            self.delays.sorted_delays()
        )
    }
}
