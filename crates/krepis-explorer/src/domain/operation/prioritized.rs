//! Prioritized Operation Policy (PCT-style)
//!
//! # Algorithm
//!
//! Always run the highest-priority eligible operation. At each of
//! `bug_depth - 1` priority change points, demote that operation to the back
//! of the list first, so the next one in line takes over.
//!
//! Change points are re-sampled every iteration as distinct step indices in
//! `[0, max_explored_steps)`. The first iteration has none, since no step
//! count has been observed yet.
//!
//! # Probabilistic Bound
//!
//! A bug needing `d ≤ bug_depth` specific ordering inversions among `n` live
//! operations is hit with probability at least `1 / (bug_depth · n^(bug_depth-1))`
//! per iteration, regardless of schedule length.
//!
//! A change point landing on a step that cannot demote anything (a single
//! eligible operation, or a nondeterministic draw) is moved to the next free
//! step instead of being lost.

use super::bounding::{OperationPolicy, OperationState};
use crate::domain::config::StrategyKind;
use crate::domain::entity::{EntityId, OperationId, SchedulableEntity};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Priority-change-point policy
#[derive(Debug, Clone)]
pub struct PrioritizedPolicy {
    bug_depth: usize,
    change_points: BTreeSet<usize>,
}

impl PrioritizedPolicy {
    /// Create a policy targeting `bug_depth` ordering inversions
    ///
    /// # Panics
    ///
    /// Panics if `bug_depth == 0`.
    pub fn new(bug_depth: usize) -> Self {
        assert!(bug_depth > 0, "Bug depth must be positive");
        Self {
            bug_depth,
            change_points: BTreeSet::new(),
        }
    }

    /// Configured bug depth
    pub fn bug_depth(&self) -> usize {
        self.bug_depth
    }

    /// Change points of the current iteration, ascending
    pub fn change_points(&self) -> impl Iterator<Item = usize> + '_ {
        self.change_points.iter().copied()
    }

    fn move_change_point_forward(&mut self, step: usize) {
        self.change_points.remove(&step);
        let mut next = step + 1;
        while self.change_points.contains(&next) {
            next += 1;
        }
        self.change_points.insert(next);
        debug!(from = step, to = next, "moved priority change point");
    }
}

impl OperationPolicy for PrioritizedPolicy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::PrioritizedOperationBounding
    }

    fn select_operation(
        &mut self,
        state: &mut OperationState,
        operations: &[OperationId],
    ) -> OperationId {
        let step = state.explored_steps;
        if self.change_points.contains(&step) {
            if operations.len() == 1 {
                self.move_change_point_forward(step);
            } else {
                let demoted = state.priorities.highest_among(operations);
                state.priorities.demote(demoted);
                info!(operation = %demoted, step, "operation changes to lowest priority");
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
        candidates[state.rng.index(candidates.len())].id
    }

    fn on_nondet_step(&mut self, state: &mut OperationState) {
        if self.change_points.contains(&state.explored_steps) {
            self.move_change_point_forward(state.explored_steps);
        }
    }

    fn configure(&mut self, state: &mut OperationState) {
        self.change_points = state
            .rng
            .sample_distinct(state.max_explored_steps, self.bug_depth - 1)
            .into_iter()
            .collect();
        debug!(change_points = ?self.change_points, "sampled priority change points");
    }

    fn reset(&mut self, _state: &mut OperationState) {
        self.change_points.clear();
    }

    fn describe(&self, _state: &OperationState) -> String {
        let points: Vec<String> = self.change_points.iter().map(ToString::to_string).collect();
        format!(
            "prioritized operation-bounding, bug depth {}, priority change points [{}]",
            self.bug_depth,
            points.join(", ")
        )
    }
}
