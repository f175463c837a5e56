//! Random Operation Policy
//!
//! Uniform choice among eligible operations. Inside the chosen operation,
//! entities take turns: the next entity is the one with the smallest id
//! greater than the last one scheduled for that operation, wrapping around.
//! A group of `m` entities therefore sees each member once before any member
//! runs twice.

use super::bounding::{OperationPolicy, OperationState};
use crate::domain::config::StrategyKind;
use crate::domain::entity::{EntityId, OperationId, SchedulableEntity};
use std::collections::HashMap;

/// Uniform operation choice with round-robin entities
#[derive(Debug, Clone, Default)]
pub struct RandomPolicy {
    last_scheduled: HashMap<OperationId, EntityId>,
}

impl RandomPolicy {
    /// Create the policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Entity last scheduled for `op` in this iteration
    pub fn last_scheduled(&self, op: OperationId) -> Option<EntityId> {
        self.last_scheduled.get(&op).copied()
    }
}

impl OperationPolicy for RandomPolicy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RandomOperationBounding
    }

    fn select_operation(
        &mut self,
        state: &mut OperationState,
        operations: &[OperationId],
    ) -> OperationId {
        operations[state.rng.index(operations.len())]
    }

    fn select_entity(
        &mut self,
        _state: &mut OperationState,
        operation: OperationId,
        candidates: &[&SchedulableEntity],
    ) -> EntityId {
        let smallest = candidates.iter().map(|e| e.id).min();
        let next = match self.last_scheduled.get(&operation) {
            Some(&last) => candidates
                .iter()
                .map(|e| e.id)
                .filter(|&id| id > last)
                .min()
                .or(smallest),
            None => smallest,
        };

        let Some(next) = next else {
            panic!("{} has no eligible entity to schedule", operation);
        };
        self.last_scheduled.insert(operation, next);
        next
    }

    fn configure(&mut self, _state: &mut OperationState) {
        self.last_scheduled.clear();
    }

    fn reset(&mut self, _state: &mut OperationState) {
        self.last_scheduled.clear();
    }

    fn describe(&self, _state: &OperationState) -> String {
        "random operation-bounding".to_string()
    }
}
