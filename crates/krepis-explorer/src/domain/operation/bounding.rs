//! Operation-Bounding Base Algorithm
//!
//! Schedules at the granularity of operations instead of raw entities. The
//! base algorithm owns every piece of shared state; variants plug in an
//! [`OperationPolicy`] that decides which operation and which of its entities
//! run next.
//!
//! # Per-step Algorithm
//!
//! ```text
//! 1. completion   drop current.op if no live entity carries or awaits it
//! 2. eligibility  entities that may run now; none → end of iteration
//! 3. discovery    insert each unseen eligible op at a random rank in [0, len]
//! 4. operation    policy.select_operation(eligible ops)
//! 5. entity       policy.select_entity(entities of that op)
//! 6. count        explored_steps += 1
//! ```
//!
//! Randomized insertion in step 3 is what the prioritized variant's
//! probabilistic bound rests on: a new operation is not simply appended.

use crate::domain::config::StrategyKind;
use crate::domain::entity::{eligible_entities, EntityId, OperationId, SchedulableEntity};
use crate::domain::operation::priority::PriorityList;
use crate::domain::strategy::SchedulingStrategy;
use crate::infrastructure::DetRng;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// State shared by the base algorithm and its policy
#[derive(Debug, Clone)]
pub struct OperationState {
    /// Strategy-owned generator
    pub rng: DetRng,
    /// Live operations, highest priority first
    pub priorities: PriorityList,
    /// Decisions made in the current iteration
    pub explored_steps: usize,
    /// Largest per-iteration decision count seen so far
    pub max_explored_steps: usize,
    /// Configured depth bound (0 = unbounded)
    pub depth_bound: usize,
}

impl OperationState {
    fn new(seed: u64, depth_bound: usize) -> Self {
        Self {
            rng: DetRng::new(seed),
            priorities: PriorityList::new(),
            explored_steps: 0,
            max_explored_steps: 0,
            depth_bound,
        }
    }
}

/// Variant-specific decisions of an operation-bounding strategy
pub trait OperationPolicy: fmt::Debug + Clone {
    /// Which strategy kind this policy makes
    fn kind(&self) -> StrategyKind;

    /// Pick one of `operations` (non-empty, ascending, all listed)
    fn select_operation(&mut self, state: &mut OperationState, operations: &[OperationId])
        -> OperationId;

    /// Pick one of `candidates` (non-empty, all carrying `operation`)
    fn select_entity(
        &mut self,
        state: &mut OperationState,
        operation: OperationId,
        candidates: &[&SchedulableEntity],
    ) -> EntityId;

    /// Hook for a nondeterministic draw at the current step
    fn on_nondet_step(&mut self, _state: &mut OperationState) {}

    /// Advance between iterations
    ///
    /// `max_explored_steps` already includes the finished iteration.
    fn configure(&mut self, state: &mut OperationState);

    /// Drop all accumulated policy state
    fn reset(&mut self, state: &mut OperationState);

    /// Whether the policy's search space is exhausted
    fn has_finished(&self) -> bool {
        false
    }

    /// Human-readable policy configuration
    fn describe(&self, state: &OperationState) -> String;
}

/// Operation-bounding strategy parameterized by its policy
#[derive(Debug, Clone)]
pub struct OperationBoundingStrategy<P: OperationPolicy> {
    state: OperationState,
    policy: P,
    dynamic_queue_prioritization: bool,
    queue_priority: Option<OperationId>,
}

impl<P: OperationPolicy> OperationBoundingStrategy<P> {
    /// Create a strategy around `policy`
    pub fn new(policy: P, seed: u64, depth_bound: usize) -> Self {
        Self {
            state: OperationState::new(seed, depth_bound),
            policy,
            dynamic_queue_prioritization: false,
            queue_priority: None,
        }
    }

    /// Publish every chosen operation through [`Self::take_queue_priority`]
    pub fn with_dynamic_queue_prioritization(mut self, enabled: bool) -> Self {
        self.dynamic_queue_prioritization = enabled;
        self
    }

    /// Current priority list
    pub fn priorities(&self) -> &PriorityList {
        &self.state.priorities
    }

    /// The variant policy
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Seed of the owned generator
    pub fn seed(&self) -> u64 {
        self.state.rng.seed()
    }

    /// Operation chosen at the last step, if publishing is enabled
    pub fn take_queue_priority(&mut self) -> Option<OperationId> {
        self.queue_priority.take()
    }

    fn remove_completed(&mut self, entities: &[SchedulableEntity], current: &SchedulableEntity) {
        let op = current.operation_id;
        if entities.iter().any(|e| e.keeps_alive(op)) {
            return;
        }
        if self.state.priorities.remove(op) {
            debug!(operation = %op, "operation completed");
        }
    }

    fn discover(&mut self, operations: &[OperationId], current: Option<&SchedulableEntity>) {
        if self.state.priorities.is_empty() {
            if let Some(cur) = current.filter(|c| operations.contains(&c.operation_id)) {
                self.state.priorities.insert_at(0, cur.operation_id);
            }
        }

        for &op in operations {
            if self.state.priorities.contains(op) {
                continue;
            }
            let rank = self.state.rng.index(self.state.priorities.len() + 1);
            self.state.priorities.insert_at(rank, op);
            debug!(operation = %op, rank, "discovered operation");
        }
    }
}

impl<P: OperationPolicy> SchedulingStrategy for OperationBoundingStrategy<P> {
    fn try_get_next(
        &mut self,
        entities: &[SchedulableEntity],
        current: Option<&SchedulableEntity>,
    ) -> Option<EntityId> {
        if let Some(cur) = current {
            self.remove_completed(entities, cur);
        }

        let eligible = eligible_entities(entities);
        if eligible.is_empty() {
            return None;
        }

        let operations: Vec<OperationId> = eligible
            .iter()
            .map(|e| e.operation_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        self.discover(&operations, current);

        let op = self.policy.select_operation(&mut self.state, &operations);
        debug!(operation = %op, priorities = %self.state.priorities, "prioritized operation");
        if self.dynamic_queue_prioritization {
            self.queue_priority = Some(op);
        }

        let candidates: Vec<&SchedulableEntity> = eligible
            .into_iter()
            .filter(|e| e.operation_id == op)
            .collect();
        let picked = self.policy.select_entity(&mut self.state, op, &candidates);

        self.state.explored_steps += 1;
        Some(picked)
    }

    fn get_next_boolean(&mut self, max_value: u64) -> bool {
        let value = max_value <= 1 || self.state.rng.below(max_value) == 0;
        self.policy.on_nondet_step(&mut self.state);
        self.state.explored_steps += 1;
        value
    }

    fn get_next_integer(&mut self, max_value: u64) -> u64 {
        let value = self.state.rng.below(max_value);
        self.policy.on_nondet_step(&mut self.state);
        self.state.explored_steps += 1;
        value
    }

    fn configure_next_iteration(&mut self) {
        self.state.max_explored_steps = self.state.max_explored_steps.max(self.state.explored_steps);
        self.state.explored_steps = 0;
        self.state.priorities.clear();
        self.queue_priority = None;
        self.policy.configure(&mut self.state);
    }

    fn reset(&mut self) {
        self.state.rng.reset();
        self.state.priorities.clear();
        self.state.explored_steps = 0;
        self.state.max_explored_steps = 0;
        self.queue_priority = None;
        self.policy.reset(&mut self.state);
    }

    fn has_finished(&self) -> bool {
        self.policy.has_finished()
    }

    fn explored_steps(&self) -> usize {
        self.state.explored_steps
    }

    fn max_explored_steps(&self) -> usize {
        self.state.max_explored_steps
    }

    fn depth_bound(&self) -> usize {
        self.state.depth_bound
    }

    fn description(&self) -> String {
        format!(
            "{}, seed {}",
            self.policy.describe(&self.state),
            self.state.rng.seed()
        )
    }

    fn kind(&self) -> StrategyKind {
        self.policy.kind()
    }
}
