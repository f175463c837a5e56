//! Synthetic Program Under Test
//!
//! A configurable program made of operations, each owning a group of entities
//! that take a fixed number of steps. Used to exercise strategies without a
//! real runtime.
//!
//! # Shape
//!
//! ```text
//! operations × entities_per_operation entities
//! entity id  = op * entities_per_operation + index
//! each entity runs steps_per_entity steps, then completes
//! ```
//!
//! Optionally every step performs a boolean draw, and an ordering bug can be
//! planted: the bug fires when operation `second` completes entirely before
//! operation `first` has run a single step.

use super::campaign::{NondetSource, ProgramUnderTest};
use crate::domain::entity::{EntityId, EntityStatus, OperationId, SchedulableEntity};
use serde::{Deserialize, Serialize};

/// Dimensions and planted bug of a synthetic program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticShape {
    /// Number of operations
    pub operations: u64,
    /// Entities in each operation
    pub entities_per_operation: u64,
    /// Steps each entity takes before completing
    pub steps_per_entity: usize,
    /// Whether every step draws a boolean
    pub boolean_draws: bool,
    /// `(first, second)`: bug when `second` finishes before `first` starts
    pub ordering_bug: Option<(OperationId, OperationId)>,
}

impl SyntheticShape {
    /// Shape without draws or bug
    pub fn new(operations: u64, entities_per_operation: u64, steps_per_entity: usize) -> Self {
        Self {
            operations,
            entities_per_operation,
            steps_per_entity,
            boolean_draws: false,
            ordering_bug: None,
        }
    }

    /// Draw a boolean at every step
    pub fn with_boolean_draws(mut self) -> Self {
        self.boolean_draws = true;
        self
    }

    /// Plant the ordering bug between `first` and `second`
    ///
    /// # Panics
    ///
    /// Panics if either operation is not part of this shape.
    pub fn with_ordering_bug(mut self, first: OperationId, second: OperationId) -> Self {
        for op in [first, second] {
            assert!(
                op.as_u64() < self.operations,
                "Ordering bug names {} but the program has {} operations",
                op,
                self.operations
            );
        }
        self.ordering_bug = Some((first, second));
        self
    }

    /// Total number of entities
    pub fn entity_count(&self) -> u64 {
        self.operations * self.entities_per_operation
    }
}

/// Program built from a [`SyntheticShape`]
#[derive(Debug, Clone)]
pub struct SyntheticProgram {
    shape: SyntheticShape,
    remaining: Vec<usize>,
    started: Vec<bool>,
    true_draws: usize,
    prioritized: Vec<OperationId>,
    bug: Option<String>,
}

impl SyntheticProgram {
    /// Create the program in its initial state
    pub fn new(shape: SyntheticShape) -> Self {
        let mut program = Self {
            remaining: Vec::new(),
            started: Vec::new(),
            true_draws: 0,
            prioritized: Vec::new(),
            bug: None,
            shape,
        };
        program.reset();
        program
    }

    /// The program's shape
    pub fn shape(&self) -> &SyntheticShape {
        &self.shape
    }

    /// Boolean draws that came out `true` this iteration
    pub fn true_draws(&self) -> usize {
        self.true_draws
    }

    /// Operations the strategy asked to prioritize this iteration
    pub fn prioritized(&self) -> &[OperationId] {
        &self.prioritized
    }

    fn operation_of(&self, entity: EntityId) -> OperationId {
        OperationId(entity.as_u64() / self.shape.entities_per_operation)
    }

    fn operation_completed(&self, op: OperationId) -> bool {
        let per = self.shape.entities_per_operation as usize;
        let start = op.as_u64() as usize * per;
        self.remaining[start..start + per].iter().all(|&r| r == 0)
    }
}

impl ProgramUnderTest for SyntheticProgram {
    fn reset(&mut self) {
        let count = self.shape.entity_count() as usize;
        self.remaining = vec![self.shape.steps_per_entity; count];
        self.started = vec![false; self.shape.operations as usize];
        self.true_draws = 0;
        self.prioritized.clear();
        self.bug = None;
    }

    fn entities(&self) -> Vec<SchedulableEntity> {
        self.remaining
            .iter()
            .enumerate()
            .map(|(idx, &left)| {
                let id = EntityId(idx as u64);
                let status = if left == 0 {
                    EntityStatus::completed()
                } else {
                    EntityStatus::runnable()
                };
                SchedulableEntity::new(id, self.operation_of(id), status)
            })
            .collect()
    }

    fn step(&mut self, entity: EntityId, nondet: &mut dyn NondetSource) {
        let idx = entity.as_u64() as usize;
        assert!(self.remaining[idx] > 0, "{} stepped after completing", entity);

        let op = self.operation_of(entity);
        self.started[op.as_u64() as usize] = true;
        if self.shape.boolean_draws && nondet.next_boolean(2) {
            self.true_draws += 1;
        }
        self.remaining[idx] -= 1;

        if let Some((first, second)) = self.shape.ordering_bug {
            if op == second
                && self.bug.is_none()
                && !self.started[first.as_u64() as usize]
                && self.operation_completed(second)
            {
                self.bug = Some(format!("{} completed before {} started", second, first));
            }
        }
    }

    fn check(&self) -> Option<String> {
        self.bug.clone()
    }

    fn prioritize(&mut self, operation: OperationId) {
        self.prioritized.push(operation);
    }
}
