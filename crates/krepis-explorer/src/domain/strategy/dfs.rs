//! Systematic Depth-First Search Strategy
//!
//! Exact backtracking search over scheduling and nondeterministic-choice
//! decisions, replaying the recorded prefix every iteration and extending the
//! frontier below it.
//!
//! # Two Stacks
//!
//! ```text
//! schedule_stack: DecisionStack<EntityId>     which entity ran at depth d
//! nondet_stack:   DecisionStack<NondetValue>  which value was drawn at depth d
//! ```
//!
//! Nondeterministic choices are exhausted globally, not nested per scheduling
//! depth: the nondet stack is drained completely under a fixed schedule
//! prefix before the schedule stack backtracks.

use super::contract::SchedulingStrategy;
use crate::domain::choice::{ChoiceFrame, DecisionStack, NondetValue};
use crate::domain::config::StrategyKind;
use crate::domain::entity::{eligible_entities, EntityId, SchedulableEntity};
use tracing::{trace, warn};

/// Statistics for systematic exploration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DfsStats {
    /// Iterations configured since the last reset
    pub iterations: usize,
    /// Deepest schedule stack observed
    pub max_schedule_depth: usize,
    /// Deepest nondet stack observed
    pub max_nondet_depth: usize,
}

/// Depth-first search strategy
///
/// # Per-iteration State
///
/// `schedule_index` and `nondet_index` restart at 0 every iteration and
/// point at the next depth to select on each stack.
///
/// # Termination
///
/// `has_finished()` holds once at least one iteration was configured, the
/// nondet stack is empty, and every scheduling frame is exhausted. Backtracking
/// only leaves an exhausted frame behind at depth 0, so this is exactly "the
/// top-level scheduling frame is fully exhausted".
#[derive(Debug, Clone)]
pub struct DfsStrategy {
    schedule_stack: DecisionStack<EntityId>,
    nondet_stack: DecisionStack<NondetValue>,
    schedule_index: usize,
    nondet_index: usize,
    explored_steps: usize,
    max_explored_steps: usize,
    depth_bound: usize,
    stats: DfsStats,
}

impl DfsStrategy {
    /// Create a DFS strategy with the given depth bound (0 = unbounded)
    pub fn new(depth_bound: usize) -> Self {
        Self {
            schedule_stack: DecisionStack::new(),
            nondet_stack: DecisionStack::new(),
            schedule_index: 0,
            nondet_index: 0,
            explored_steps: 0,
            max_explored_steps: 0,
            depth_bound,
            stats: DfsStats::default(),
        }
    }

    /// Recorded scheduling frames
    pub fn schedule_stack(&self) -> &DecisionStack<EntityId> {
        &self.schedule_stack
    }

    /// Recorded nondeterministic frames
    pub fn nondet_stack(&self) -> &DecisionStack<NondetValue> {
        &self.nondet_stack
    }

    /// Exploration statistics
    pub fn stats(&self) -> DfsStats {
        self.stats
    }

    /// Select on the nondet stack, checking the replayed frame kind
    ///
    /// `probe` is any value of the requested kind; `make_frame` is only
    /// called when this depth is visited for the first time.
    ///
    /// # Panics
    ///
    /// Panics when the frame recorded at this depth came from the other kind
    /// of draw: the program under test did not replay deterministically.
    fn next_nondet<F>(&mut self, probe: NondetValue, make_frame: F) -> Option<NondetValue>
    where
        F: FnOnce() -> ChoiceFrame<NondetValue>,
    {
        let depth = self.nondet_index;
        if let Some(recorded) = self.nondet_stack.frame(depth) {
            assert!(
                recorded.first_value().same_kind(probe),
                "Nondeterministic draw at depth {} changed kind during replay",
                depth
            );
        }

        let value = self.nondet_stack.select(depth, make_frame)?;
        self.nondet_index += 1;
        self.explored_steps += 1;
        self.stats.max_nondet_depth = self.stats.max_nondet_depth.max(self.nondet_stack.len());
        Some(value)
    }
}

impl SchedulingStrategy for DfsStrategy {
    fn try_get_next(
        &mut self,
        entities: &[SchedulableEntity],
        _current: Option<&SchedulableEntity>,
    ) -> Option<EntityId> {
        let eligible = eligible_entities(entities);
        if eligible.is_empty() {
            return None;
        }

        let depth = self.schedule_index;
        let picked = self
            .schedule_stack
            .select(depth, || ChoiceFrame::new(eligible.iter().map(|e| e.id)))?;
        self.schedule_index += 1;
        self.stats.max_schedule_depth = self.stats.max_schedule_depth.max(self.schedule_stack.len());

        if !eligible.iter().any(|e| e.id == picked) {
            warn!(depth, entity = %picked, "recorded choice is not eligible on replay");
            return None;
        }

        trace!(depth, entity = %picked, "dfs schedule");
        self.explored_steps += 1;
        Some(picked)
    }

    fn get_next_boolean(&mut self, _max_value: u64) -> bool {
        match self.next_nondet(NondetValue::Bool(false), ChoiceFrame::boolean) {
            Some(NondetValue::Bool(value)) => value,
            _ => false,
        }
    }

    fn get_next_integer(&mut self, max_value: u64) -> u64 {
        match self.next_nondet(NondetValue::Int(0), || ChoiceFrame::integer(max_value)) {
            Some(NondetValue::Int(value)) => value,
            _ => 0,
        }
    }

    fn configure_next_iteration(&mut self) {
        self.max_explored_steps = self.max_explored_steps.max(self.explored_steps);
        self.explored_steps = 0;
        self.schedule_index = 0;
        self.nondet_index = 0;
        self.stats.iterations += 1;

        self.nondet_stack.pop_exhausted_tail();
        if !self.nondet_stack.is_empty() && self.nondet_stack.is_fully_exhausted() {
            self.nondet_stack.clear();
        }

        if self.nondet_stack.is_empty() {
            self.schedule_stack.pop_exhausted_tail();
        } else {
            self.schedule_stack.reopen_last_in_top();
        }
    }

    fn reset(&mut self) {
        self.schedule_stack.clear();
        self.nondet_stack.clear();
        self.schedule_index = 0;
        self.nondet_index = 0;
        self.explored_steps = 0;
        self.max_explored_steps = 0;
        self.stats = DfsStats::default();
    }

    fn has_finished(&self) -> bool {
        self.stats.iterations > 0
            && self.nondet_stack.is_empty()
            && self.schedule_stack.is_fully_exhausted()
    }

    fn explored_steps(&self) -> usize {
        self.explored_steps
    }

    fn max_explored_steps(&self) -> usize {
        self.max_explored_steps
    }

    fn depth_bound(&self) -> usize {
        self.depth_bound
    }

    fn description(&self) -> String {
        format!(
            "systematic dfs, depth bound {}, schedule depth {}, nondet depth {}",
            self.depth_bound,
            self.schedule_stack.len(),
            self.nondet_stack.len()
        )
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Systematic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{EntityStatus, OperationId};

    fn runnable(ids: &[u64]) -> Vec<SchedulableEntity> {
        ids.iter()
            .map(|&id| SchedulableEntity::new(EntityId(id), OperationId(0), EntityStatus::runnable()))
            .collect()
    }

    #[test]
    fn test_fresh_strategy_not_finished() {
        let dfs = DfsStrategy::new(0);
        assert!(!dfs.has_finished());
        assert!(!dfs.has_reached_depth_bound());
    }

    #[test]
    fn test_no_eligible_returns_none() {
        let mut dfs = DfsStrategy::new(0);
        assert_eq!(dfs.try_get_next(&[], None), None);
        assert_eq!(dfs.explored_steps(), 0);
    }

    #[test]
    fn test_two_way_choice_explores_both() {
        let mut dfs = DfsStrategy::new(0);
        let entities = runnable(&[4, 9]);

        assert_eq!(dfs.try_get_next(&entities, None), Some(EntityId(4)));
        dfs.configure_next_iteration();
        assert!(!dfs.has_finished());

        assert_eq!(dfs.try_get_next(&entities, None), Some(EntityId(9)));
        dfs.configure_next_iteration();
        assert!(dfs.has_finished());
    }

    #[test]
    fn test_boolean_draw_false_then_true() {
        let mut dfs = DfsStrategy::new(0);

        assert!(!dfs.get_next_boolean(2));
        dfs.configure_next_iteration();
        assert!(!dfs.has_finished());

        assert!(dfs.get_next_boolean(2));
        dfs.configure_next_iteration();
        assert!(dfs.has_finished());
    }

    #[test]
    fn test_integer_draw_enumerates_range() {
        let mut dfs = DfsStrategy::new(0);
        let mut seen = Vec::new();
        while !dfs.has_finished() {
            seen.push(dfs.get_next_integer(3));
            dfs.configure_next_iteration();
        }
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn test_wide_integer_draw() {
        let mut dfs = DfsStrategy::new(0);
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(dfs.get_next_integer(1 << 40));
            dfs.configure_next_iteration();
        }
        assert_eq!(seen, vec![0, 1, 2]);
        assert!(!dfs.has_finished());
        assert_eq!(dfs.nondet_stack().frame(0).map(|f| f.len()), Some(1 << 40));
    }

    #[test]
    fn test_nondet_replays_schedule_prefix() {
        let mut dfs = DfsStrategy::new(0);
        let entities = runnable(&[0, 1]);
        let mut runs = Vec::new();

        while !dfs.has_finished() {
            let e = dfs.try_get_next(&entities, None);
            let b = dfs.get_next_boolean(2);
            runs.push((e, b));
            dfs.configure_next_iteration();
        }

        assert_eq!(
            runs,
            vec![
                (Some(EntityId(0)), false),
                (Some(EntityId(0)), true),
                (Some(EntityId(1)), false),
                (Some(EntityId(1)), true),
            ]
        );
    }

    #[test]
    fn test_depth_bound_and_max_steps() {
        let mut dfs = DfsStrategy::new(2);
        let entities = runnable(&[0]);

        dfs.try_get_next(&entities, None);
        assert!(!dfs.has_reached_depth_bound());
        dfs.try_get_next(&entities, None);
        assert!(dfs.has_reached_depth_bound());

        dfs.configure_next_iteration();
        assert_eq!(dfs.explored_steps(), 0);
        assert_eq!(dfs.max_explored_steps(), 2);
        assert_eq!(dfs.depth_bound(), 2);
    }

    #[test]
    fn test_replay_divergence_ends_iteration() {
        let mut dfs = DfsStrategy::new(0);
        dfs.try_get_next(&runnable(&[0, 1]), None);
        dfs.configure_next_iteration();

        // Entity 1 is recorded next at depth 0 but has vanished
        assert_eq!(dfs.try_get_next(&runnable(&[0]), None), None);
    }

    #[test]
    #[should_panic(expected = "changed kind")]
    fn test_nondet_kind_change_panics() {
        let mut dfs = DfsStrategy::new(0);
        dfs.get_next_boolean(2);
        dfs.get_next_integer(4);
        dfs.configure_next_iteration();
        dfs.get_next_integer(4);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut dfs = DfsStrategy::new(0);
        dfs.try_get_next(&runnable(&[0, 1]), None);
        dfs.get_next_boolean(2);
        dfs.configure_next_iteration();

        dfs.reset();
        assert!(dfs.schedule_stack().is_empty());
        assert!(dfs.nondet_stack().is_empty());
        assert_eq!(dfs.stats(), DfsStats::default());
        assert!(!dfs.has_finished());
    }
}
