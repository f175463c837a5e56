//! Combinator Strategy
//!
//! A bounded systematic prefix followed by a fallback strategy.
//!
//! ```text
//! depth:  0 ............ prefix_depth ............................ depth_bound
//!         │   DfsStrategy (exact)   │   fallback (probabilistic)            │
//! ```
//!
//! The prefix keeps its own systematic progression across iterations even
//! though the fallback takes over every iteration once the prefix depth is
//! reached. When the prefix has explored every schedule it can reach within
//! its bound, all decisions go to the fallback.
//!
//! Step counts are per iteration across both parts: `explored_steps` is the
//! sum of the two, and `max_explored_steps` is the largest such sum seen.

use super::contract::SchedulingStrategy;
use super::dfs::DfsStrategy;
use super::Strategy;
use crate::domain::config::StrategyKind;
use crate::domain::entity::{EntityId, SchedulableEntity};

/// Systematic prefix + fallback
#[derive(Debug, Clone)]
pub struct CombinatorStrategy {
    prefix: DfsStrategy,
    fallback: Box<Strategy>,
    max_explored_steps: usize,
    depth_bound: usize,
}

impl CombinatorStrategy {
    /// Combine a DFS prefix of `prefix_depth` decisions with `fallback`
    ///
    /// `depth_bound` is the overall per-iteration bound (0 = unbounded).
    pub fn new(prefix_depth: usize, fallback: Strategy, depth_bound: usize) -> Self {
        Self {
            prefix: DfsStrategy::new(prefix_depth),
            fallback: Box::new(fallback),
            max_explored_steps: 0,
            depth_bound,
        }
    }

    /// The systematic prefix
    pub fn prefix(&self) -> &DfsStrategy {
        &self.prefix
    }

    /// The fallback strategy
    pub fn fallback(&self) -> &Strategy {
        &self.fallback
    }

    /// Whether decisions currently go to the prefix
    pub fn in_prefix(&self) -> bool {
        !self.prefix.has_reached_depth_bound() && !self.prefix.has_finished()
    }
}

impl SchedulingStrategy for CombinatorStrategy {
    fn try_get_next(
        &mut self,
        entities: &[SchedulableEntity],
        current: Option<&SchedulableEntity>,
    ) -> Option<EntityId> {
        if self.in_prefix() {
            self.prefix.try_get_next(entities, current)
        } else {
            self.fallback.try_get_next(entities, current)
        }
    }

    fn get_next_boolean(&mut self, max_value: u64) -> bool {
        if self.in_prefix() {
            self.prefix.get_next_boolean(max_value)
        } else {
            self.fallback.get_next_boolean(max_value)
        }
    }

    fn get_next_integer(&mut self, max_value: u64) -> u64 {
        if self.in_prefix() {
            self.prefix.get_next_integer(max_value)
        } else {
            self.fallback.get_next_integer(max_value)
        }
    }

    fn configure_next_iteration(&mut self) {
        self.max_explored_steps = self.max_explored_steps.max(self.explored_steps());
        self.prefix.configure_next_iteration();
        self.fallback.configure_next_iteration();
    }

    fn reset(&mut self) {
        self.max_explored_steps = 0;
        self.prefix.reset();
        self.fallback.reset();
    }

    fn has_finished(&self) -> bool {
        self.prefix.has_finished() && self.fallback.has_finished()
    }

    fn explored_steps(&self) -> usize {
        self.prefix.explored_steps() + self.fallback.explored_steps()
    }

    fn max_explored_steps(&self) -> usize {
        self.max_explored_steps
    }

    fn depth_bound(&self) -> usize {
        self.depth_bound
    }

    fn description(&self) -> String {
        format!(
            "Combo[{}, {}]",
            self.prefix.description(),
            self.fallback.description()
        )
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Combinator
    }
}
