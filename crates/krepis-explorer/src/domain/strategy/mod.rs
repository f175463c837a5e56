//! Strategy Module - Scheduling Strategies and Dispatch
//!
//! # Overview
//!
//! A strategy answers every decision the program under test asks for: which
//! entity runs next, and what value an in-program boolean or integer draw
//! yields. Between iterations it advances its own exploration state.
//!
//! # Variants
//!
//! ```text
//! Strategy
//! ├── Random                         uniform over eligible entities
//! ├── RandomOperationBounding        operation-level, uniform operation choice
//! ├── PrioritizedOperationBounding   operation-level, priority change points
//! ├── ExhaustiveOperationBounding    operation-level, delay odometer
//! ├── Systematic                     exact depth-first search
//! └── Combinator                     systematic prefix + fallback
//! ```
//!
//! The set is closed and selected at construction time. [`Strategy`] delegates
//! every contract method to the variant it holds.

pub mod combinator;
pub mod contract;
pub mod dfs;
pub mod random;

pub use combinator::CombinatorStrategy;
pub use contract::SchedulingStrategy;
pub use dfs::{DfsStats, DfsStrategy};
pub use random::RandomStrategy;

use crate::domain::config::StrategyKind;
use crate::domain::entity::{EntityId, OperationId, SchedulableEntity};
use crate::domain::operation::{
    ExhaustiveOperationBoundingStrategy, PrioritizedOperationBoundingStrategy,
    RandomOperationBoundingStrategy,
};

/// Closed set of exploration strategies
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Uniform random scheduling
    Random(RandomStrategy),
    /// Operation-bounding, uniform operation choice, round-robin entities
    RandomOperationBounding(RandomOperationBoundingStrategy),
    /// Operation-bounding with PCT-style priority change points
    PrioritizedOperationBounding(PrioritizedOperationBoundingStrategy),
    /// Operation-bounding with an odometer over delay placements
    ExhaustiveOperationBounding(ExhaustiveOperationBoundingStrategy),
    /// Depth-first systematic search
    Systematic(DfsStrategy),
    /// Systematic prefix followed by a fallback
    Combinator(CombinatorStrategy),
}

macro_rules! delegate {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            Strategy::Random($s) => $body,
            Strategy::RandomOperationBounding($s) => $body,
            Strategy::PrioritizedOperationBounding($s) => $body,
            Strategy::ExhaustiveOperationBounding($s) => $body,
            Strategy::Systematic($s) => $body,
            Strategy::Combinator($s) => $body,
        }
    };
}

impl Strategy {
    /// Operation the runtime should move to the front of its queues
    ///
    /// Only operation-bounding strategies built with dynamic event-queue
    /// prioritization publish one. Taking it clears it.
    pub fn take_queue_priority(&mut self) -> Option<OperationId> {
        match self {
            Self::RandomOperationBounding(s) => s.take_queue_priority(),
            Self::PrioritizedOperationBounding(s) => s.take_queue_priority(),
            Self::ExhaustiveOperationBounding(s) => s.take_queue_priority(),
            Self::Random(_) | Self::Systematic(_) | Self::Combinator(_) => None,
        }
    }
}

impl SchedulingStrategy for Strategy {
    fn try_get_next(
        &mut self,
        entities: &[SchedulableEntity],
        current: Option<&SchedulableEntity>,
    ) -> Option<EntityId> {
        delegate!(self, s => s.try_get_next(entities, current))
    }

    fn get_next_boolean(&mut self, max_value: u64) -> bool {
        delegate!(self, s => s.get_next_boolean(max_value))
    }

    fn get_next_integer(&mut self, max_value: u64) -> u64 {
        delegate!(self, s => s.get_next_integer(max_value))
    }

    fn configure_next_iteration(&mut self) {
        delegate!(self, s => s.configure_next_iteration())
    }

    fn reset(&mut self) {
        delegate!(self, s => s.reset())
    }

    fn has_finished(&self) -> bool {
        delegate!(self, s => s.has_finished())
    }

    fn has_reached_depth_bound(&self) -> bool {
        delegate!(self, s => s.has_reached_depth_bound())
    }

    fn explored_steps(&self) -> usize {
        delegate!(self, s => s.explored_steps())
    }

    fn max_explored_steps(&self) -> usize {
        delegate!(self, s => s.max_explored_steps())
    }

    fn depth_bound(&self) -> usize {
        delegate!(self, s => s.depth_bound())
    }

    fn description(&self) -> String {
        delegate!(self, s => s.description())
    }

    fn kind(&self) -> StrategyKind {
        delegate!(self, s => s.kind())
    }
}
