//! Strategy Contract
//!
//! # Calling Protocol
//!
//! ```text
//! reset()                                  (start of a campaign)
//! loop per iteration:
//!     repeat:
//!         try_get_next(entities, current)  (every scheduling point)
//!         get_next_boolean / get_next_integer  (every in-program draw)
//!     until None or has_reached_depth_bound()
//!     configure_next_iteration()           (exactly once, between iterations)
//! until has_finished() or budget spent
//! ```
//!
//! Calls are strictly sequential. `configure_next_iteration` and `reset` are
//! only legal at iteration boundaries.

use crate::domain::config::StrategyKind;
use crate::domain::entity::{EntityId, SchedulableEntity};

/// The scheduling contract every exploration strategy implements
pub trait SchedulingStrategy {
    /// Choose the entity to run next
    ///
    /// `entities` is the runtime's snapshot of every known entity; the
    /// strategy applies the eligibility rule itself. `current` is the entity
    /// that executed the previous step, if any. Returns `None` when nothing is
    /// eligible, which ends the iteration (not an error).
    fn try_get_next(
        &mut self,
        entities: &[SchedulableEntity],
        current: Option<&SchedulableEntity>,
    ) -> Option<EntityId>;

    /// Resolve an in-program boolean draw
    ///
    /// `max_value` is the denominator requested by the call site (a fairness
    /// hint); the strategy decides the value.
    fn get_next_boolean(&mut self, max_value: u64) -> bool;

    /// Resolve an in-program integer draw in `[0, max_value)`
    fn get_next_integer(&mut self, max_value: u64) -> u64;

    /// Advance exploration state between two iterations
    fn configure_next_iteration(&mut self);

    /// Drop all accumulated exploration state
    fn reset(&mut self);

    /// Whether the search space is provably exhausted
    fn has_finished(&self) -> bool;

    /// Whether this iteration has made `depth_bound()` decisions
    ///
    /// Always false when the bound is 0 (unbounded).
    fn has_reached_depth_bound(&self) -> bool {
        let bound = self.depth_bound();
        bound != 0 && self.explored_steps() >= bound
    }

    /// Decisions made in the current iteration
    fn explored_steps(&self) -> usize;

    /// Largest per-iteration decision count seen so far
    fn max_explored_steps(&self) -> usize;

    /// Configured depth bound (0 = unbounded)
    fn depth_bound(&self) -> usize;

    /// Human-readable configuration summary for reproducing a run
    fn description(&self) -> String;

    /// Which strategy this is
    fn kind(&self) -> StrategyKind;
}
