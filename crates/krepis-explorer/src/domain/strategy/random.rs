//! Uniform Random Strategy
//!
//! Picks uniformly among eligible entities at every scheduling point and
//! resolves draws with the same generator. Never finishes on its own.

use super::contract::SchedulingStrategy;
use crate::domain::config::StrategyKind;
use crate::domain::entity::{eligible_entities, EntityId, SchedulableEntity};
use crate::infrastructure::DetRng;

/// Uniform random scheduling
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: DetRng,
    explored_steps: usize,
    max_explored_steps: usize,
    depth_bound: usize,
}

impl RandomStrategy {
    /// Create a random strategy
    pub fn new(seed: u64, depth_bound: usize) -> Self {
        Self {
            rng: DetRng::new(seed),
            explored_steps: 0,
            max_explored_steps: 0,
            depth_bound,
        }
    }

    /// Seed of the owned generator
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl SchedulingStrategy for RandomStrategy {
    fn try_get_next(
        &mut self,
        entities: &[SchedulableEntity],
        _current: Option<&SchedulableEntity>,
    ) -> Option<EntityId> {
        let eligible = eligible_entities(entities);
        if eligible.is_empty() {
            return None;
        }

        let picked = eligible[self.rng.index(eligible.len())].id;
        self.explored_steps += 1;
        Some(picked)
    }

    fn get_next_boolean(&mut self, max_value: u64) -> bool {
        self.explored_steps += 1;
        max_value <= 1 || self.rng.below(max_value) == 0
    }

    fn get_next_integer(&mut self, max_value: u64) -> u64 {
        self.explored_steps += 1;
        self.rng.below(max_value)
    }

    fn configure_next_iteration(&mut self) {
        self.max_explored_steps = self.max_explored_steps.max(self.explored_steps);
        self.explored_steps = 0;
    }

    fn reset(&mut self) {
        self.rng.reset();
        self.explored_steps = 0;
        self.max_explored_steps = 0;
    }

    fn has_finished(&self) -> bool {
        false
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
        format!("random, seed {}", self.rng.seed())
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Random
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{EntityStatus, OperationId};

    fn entities(statuses: &[EntityStatus]) -> Vec<SchedulableEntity> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, &s)| SchedulableEntity::new(EntityId(i as u64), OperationId(0), s))
            .collect()
    }

    #[test]
    fn test_only_eligible_entities_picked() {
        let mut strategy = RandomStrategy::new(3, 0);
        let snapshot = entities(&[
            EntityStatus::blocked(),
            EntityStatus::runnable(),
            EntityStatus::completed(),
            EntityStatus::runnable(),
        ]);

        for _ in 0..200 {
            let picked = strategy.try_get_next(&snapshot, None).unwrap();
            assert!(picked == EntityId(1) || picked == EntityId(3));
        }
    }

    #[test]
    fn test_reset_replays_sequence() {
        let snapshot = entities(&[EntityStatus::runnable(); 5]);
        let mut strategy = RandomStrategy::new(11, 0);

        let first: Vec<_> = (0..20).map(|_| strategy.try_get_next(&snapshot, None)).collect();
        strategy.reset();
        let second: Vec<_> = (0..20).map(|_| strategy.try_get_next(&snapshot, None)).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_unit_boolean_is_true() {
        let mut strategy = RandomStrategy::new(0, 0);
        assert!(strategy.get_next_boolean(1));
        assert!(strategy.get_next_boolean(0));
    }

    #[test]
    fn test_step_accounting() {
        let mut strategy = RandomStrategy::new(0, 3);
        let snapshot = entities(&[EntityStatus::runnable()]);

        strategy.try_get_next(&snapshot, None);
        strategy.get_next_integer(10);
        assert!(!strategy.has_reached_depth_bound());
        strategy.get_next_boolean(2);
        assert!(strategy.has_reached_depth_bound());

        strategy.configure_next_iteration();
        assert_eq!(strategy.explored_steps(), 0);
        assert_eq!(strategy.max_explored_steps(), 3);
        assert!(!strategy.has_finished());
    }
}
