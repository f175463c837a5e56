//! Strategy Factory
//!
//! Turns a validated [`ExplorationConfig`] into the matching [`Strategy`]
//! variant. This is the only place that knows how configuration fields map
//! onto constructor arguments.

use crate::domain::config::{ExplorationConfig, StrategyKind};
use crate::domain::error::ConfigError;
use crate::domain::operation::{
    ExhaustiveOperationBoundingStrategy, ExhaustivePolicy, PrioritizedOperationBoundingStrategy,
    PrioritizedPolicy, RandomOperationBoundingStrategy, RandomPolicy,
};
use crate::domain::strategy::{CombinatorStrategy, DfsStrategy, RandomStrategy, Strategy};
use tracing::debug;

/// Builds strategies from configuration
pub struct StrategyFactory;

impl StrategyFactory {
    /// Validate `config` and build the strategy it selects
    pub fn build(config: &ExplorationConfig) -> Result<Strategy, ConfigError> {
        config.validate()?;
        let strategy = Self::build_kind(config.strategy, config, config.depth_bound);

        debug!(kind = %config.strategy, seed = config.seed, "built strategy");
        Ok(strategy)
    }

    fn build_kind(kind: StrategyKind, config: &ExplorationConfig, depth_bound: usize) -> Strategy {
        let seed = config.seed;
        let dynamic = config.dynamic_event_queue_prioritization;

        match kind {
            StrategyKind::Random => Strategy::Random(RandomStrategy::new(seed, depth_bound)),
            StrategyKind::RandomOperationBounding => Strategy::RandomOperationBounding(
                RandomOperationBoundingStrategy::new(RandomPolicy::new(), seed, depth_bound)
                    .with_dynamic_queue_prioritization(dynamic),
            ),
            StrategyKind::PrioritizedOperationBounding => Strategy::PrioritizedOperationBounding(
                PrioritizedOperationBoundingStrategy::new(
                    PrioritizedPolicy::new(config.bug_depth),
                    seed,
                    depth_bound,
                )
                .with_dynamic_queue_prioritization(dynamic),
            ),
            StrategyKind::ExhaustiveOperationBounding => Strategy::ExhaustiveOperationBounding(
                ExhaustiveOperationBoundingStrategy::new(
                    ExhaustivePolicy::new(config.max_operation_delays, config.max_delays),
                    seed,
                    depth_bound,
                )
                .with_dynamic_queue_prioritization(dynamic),
            ),
            StrategyKind::Systematic => Strategy::Systematic(DfsStrategy::new(depth_bound)),
            // Validation keeps the fallback non-combinator, so this recurses once
            StrategyKind::Combinator => {
                let fallback = Self::build_kind(config.fallback, config, 0);
                Strategy::Combinator(CombinatorStrategy::new(
                    config.safety_prefix_depth,
                    fallback,
                    depth_bound,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy::SchedulingStrategy;

    #[test]
    fn test_builds_every_kind() {
        for kind in StrategyKind::ALL {
            let mut config = ExplorationConfig::for_strategy(kind);
            if kind == StrategyKind::Combinator {
                config.safety_prefix_depth = 3;
            }
            let strategy = StrategyFactory::build(&config).unwrap();
            assert_eq!(strategy.kind(), kind);
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ExplorationConfig::for_strategy(StrategyKind::Combinator);
        assert!(matches!(
            StrategyFactory::build(&config),
            Err(ConfigError::MissingSafetyPrefix)
        ));
    }

    #[test]
    fn test_depth_bound_and_seed_applied() {
        let config = ExplorationConfig {
            depth_bound: 40,
            seed: 77,
            ..ExplorationConfig::for_strategy(StrategyKind::Random)
        };
        let strategy = StrategyFactory::build(&config).unwrap();
        assert_eq!(strategy.depth_bound(), 40);
        assert!(strategy.description().contains("seed 77"));
    }

    #[test]
    fn test_combinator_uses_configured_fallback() {
        let config = ExplorationConfig {
            safety_prefix_depth: 5,
            depth_bound: 50,
            fallback: StrategyKind::PrioritizedOperationBounding,
            ..ExplorationConfig::for_strategy(StrategyKind::Combinator)
        };
        let Strategy::Combinator(combo) = StrategyFactory::build(&config).unwrap() else {
            panic!("expected a combinator");
        };
        assert_eq!(combo.fallback().kind(), StrategyKind::PrioritizedOperationBounding);
        assert_eq!(combo.prefix().depth_bound(), 5);
        assert_eq!(combo.depth_bound(), 50);
    }
}
