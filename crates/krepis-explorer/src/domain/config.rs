//! Exploration Configuration
//!
//! Plain values consumed by the strategy factory. Parsing from the command
//! line lives in the CLI package; this module only defines the shape,
//! defaults and validation.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Uniform choice among eligible entities
    Random,
    /// Operation-bounding with uniform operation choice
    RandomOperationBounding,
    /// Operation-bounding with PCT-style priority change points
    PrioritizedOperationBounding,
    /// Operation-bounding with an odometer over delay placements
    ExhaustiveOperationBounding,
    /// Exact backtracking depth-first search
    Systematic,
    /// Bounded systematic prefix followed by a fallback strategy
    Combinator,
}

impl StrategyKind {
    /// All selectable kinds
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::Random,
        StrategyKind::RandomOperationBounding,
        StrategyKind::PrioritizedOperationBounding,
        StrategyKind::ExhaustiveOperationBounding,
        StrategyKind::Systematic,
        StrategyKind::Combinator,
    ];

    /// Stable kebab-case name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::RandomOperationBounding => "random-operation-bounding",
            Self::PrioritizedOperationBounding => "prioritized-operation-bounding",
            Self::ExhaustiveOperationBounding => "exhaustive-operation-bounding",
            Self::Systematic => "systematic",
            Self::Combinator => "combinator",
        }
    }

    /// Whether the kind may serve as a combinator fallback
    pub const fn is_probabilistic(self) -> bool {
        matches!(
            self,
            Self::Random
                | Self::RandomOperationBounding
                | Self::PrioritizedOperationBounding
                | Self::ExhaustiveOperationBounding
        )
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .or(match wanted.as_str() {
                "dfs" => Some(Self::Systematic),
                "pct" => Some(Self::PrioritizedOperationBounding),
                _ => None,
            })
            .ok_or_else(|| ConfigError::UnknownStrategy(s.to_string()))
    }
}

/// Exploration configuration
///
/// # Defaults
///
/// - Strategy: random operation-bounding
/// - 100 iterations, unbounded depth, seed 0
/// - Bug depth 2, one operation delay, no plain delays
/// - Safety prefix 0 (combinator disabled), fallback random
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorationConfig {
    /// Which strategy to build
    pub strategy: StrategyKind,

    /// Number of iterations in a campaign
    pub iterations: usize,

    /// Maximum decisions per iteration (0 = unbounded)
    pub depth_bound: usize,

    /// Seed of the strategy-owned PRNG
    pub seed: u64,

    /// Ordering inversions the prioritized strategy targets
    pub bug_depth: usize,

    /// Operation-delay slots of the exhaustive strategy
    pub max_operation_delays: usize,

    /// Plain (entity-level) delay slots of the exhaustive strategy
    pub max_delays: usize,

    /// Depth of the systematic prefix of the combinator
    pub safety_prefix_depth: usize,

    /// Strategy the combinator falls back to after the prefix
    pub fallback: StrategyKind,

    /// Publish the chosen operation so the runtime can reorder its queues
    pub dynamic_event_queue_prioritization: bool,
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::RandomOperationBounding,
            iterations: 100,
            depth_bound: 0,
            seed: 0,
            bug_depth: 2,
            max_operation_delays: 1,
            max_delays: 0,
            safety_prefix_depth: 0,
            fallback: StrategyKind::Random,
            dynamic_event_queue_prioritization: false,
        }
    }
}

impl ExplorationConfig {
    /// Configuration for `strategy` with every other field defaulted
    pub fn for_strategy(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Check the configuration for the selected strategy
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }

        match self.strategy {
            StrategyKind::PrioritizedOperationBounding if self.bug_depth == 0 => {
                Err(ConfigError::ZeroBugDepth(self.strategy))
            }
            StrategyKind::Combinator => self.validate_combinator(),
            _ => Ok(()),
        }
    }

    fn validate_combinator(&self) -> Result<(), ConfigError> {
        if self.safety_prefix_depth == 0 {
            return Err(ConfigError::MissingSafetyPrefix);
        }
        if self.depth_bound != 0 && self.safety_prefix_depth >= self.depth_bound {
            return Err(ConfigError::PrefixNotBelowDepthBound {
                prefix: self.safety_prefix_depth,
                depth_bound: self.depth_bound,
            });
        }
        if !self.fallback.is_probabilistic() {
            return Err(ConfigError::InvalidFallback(self.fallback));
        }
        if self.fallback == StrategyKind::PrioritizedOperationBounding && self.bug_depth == 0 {
            return Err(ConfigError::ZeroBugDepth(self.fallback));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(ExplorationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_strategy_names_round_trip() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.name().parse::<StrategyKind>(), Ok(kind));
        }
        assert_eq!("DFS".parse::<StrategyKind>(), Ok(StrategyKind::Systematic));
        assert_eq!("pct".parse::<StrategyKind>(), Ok(StrategyKind::PrioritizedOperationBounding));
        assert!(matches!(
            "bogus".parse::<StrategyKind>(),
            Err(ConfigError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let config = ExplorationConfig {
            iterations: 0,
            ..ExplorationConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroIterations));
    }

    #[test]
    fn test_rejects_zero_bug_depth() {
        let config = ExplorationConfig {
            bug_depth: 0,
            ..ExplorationConfig::for_strategy(StrategyKind::PrioritizedOperationBounding)
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroBugDepth(_))));
    }

    #[test]
    fn test_combinator_validation() {
        let mut config = ExplorationConfig::for_strategy(StrategyKind::Combinator);
        assert_eq!(config.validate(), Err(ConfigError::MissingSafetyPrefix));

        config.safety_prefix_depth = 8;
        config.depth_bound = 8;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PrefixNotBelowDepthBound { .. })
        ));

        config.depth_bound = 0;
        config.fallback = StrategyKind::Systematic;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidFallback(StrategyKind::Systematic))
        );

        config.fallback = StrategyKind::RandomOperationBounding;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&StrategyKind::ExhaustiveOperationBounding).unwrap();
        assert_eq!(json, "\"exhaustive-operation-bounding\"");

        let config: ExplorationConfig =
            serde_json::from_str(r#"{"strategy":"systematic","iterations":5}"#).unwrap();
        assert_eq!(config.strategy, StrategyKind::Systematic);
        assert_eq!(config.iterations, 5);
        assert_eq!(config.bug_depth, 2);
    }
}
