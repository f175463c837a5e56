//! Krepis Schedule Explorer
//!
//! # Overview
//!
//! `krepis-explorer` is a deterministic scheduling-exploration engine. A
//! program under test is logically concurrent; the engine serializes it into
//! one totally ordered sequence of decisions per iteration and, across many
//! iterations, steers those decisions to surface ordering bugs.
//!
//! # Trinity Architecture
//!
//! This crate follows the Trinity Architecture pattern:
//!
//! - **Domain**: strategies, decision stacks, priority lists, configuration
//! - **Infrastructure**: the seeded pseudo-random generator
//! - **Adapters**: strategy factory, campaign driver, synthetic program
//!
//! # Strategies
//!
//! | Strategy | Finishes | Idea |
//! |----------|----------|------|
//! | `Random` | never | uniform over eligible entities |
//! | `RandomOperationBounding` | never | uniform over operations, round-robin entities |
//! | `PrioritizedOperationBounding` | never | PCT-style priority change points |
//! | `ExhaustiveOperationBounding` | yes | every sorted delay placement |
//! | `Systematic` | yes | depth-first search over all decisions |
//! | `Combinator` | when both parts do | systematic prefix, then a fallback |
//!
//! # Exploration Laws (Invariants)
//!
//! ## Replay
//! - **Determinism**: same seed and snapshots, same decisions
//! - **Frame constancy**: sibling order is fixed at first visit
//!
//! ## Search
//! - **Completeness**: DFS visits each decision sequence exactly once
//! - **Enumeration**: exhaustive delays visit each sorted placement once
//!
//! ## Priority
//! - **Coverage**: every live eligible operation is listed exactly once
//!
//! # Usage
//!
//! ```rust
//! use krepis_explorer::adapters::{Campaign, SyntheticProgram, SyntheticShape};
//! use krepis_explorer::domain::{ExplorationConfig, OperationId, StrategyKind};
//!
//! let config = ExplorationConfig {
//!     iterations: 500,
//!     seed: 42,
//!     ..ExplorationConfig::for_strategy(StrategyKind::PrioritizedOperationBounding)
//! };
//!
//! let shape = SyntheticShape::new(2, 2, 2).with_ordering_bug(OperationId(0), OperationId(1));
//! let mut program = SyntheticProgram::new(shape);
//!
//! let report = Campaign::from_config(&config).unwrap().run(&mut program);
//! assert!(report.iterations_run >= 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Trinity Architecture Layers
pub mod adapters;
pub mod domain;
pub mod infrastructure;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Re-export Primary Types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

// Entity view
pub use domain::{EntityId, EntityStatus, OperationId, SchedulableEntity};

// Strategies
pub use domain::{
    CombinatorStrategy, DfsStrategy, ExhaustiveOperationBoundingStrategy,
    PrioritizedOperationBoundingStrategy, RandomOperationBoundingStrategy, RandomStrategy,
    SchedulingStrategy, Strategy,
};

// Configuration
pub use domain::{ConfigError, ExplorationConfig, StrategyKind};

// Driving
pub use adapters::{Campaign, CampaignReport, ProgramUnderTest, StrategyFactory};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_defined() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_primary_types_exported() {
        let _id = EntityId::new(0);
        let _op = OperationId::new(0);
        let strategy = StrategyFactory::build(&ExplorationConfig::default()).unwrap();
        assert_eq!(strategy.kind(), StrategyKind::RandomOperationBounding);
    }
}
