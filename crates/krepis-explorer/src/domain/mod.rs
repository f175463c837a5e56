//! Domain Layer - Pure Exploration Logic
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Domain Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  Entity Module                 Choice Module                │
//! │  ├─ SchedulableEntity          ├─ ChoiceFrame<T>            │
//! │  └─ eligible_entities()        └─ DecisionStack<T>          │
//! │                                                             │
//! │                   Strategy Module                           │
//! │                   ├─ SchedulingStrategy (contract)          │
//! │                   ├─ DfsStrategy / RandomStrategy           │
//! │                   ├─ CombinatorStrategy                     │
//! │                   └─ Strategy (closed dispatch)             │
//! │                                                             │
//! │                   Operation Module                          │
//! │                   ├─ OperationBoundingStrategy<P>           │
//! │                   ├─ PriorityList / DelayOdometer           │
//! │                   └─ Random / Prioritized / Exhaustive      │
//! │                                                             │
//! │  Config + Error                                             │
//! │  ├─ ExplorationConfig, StrategyKind                         │
//! │  └─ ConfigError                                             │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Determinism
//!
//! Given a seed and a sequence of entity snapshots, every strategy in this
//! layer produces the same decisions. The only source of randomness is the
//! [`DetRng`](crate::infrastructure::DetRng) each strategy owns.

pub mod choice;
pub mod config;
pub mod entity;
pub mod error;
pub mod operation;
pub mod strategy;

pub use choice::{ChoiceFrame, DecisionStack, NondetValue};
pub use config::{ExplorationConfig, StrategyKind};
pub use entity::{eligible_entities, EntityId, EntityStatus, OperationId, SchedulableEntity};
pub use error::ConfigError;
pub use operation::{
    ExhaustiveOperationBoundingStrategy, ExhaustivePolicy, OperationBoundingStrategy,
    OperationPolicy, PrioritizedOperationBoundingStrategy, PrioritizedPolicy, PriorityList,
    RandomOperationBoundingStrategy, RandomPolicy,
};
pub use strategy::{
    CombinatorStrategy, DfsStrategy, RandomStrategy, SchedulingStrategy, Strategy,
};
