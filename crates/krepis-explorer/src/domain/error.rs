//! Domain Error Types
//!
//! Only caller mistakes are reported as errors. Broken engine invariants
//! (replay divergence in recorded depths, a priority list missing a live
//! operation) panic instead: exploration soundness is already lost at that
//! point.

use super::config::StrategyKind;

/// Configuration rejected before a strategy is built
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A campaign must run at least one iteration
    #[error("Iteration count must be positive")]
    ZeroIterations,

    /// Prioritized scheduling needs a positive bug depth
    #[error("Bug depth must be positive for {0}")]
    ZeroBugDepth(StrategyKind),

    /// Combinator needs a prefix depth
    #[error("Safety prefix depth must be positive for the combinator strategy")]
    MissingSafetyPrefix,

    /// Prefix must leave room for the fallback
    #[error("Safety prefix depth {prefix} must be below depth bound {depth_bound}")]
    PrefixNotBelowDepthBound {
        /// Requested prefix depth
        prefix: usize,
        /// Configured overall depth bound
        depth_bound: usize,
    },

    /// Fallback of a combinator must be a probabilistic strategy
    #[error("Strategy {0} cannot be used as a combinator fallback")]
    InvalidFallback(StrategyKind),

    /// Unrecognized strategy name
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
}
