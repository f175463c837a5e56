//! Adapters Layer - Ports & Adapters Pattern
//!
//! Connects the exploration domain to its callers.
//!
//! # Hexagonal Architecture
//! - Inbound: [`ExplorationConfig`](crate::domain::ExplorationConfig) → [`StrategyFactory`] → `Strategy`
//! - Outbound: [`Campaign`] drives any [`ProgramUnderTest`] through the strategy
//! - [`SyntheticProgram`] is a ready-made program for tests, benches and the CLI

pub mod campaign;
pub mod factory;
pub mod synthetic;

pub use campaign::{BugReport, Campaign, CampaignReport, Decision, NondetSource, ProgramUnderTest};
pub use factory::StrategyFactory;
pub use synthetic::{SyntheticProgram, SyntheticShape};
