//! Campaign Driver
//!
//! Runs a program under test for many iterations under one strategy, calling
//! it at every scheduling and nondeterministic-choice point.
//!
//! # Iteration Loop
//!
//! ```text
//! strategy.reset()
//! for each iteration:
//!     program.reset()
//!     loop:
//!         stop if strategy.has_reached_depth_bound()
//!         next = strategy.try_get_next(program.entities(), current)  or stop
//!         program.step(next, nondet)       draws go back to the strategy
//!     bug = program.check()                stop the campaign on a bug
//!     strategy.configure_next_iteration()
//!     stop if strategy.has_finished()
//! ```

use crate::domain::config::ExplorationConfig;
use crate::domain::entity::{EntityId, OperationId, SchedulableEntity};
use crate::domain::error::ConfigError;
use crate::domain::strategy::{SchedulingStrategy, Strategy};
use crate::adapters::factory::StrategyFactory;
use serde::Serialize;
use tracing::{debug, info};

/// Source of in-program nondeterministic values
pub trait NondetSource {
    /// Boolean draw with fairness denominator `max_value`
    fn next_boolean(&mut self, max_value: u64) -> bool;

    /// Integer draw in `[0, max_value)`
    fn next_integer(&mut self, max_value: u64) -> u64;
}

/// A deterministic, resettable program whose interleavings are explored
pub trait ProgramUnderTest {
    /// Return to the initial state
    fn reset(&mut self);

    /// Snapshot of every known entity
    fn entities(&self) -> Vec<SchedulableEntity>;

    /// Run one step of `entity`
    fn step(&mut self, entity: EntityId, nondet: &mut dyn NondetSource);

    /// Description of the bug observed in this iteration, if any
    fn check(&self) -> Option<String>;

    /// Move `operation` to the front of the program's own queues
    fn prioritize(&mut self, _operation: OperationId) {}
}

/// One decision made during an iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Entity chosen at a scheduling point
    Schedule(EntityId),
    /// Value of a boolean draw
    Boolean(bool),
    /// Value of an integer draw
    Integer(u64),
}

/// Reproduction data for a bug
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BugReport {
    /// Zero-based iteration the bug surfaced in
    pub iteration: usize,
    /// What the program reported
    pub description: String,
    /// Strategy configuration at the time
    pub strategy: String,
    /// Every decision of the failing iteration, in order
    pub trace: Vec<Decision>,
}

/// Outcome of a campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignReport {
    /// Iterations actually executed
    pub iterations_run: usize,
    /// Whether the strategy proved its search space exhausted
    pub exhausted: bool,
    /// Largest per-iteration decision count
    pub max_explored_steps: usize,
    /// First bug found, if any
    pub bug: Option<BugReport>,
}

impl CampaignReport {
    /// Whether a bug was found
    pub fn found_bug(&self) -> bool {
        self.bug.is_some()
    }
}

/// Forwards draws to the strategy and records them
struct RecordingSource<'a> {
    strategy: &'a mut Strategy,
    trace: &'a mut Vec<Decision>,
}

impl NondetSource for RecordingSource<'_> {
    fn next_boolean(&mut self, max_value: u64) -> bool {
        let value = self.strategy.get_next_boolean(max_value);
        self.trace.push(Decision::Boolean(value));
        value
    }

    fn next_integer(&mut self, max_value: u64) -> u64 {
        let value = self.strategy.get_next_integer(max_value);
        self.trace.push(Decision::Integer(value));
        value
    }
}

/// Test campaign: one strategy, an iteration budget
#[derive(Debug, Clone)]
pub struct Campaign {
    strategy: Strategy,
    iterations: usize,
}

impl Campaign {
    /// Create a campaign running at most `iterations` iterations
    pub fn new(strategy: Strategy, iterations: usize) -> Self {
        Self {
            strategy,
            iterations,
        }
    }

    /// Build the strategy from `config` and use its iteration budget
    pub fn from_config(config: &ExplorationConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(StrategyFactory::build(config)?, config.iterations))
    }

    /// The strategy being driven
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Run the campaign against `program`
    pub fn run<P: ProgramUnderTest>(&mut self, program: &mut P) -> CampaignReport {
        info!(
            strategy = %self.strategy.kind(),
            iterations = self.iterations,
            "starting campaign"
        );
        self.strategy.reset();

        let mut report = CampaignReport {
            iterations_run: 0,
            exhausted: false,
            max_explored_steps: 0,
            bug: None,
        };

        for iteration in 0..self.iterations {
            let trace = self.run_iteration(program);
            report.iterations_run += 1;
            report.max_explored_steps = report
                .max_explored_steps
                .max(self.strategy.explored_steps())
                .max(self.strategy.max_explored_steps());

            if let Some(description) = program.check() {
                info!(iteration, %description, "bug found");
                report.bug = Some(BugReport {
                    iteration,
                    description,
                    strategy: self.strategy.description(),
                    trace,
                });
                break;
            }

            self.strategy.configure_next_iteration();
            if self.strategy.has_finished() {
                info!(iteration, "search space exhausted");
                report.exhausted = true;
                break;
            }
        }

        info!(
            iterations_run = report.iterations_run,
            max_explored_steps = report.max_explored_steps,
            found_bug = report.found_bug(),
            "campaign finished"
        );
        report
    }

    fn run_iteration<P: ProgramUnderTest>(&mut self, program: &mut P) -> Vec<Decision> {
        program.reset();
        let mut trace = Vec::new();
        let mut current_id: Option<EntityId> = None;

        while !self.strategy.has_reached_depth_bound() {
            let entities = program.entities();
            let current = current_id.and_then(|id| entities.iter().find(|e| e.id == id));
            let Some(next) = self.strategy.try_get_next(&entities, current) else {
                break;
            };

            if let Some(op) = self.strategy.take_queue_priority() {
                program.prioritize(op);
            }

            trace.push(Decision::Schedule(next));
            let mut source = RecordingSource {
                strategy: &mut self.strategy,
                trace: &mut trace,
            };
            program.step(next, &mut source);
            current_id = Some(next);
        }

        debug!(decisions = trace.len(), "iteration finished");
        trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::StrategyKind;
    use crate::domain::entity::EntityStatus;

    /// Two entities, one step each, with a boolean draw in the first
    #[derive(Default)]
    struct Toy {
        done: [bool; 2],
        drew_true: bool,
    }

    impl ProgramUnderTest for Toy {
        fn reset(&mut self) {
            *self = Self::default();
        }

        fn entities(&self) -> Vec<SchedulableEntity> {
            (0..2)
                .map(|i| {
                    let status = if self.done[i] {
                        EntityStatus::completed()
                    } else {
                        EntityStatus::runnable()
                    };
                    SchedulableEntity::new(EntityId(i as u64), OperationId(i as u64), status)
                })
                .collect()
        }

        fn step(&mut self, entity: EntityId, nondet: &mut dyn NondetSource) {
            if entity == EntityId(0) {
                self.drew_true = nondet.next_boolean(2);
            }
            self.done[entity.as_u64() as usize] = true;
        }

        fn check(&self) -> Option<String> {
            // Entity 1 finishing first after a true draw
            (self.done[1] && !self.done[0] && self.drew_true).then(|| "never".to_string())
        }
    }

    #[test]
    fn test_systematic_campaign_exhausts() {
        let config = ExplorationConfig::for_strategy(StrategyKind::Systematic);
        let mut campaign = Campaign::from_config(&config).unwrap();
        let report = campaign.run(&mut Toy::default());

        // 0 then 1 with both draw values, and 1 then 0 with both draw values
        assert!(report.exhausted);
        assert_eq!(report.iterations_run, 4);
        assert_eq!(report.max_explored_steps, 3);
        assert!(!report.found_bug());
    }

    #[test]
    fn test_iteration_budget_respected() {
        let config = ExplorationConfig {
            iterations: 7,
            ..ExplorationConfig::for_strategy(StrategyKind::Random)
        };
        let report = Campaign::from_config(&config).unwrap().run(&mut Toy::default());
        assert_eq!(report.iterations_run, 7);
        assert!(!report.exhausted);
    }

    #[test]
    fn test_report_serializes() {
        let report = CampaignReport {
            iterations_run: 1,
            exhausted: false,
            max_explored_steps: 2,
            bug: Some(BugReport {
                iteration: 0,
                description: "boom".to_string(),
                strategy: "random, seed 0".to_string(),
                trace: vec![Decision::Schedule(EntityId(1)), Decision::Boolean(true)],
            }),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["bug"]["trace"][0]["schedule"], 1);
        assert_eq!(json["bug"]["trace"][1]["boolean"], true);
    }
}
