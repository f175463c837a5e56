//! Property Tests: Determinism and the Priority List Invariant

use krepis_explorer::adapters::{
    NondetSource, ProgramUnderTest, StrategyFactory, SyntheticProgram, SyntheticShape,
};
use krepis_explorer::domain::{
    eligible_entities, EntityId, ExplorationConfig, OperationBoundingStrategy, OperationPolicy,
    PrioritizedPolicy, RandomPolicy, SchedulingStrategy, StrategyKind,
};
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq)]
enum Decision {
    Pick(EntityId),
    Draw(bool),
}

struct Recorder<'a, S> {
    strategy: &'a mut S,
    log: &'a mut Vec<Decision>,
}

impl<S: SchedulingStrategy> NondetSource for Recorder<'_, S> {
    fn next_boolean(&mut self, max_value: u64) -> bool {
        let value = self.strategy.get_next_boolean(max_value);
        self.log.push(Decision::Draw(value));
        value
    }

    fn next_integer(&mut self, max_value: u64) -> u64 {
        self.strategy.get_next_integer(max_value)
    }
}

/// Run `iterations` iterations, recording every decision
fn record<S: SchedulingStrategy>(
    strategy: &mut S,
    program: &mut SyntheticProgram,
    iterations: usize,
) -> Vec<Vec<Decision>> {
    let mut runs = Vec::new();
    for _ in 0..iterations {
        program.reset();
        let mut log = Vec::new();
        let mut current_id = None;

        while !strategy.has_reached_depth_bound() {
            let entities = program.entities();
            let current = current_id.and_then(|id| entities.iter().find(|e| e.id == id));
            let Some(next) = strategy.try_get_next(&entities, current) else {
                break;
            };
            log.push(Decision::Pick(next));
            program.step(
                next,
                &mut Recorder {
                    strategy: &mut *strategy,
                    log: &mut log,
                },
            );
            current_id = Some(next);
        }

        runs.push(log);
        strategy.configure_next_iteration();
        if strategy.has_finished() {
            break;
        }
    }
    runs
}

/// Check the priority list after every scheduling decision
fn assert_priority_invariant<P: OperationPolicy>(
    mut strategy: OperationBoundingStrategy<P>,
    program: &mut SyntheticProgram,
    iterations: usize,
) {
    for _ in 0..iterations {
        program.reset();
        let mut current_id = None;

        loop {
            let entities = program.entities();
            let current = current_id.and_then(|id| entities.iter().find(|e| e.id == id));
            let Some(next) = strategy.try_get_next(&entities, current) else {
                break;
            };

            for entity in eligible_entities(&entities) {
                let listed = strategy
                    .priorities()
                    .as_slice()
                    .iter()
                    .filter(|&&op| op == entity.operation_id)
                    .count();
                assert_eq!(listed, 1, "{} listed {} times", entity.operation_id, listed);
            }

            program.step(next, &mut Recorder { strategy: &mut strategy, log: &mut Vec::new() });
            current_id = Some(next);
        }

        strategy.configure_next_iteration();
    }
}

fn shape_strategy() -> impl Strategy<Value = SyntheticShape> {
    (1u64..4, 1u64..4, 1usize..4, any::<bool>()).prop_map(|(ops, per, steps, draws)| {
        let shape = SyntheticShape::new(ops, per, steps);
        if draws {
            shape.with_boolean_draws()
        } else {
            shape
        }
    })
}

fn kind_strategy() -> impl Strategy<Value = StrategyKind> {
    prop::sample::select(StrategyKind::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_same_seed_same_decisions(
        kind in kind_strategy(),
        seed in any::<u64>(),
        shape in shape_strategy(),
    ) {
        let mut config = ExplorationConfig {
            seed,
            ..ExplorationConfig::for_strategy(kind)
        };
        if kind == StrategyKind::Combinator {
            config.safety_prefix_depth = 2;
        }

        let mut first = StrategyFactory::build(&config).unwrap();
        let mut second = StrategyFactory::build(&config).unwrap();
        let a = record(&mut first, &mut SyntheticProgram::new(shape.clone()), 12);
        let b = record(&mut second, &mut SyntheticProgram::new(shape), 12);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_reset_replays_campaign(seed in any::<u64>(), shape in shape_strategy()) {
        let config = ExplorationConfig {
            seed,
            ..ExplorationConfig::for_strategy(StrategyKind::PrioritizedOperationBounding)
        };
        let mut strategy = StrategyFactory::build(&config).unwrap();
        let mut program = SyntheticProgram::new(shape);

        let a = record(&mut strategy, &mut program, 8);
        strategy.reset();
        let b = record(&mut strategy, &mut program, 8);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_priority_list_covers_live_operations(
        seed in any::<u64>(),
        bug_depth in 1usize..4,
        shape in shape_strategy(),
    ) {
        let mut program = SyntheticProgram::new(shape);
        assert_priority_invariant(
            OperationBoundingStrategy::new(PrioritizedPolicy::new(bug_depth), seed, 0),
            &mut program,
            6,
        );
        assert_priority_invariant(
            OperationBoundingStrategy::new(RandomPolicy::new(), seed, 0),
            &mut program,
            6,
        );
    }
}
