use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand};
use krepis_explorer::adapters::{Campaign, StrategyFactory, SyntheticProgram, SyntheticShape};
use krepis_explorer::domain::{ExplorationConfig, OperationId, SchedulingStrategy, StrategyKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Krepis schedule explorer
/// Drives exploration strategies against a synthetic concurrent program
#[derive(Parser)]
#[command(name = "krepis-explore")]
#[command(about = "Krepis scheduling-exploration CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a test campaign against a synthetic program
    Run {
        #[command(flatten)]
        strategy: StrategyArgs,

        #[command(flatten)]
        program: ProgramArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the description of the configured strategy
    Describe {
        #[command(flatten)]
        strategy: StrategyArgs,
    },
}

#[derive(Args)]
struct StrategyArgs {
    /// Strategy to run
    #[arg(short, long, default_value = "random-operation-bounding")]
    strategy: StrategyKind,

    /// Iterations to run
    #[arg(short, long, default_value_t = 100)]
    iterations: usize,

    /// Maximum decisions per iteration (0 = unbounded)
    #[arg(long, default_value_t = 0)]
    depth_bound: usize,

    /// Seed of the strategy's generator
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Ordering inversions targeted by the prioritized strategy
    #[arg(long, default_value_t = 2)]
    bug_depth: usize,

    /// Operation-delay slots of the exhaustive strategy
    #[arg(long, default_value_t = 1)]
    max_operation_delays: usize,

    /// Plain delay slots of the exhaustive strategy
    #[arg(long, default_value_t = 0)]
    max_delays: usize,

    /// Systematic prefix depth of the combinator
    #[arg(long, default_value_t = 0)]
    safety_prefix_depth: usize,

    /// Strategy the combinator falls back to
    #[arg(long, default_value = "random")]
    fallback: StrategyKind,

    /// Publish chosen operations to the program's queues
    #[arg(long)]
    dynamic_event_queue_prioritization: bool,
}

impl StrategyArgs {
    fn to_config(&self) -> ExplorationConfig {
        ExplorationConfig {
            strategy: self.strategy,
            iterations: self.iterations,
            depth_bound: self.depth_bound,
            seed: self.seed,
            bug_depth: self.bug_depth,
            max_operation_delays: self.max_operation_delays,
            max_delays: self.max_delays,
            safety_prefix_depth: self.safety_prefix_depth,
            fallback: self.fallback,
            dynamic_event_queue_prioritization: self.dynamic_event_queue_prioritization,
        }
    }
}

#[derive(Args)]
struct ProgramArgs {
    /// Operations in the synthetic program
    #[arg(long, default_value_t = 2)]
    operations: u64,

    /// Entities per operation
    #[arg(long, default_value_t = 2)]
    entities: u64,

    /// Steps each entity takes
    #[arg(long, default_value_t = 2)]
    steps: usize,

    /// Draw a boolean at every step
    #[arg(long)]
    draws: bool,

    /// Plant a bug: operation 1 completing before operation 0 starts
    #[arg(long)]
    ordering_bug: bool,
}

impl ProgramArgs {
    fn to_shape(&self) -> Result<SyntheticShape> {
        ensure!(self.operations > 0, "the program needs at least one operation");
        ensure!(self.entities > 0, "each operation needs at least one entity");

        let mut shape = SyntheticShape::new(self.operations, self.entities, self.steps);
        if self.draws {
            shape = shape.with_boolean_draws();
        }
        if self.ordering_bug {
            ensure!(self.operations >= 2, "--ordering-bug needs at least two operations");
            shape = shape.with_ordering_bug(OperationId(0), OperationId(1));
        }
        Ok(shape)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            strategy,
            program,
            json,
        } => {
            let config = strategy.to_config();
            let mut campaign =
                Campaign::from_config(&config).context("invalid exploration configuration")?;
            let mut program = SyntheticProgram::new(program.to_shape()?);

            info!("Strategy: {}", campaign.strategy().description());
            let report = campaign.run(&mut program);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                info!("Iterations run: {}", report.iterations_run);
                info!("Search space exhausted: {}", report.exhausted);
                info!("Max explored steps: {}", report.max_explored_steps);
                match &report.bug {
                    Some(bug) => {
                        info!("Bug found in iteration {}: {}", bug.iteration, bug.description);
                        info!("Reproduce with: {}", bug.strategy);
                    }
                    None => info!("No bug found"),
                }
            }
        }
        Commands::Describe { strategy } => {
            let built = StrategyFactory::build(&strategy.to_config())
                .context("invalid exploration configuration")?;
            println!("{}", built.description());
        }
    }

    Ok(())
}
