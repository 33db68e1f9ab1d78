//! Monster win-rate simulator CLI.
//!
//! Loads monster definitions and runs a Monte Carlo matchup for every pair
//! of entered monsters.
//!
//! Examples:
//!   cargo run --bin simulate                              # Every monster in monsters/
//!   cargo run --bin simulate -- -n 1000 --seed 42         # Reproducible, 1000 battles each
//!   cargo run --bin simulate -- -e "Swagger Mantis" -e "Mystery Egg"

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use monster_duel::battle::TurnLimitPolicy;
use monster_duel::definitions::load_registry;
use monster_duel::simulator::{run_roster, SimConfig};
use monster_duel::Result;

/// Estimate pairwise win rates by simulating battles
#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(version, long_about = None)]
struct Args {
    /// Directory of monster definition files
    #[arg(short = 'm', long = "monsters", default_value = "monsters")]
    monsters: PathBuf,

    /// Monster to enter (repeatable; default: every loaded monster)
    #[arg(short = 'e', long = "entry")]
    entries: Vec<String>,

    /// Battles per matchup
    #[arg(short = 'n', long = "iterations")]
    iterations: Option<u32>,

    /// Random seed for reproducibility
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Turn cap per battle
    #[arg(short = 't', long = "max-turns", conflicts_with = "unbounded")]
    max_turns: Option<u64>,

    /// Let battles run without a turn cap
    #[arg(long = "unbounded")]
    unbounded: bool,

    /// At the turn cap, award the battle to the healthier monster
    #[arg(long = "higher-health")]
    higher_health: bool,

    /// Run matchups in parallel
    #[arg(short = 'p', long = "parallel")]
    parallel: bool,

    /// JSON config file; flags override its values
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long = "json")]
    json: bool,

    /// Log every battle winner
    #[arg(short = 'v', long = "verbose", conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

impl Args {
    fn sim_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };

        if !self.entries.is_empty() {
            config.entries = self.entries.clone();
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.unbounded {
            config.battle.max_turns = None;
        } else if self.max_turns.is_some() {
            config.battle.max_turns = self.max_turns;
        }
        if self.higher_health {
            config.battle.turn_limit = TurnLimitPolicy::HigherHealth;
        }
        config.parallel |= self.parallel;

        Ok(config)
    }

    /// Level forced by `--verbose`/`--quiet`, if any.
    fn log_override(&self) -> Option<Level> {
        if self.verbose {
            Some(Level::DEBUG)
        } else if self.quiet {
            Some(Level::WARN)
        } else {
            None
        }
    }
}

/// `RUST_LOG` decides the filter, falling back to `info`. A flag level
/// overrides both.
fn log_filter(level: Option<Level>) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    match level {
        Some(level) => filter.add_directive(level.into()),
        None => filter,
    }
}

fn setup_logger(level: Option<Level>) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = args.sim_config()?;
    let registry = load_registry(&args.monsters)?;

    let report = run_roster(&registry, &config)?;

    if args.json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logger(args.log_override());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
