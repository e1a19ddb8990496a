// CLI - Command Line Interface for KratOs Sim
// Principle: Simple, clear, composable commands

pub mod runner;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// KratOs Sim - Randomized governance proposals for simulation runs
#[derive(Parser, Debug)]
#[command(name = "kratos-sim")]
#[command(author = "KratOs Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate reproducible parameter change proposals for KratOs governance simulation")]
#[command(long_about = r#"
Generates parameter change proposals drawn from the governable KratOs protocol
parameters. The same seed always yields the same proposals.

Generate three proposals as JSON:
  kratos-sim generate --seed 7 --count 3

Show the weight each proposal kind runs with:
  kratos-sim weights --config sim.json
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", env = "KRATOS_SIM_LOG")]
    pub log_level: String,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate proposals
    Generate(GenerateCmd),

    /// Show registered proposal contents and their weights
    Weights(WeightsCmd),
}

/// Generate proposals
#[derive(Parser, Debug)]
pub struct GenerateCmd {
    /// Seed for the random source (overrides the config file)
    #[arg(long, env = "KRATOS_SIM_SEED")]
    pub seed: Option<u64>,

    /// Number of proposals (overrides the config file)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Simulation config file (JSON)
    #[arg(short, long, env = "KRATOS_SIM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Validate each proposal and preview its changes on genesis parameters
    #[arg(long)]
    pub check: bool,
}

/// Show weights
#[derive(Parser, Debug)]
pub struct WeightsCmd {
    /// Simulation config file (JSON)
    #[arg(short, long, env = "KRATOS_SIM_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
