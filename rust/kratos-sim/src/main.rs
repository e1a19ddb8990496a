// KratOs Sim - Entry point
// Principle: Reproducible governance simulation input

mod cli;

use clap::Parser;
use cli::runner::{run_generate, run_weights};
use cli::{Cli, Commands};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_filter = if cli.verbose {
        "debug"
    } else {
        cli.log_level.as_str()
    };

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter)),
        )
        .init();

    let result = match &cli.command {
        Commands::Generate(cmd) => run_generate(cmd),
        Commands::Weights(cmd) => run_weights(cmd),
    };

    if let Err(e) = &result {
        error!("kratos-sim failed: {:#}", e);
    }

    result
}
