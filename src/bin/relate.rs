//! Relate CLI - pairwise text similarity and distance matrices.

use clap::Parser;

mod cli;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compare(args) => {
            cli::compare_command(*args)?;
        }
        Commands::Score(args) => {
            cli::score_command(args)?;
        }
        Commands::PrintDefaultConfig => {
            cli::print_default_config()?;
        }
        Commands::ValidateConfig(args) => {
            cli::validate_config(args)?;
        }
        Commands::ListMetrics => {
            cli::list_metrics()?;
        }
    }

    Ok(())
}
