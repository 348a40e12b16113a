//! Accrue CLI - Command-line interface for loan and lease calculations.
//!
//! # Usage
//!
//! ```bash
//! # Solve the repayment for a schedule at 12%
//! accrue value loan.yaml --rate 0.12 --schedule
//!
//! # Solve the implicit rate, measured XIRR style on actual days
//! accrue rate loan.json --convention "ACT/365" --xirr
//!
//! # Show a day count factor
//! accrue factor --from 2020-01-28 --to 2020-02-28 --convention "ACT/ACT ISDA"
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod input;
mod output;

use cli::{Cli, Commands, GlobalOptions};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "accrue={level},accrue_core={level},accrue_math={level},accrue_calc={level}"
        ))
    });

    // Logs go to stderr so piped results stay clean
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let settings = match cli.config.as_deref() {
        Some(path) => config::load(Some(path))
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => config::load(None)?,
    };
    let opts = GlobalOptions {
        format: cli.format,
        quiet: cli.quiet,
    };

    // Execute command
    match cli.command {
        Commands::Value(args) => commands::value::execute(args, settings, opts)?,
        Commands::Rate(args) => commands::rate::execute(args, settings, opts)?,
        Commands::Factor(args) => commands::factor::execute(args, settings, opts)?,
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
