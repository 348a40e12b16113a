//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{FactorArgs, RateArgs, ValueArgs};

/// Accrue - Solve unknown repayments and implicit rates in loan schedules
#[derive(Parser)]
#[command(name = "accrue")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Calculator settings file (TOML)
    #[arg(long, env = "ACCRUE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Solve the unknown cash flow value at a given rate
    Value(ValueArgs),

    /// Solve the interest rate implicit in a fully known schedule
    Rate(RateArgs),

    /// Show the day count factor between two dates
    Factor(FactorArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}

/// Options shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct GlobalOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress headers and notes.
    pub quiet: bool,
}
