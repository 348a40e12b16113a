//! Rate command implementation.
//!
//! Solves the annual rate implicit in a fully known schedule.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use accrue_calc::CalculatorConfig;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::commands::ConventionArgs;
use crate::config;
use crate::input::ScheduleInput;
use crate::output::{format_percent, print_header, print_info, print_output, KeyValue};

/// Arguments for the rate command.
#[derive(Args, Debug)]
pub struct RateArgs {
    /// Schedule input file (JSON or YAML)
    pub input: PathBuf,

    #[command(flatten)]
    pub convention: ConventionArgs,
}

/// Rate solve result.
#[derive(Debug, Serialize)]
struct RateResult {
    convention: String,
    rate: f64,
}

/// Execute the rate command.
pub fn execute(args: RateArgs, settings: CalculatorConfig, opts: GlobalOptions) -> Result<()> {
    let settings = config::apply(settings, &args.convention)?;
    let convention = settings.convention();

    let input = ScheduleInput::from_path(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let mut calc = input.into_calculator(settings.precision)?;
    let rate = calc.solve_rate(convention)?;

    match opts.format {
        OutputFormat::Table => {
            print_header("Implicit Rate", opts.quiet);
            let results = [
                KeyValue::new("Convention", convention.to_string()),
                KeyValue::new("Rate", format_percent(rate)),
                KeyValue::new("Decimal", rate.to_string()),
            ];
            print_output(&results, opts.format)?;
            if settings.use_xirr {
                print_info("Periods measured from the first drawdown (XIRR)", opts.quiet);
            }
        }
        OutputFormat::Json => {
            let result = RateResult {
                convention: convention.to_string(),
                rate,
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Csv => {
            let results = [KeyValue::new("Rate", rate.to_string())];
            print_output(&results, opts.format)?;
        }
        OutputFormat::Minimal => println!("{rate}"),
    }

    Ok(())
}
