//! Value command implementation.
//!
//! Solves the unknown cash flow amount at a given annual rate.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use accrue_calc::{CalculatorConfig, Schedule};

use crate::cli::{GlobalOptions, OutputFormat};
use crate::commands::ConventionArgs;
use crate::config;
use crate::input::ScheduleInput;
use crate::output::{
    format_amount, format_percent, print_header, print_output, print_schedule, KeyValue,
};

/// Arguments for the value command.
#[derive(Args, Debug)]
pub struct ValueArgs {
    /// Schedule input file (JSON or YAML)
    pub input: PathBuf,

    /// Annual effective interest rate as a decimal, e.g. 0.0525 for 5.25%
    #[arg(short, long, allow_negative_numbers = true)]
    pub rate: f64,

    /// Also print the amortisation schedule
    #[arg(short, long)]
    pub schedule: bool,

    #[command(flatten)]
    pub convention: ConventionArgs,
}

/// Value solve result.
#[derive(Debug, Serialize)]
struct ValueResult {
    convention: String,
    rate: f64,
    value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<Schedule>,
}

/// Execute the value command.
pub fn execute(args: ValueArgs, settings: CalculatorConfig, opts: GlobalOptions) -> Result<()> {
    let settings = config::apply(settings, &args.convention)?;
    let convention = settings.convention();

    let input = ScheduleInput::from_path(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let mut calc = input.into_calculator(settings.precision)?;
    let precision = calc.precision();
    let value = calc.solve_value(convention, args.rate)?;
    let schedule = args
        .schedule
        .then(|| calc.profile().map(Schedule::from_profile))
        .transpose()?;

    match opts.format {
        OutputFormat::Table => {
            print_header("Solved Value", opts.quiet);
            let results = [
                KeyValue::new("Convention", convention.to_string()),
                KeyValue::new("Rate", format_percent(args.rate)),
                KeyValue::new("Value", format_amount(value, precision)),
            ];
            print_output(&results, opts.format)?;
            if let Some(schedule) = &schedule {
                print_schedule(schedule, precision, opts.format, opts.quiet)?;
            }
        }
        OutputFormat::Json => {
            let result = ValueResult {
                convention: convention.to_string(),
                rate: args.rate,
                value,
                schedule,
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Csv => match &schedule {
            Some(schedule) => print_schedule(schedule, precision, opts.format, opts.quiet)?,
            None => {
                let results = [KeyValue::new("Value", format_amount(value, precision))];
                print_output(&results, opts.format)?;
            }
        },
        OutputFormat::Minimal => println!("{}", format_amount(value, precision)),
    }

    Ok(())
}
