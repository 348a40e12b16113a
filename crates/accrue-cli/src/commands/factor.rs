//! Factor command implementation.
//!
//! Shows how a convention measures the time between two dates.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use accrue_calc::CalculatorConfig;
use accrue_core::daycounts::DayCount;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::commands::{parse_date, ConventionArgs};
use crate::config;
use crate::output::{print_header, print_output, KeyValue};

/// Arguments for the factor command.
#[derive(Args, Debug)]
pub struct FactorArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub from: String,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub to: String,

    #[command(flatten)]
    pub convention: ConventionArgs,
}

/// Factor result.
#[derive(Debug, Serialize)]
struct FactorResult {
    convention: String,
    from: String,
    to: String,
    factor: f64,
    derivation: String,
}

/// Execute the factor command.
pub fn execute(args: FactorArgs, settings: CalculatorConfig, opts: GlobalOptions) -> Result<()> {
    let settings = config::apply(settings, &args.convention)?;
    let convention = settings.convention();
    let from = parse_date(&args.from)?;
    let to = parse_date(&args.to)?;

    let factor = convention.compute_factor(from, to);
    let result = FactorResult {
        convention: convention.to_string(),
        from: from.to_string(),
        to: to.to_string(),
        factor: factor.factor(),
        derivation: factor.to_string(),
    };

    match opts.format {
        OutputFormat::Table => {
            print_header("Day Count Factor", opts.quiet);
            let results = [
                KeyValue::new("Convention", result.convention),
                KeyValue::new("From", result.from),
                KeyValue::new("To", result.to),
                KeyValue::new("Factor", result.derivation),
            ];
            print_output(&results, opts.format)?;
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.serialize(&result)?;
            wtr.flush()?;
        }
        OutputFormat::Minimal => println!("{}", result.factor),
    }

    Ok(())
}
