//! Output formatting utilities.

use accrue_calc::schedule::{Schedule, ScheduleRow};
use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints output based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints minimal output (first value only).
fn print_minimal<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    if let Some(first) = data.first() {
        println!("{}", serde_json::to_string(first)?);
    }
    Ok(())
}

/// Formats a decimal rate as a percentage string.
pub fn format_percent(rate: f64) -> String {
    format!("{:.4}%", rate * 100.0)
}

/// Formats a monetary amount at `precision` decimal places.
pub fn format_amount(value: f64, precision: u32) -> String {
    format!("{value:.prec$}", prec = precision as usize)
}

/// Prints a note unless output is quiet.
pub fn print_info(message: &str, quiet: bool) {
    if !quiet {
        println!("{} {}", "ℹ".blue(), message);
    }
}

/// Prints a header for a section unless output is quiet.
pub fn print_header(title: &str, quiet: bool) {
    if !quiet {
        println!("\n{}", title.bold().underline());
    }
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A schedule line formatted for tables.
#[derive(Debug, Clone, Tabled)]
pub struct ScheduleLine {
    #[tabled(rename = "Date")]
    pub posting_date: String,
    #[tabled(rename = "Value Date")]
    pub value_date: String,
    #[tabled(rename = "Type")]
    pub kind: &'static str,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Amount")]
    pub value: String,
    #[tabled(rename = "Interest")]
    pub interest: String,
    #[tabled(rename = "Capital")]
    pub capital: String,
    #[tabled(rename = "Balance")]
    pub balance: String,
    #[tabled(rename = "Factor")]
    pub factor: String,
}

impl ScheduleLine {
    fn from_row(row: &ScheduleRow, precision: u32) -> Self {
        Self {
            posting_date: row.posting_date.to_string(),
            value_date: row.value_date.to_string(),
            kind: row.kind,
            label: row.label.clone(),
            value: format_amount(row.value, precision),
            interest: format_amount(row.interest, precision),
            capital: format_amount(row.capital, precision),
            balance: format_amount(row.balance, precision),
            factor: row.factor.clone(),
        }
    }
}

/// Prints an amortisation schedule in the requested format.
pub fn print_schedule(
    schedule: &Schedule,
    precision: u32,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            print_header("Amortisation Schedule", quiet);
            let lines: Vec<ScheduleLine> = schedule
                .rows()
                .iter()
                .map(|row| ScheduleLine::from_row(row, precision))
                .collect();
            print_table(&lines)?;

            let totals = schedule.totals();
            let summary = [
                KeyValue::new("Total advances", format_amount(totals.advances, precision)),
                KeyValue::new("Total payments", format_amount(totals.payments, precision)),
                KeyValue::new("Total charges", format_amount(totals.charges, precision)),
                KeyValue::new("Total interest", format_amount(totals.interest, precision)),
            ];
            print_table(&summary)
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(schedule)?);
            Ok(())
        }
        OutputFormat::Csv => print_csv(schedule.rows()),
        OutputFormat::Minimal => Ok(()),
    }
}
