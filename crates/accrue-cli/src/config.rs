//! Settings file loading and command-line overrides.

use std::path::Path;

use accrue_calc::CalculatorConfig;
use accrue_core::daycounts::{DayCountConvention, EuFrequency};
use tracing::debug;

use crate::commands::ConventionArgs;
use crate::error::{CliError, CliResult};

/// Reads calculator settings from a TOML file, or the defaults when no
/// file is given.
pub fn load(path: Option<&Path>) -> CliResult<CalculatorConfig> {
    let Some(path) = path else {
        return Ok(CalculatorConfig::default());
    };
    let text = std::fs::read_to_string(path)?;
    let config: CalculatorConfig = toml::from_str(&text)?;
    config.validate()?;
    debug!(path = %path.display(), ?config, "loaded settings");
    Ok(config)
}

/// Layers convention flags over file settings. Flags only ever switch
/// options on, so an unset flag keeps the file value.
pub fn apply(mut config: CalculatorConfig, args: &ConventionArgs) -> CliResult<CalculatorConfig> {
    if let Some(name) = &args.convention {
        config.convention = name
            .parse::<DayCountConvention>()
            .map_err(|e| CliError::Config(e.to_string()))?;
    }
    if let Some(period) = &args.eu_frequency {
        config.eu_frequency = period.parse::<EuFrequency>().map_err(CliError::Config)?;
    }
    config.use_value_dates |= args.value_dates;
    config.include_charges |= args.include_charges;
    config.use_xirr |= args.xirr;
    Ok(config)
}
