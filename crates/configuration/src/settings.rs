use crate::error::ConfigError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorSettings,
    pub dashboard: DashboardSettings,
    pub chart: ChartSettings,
    pub logging: LoggingSettings,
}

/// Parameters for the synthetic account generator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Seed for the generator's RNG. The same seed always yields the same accounts.
    pub seed: u64,
    /// Number of accounts to generate.
    pub accounts: usize,
    /// Length of each generated equity history, in calendar days.
    pub history_days: usize,
    /// Date of the last history entry. Defaults to today when omitted.
    pub history_end: Option<NaiveDate>,
}

/// Parameters for the derived metrics shown on the dashboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// The profit factor at which the progress bar reads 100%.
    pub profit_factor_target: Decimal,
    /// The number shown in place of an unbounded profit factor.
    pub profit_factor_display_cap: Decimal,
}

/// Parameters for the chart data projection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Seed mixed with the account id for the intraday jitter.
    pub seed: u64,
    /// Number of hourly points in the intraday series, at most one day's worth.
    pub intraday_hours: u32,
    /// Bound of the uniform jitter added to intraday balances.
    pub intraday_jitter: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive, e.g. "info" or "analytics=debug".
    pub filter: String,
    pub format: LogFormat,
    /// When set, logs go to a daily rolling file in this directory instead of stderr.
    pub directory: Option<PathBuf>,
}

// --- Default Implementations ---
// These allow a user to omit any section from their toml
// and still have it work with sensible defaults.

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            accounts: 6,
            history_days: 90,
            history_end: None,
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            profit_factor_target: dec!(1.5),
            profit_factor_display_cap: dec!(999),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            seed: 7,
            intraday_hours: 8,
            intraday_jitter: dec!(50),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::default(),
            directory: None,
        }
    }
}

impl Config {
    /// Rejects settings that would make the generator or the projections meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generator.accounts == 0 {
            return Err(ConfigError::ValidationError(
                "generator.accounts must be greater than 0".to_string(),
            ));
        }
        if self.generator.history_days == 0 {
            return Err(ConfigError::ValidationError(
                "generator.history_days must be greater than 0".to_string(),
            ));
        }
        if self.dashboard.profit_factor_target <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "dashboard.profit_factor_target must be greater than 0".to_string(),
            ));
        }
        if self.chart.intraday_hours == 0 || self.chart.intraday_hours > 24 {
            return Err(ConfigError::ValidationError(
                "chart.intraday_hours must be between 1 and 24".to_string(),
            ));
        }
        if self.chart.intraday_jitter < Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "chart.intraday_jitter must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
