use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use settings::{
    ChartSettings, Config, DashboardSettings, GeneratorSettings, LogFormat, LoggingSettings,
};
pub use telemetry::init_tracing;

/// Prefix of the environment variables that override file settings,
/// e.g. `PROPDESK__GENERATOR__SEED=7`.
pub const ENV_PREFIX: &str = "PROPDESK";

/// Loads the application configuration.
///
/// Sources are layered: built-in defaults, then the TOML file at `path` (optional),
/// then a `.env` file and the process environment. The result is validated before
/// it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // A missing .env file is not an error.
    dotenvy::dotenv().ok();

    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
