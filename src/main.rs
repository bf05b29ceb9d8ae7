use accounts::{AccountSource, JsonAccountSource, MockAccountSource};
use analytics::AnalyticsEngine;
use anyhow::{Context, Result};
use charting::{ChartProjector, Timeframe};
use chrono::Utc;
use clap::{Parser, Subcommand};
use configuration::{Config, LogFormat};
use core_types::PlanRules;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

mod render;

/// The main entry point for the Propdesk dashboard CLI.
fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::load_config(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    // Held until exit so a file writer can flush.
    let _log_guard = configuration::init_tracing(&config.logging)?;

    let source = build_source(cli.accounts_file.as_ref(), &config)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Plans => {
            println!("{}", render::plans_table(&PlanRules::catalog()));
        }
        Commands::Accounts => {
            let accounts = source.list_accounts()?;
            println!("{}", render::accounts_table(&accounts));
        }
        Commands::Metrics(args) => {
            let account = source.fetch_account(&args.account)?;
            let engine = AnalyticsEngine::new()
                .with_profit_factor_target(config.dashboard.profit_factor_target);
            let metrics = engine.calculate(&account);

            println!("{}", render::summary_table(&account, &metrics, &config.dashboard));
            println!("{}", render::progress_table(&metrics.progress));
            println!("{}", render::breakdown_table(&metrics));
            println!("{}", render::instrument_table(&metrics));
        }
        Commands::Chart(args) => {
            let account = source.fetch_account(&args.account)?;
            let points = ChartProjector::new(&config.chart).project(&account, args.timeframe);
            println!("{}", render::chart_table(&points));
        }
        Commands::Export(args) => {
            let accounts = source.list_accounts()?;
            let file = File::create(&args.output)
                .with_context(|| format!("failed to create {}", args.output.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(file), &accounts)?;
            info!(path = %args.output.display(), accounts = accounts.len(), "exported accounts");
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Trader dashboard for simulated futures accounts: plans, accounts, metrics and charts.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. A missing file means built-in defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Read accounts from a JSON file instead of generating them.
    #[arg(long, global = true)]
    accounts_file: Option<PathBuf>,

    /// Override the configured log format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the plan catalog with prices and risk rules.
    Plans,
    /// List every account with its running state.
    Accounts,
    /// Show the derived performance metrics of one account.
    Metrics(AccountArgs),
    /// Show the balance chart series of one account.
    Chart(ChartArgs),
    /// Write the current accounts to a JSON file readable by --accounts-file.
    Export(ExportArgs),
}

#[derive(Parser)]
struct AccountArgs {
    /// The account id (e.g., "ACC-1001").
    #[arg(long)]
    account: String,
}

#[derive(Parser)]
struct ChartArgs {
    /// The account id (e.g., "ACC-1001").
    #[arg(long)]
    account: String,

    /// 1 for intraday, or 7, 30, 90 trailing days.
    #[arg(long, default_value = "30")]
    timeframe: Timeframe,
}

#[derive(Parser)]
struct ExportArgs {
    /// Destination file.
    output: PathBuf,
}

// ==============================================================================
// Data Source
// ==============================================================================

/// Builds the account source: a JSON file when one is given, otherwise the seeded generator.
fn build_source(accounts_file: Option<&PathBuf>, config: &Config) -> Result<Box<dyn AccountSource>> {
    match accounts_file {
        Some(path) => {
            let source = JsonAccountSource::from_path(path)
                .with_context(|| format!("failed to load accounts from {}", path.display()))?;
            Ok(Box::new(source))
        }
        None => {
            let history_end = config
                .generator
                .history_end
                .unwrap_or_else(|| Utc::now().date_naive());
            Ok(Box::new(MockAccountSource::generate(&config.generator, history_end)))
        }
    }
}
