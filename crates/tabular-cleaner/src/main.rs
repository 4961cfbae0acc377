//! CLI entry point for the tabular cleaner.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::process::ExitCode;
use tabular_cleaner::synthetic::HOUSING_COLUMNS;
use tabular_cleaner::{CleanerConfig, HousingParams, TabularCleaner, tools};
use tracing::{debug, info};

/// Environment variable overriding the default data directory.
const DATA_DIR_ENV: &str = "TABULAR_DATA_DIR";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Profile and clean tabular CSV data",
    long_about = "Profiles and cleans comma-separated files, printing JSON reports.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  TABULAR_DATA_DIR    Data directory used by `list` and `generate` (default: data)\n  \
                  RUST_LOG            Overrides --log-level\n\n\
                  EXAMPLES:\n  \
                  # Create sample data, then inspect and clean it\n  \
                  tabular-cleaner generate\n  \
                  tabular-cleaner profile data/housing.csv\n  \
                  tabular-cleaner clean data/housing.csv output/housing_clean.csv\n\n  \
                  # Pipe a report into jq\n  \
                  tabular-cleaner --json check-missing data/housing.csv | jq .missing_by_column"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Suppress progress output (only show warnings and the result)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print only JSON to stdout
    ///
    /// Disables all logs. Also switches `generate` and `list` to JSON output.
    #[arg(long, global = true)]
    json: bool,

    /// Lower capping quantile (0.0 - 1.0)
    #[arg(long, default_value_t = 0.01, global = true)]
    lower_percentile: f64,

    /// Upper capping quantile (0.0 - 1.0)
    #[arg(long, default_value_t = 0.99, global = true)]
    upper_percentile: f64,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shape, column types, missing values and numeric statistics
    Profile {
        /// CSV file to profile
        file: String,
    },
    /// Missing value counts and percentages per column
    CheckMissing {
        /// CSV file to check
        file: String,
    },
    /// Fill gaps with medians, drop duplicates, cap outliers and save
    Clean {
        /// CSV file to clean (left untouched)
        file: String,
        /// Where to write the cleaned CSV
        output: String,
    },
    /// Write a synthetic housing dataset with gaps and outliers
    Generate {
        /// Number of rows
        #[arg(long, default_value_t = 1000)]
        rows: usize,

        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output file (default: <data dir>/housing.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List CSV files in a data directory
    List {
        /// Directory to scan (default: the data directory)
        dir: Option<PathBuf>,
    },
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the report. When `json_output`
/// is true, logging is disabled entirely.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(args: &Args) -> Result<CleanerConfig> {
    let mut builder = CleanerConfig::builder()
        .lower_percentile(args.lower_percentile)
        .upper_percentile(args.upper_percentile);

    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        debug!("Using data directory from {}: {}", DATA_DIR_ENV, dir);
        builder = builder.data_dir(dir);
    }

    Ok(builder.build()?)
}

fn print_json(payload: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(payload)?);
    Ok(())
}

fn exit_code(payload: &Value) -> ExitCode {
    if tools::is_error(payload) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;
    let cleaner = TabularCleaner::new(config)?;

    match &args.command {
        Command::Profile { file } => {
            let payload = tools::profile_data(&cleaner, file);
            print_json(&payload)?;
            Ok(exit_code(&payload))
        }
        Command::CheckMissing { file } => {
            let payload = tools::check_missing(&cleaner, file);
            print_json(&payload)?;
            Ok(exit_code(&payload))
        }
        Command::Clean { file, output } => {
            info!("Cleaning {} -> {}", file, output);
            let payload = tools::clean_data(&cleaner, file, output);
            print_json(&payload)?;
            Ok(exit_code(&payload))
        }
        Command::Generate { rows, seed, output } => run_generate(&cleaner, &args, *rows, *seed, output),
        Command::List { dir } => run_list(&cleaner, &args, dir),
    }
}

/// Note: uses `println!` for user-facing output, independent of log level.
fn run_generate(
    cleaner: &TabularCleaner,
    args: &Args,
    rows: usize,
    seed: u64,
    output: &Option<PathBuf>,
) -> Result<ExitCode> {
    let output = output
        .clone()
        .unwrap_or_else(|| cleaner.config().data_dir.join("housing.csv"));
    let params = HousingParams {
        n_samples: rows,
        seed,
        ..HousingParams::default()
    };

    let payload = match cleaner.generate(&params, &output) {
        Ok(dataset) => json!({
            "file": output.display().to_string(),
            "rows": dataset.height(),
            "columns": dataset.width(),
            "seed": seed,
        }),
        Err(err) => serde_json::to_value(&err)?,
    };

    if args.json || tools::is_error(&payload) {
        print_json(&payload)?;
    } else {
        println!(
            "Generated {} rows x {} columns ({}) -> {}",
            rows,
            HOUSING_COLUMNS.len(),
            HOUSING_COLUMNS.join(", "),
            output.display()
        );
    }
    Ok(exit_code(&payload))
}

fn run_list(cleaner: &TabularCleaner, args: &Args, dir: &Option<PathBuf>) -> Result<ExitCode> {
    let directory = dir
        .clone()
        .unwrap_or_else(|| cleaner.config().data_dir.clone());
    let payload = tools::list_datasets(cleaner, &directory.display().to_string());

    if args.json || tools::is_error(&payload) {
        print_json(&payload)?;
        return Ok(exit_code(&payload));
    }

    println!("Datasets in {}:", directory.display());
    if let Some(datasets) = payload["datasets"].as_array() {
        for entry in datasets {
            println!(
                "  {:<40} {:>10.1} KB",
                entry["name"].as_str().unwrap_or_default(),
                entry["size_kb"].as_f64().unwrap_or_default()
            );
        }
    }
    if let Some(message) = payload["message"].as_str() {
        println!("  {}", message);
    }
    Ok(ExitCode::SUCCESS)
}
