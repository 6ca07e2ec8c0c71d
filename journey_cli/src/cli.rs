//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "journey", version, about = "Trip analysis CLI")]
pub struct Cli {
    /// Path to config TOML (typed); defaults apply when the file is absent
    #[arg(long, value_name = "FILE", default_value = "etc/journey_config.toml")]
    pub config: PathBuf,

    /// Log and print as JSON lines instead of pretty
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Never contact the geocoder; cities come back empty
    #[arg(long, action = ArgAction::SetTrue)]
    pub offline: bool,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one trip given as a JSON request
    Analyze {
        /// JSON file with the trip request; `-` reads stdin
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Analyze one trip given as a sample CSV (strict header)
    AnalyzeCsv {
        /// CSV file with timestamp,fuel_level,odometer,position_lat,position_long
        #[arg(long, value_name = "FILE")]
        csv: PathBuf,
        /// Vehicle identification number (17 characters)
        #[arg(long)]
        vin: String,
        /// Tank capacity in liters
        #[arg(long = "gas-tank-size", value_name = "LITERS")]
        gas_tank_size: i32,
        /// Minimum stationary gap counted as a break, in seconds
        #[arg(long = "break-threshold", value_name = "SECS", default_value_t = 1800)]
        break_threshold: i64,
    },
    /// Load and validate config, build the analyzer, print ok
    SelfCheck,
    /// Health check for operational monitoring
    Health,
}
