#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! `journey` command line: analyze trips from JSON or CSV input.

mod analyze;
mod cli;
mod error_fmt;

use clap::Parser;
use cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use journey_config::Config;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    // Clap handles --help/--version and usage errors itself (exit 0 / 2).
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(e) = run(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", error_fmt::format_error_json(&e));
        } else {
            eprintln!("{}", error_fmt::humanize(&e));
        }
        std::process::exit(error_fmt::exit_code_for_error(&e));
    }
}

fn run(cli: Cli) -> eyre::Result<()> {
    let _ = color_eyre::install();

    // Logging needs the config, which itself logs; peek at the file first.
    let logging = peek_logging(&cli.config);
    init_tracing(cli.json, &cli.log_level, logging.as_ref());

    let cfg = analyze::load_config(&cli.config)?;

    match cli.cmd {
        Commands::Analyze { input } => {
            let req = analyze::read_request(&input)?;
            let analyzer = analyze::build_analyzer(&cfg, cli.offline)?;
            analyze::run_analyze(&analyzer, &req, cli.json)
        }
        Commands::AnalyzeCsv {
            csv,
            vin,
            gas_tank_size,
            break_threshold,
        } => {
            let req = analyze::request_from_csv(&csv, vin, gas_tank_size, break_threshold)?;
            let analyzer = analyze::build_analyzer(&cfg, cli.offline)?;
            analyze::run_analyze(&analyzer, &req, cli.json)
        }
        Commands::SelfCheck => {
            let analyzer = analyze::build_analyzer(&cfg, cli.offline)?;
            tracing::debug!(?analyzer, "self-check built analyzer");
            println!("ok");
            Ok(())
        }
        Commands::Health => {
            if cli.json {
                println!("{}", serde_json::json!({ "status": "ok" }));
            } else {
                println!("status: ok");
            }
            Ok(())
        }
    }
}

/// Best-effort read of the `[logging]` section; full validation happens later.
fn peek_logging(path: &std::path::Path) -> Option<journey_config::Logging> {
    let text = std::fs::read_to_string(path).ok()?;
    journey_config::load_toml(&text)
        .ok()
        .map(|c: Config| c.logging)
}

fn init_tracing(json: bool, level: &str, logging: Option<&journey_config::Logging>) {
    // --log-level wins unless it was left at its default.
    let level = logging
        .and_then(|l| l.level.as_deref())
        .filter(|_| level == "info")
        .unwrap_or(level);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Console logs go to stderr; stdout carries results only.
    let console = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let file_layer = logging.and_then(|l| l.file.as_deref()).map(|file| {
        let path = std::path::Path::new(file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));
        let name = path
            .file_name()
            .map_or_else(|| "journey.log".into(), |n| n.to_string_lossy().into_owned());
        let appender = match logging.and_then(|l| l.rotation.as_deref()) {
            Some("daily") => tracing_appender::rolling::daily(dir, name),
            Some("hourly") => tracing_appender::rolling::hourly(dir, name),
            _ => tracing_appender::rolling::never(dir, name),
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        tracing_subscriber::fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(writer)
            .boxed()
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file_layer)
        .try_init();
}
