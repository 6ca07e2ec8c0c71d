//! Trip analysis commands: config loading, resolver selection, request input
//! and result rendering.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use eyre::WrapErr;
use journey_config::Config;
use journey_core::{TripAnalysis, TripAnalyzer, TripRequest, TripSample};
use journey_geocode::{DEFAULT_USER_AGENT, DisabledResolver, StaticResolver};
use journey_traits::CityResolver;

/// Test hook: answer every lookup with this city instead of calling the geocoder.
const STATIC_CITY_ENV: &str = "JOURNEY_TEST_STATIC_CITY";

/// The trip request could not be read or parsed. Never an analysis failure.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("cannot read trip request from {source_name}: {reason}")]
    Read { source_name: String, reason: String },
    #[error("invalid trip request JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid sample CSV: {0}")]
    Csv(String),
}

/// Load and validate the config; an absent file means all defaults.
pub fn load_config(path: &Path) -> eyre::Result<Config> {
    if !path.exists() {
        let cfg = Config::default();
        tracing::info!(path = %path.display(), "config file not found; using defaults");
        log_effective_config(&cfg);
        return Ok(cfg);
    }
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read config {}", path.display()))?;
    let cfg = journey_config::load_toml(&text)
        .map_err(|e| eyre::eyre!("invalid configuration in {}: {e}", path.display()))?;
    cfg.validate()
        .map_err(|e| eyre::eyre!("invalid configuration: {e}"))?;
    log_effective_config(&cfg);
    Ok(cfg)
}

fn log_effective_config(cfg: &Config) {
    tracing::info!(
        geocoder_enabled = cfg.geocoder.enabled,
        geocoder_url = %cfg.geocoder.base_url,
        geocoder_timeout_ms = cfg.geocoder.timeout_ms,
        lookup_timeout_ms = cfg.analysis.lookup_timeout_ms,
        concurrent_lookups = cfg.analysis.concurrent_lookups,
        "effective config"
    );
}

/// Pick the city resolver for this run.
pub fn make_resolver(
    cfg: &Config,
    offline: bool,
) -> eyre::Result<Arc<dyn CityResolver + Send + Sync>> {
    if let Ok(city) = std::env::var(STATIC_CITY_ENV) {
        tracing::debug!(%city, "using static resolver");
        return Ok(Arc::new(StaticResolver::new(city)));
    }
    if offline || !cfg.geocoder.enabled {
        tracing::info!("geocoder disabled; cities will be empty");
        return Ok(Arc::new(DisabledResolver));
    }
    let user_agent = cfg
        .geocoder
        .user_agent
        .as_deref()
        .unwrap_or(DEFAULT_USER_AGENT);
    let resolver = journey_geocode::nominatim(
        &cfg.geocoder.base_url,
        Duration::from_millis(cfg.geocoder.timeout_ms),
        user_agent,
        cfg.geocoder.language.as_deref(),
    )
    .wrap_err("create geocoder client")?;
    Ok(Arc::new(resolver))
}

pub fn build_analyzer(cfg: &Config, offline: bool) -> eyre::Result<TripAnalyzer> {
    let resolver = make_resolver(cfg, offline)?;
    TripAnalyzer::builder()
        .with_config((&cfg.analysis).into())
        .with_shared_resolver(resolver)
        .build()
}

/// Read a JSON trip request from a file, or stdin for `-`.
pub fn read_request(input: &Path) -> Result<TripRequest, InputError> {
    let mut text = String::new();
    let source_name = input.display().to_string();
    let read = if input == Path::new("-") {
        std::io::stdin().read_to_string(&mut text).map(|_| ())
    } else {
        std::fs::read_to_string(input).map(|t| text = t)
    };
    read.map_err(|e| InputError::Read {
        source_name,
        reason: e.to_string(),
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Assemble a request from a sample CSV plus request-level fields.
pub fn request_from_csv(
    csv: &Path,
    vin: String,
    gas_tank_size: i32,
    break_threshold: i64,
) -> Result<TripRequest, InputError> {
    let rows =
        journey_config::load_samples_csv(csv).map_err(|e| InputError::Csv(e.to_string()))?;
    Ok(TripRequest {
        vin,
        gas_tank_size,
        break_threshold,
        data: rows.into_iter().map(TripSample::from).collect(),
    })
}

/// Analyze and render; analysis failures are kept typed inside the report.
pub fn run_analyze(analyzer: &TripAnalyzer, req: &TripRequest, json: bool) -> eyre::Result<()> {
    let analysis = analyzer.analyze(req).map_err(eyre::Report::new)?;
    println!("{}", render(&analysis, json)?);
    Ok(())
}

pub fn render(analysis: &TripAnalysis, json: bool) -> eyre::Result<String> {
    let out = if json {
        serde_json::to_string(analysis)?
    } else {
        serde_json::to_string_pretty(analysis)?
    };
    Ok(out)
}
