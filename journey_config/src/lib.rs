#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and sample CSV parsing for trip analysis.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Sample CSV loader enforces headers and reports the failing line.
use serde::Deserialize;

/// Public Nominatim instance used when `geocoder.base_url` is not set.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Sample CSV schema.
///
/// Expected headers:
/// timestamp,fuel_level,odometer,position_lat,position_long
///
/// Example:
/// timestamp,fuel_level,odometer,position_lat,position_long
/// 1700000000,100,0,49.013297,8.404205
/// 1700001800,90,100,48.885614,8.692087
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SampleRow {
    pub timestamp: i64,
    pub fuel_level: i32,
    pub odometer: i64,
    pub position_lat: f64,
    pub position_long: f64,
}

pub const SAMPLE_CSV_HEADERS: [&str; 5] = [
    "timestamp",
    "fuel_level",
    "odometer",
    "position_lat",
    "position_long",
];

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeocoderCfg {
    /// When false, every lookup fails and cities come back empty.
    pub enabled: bool,
    pub base_url: String,
    /// Sent as User-Agent; Nominatim requires an identifying value.
    pub user_agent: Option<String>,
    /// HTTP timeout per request (ms).
    pub timeout_ms: u64,
    /// Optional `accept-language` for returned names, e.g. "de".
    pub language: Option<String>,
}

impl Default for GeocoderCfg {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: None,
            timeout_ms: 5_000,
            language: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AnalysisCfg {
    /// Bound on each city lookup as seen by the analyzer (ms).
    pub lookup_timeout_ms: u64,
    /// Resolve departure and destination concurrently.
    pub concurrent_lookups: bool,
}

impl Default for AnalysisCfg {
    fn default() -> Self {
        Self {
            lookup_timeout_ms: 10_000,
            concurrent_lookups: true,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub geocoder: GeocoderCfg,
    pub analysis: AnalysisCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Geocoder
        let url = self.geocoder.base_url.trim();
        if url.is_empty() {
            eyre::bail!("geocoder.base_url must not be empty");
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            eyre::bail!("geocoder.base_url must start with http:// or https://");
        }
        if self.geocoder.timeout_ms == 0 {
            eyre::bail!("geocoder.timeout_ms must be >= 1");
        }
        if self.geocoder.timeout_ms > 60_000 {
            eyre::bail!("geocoder.timeout_ms is unreasonably large (>60s)");
        }
        if let Some(ua) = &self.geocoder.user_agent
            && ua.trim().is_empty()
        {
            eyre::bail!("geocoder.user_agent must not be blank");
        }
        if let Some(lang) = &self.geocoder.language
            && (lang.is_empty() || !lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
        {
            eyre::bail!("geocoder.language must be a language tag like \"de\" or \"en-US\"");
        }

        // Analysis
        if self.analysis.lookup_timeout_ms == 0 {
            eyre::bail!("analysis.lookup_timeout_ms must be >= 1");
        }
        if self.analysis.lookup_timeout_ms > 120_000 {
            eyre::bail!("analysis.lookup_timeout_ms is unreasonably large (>2min)");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }

        Ok(())
    }
}

/// Parse samples from any CSV reader with the exact `SAMPLE_CSV_HEADERS`.
pub fn read_samples_csv<R: std::io::Read>(reader: R) -> eyre::Result<Vec<SampleRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers: {}", e))?
        .clone();
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != SAMPLE_CSV_HEADERS {
        eyre::bail!(
            "sample CSV must have headers '{}', got: {}",
            SAMPLE_CSV_HEADERS.join(","),
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<SampleRow>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }
    Ok(rows)
}

pub fn load_samples_csv(path: &std::path::Path) -> eyre::Result<Vec<SampleRow>> {
    let file = std::fs::File::open(path)
        .map_err(|e| eyre::eyre!("open sample CSV {:?}: {}", path, e))?;
    read_samples_csv(file)
}
