//! Runtime configuration for the analyzer.
//!
//! Separate from the TOML-deserialized config in `journey_config`; see
//! `conversions` for the mapping.

/// Lookup behaviour of a `TripAnalyzer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisCfg {
    /// Upper bound for each city lookup (ms). Concurrent lookups share one deadline.
    pub lookup_timeout_ms: u64,
    /// Run departure and destination lookups at the same time.
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
