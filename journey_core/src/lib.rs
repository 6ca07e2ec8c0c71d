#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core trip analysis (transport-agnostic).
//!
//! Turns one ordered sequence of vehicle telemetry samples into a trip
//! summary: average consumption, breaks, refuel stops, and departure and
//! destination cities. City lookups go through `journey_traits::CityResolver`;
//! "now" comes from `journey_traits::Clock`.
//!
//! ## Architecture
//!
//! - **Validation**: request and per-sample range checks (`validate` module)
//! - **Scanning**: single pass classifying stationary and moving pairs (`scanner` module)
//! - **Consumption**: fill levels and the unweighted mean (`consumption` module)
//! - **Locations**: bounded, failure-tolerant city lookups (`locate` module)
//! - **Analyzer**: `TripAnalyzer` wires the above together (`builder` module)
//!
//! ## Units
//!
//! Fuel levels arrive as integer percentages and are converted to liters
//! with the request's tank size. Consumption is liters per 100 odometer units.

pub mod builder;
pub mod config;
pub mod consumption;
pub mod conversions;
pub mod error;
pub mod locate;
pub mod lookup_error;
pub mod mocks;
pub mod scanner;
pub mod types;
pub mod validate;

use std::sync::Arc;
use std::time::Duration;

use journey_traits::{CityResolver, Clock};

pub use builder::{Missing, Set, TripAnalyzer, TripAnalyzerBuilder};
pub use config::AnalysisCfg;
pub use error::{BuildError, LookupError, RequestField, SampleField, TripError};
pub use locate::{LocationResolver, ResolvedCities};
pub use scanner::{ScanOutcome, TripScanner};
pub use types::{Interval, TripAnalysis, TripRequest, TripSample, UNKNOWN_CITY};

/// One-shot analysis bounded by `lookup_timeout` per city lookup.
///
/// The timeout is clamped to 1 ms..=2 min. Builds a throwaway `TripAnalyzer`;
/// prefer `TripAnalyzer::builder()` when analyzing many trips or when other
/// settings need changing.
pub fn analyze_trip(
    req: &TripRequest,
    resolver: Arc<dyn CityResolver + Send + Sync>,
    clock: impl Clock + Send + Sync + 'static,
    lookup_timeout: Duration,
) -> Result<TripAnalysis, TripError> {
    builder::one_shot(resolver, Arc::new(clock), lookup_timeout).analyze(req)
}
