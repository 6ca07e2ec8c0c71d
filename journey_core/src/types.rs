//! Wire-facing data model: requests in, analysis out.
//!
//! Field names serialize in camelCase to stay compatible with the trip API payloads.

use serde::{Deserialize, Serialize};

/// City name reported when no destination lookup was attempted.
pub const UNKNOWN_CITY: &str = "Unknown City";

/// One timestamped telemetry reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSample {
    /// Fuel level as percentage of tank capacity.
    pub fuel_level: i32,
    /// Cumulative odometer reading.
    pub odometer: i64,
    pub position_lat: f64,
    pub position_long: f64,
    /// Unix epoch seconds.
    pub timestamp: i64,
}

/// A full trip to analyze. Samples are trusted to be in time order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub vin: String,
    /// Tank capacity in liters.
    pub gas_tank_size: i32,
    /// Minimum stationary gap (seconds) reported as a break.
    pub break_threshold: i64,
    pub data: Vec<TripSample>,
}

/// Span between two adjacent samples sharing an odometer reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub position_lat: f64,
    pub position_long: f64,
    pub start_timestamp: i64,
    pub end_timestamp: i64,
}

impl Interval {
    /// Interval located at `from` and spanning `from.timestamp..=to.timestamp`.
    pub(crate) fn between(from: &TripSample, to: &TripSample) -> Self {
        Self {
            position_lat: from.position_lat,
            position_long: from.position_long,
            start_timestamp: from.timestamp,
            end_timestamp: to.timestamp,
        }
    }

    pub fn duration_secs(&self) -> i64 {
        self.end_timestamp.saturating_sub(self.start_timestamp)
    }
}

/// Result of one analysis. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripAnalysis {
    pub vin: String,
    /// Liters per 100 distance units; 0 when the vehicle never moved.
    pub consumption: f64,
    pub departure: String,
    pub destination: String,
    pub breaks: Vec<Interval>,
    pub refuel_stops: Vec<Interval>,
}
