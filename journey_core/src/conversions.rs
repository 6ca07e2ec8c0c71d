//! `From` implementations bridging `journey_config` types to `journey_core` types.

use crate::config::AnalysisCfg;
use crate::types::TripSample;

impl From<&journey_config::AnalysisCfg> for AnalysisCfg {
    fn from(c: &journey_config::AnalysisCfg) -> Self {
        Self {
            lookup_timeout_ms: c.lookup_timeout_ms,
            concurrent_lookups: c.concurrent_lookups,
        }
    }
}

impl From<journey_config::SampleRow> for TripSample {
    fn from(r: journey_config::SampleRow) -> Self {
        Self {
            fuel_level: r.fuel_level,
            odometer: r.odometer,
            position_lat: r.position_lat,
            position_long: r.position_long,
            timestamp: r.timestamp,
        }
    }
}
