//! Request and sample range checks.
//!
//! Request checks run before any sample is looked at; sample checks run
//! for each sample right before it enters the scan.

use journey_traits::Clock;

use crate::error::{RequestField, SampleField, TripError};
use crate::types::{TripRequest, TripSample};

pub const MAX_BREAK_THRESHOLD_S: i64 = 36_000;
pub const MAX_GAS_TANK_SIZE_L: i32 = 120;
pub const VIN_LEN: usize = 17;

/// Validate request-level fields in a fixed order: threshold, tank, vin, data.
pub fn validate_request(req: &TripRequest) -> Result<(), TripError> {
    if !(0..=MAX_BREAK_THRESHOLD_S).contains(&req.break_threshold) {
        return Err(invalid_request(RequestField::BreakThreshold));
    }
    if req.gas_tank_size <= 0 || req.gas_tank_size > MAX_GAS_TANK_SIZE_L {
        return Err(invalid_request(RequestField::GasTankSize));
    }
    if req.vin.chars().count() != VIN_LEN {
        return Err(invalid_request(RequestField::Vin));
    }
    if req.data.is_empty() {
        return Err(invalid_request(RequestField::Data));
    }
    Ok(())
}

/// Validate one sample; `index` is its position in the request.
pub fn validate_sample(
    index: usize,
    sample: &TripSample,
    clock: &dyn Clock,
) -> Result<(), TripError> {
    let field = if !(0..=100).contains(&sample.fuel_level) {
        Some(SampleField::FuelLevel)
    } else if sample.odometer < 0 {
        Some(SampleField::Odometer)
    } else if !(-180.0..=180.0).contains(&sample.position_long) {
        Some(SampleField::PositionLong)
    } else if !(-90.0..=90.0).contains(&sample.position_lat) {
        Some(SampleField::PositionLat)
    } else if clock.is_future(sample.timestamp) {
        Some(SampleField::Timestamp)
    } else {
        None
    };

    match field {
        Some(field) => {
            tracing::debug!(index, %field, "rejecting sample");
            Err(TripError::InvalidSample { index, field })
        }
        None => Ok(()),
    }
}

fn invalid_request(field: RequestField) -> TripError {
    tracing::debug!(%field, "rejecting request");
    TripError::InvalidRequest { field }
}
