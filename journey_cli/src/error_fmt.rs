//! Human-readable error descriptions and structured JSON error formatting.

use crate::analyze::InputError;

/// Error code for a request that could not be read or parsed.
pub const CODE_UNPARSABLE: &str = "VTA0001";
/// Error code for a request that was rejected by the analysis.
pub const CODE_ANALYSIS: &str = "VTA0002";

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    use journey_core::error::{BuildError, TripError};

    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingResolver => {
                "What happened: No city resolver was provided to the analyzer.\nLikely causes: The geocoder failed to initialize or was not wired into the builder.\nHow to fix: Check the [geocoder] section of the config, or run with --offline.".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Out-of-range values in the [analysis] section of the TOML.\nHow to fix: Edit the config file, then rerun."
            ),
        };
    }

    if let Some(te) = err.downcast_ref::<TripError>() {
        return match te {
            TripError::InvalidRequest { field } => format!(
                "What happened: The trip request was rejected ({te}).\nLikely causes: {field} is missing or out of range.\nHow to fix: breakThreshold must be 0..=36000, gasTankSize 1..=120, vin exactly 17 characters, and data must not be empty."
            ),
            TripError::InvalidSample { index, field } => format!(
                "What happened: Sample {index} was rejected ({field} not valid).\nLikely causes: Corrupt telemetry or a timestamp in the future.\nHow to fix: fuelLevel must be 0..=100, odometer >= 0, positionLat -90..=90, positionLong -180..=180, timestamp not after now."
            ),
            TripError::InconsistentFuelMovement { index } => format!(
                "What happened: Sample {index} shows movement without any fuel drop.\nLikely causes: Samples out of order, a stuck fuel sensor, or a missed refuel sample.\nHow to fix: Check the samples around index {index} and resubmit the trip."
            ),
        };
    }

    if let Some(ie) = err.downcast_ref::<InputError>() {
        return match ie {
            InputError::Read { .. } => format!(
                "What happened: {ie}.\nLikely causes: Wrong path or missing permissions.\nHow to fix: Pass an existing file to --input, or `-` to read stdin."
            ),
            InputError::Json(e) => format!(
                "What happened: The trip request is not valid JSON ({e}).\nLikely causes: Truncated input or wrong field types.\nHow to fix: Send an object with vin, gasTankSize, breakThreshold and data."
            ),
            InputError::Csv(_) => format!(
                "What happened: {ie}.\nLikely causes: Wrong headers or a malformed row.\nHow to fix: Use the header 'timestamp,fuel_level,odometer,position_lat,position_long'."
            ),
        };
    }

    // String-based heuristics for errors coming from init or config
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("invalid configuration") {
        return format!(
            "What happened: Configuration is invalid ({msg}).\nLikely causes: Out-of-range values or wrong types in the TOML.\nHow to fix: Edit the config file and try again."
        );
    }

    if lower.contains("geocoder client") {
        return "What happened: Failed to set up the geocoder HTTP client.\nLikely causes: TLS backend unavailable or a malformed user agent.\nHow to fix: Check geocoder.user_agent, or run with --offline.".to_string();
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: input 2, request 3, sample 4, fuel/movement 5, anything else 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    use journey_core::error::TripError;
    if let Some(te) = err.downcast_ref::<TripError>() {
        return match te {
            TripError::InvalidRequest { .. } => 3,
            TripError::InvalidSample { .. } => 4,
            TripError::InconsistentFuelMovement { .. } => 5,
        };
    }
    if err.downcast_ref::<InputError>().is_some() {
        return 2;
    }
    1
}

/// Structured JSON for errors when --json is enabled.
///
/// Uses the `{"errors":[{"errorCode","errorMessage"}]}` envelope; the message
/// is the plain error text so clients can match on it.
pub fn format_error_json(err: &eyre::Report) -> String {
    use journey_core::error::TripError;
    use serde_json::json;

    let code = if err.downcast_ref::<TripError>().is_some() {
        CODE_ANALYSIS
    } else {
        CODE_UNPARSABLE
    };
    json!({ "errors": [{ "errorCode": code, "errorMessage": err.to_string() }] }).to_string()
}
