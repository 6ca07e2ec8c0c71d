//! Maps `Box<dyn Error>` from the resolver boundary to a typed `LookupError`.
//!
//! `journey_traits::CityResolver` returns `Box<dyn Error + Send + Sync>` so any
//! geocoder can plug in; this module converts those to our typed enum, with an
//! optional feature-gated path for `journey_geocode::GeocodeError` downcasting.

use crate::error::LookupError;

/// Map a resolver-boundary error to a typed `LookupError`.
///
/// Attempts to downcast known geocoder error types first, then falls back
/// to string-based heuristics.
pub fn map_lookup_error(e: &(dyn std::error::Error + 'static)) -> LookupError {
    #[cfg(feature = "geocode-errors")]
    {
        use journey_geocode::GeocodeError;
        if let Some(ge) = e.downcast_ref::<GeocodeError>() {
            return match ge {
                GeocodeError::Timeout => LookupError::Timeout,
                GeocodeError::NotFound { .. } => LookupError::NotFound,
                GeocodeError::Disabled | GeocodeError::Status(_) => {
                    LookupError::Unavailable(ge.to_string())
                }
                other => LookupError::Failed(other.to_string()),
            };
        }
    }

    let s = e.to_string();
    let lower = s.to_lowercase();
    if lower.contains("timeout") || lower.contains("timed out") {
        LookupError::Timeout
    } else if lower.contains("not found") {
        LookupError::NotFound
    } else {
        LookupError::Failed(s)
    }
}
