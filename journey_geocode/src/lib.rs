#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! City resolvers for trip analysis.
//!
//! - `NominatimResolver`: reverse geocoding over HTTP (OpenStreetMap Nominatim)
//! - `DisabledResolver`: always fails; used for offline runs
//! - `StaticResolver`: fixed answer, handy in demos and tests
pub mod error;
pub mod http;
pub mod nominatim;

use std::time::Duration;

use journey_traits::CityResolver;

pub use error::GeocodeError;
pub use http::{DEFAULT_USER_AGENT, HttpClient, ReqwestClient};
pub use nominatim::{DEFAULT_NOMINATIM_URL, NominatimResolver};

/// Build a Nominatim resolver over a blocking reqwest client.
pub fn nominatim(
    base_url: &str,
    timeout: Duration,
    user_agent: &str,
    language: Option<&str>,
) -> error::Result<NominatimResolver<ReqwestClient>> {
    let http = ReqwestClient::new(timeout, user_agent)?;
    let resolver = NominatimResolver::new(http, base_url);
    Ok(match language {
        Some(lang) => resolver.with_language(lang),
        None => resolver,
    })
}

/// Resolver that never answers.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledResolver;

impl CityResolver for DisabledResolver {
    fn reverse_geocode(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Err(GeocodeError::Disabled.into())
    }
}

/// Resolver returning the same city for every coordinate.
#[derive(Debug, Clone)]
pub struct StaticResolver {
    city: String,
}

impl StaticResolver {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

impl CityResolver for StaticResolver {
    fn reverse_geocode(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.city.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_resolver_fails_with_typed_error() {
        let err = DisabledResolver.reverse_geocode(49.0, 8.4).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GeocodeError>(),
            Some(GeocodeError::Disabled)
        ));
    }

    #[test]
    fn static_resolver_ignores_coordinates() {
        let r = StaticResolver::new("Pforzheim");
        assert_eq!(r.reverse_geocode(0.0, 0.0).unwrap(), "Pforzheim");
        assert_eq!(r.reverse_geocode(-45.0, 170.0).unwrap(), "Pforzheim");
    }

    #[test]
    fn nominatim_builder_accepts_defaults() {
        let r = nominatim(
            DEFAULT_NOMINATIM_URL,
            Duration::from_secs(2),
            DEFAULT_USER_AGENT,
            Some("en"),
        )
        .unwrap();
        assert!(r.reverse_url(1.0, 2.0).ends_with("accept-language=en"));
    }
}
