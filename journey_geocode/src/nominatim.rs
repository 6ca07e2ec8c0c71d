//! Reverse geocoding against an OpenStreetMap Nominatim endpoint.

use serde::Deserialize;

use crate::error::{GeocodeError, Result};
use crate::http::HttpClient;

/// Public Nominatim instance.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Zoom level 10 asks Nominatim for city granularity.
const CITY_ZOOM: u8 = 10;

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<Address>,
    #[serde(default)]
    error: Option<String>,
}

/// Only the locality fields we consult; everything else in the address is ignored.
#[derive(Debug, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
}

impl Address {
    fn locality(self) -> Option<String> {
        self.city
            .or(self.town)
            .or(self.village)
            .or(self.municipality)
            .filter(|s| !s.trim().is_empty())
    }
}

/// Nominatim-backed resolver, generic over the HTTP transport.
pub struct NominatimResolver<C: HttpClient> {
    http: C,
    base_url: String,
    language: Option<String>,
}

impl<C: HttpClient> NominatimResolver<C> {
    pub fn new(http: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            language: None,
        }
    }

    /// Preferred language for returned names (`accept-language`).
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn reverse_url(&self, lat: f64, lon: f64) -> String {
        let mut url = format!(
            "{}/reverse?format=jsonv2&lat={lat}&lon={lon}&zoom={CITY_ZOOM}&addressdetails=1",
            self.base_url
        );
        if let Some(lang) = &self.language {
            url.push_str("&accept-language=");
            url.push_str(lang);
        }
        url
    }

    /// Look up the city at the given coordinates.
    pub fn find_city(&self, lat: f64, lon: f64) -> Result<String> {
        let url = self.reverse_url(lat, lon);
        tracing::trace!(%url, "nominatim reverse lookup");
        let body = self.http.get(&url)?;
        parse_city(&body, lat, lon)
    }
}

fn parse_city(body: &[u8], lat: f64, lon: f64) -> Result<String> {
    let resp: ReverseResponse = serde_json::from_slice(body)?;
    if let Some(msg) = resp.error {
        tracing::debug!(lat, lon, error = %msg, "nominatim reported no result");
        return Err(GeocodeError::NotFound { lat, lon });
    }
    resp.address
        .and_then(Address::locality)
        .ok_or(GeocodeError::NotFound { lat, lon })
}

impl<C: HttpClient> journey_traits::CityResolver for NominatimResolver<C> {
    fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.find_city(latitude, longitude).map_err(|e| {
            tracing::warn!(latitude, longitude, error = %e, "cannot get city");
            e.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Canned-response client that records the URLs it was asked for.
    struct CannedClient {
        body: std::result::Result<&'static str, u16>,
        seen: Mutex<Vec<String>>,
    }

    impl CannedClient {
        fn ok(body: &'static str) -> Self {
            Self {
                body: Ok(body),
                seen: Mutex::new(Vec::new()),
            }
        }
        fn status(code: u16) -> Self {
            Self {
                body: Err(code),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl HttpClient for CannedClient {
        fn get(&self, url: &str) -> Result<Vec<u8>> {
            self.seen.lock().unwrap().push(url.to_string());
            match self.body {
                Ok(b) => Ok(b.as_bytes().to_vec()),
                Err(code) => Err(GeocodeError::Status(code)),
            }
        }
    }

    #[test]
    fn builds_reverse_url_with_language() {
        let r = NominatimResolver::new(CannedClient::ok("{}"), "http://geo.local/")
            .with_language("de");
        assert_eq!(
            r.reverse_url(49.0, 8.5),
            "http://geo.local/reverse?format=jsonv2&lat=49&lon=8.5&zoom=10&addressdetails=1&accept-language=de"
        );
    }

    #[test]
    fn picks_city_before_town() {
        let r = NominatimResolver::new(
            CannedClient::ok(r#"{"address":{"town":"Ettlingen","city":"Karlsruhe"}}"#),
            DEFAULT_NOMINATIM_URL,
        );
        assert_eq!(r.find_city(49.01, 8.40).unwrap(), "Karlsruhe");
    }

    #[test]
    fn http_status_propagates() {
        let client = CannedClient::status(503);
        let r = NominatimResolver::new(client, DEFAULT_NOMINATIM_URL);
        assert!(matches!(r.find_city(1.0, 1.0), Err(GeocodeError::Status(503))));
        assert_eq!(r.http.seen.lock().unwrap().len(), 1);
    }
}
