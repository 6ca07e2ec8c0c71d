//! Resolver stand-ins shared by unit tests, integration tests and benches.

use journey_traits::CityResolver;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Resolver that always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingResolver;

impl CityResolver for FailingResolver {
    fn reverse_geocode(&self, _lat: f64, _lon: f64) -> Result<String, BoxError> {
        Err("geocoder unavailable".into())
    }
}

/// Resolver that answers after a delay.
#[derive(Debug, Clone)]
pub struct SlowResolver {
    city: String,
    delay: Duration,
}

impl SlowResolver {
    pub fn new(city: impl Into<String>, delay: Duration) -> Self {
        Self {
            city: city.into(),
            delay,
        }
    }
}

impl CityResolver for SlowResolver {
    fn reverse_geocode(&self, _lat: f64, _lon: f64) -> Result<String, BoxError> {
        std::thread::sleep(self.delay);
        Ok(self.city.clone())
    }
}

/// Resolver with a small gazetteer: returns the entry closest to the query
/// within `radius_deg`, fails otherwise. Counts calls.
#[derive(Debug, Default)]
pub struct MapResolver {
    places: Vec<(f64, f64, String)>,
    radius_deg: f64,
    calls: AtomicUsize,
}

impl MapResolver {
    pub fn new(radius_deg: f64) -> Self {
        Self {
            places: Vec::new(),
            radius_deg,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_place(mut self, lat: f64, lon: f64, city: impl Into<String>) -> Self {
        self.places.push((lat, lon, city.into()));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl CityResolver for MapResolver {
    fn reverse_geocode(&self, lat: f64, lon: f64) -> Result<String, BoxError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.places
            .iter()
            .map(|(plat, plon, city)| ((plat - lat).hypot(plon - lon), city))
            .filter(|(d, _)| *d <= self.radius_deg)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, city)| city.clone())
            .ok_or_else(|| format!("city not found at {lat},{lon}").into())
    }
}
