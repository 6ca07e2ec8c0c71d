pub mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

/// Reverse geocoding boundary: coordinates in, city name out.
///
/// Implementations may block on the network, but must bound that blocking
/// themselves (e.g. an HTTP client timeout). Callers stop waiting after their
/// own deadline, yet a call that never returns keeps its worker thread alive.
pub trait CityResolver {
    fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

impl<R: CityResolver + ?Sized> CityResolver for std::sync::Arc<R> {
    fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        (**self).reverse_geocode(latitude, longitude)
    }
}

impl<R: CityResolver + ?Sized> CityResolver for Box<R> {
    fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        (**self).reverse_geocode(latitude, longitude)
    }
}
