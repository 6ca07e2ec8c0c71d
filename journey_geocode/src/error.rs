use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("http error: {0}")]
    Http(String),
    #[error("geocoder returned status {0}")]
    Status(u16),
    #[error("geocoder timeout")]
    Timeout,
    #[error("malformed geocoder response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no city found at {lat},{lon}")]
    NotFound { lat: f64, lon: f64 },
    #[error("geocoding disabled")]
    Disabled,
}

pub type Result<T> = std::result::Result<T, GeocodeError>;
