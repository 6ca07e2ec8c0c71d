use thiserror::Error;

/// Request-level field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestField {
    BreakThreshold,
    GasTankSize,
    Vin,
    Data,
}

impl RequestField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BreakThreshold => "BreakThreshold",
            Self::GasTankSize => "GasTankSize",
            Self::Vin => "Vin",
            Self::Data => "Data",
        }
    }
}

impl std::fmt::Display for RequestField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sample field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleField {
    FuelLevel,
    Odometer,
    PositionLong,
    PositionLat,
    Timestamp,
}

impl SampleField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FuelLevel => "FuelLevel",
            Self::Odometer => "Odometer",
            Self::PositionLong => "PositionLong",
            Self::PositionLat => "PositionLat",
            Self::Timestamp => "Timestamp",
        }
    }
}

impl std::fmt::Display for SampleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal analysis failures. Any of these aborts the whole analysis.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TripError {
    #[error("{field} not valid")]
    InvalidRequest { field: RequestField },
    #[error("sample {index}: {field} not valid")]
    InvalidSample { index: usize, field: SampleField },
    #[error("sample {index}: fuel consumption is inconsistent with movement")]
    InconsistentFuelMovement { index: usize },
}

/// City lookup failures. Never fatal: the affected city degrades to an empty name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("lookup timed out")]
    Timeout,
    #[error("no city at location")]
    NotFound,
    #[error("resolver unavailable: {0}")]
    Unavailable(String),
    #[error("lookup failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing city resolver")]
    MissingResolver,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
