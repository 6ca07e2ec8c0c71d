//! HTTP client abstraction for testability.

use std::time::Duration;

use crate::error::{GeocodeError, Result};

/// Blocking HTTP GET used by the geocoders.
///
/// Injected so resolvers can be exercised with canned responses in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request and returns the response body.
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// User-Agent sent when none is configured. Nominatim's usage policy rejects anonymous clients.
pub const DEFAULT_USER_AGENT: &str = concat!("journey-master/", env!("CARGO_PKG_VERSION"));

/// Real HTTP client implementation using blocking reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a client with a per-request timeout and User-Agent.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| GeocodeError::Http(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(map_reqwest_error)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> GeocodeError {
    if e.is_timeout() {
        GeocodeError::Timeout
    } else {
        GeocodeError::Http(e.to_string())
    }
}
