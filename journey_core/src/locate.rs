//! City lookups for departure and destination.
//!
//! Each lookup runs on its own worker thread and reports back over a bounded
//! channel, so the caller can enforce a deadline. A worker that misses the
//! deadline is left to finish on its own; its late answer is dropped.
//!
//! Failures never propagate: they are logged and turn into an empty city name.
use crossbeam_channel as xch;
use journey_traits::CityResolver;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::LookupError;
use crate::lookup_error::map_lookup_error;
use crate::types::{TripSample, UNKNOWN_CITY};

type Pending = xch::Receiver<Result<String, LookupError>>;

/// Adapter around a `CityResolver` that bounds and tolerates lookups.
#[derive(Clone)]
pub struct LocationResolver {
    resolver: Arc<dyn CityResolver + Send + Sync>,
    timeout: Duration,
}

impl core::fmt::Debug for LocationResolver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LocationResolver")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Departure and destination as resolved for one trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCities {
    pub departure: String,
    pub destination: String,
}

impl LocationResolver {
    pub fn new(resolver: Arc<dyn CityResolver + Send + Sync>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Start a lookup on a worker thread.
    fn spawn(&self, lat: f64, lon: f64) -> Pending {
        let (tx, rx) = xch::bounded(1);
        let resolver = Arc::clone(&self.resolver);
        let spawned = std::thread::Builder::new()
            .name("city-lookup".into())
            .spawn(move || {
                let res = resolver
                    .reverse_geocode(lat, lon)
                    .map_err(|e| map_lookup_error(&*e));
                // Receiver gone means the caller already gave up on us.
                let _ = tx.send(res);
            });
        if let Err(e) = spawned {
            let (tx, rx) = xch::bounded(1);
            let _ = tx.send(Err(LookupError::Unavailable(format!(
                "cannot spawn lookup worker: {e}"
            ))));
            return rx;
        }
        rx
    }

    fn wait(rx: &Pending, deadline: Instant) -> Result<String, LookupError> {
        match rx.recv_deadline(deadline) {
            Ok(res) => res,
            Err(xch::RecvTimeoutError::Timeout) => Err(LookupError::Timeout),
            Err(xch::RecvTimeoutError::Disconnected) => Err(LookupError::Unavailable(
                "lookup worker exited without answering".into(),
            )),
        }
    }

    /// Look up a city, bounded by the configured timeout.
    pub fn try_resolve(&self, lat: f64, lon: f64) -> Result<String, LookupError> {
        let rx = self.spawn(lat, lon);
        Self::wait(&rx, Instant::now() + self.timeout)
    }

    /// Look up a city; any failure yields an empty name.
    pub fn resolve_city(&self, lat: f64, lon: f64) -> String {
        degrade(self.try_resolve(lat, lon), lat, lon)
    }

    /// Resolve departure (always) and destination (only for multi-sample trips).
    ///
    /// With `concurrent` both lookups are in flight at once and share one deadline.
    pub fn resolve_trip(
        &self,
        first: &TripSample,
        last: Option<&TripSample>,
        concurrent: bool,
    ) -> ResolvedCities {
        if !concurrent {
            let departure = self.resolve_city(first.position_lat, first.position_long);
            let destination = match last {
                Some(l) => self.resolve_city(l.position_lat, l.position_long),
                None => UNKNOWN_CITY.to_string(),
            };
            return ResolvedCities {
                departure,
                destination,
            };
        }

        let deadline = Instant::now() + self.timeout;
        let dep_rx = self.spawn(first.position_lat, first.position_long);
        let dst_rx = last.map(|l| (self.spawn(l.position_lat, l.position_long), l));

        let departure = degrade(
            Self::wait(&dep_rx, deadline),
            first.position_lat,
            first.position_long,
        );
        let destination = match dst_rx {
            Some((rx, l)) => degrade(Self::wait(&rx, deadline), l.position_lat, l.position_long),
            None => UNKNOWN_CITY.to_string(),
        };
        ResolvedCities {
            departure,
            destination,
        }
    }
}

fn degrade(res: Result<String, LookupError>, lat: f64, lon: f64) -> String {
    match res {
        Ok(city) => city,
        Err(e) => {
            tracing::warn!(lat, lon, error = %e, "city lookup failed; leaving city empty");
            String::new()
        }
    }
}
