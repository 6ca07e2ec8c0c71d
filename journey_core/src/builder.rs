//! Type-state builder for `TripAnalyzer`, and the analyzer itself.
//!
//! The builder enforces at compile time that a city resolver is provided
//! before `build()` is available. `try_build()` is always available for dynamic checks.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use journey_traits::{CityResolver, Clock, SystemClock};

use crate::config::AnalysisCfg;
use crate::consumption::average;
use crate::error::{BuildError, RequestField, Result, TripError};
use crate::locate::LocationResolver;
use crate::scanner::TripScanner;
use crate::types::{TripAnalysis, TripRequest};
use crate::validate::{validate_request, validate_sample};

/// Upper bound accepted for `lookup_timeout_ms` (2 minutes).
const MAX_LOOKUP_TIMEOUT_MS: u64 = 120_000;

/// Analyzes trips. Cheap to share; holds no per-trip state.
pub struct TripAnalyzer {
    locator: LocationResolver,
    clock: Arc<dyn Clock + Send + Sync>,
    cfg: AnalysisCfg,
}

impl core::fmt::Debug for TripAnalyzer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TripAnalyzer")
            .field("cfg", &self.cfg)
            .field("locator", &self.locator)
            .finish_non_exhaustive()
    }
}

impl TripAnalyzer {
    /// Start building a TripAnalyzer.
    pub fn builder() -> TripAnalyzerBuilder<Missing> {
        TripAnalyzerBuilder::default()
    }

    pub fn config(&self) -> &AnalysisCfg {
        &self.cfg
    }

    /// Run one analysis.
    ///
    /// Request fields are checked first; then each sample is validated and
    /// scanned in order. The first failure aborts with no partial result.
    /// City lookups happen last and can only degrade the city fields.
    pub fn analyze(&self, req: &TripRequest) -> std::result::Result<TripAnalysis, TripError> {
        validate_request(req)?;

        let mut scanner = TripScanner::new(req.gas_tank_size, req.break_threshold);
        for (index, sample) in req.data.iter().enumerate() {
            validate_sample(index, sample, &*self.clock)?;
            scanner.step(index, sample)?;
        }
        let outcome = scanner.finish();

        let (Some(first), Some(last)) = (outcome.first, outcome.last) else {
            return Err(TripError::InvalidRequest {
                field: RequestField::Data,
            });
        };
        let destination_sample = (outcome.samples_seen > 1).then_some(&last);
        let cities =
            self.locator
                .resolve_trip(&first, destination_sample, self.cfg.concurrent_lookups);

        let consumption = average(&outcome.consumption_samples);
        tracing::info!(
            vin = %req.vin,
            samples = outcome.samples_seen,
            breaks = outcome.breaks.len(),
            refuel_stops = outcome.refuel_stops.len(),
            consumption,
            "trip analyzed"
        );

        Ok(TripAnalysis {
            vin: req.vin.clone(),
            consumption,
            departure: cities.departure,
            destination: cities.destination,
            breaks: outcome.breaks,
            refuel_stops: outcome.refuel_stops,
        })
    }
}

// ── Type-state markers ───────────────────────────────────────────────────────

pub struct Missing;
pub struct Set;

/// Builder for `TripAnalyzer`. Configuration is validated on `build()`.
pub struct TripAnalyzerBuilder<R> {
    resolver: Option<Arc<dyn CityResolver + Send + Sync>>,
    clock: Option<Arc<dyn Clock + Send + Sync>>,
    cfg: Option<AnalysisCfg>,
    _r: PhantomData<R>,
}

impl Default for TripAnalyzerBuilder<Missing> {
    fn default() -> Self {
        Self {
            resolver: None,
            clock: None,
            cfg: None,
            _r: PhantomData,
        }
    }
}

fn validate_and_build(
    resolver: Arc<dyn CityResolver + Send + Sync>,
    clock: Option<Arc<dyn Clock + Send + Sync>>,
    cfg: AnalysisCfg,
) -> Result<TripAnalyzer> {
    if cfg.lookup_timeout_ms == 0 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "lookup_timeout_ms must be >= 1",
        )));
    }
    if cfg.lookup_timeout_ms > MAX_LOOKUP_TIMEOUT_MS {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "lookup_timeout_ms is unreasonably large (>2min)",
        )));
    }

    let locator = LocationResolver::new(resolver, Duration::from_millis(cfg.lookup_timeout_ms));
    let clock = clock.unwrap_or_else(|| Arc::new(SystemClock::new()));
    Ok(TripAnalyzer {
        locator,
        clock,
        cfg,
    })
}

/// Analyzer with default settings and the given lookup bound, clamped to
/// the range `validate_and_build` accepts.
pub(crate) fn one_shot(
    resolver: Arc<dyn CityResolver + Send + Sync>,
    clock: Arc<dyn Clock + Send + Sync>,
    lookup_timeout: Duration,
) -> TripAnalyzer {
    let ms = u64::try_from(lookup_timeout.as_millis())
        .unwrap_or(u64::MAX)
        .clamp(1, MAX_LOOKUP_TIMEOUT_MS);
    let cfg = AnalysisCfg {
        lookup_timeout_ms: ms,
        ..AnalysisCfg::default()
    };
    let locator = LocationResolver::new(resolver, Duration::from_millis(ms));
    TripAnalyzer {
        locator,
        clock,
        cfg,
    }
}

impl<R> TripAnalyzerBuilder<R> {
    /// Fallible build available in any type-state; returns detailed error for missing pieces.
    pub fn try_build(self) -> Result<TripAnalyzer> {
        let resolver = self
            .resolver
            .ok_or_else(|| eyre::Report::new(BuildError::MissingResolver))?;
        validate_and_build(resolver, self.clock, self.cfg.unwrap_or_default())
    }

    pub fn with_config(mut self, cfg: AnalysisCfg) -> Self {
        self.cfg = Some(cfg);
        self
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        let mut c = self.cfg.unwrap_or_default();
        c.lookup_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.cfg = Some(c);
        self
    }

    pub fn with_concurrent_lookups(mut self, on: bool) -> Self {
        let mut c = self.cfg.unwrap_or_default();
        c.concurrent_lookups = on;
        self.cfg = Some(c);
        self
    }

    /// Provide a custom clock; defaults to `SystemClock` when not provided.
    pub fn with_clock(mut self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn with_resolver(
        self,
        resolver: impl CityResolver + Send + Sync + 'static,
    ) -> TripAnalyzerBuilder<Set> {
        self.with_shared_resolver(Arc::new(resolver))
    }

    /// Use a resolver that is shared with other owners.
    pub fn with_shared_resolver(
        self,
        resolver: Arc<dyn CityResolver + Send + Sync>,
    ) -> TripAnalyzerBuilder<Set> {
        TripAnalyzerBuilder {
            resolver: Some(resolver),
            clock: self.clock,
            cfg: self.cfg,
            _r: PhantomData,
        }
    }
}

impl TripAnalyzerBuilder<Set> {
    /// Build the analyzer. Only available once a resolver is set.
    pub fn build(self) -> Result<TripAnalyzer> {
        self.try_build()
    }
}
