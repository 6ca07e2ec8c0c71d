use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock abstraction used to decide what "now" means for an analysis.
///
/// - now_epoch_secs(): current time as Unix epoch seconds
/// - is_future(): helper to check a timestamp against the current time
pub trait Clock {
    fn now_epoch_secs(&self) -> i64;

    /// True when `ts` lies strictly after the current time.
    fn is_future(&self, ts: i64) -> bool {
        ts > self.now_epoch_secs()
    }
}

/// Default clock backed by `std::time::SystemTime`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now_epoch_secs(&self) -> i64 {
        // A system clock set before 1970 reads as the epoch itself.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Deterministic clock whose time can be set or advanced manually.
///
/// Clones share the same underlying instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<AtomicI64>,
}

impl FixedClock {
    pub fn at(epoch_secs: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(epoch_secs)),
        }
    }

    /// Advance the clock by `secs` seconds.
    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::Relaxed);
    }

    /// Set the absolute time.
    pub fn set(&self, epoch_secs: i64) {
        self.now.store(epoch_secs, Ordering::Relaxed);
    }
}

impl Clock for FixedClock {
    fn now_epoch_secs(&self) -> i64 {
        self.now.load(Ordering::Relaxed)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_epoch_secs(&self) -> i64 {
        (**self).now_epoch_secs()
    }
}
