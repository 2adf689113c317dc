//! Clock abstraction for testable timestamps

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Render format for all timestamps in status documents (ISO-8601, UTC)
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A clock that provides the current time
pub trait Clock: fmt::Debug + Send + Sync {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;

    /// Current instant rendered as ISO-8601 text
    fn timestamp(&self) -> String {
        self.now().format(ISO_FORMAT).to_string()
    }
}

/// Real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock that starts at a fixed instant and advances one second per reading
#[derive(Debug)]
pub struct TickClock {
    epoch: DateTime<Utc>,
    ticks: AtomicI64,
}

impl TickClock {
    pub fn new(epoch: DateTime<Utc>) -> Self {
        Self {
            epoch,
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for TickClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed);
        self.epoch + Duration::seconds(tick)
    }
}

/// Default clock handle for aggregates constructed without one
pub(crate) fn system() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}
