//! Source of "now" for every operation that defaults to the current time
//!
//! Heuristics never read the system clock themselves; the boundary resolves
//! an optional timestamp through a `Clock` and passes it in.

use chrono::{DateTime, NaiveDate, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current UTC calendar date
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// `timestamp`, or now when absent
    fn resolve(&self, timestamp: Option<DateTime<Utc>>) -> DateTime<Utc> {
        timestamp.unwrap_or_else(|| self.now())
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
