//! Clock port
//!
//! Scheduling in Cadence is date-only and evaluated lazily, so the only thing
//! the engines need from the outside world is "what time is it now".

use chrono::{DateTime, NaiveDate, Utc};

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date (UTC)
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
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

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Pin the clock to midday UTC on `date`
    pub fn on(date: NaiveDate) -> Self {
        let at = date.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc();
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
