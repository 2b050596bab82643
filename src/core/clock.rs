//! Calendar clock: "today" in the poll's timezone.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Source of the current day and instant.
pub trait CalendarClock: Send + Sync {
    /// Current calendar date in the configured timezone.
    fn today(&self) -> NaiveDate;

    /// Current instant, used for `inserted_at`.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock pinned to a named timezone.
#[derive(Debug, Clone, Copy)]
pub struct ZonedClock {
    tz: Tz,
}

impl ZonedClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

/// Calendar date of the instant `at` as seen in `tz`.
pub fn day_in(tz: Tz, at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&tz).date_naive()
}

impl CalendarClock for ZonedClock {
    fn today(&self) -> NaiveDate {
        day_in(self.tz, Utc::now())
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen on one day. The instant still advances so that two submits
/// in a row get distinct timestamps.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    day: NaiveDate,
}

impl FixedClock {
    pub fn new(day: NaiveDate) -> Self {
        Self { day }
    }
}

impl CalendarClock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.day
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
