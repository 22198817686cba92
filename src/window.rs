//! Time windows for usage queries.
//!
//! All arithmetic is in UTC: a "day" starts at 00:00 UTC, matching the way
//! transcript timestamps are written.

use chrono::{DateTime, NaiveTime, TimeDelta, Timelike, Utc};
use serde::Serialize;

pub const HOUR: TimeDelta = TimeDelta::hours(1);
pub const DAY: TimeDelta = TimeDelta::days(1);
pub const WEEK: TimeDelta = TimeDelta::days(7);

/// Floor `ts` to the start of its hour.
pub fn truncate_to_hour(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.with_nanosecond(0)
        .and_then(|d| d.with_second(0))
        .and_then(|d| d.with_minute(0))
        .unwrap_or(ts)
}

/// Floor `ts` to 00:00 UTC of its calendar day.
pub fn truncate_to_day(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// A time range for [`crate::usage::date_usage`].
///
/// Callers build these as `[from, to)`, but membership is tested with both
/// ends excluded; see [`UsageWindow::contains`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UsageWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl UsageWindow {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    pub fn current_hour(now: DateTime<Utc>) -> Self {
        let from = truncate_to_hour(now);
        Self::new(from, from + HOUR)
    }

    pub fn current_day(now: DateTime<Utc>) -> Self {
        let from = truncate_to_day(now);
        Self::new(from, from + DAY)
    }

    pub fn trailing_week(now: DateTime<Utc>) -> Self {
        Self::new(now - WEEK, now)
    }

    /// `from < ts < to`.
    ///
    /// NOTE: an event stamped exactly at either boundary is dropped, so an
    /// event at 10:00:00 counts toward neither the 09:00 nor the 10:00 hour.
    /// This looks unintended given how the windows are built, but it is the
    /// established behavior; confirm with the owners before switching to
    /// `from <= ts < to`.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts > self.from && ts < self.to
    }
}

/// The usage queries shown on the status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Session,
    Hour,
    Day,
    Week,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Session, Period::Hour, Period::Day, Period::Week];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
        }
    }

    /// The time window for this period, `None` for the session query.
    pub fn window(&self, now: DateTime<Utc>) -> Option<UsageWindow> {
        match self {
            Self::Session => None,
            Self::Hour => Some(UsageWindow::current_hour(now)),
            Self::Day => Some(UsageWindow::current_day(now)),
            Self::Week => Some(UsageWindow::trailing_week(now)),
        }
    }
}
