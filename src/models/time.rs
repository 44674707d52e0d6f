//! Time window models.
//!
//! All instants are local wall-clock [`NaiveDateTime`] values; the trip is
//! assumed to happen in a single time zone.

use crate::error::{PlanError, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Format accepted for trip instants, e.g. `2024-03-20T09:00`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Format accepted for daily times of day, e.g. `09:00`.
pub const TIME_FORMAT: &str = "%H:%M";

/// A closed interval `[start, end]` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Interval start.
    pub start: NaiveDateTime,
    /// Interval end.
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a new window. Callers guarantee `start < end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        debug_assert!(start < end, "time window must satisfy start < end");
        Self { start, end }
    }

    /// Creates a window starting at `start` and lasting `duration`.
    pub fn starting_at(start: NaiveDateTime, duration: TimeDelta) -> Self {
        Self::new(start, start + duration)
    }

    /// Length of the window.
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Whether `other` lies entirely inside this window.
    #[inline]
    pub fn contains_window(&self, other: &TimeWindow) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether two windows share any instant beyond a touching boundary.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Calendar date of the window start.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

/// The activity window of one calendar day of the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    /// Calendar date.
    pub date: NaiveDate,
    /// Bounds for visits on this day.
    pub window: TimeWindow,
}

impl DayWindow {
    /// Day start instant.
    #[inline]
    pub fn start(&self) -> NaiveDateTime {
        self.window.start
    }

    /// Day end instant.
    #[inline]
    pub fn end(&self) -> NaiveDateTime {
        self.window.end
    }

    /// Anchors a time of day on this day's date.
    #[inline]
    pub fn at(&self, time: NaiveTime) -> NaiveDateTime {
        self.date.and_time(time)
    }
}

/// Parses a trip instant in [`DATETIME_FORMAT`].
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), DATETIME_FORMAT).map_err(|_| {
        PlanError::InvalidTimestamp {
            value: value.to_string(),
            expected: "YYYY-MM-DDTHH:MM",
        }
    })
}

/// Parses a time of day in `HH:MM` or the compact `HHMM` form.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H%M"))
        .map_err(|_| PlanError::InvalidTimestamp {
            value: value.to_string(),
            expected: "HH:MM or HHMM",
        })
}

/// Converts a duration in fractional hours to a [`TimeDelta`], rounded to
/// the second.
pub fn hours_to_delta(hours: f64) -> TimeDelta {
    TimeDelta::seconds((hours * 3600.0).round() as i64)
}
