//! Day window planning.
//!
//! Turns a trip's departure/return instants and daily start/end times into
//! one [`DayWindow`] per calendar day spanned. The first day starts at the
//! actual departure; the last day ends at the actual return; every other
//! bound uses the daily times verbatim.

use crate::error::{PlanError, Result};
use crate::models::{parse_datetime, parse_time_of_day, DayWindow, TimeWindow};
use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Trip-level parameters as received from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Departure instant, `YYYY-MM-DDTHH:MM`.
    pub departure: String,
    /// Return instant, `YYYY-MM-DDTHH:MM`.
    #[serde(rename = "return")]
    pub returning: String,
    /// Daily start time, `HH:MM`.
    pub daily_start: String,
    /// Daily end time, `HH:MM`.
    pub daily_end: String,
    /// Stay applied to places that do not carry their own.
    #[serde(default = "default_stay_hours")]
    pub stay_hours: f64,
}

fn default_stay_hours() -> f64 {
    1.5
}

impl TripRequest {
    /// Plans the day windows for this request.
    pub fn day_windows(&self) -> Result<Vec<DayWindow>> {
        DayWindowPlanner::plan_str(
            &self.departure,
            &self.returning,
            &self.daily_start,
            &self.daily_end,
        )
    }
}

/// Partitions a trip into per-day activity windows.
pub struct DayWindowPlanner;

impl DayWindowPlanner {
    /// Plans day windows from string inputs.
    ///
    /// # Errors
    /// - [`PlanError::InvalidTimestamp`] if any input fails to parse
    /// - [`PlanError::ReturnBeforeDeparture`] if return precedes departure
    /// - [`PlanError::EmptyDayWindow`] if a day's start is not before its end
    pub fn plan_str(
        departure: &str,
        returning: &str,
        daily_start: &str,
        daily_end: &str,
    ) -> Result<Vec<DayWindow>> {
        Self::plan(
            parse_datetime(departure)?,
            parse_datetime(returning)?,
            parse_time_of_day(daily_start)?,
            parse_time_of_day(daily_end)?,
        )
    }

    /// Plans day windows from parsed values.
    pub fn plan(
        departure: NaiveDateTime,
        returning: NaiveDateTime,
        daily_start: NaiveTime,
        daily_end: NaiveTime,
    ) -> Result<Vec<DayWindow>> {
        if returning < departure {
            return Err(PlanError::ReturnBeforeDeparture {
                departure,
                returning,
            });
        }

        let total_days = (returning.date() - departure.date()).num_days() + 1;
        let last = total_days - 1;
        let mut windows = Vec::with_capacity(total_days as usize);

        for day in 0..total_days {
            let date = departure.date() + TimeDelta::days(day);
            let start = if day == 0 {
                departure
            } else {
                date.and_time(daily_start)
            };
            let end = if day == last {
                returning
            } else {
                date.and_time(daily_end)
            };

            if start >= end {
                return Err(PlanError::EmptyDayWindow { date, start, end });
            }
            windows.push(DayWindow {
                date,
                window: TimeWindow::new(start, end),
            });
        }

        Ok(windows)
    }
}
