//! Error types for itinerary planning.
//!
//! Only configuration-time problems and total infeasibility surface as
//! errors. Variation operators never fail: infeasible outcomes are resolved
//! by rejection or by a no-op.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PlanError>;

/// Errors raised while configuring or running the planner.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// A timestamp or time-of-day string could not be parsed.
    #[error("invalid timestamp `{value}`: expected format {expected}")]
    InvalidTimestamp {
        /// The offending input.
        value: String,
        /// Human-readable description of the expected format.
        expected: &'static str,
    },

    /// The trip's return instant is earlier than its departure instant.
    #[error("return {returning} precedes departure {departure}")]
    ReturnBeforeDeparture {
        /// Trip departure instant.
        departure: NaiveDateTime,
        /// Trip return instant.
        returning: NaiveDateTime,
    },

    /// A planned day window would be empty or inverted.
    #[error("day window on {date} is empty: {start} is not before {end}")]
    EmptyDayWindow {
        /// Calendar date of the window.
        date: NaiveDate,
        /// Window start.
        start: NaiveDateTime,
        /// Window end.
        end: NaiveDateTime,
    },

    /// A place record could not be turned into a catalog entry.
    #[error("invalid place `{place_id}`: {reason}")]
    InvalidPlace {
        /// Identifier of the place record.
        place_id: String,
        /// Why the record was rejected.
        reason: String,
    },

    /// The catalog contains no usable attraction.
    #[error("catalog contains no schedulable attraction")]
    EmptyCatalog,

    /// An engine, generator, or evaluation parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Population construction produced no feasible itinerary.
    ///
    /// Distinct from a crash: the caller should ask the user to relax the
    /// trip constraints (longer days, fewer attractions per day, ...).
    #[error("no feasible itinerary after {attempts} construction attempts")]
    Infeasible {
        /// Total number of construction attempts made.
        attempts: usize,
    },
}
