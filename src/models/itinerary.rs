//! Itinerary representation.
//!
//! An [`Itinerary`] is stored flattened: one ordered sequence of
//! [`ScheduledVisit`] across all days. Operators that care about day
//! boundaries recover them with [`split_by_date`], keyed on each visit's own
//! calendar date; [`flatten`] is the inverse.

use super::catalog::{AttractionId, Catalog};
use super::time::TimeWindow;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of objectives in a [`Fitness`] vector.
pub const OBJECTIVE_COUNT: usize = 6;

/// One attraction placed into a concrete time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledVisit {
    pub attraction: AttractionId,
    pub window: TimeWindow,
}

impl ScheduledVisit {
    pub fn new(attraction: AttractionId, window: TimeWindow) -> Self {
        Self { attraction, window }
    }

    /// Calendar date of the visit start.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.window.date()
    }
}

/// The visits of one day, in time order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub visits: Vec<ScheduledVisit>,
}

impl DaySchedule {
    pub fn new(visits: Vec<ScheduledVisit>) -> Self {
        Self { visits }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Whether every visit ends no later than the next one starts.
    pub fn is_time_ordered(&self) -> bool {
        self.visits
            .windows(2)
            .all(|w| w[0].window.end <= w[1].window.start)
    }
}

/// Six objective values, all maximized.
///
/// | index | objective |
/// |---|---|
/// | 0 | distinct attractions |
/// | 1 | −normalized travel distance |
/// | 2 | −normalized price level sum |
/// | 3 | normalized rating sum |
/// | 4 | rating count sum (popularity) |
/// | 5 | −restaurant penalty |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fitness(pub [f64; OBJECTIVE_COUNT]);

impl Fitness {
    #[inline]
    pub fn values(&self) -> &[f64; OBJECTIVE_COUNT] {
        &self.0
    }

    pub fn attraction_count(&self) -> f64 {
        self.0[0]
    }

    pub fn distance(&self) -> f64 {
        self.0[1]
    }

    pub fn price(&self) -> f64 {
        self.0[2]
    }

    pub fn rating(&self) -> f64 {
        self.0[3]
    }

    pub fn popularity(&self) -> f64 {
        self.0[4]
    }

    pub fn restaurant(&self) -> f64 {
        self.0[5]
    }

    /// Pareto dominance under maximization.
    pub fn dominates(&self, other: &Fitness) -> bool {
        crate::ga::multi_objective::dominates(&self.0, &other.0)
    }
}

impl AsRef<[f64]> for Fitness {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// A multi-day candidate solution: the individual of the genetic search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Flattened visits across all days.
    pub visits: Vec<ScheduledVisit>,
    /// `None` until evaluated, and again after any change.
    pub fitness: Option<Fitness>,
}

impl Itinerary {
    pub fn new(visits: Vec<ScheduledVisit>) -> Self {
        Self {
            visits,
            fitness: None,
        }
    }

    /// Builds an unevaluated itinerary from per-day schedules.
    pub fn from_days(days: &[DaySchedule]) -> Self {
        Self::new(flatten(days))
    }

    /// Day view of the visits.
    pub fn days(&self) -> Vec<DaySchedule> {
        split_by_date(&self.visits)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Marks the fitness as stale.
    #[inline]
    pub fn invalidate_fitness(&mut self) {
        self.fitness = None;
    }

    /// Attraction ids in visit order.
    pub fn attraction_ids(&self) -> impl Iterator<Item = AttractionId> + '_ {
        self.visits.iter().map(|v| v.attraction)
    }

    /// Set of attraction ids.
    pub fn attraction_set(&self) -> HashSet<AttractionId> {
        self.attraction_ids().collect()
    }

    pub fn contains(&self, id: AttractionId) -> bool {
        self.visits.iter().any(|v| v.attraction == id)
    }

    /// Whether any attraction appears more than once.
    pub fn has_duplicates(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.visits.len());
        !self.attraction_ids().all(|id| seen.insert(id))
    }

    /// Translates into the caller-facing format, grouped by day.
    pub fn export(&self, catalog: &Catalog) -> ExportedItinerary {
        let days = self
            .days()
            .into_iter()
            .map(|day| {
                day.visits
                    .iter()
                    .map(|v| ExportedVisit {
                        place_id: catalog.attraction(v.attraction).place_id.clone(),
                        start: v.window.start,
                        end: v.window.end,
                    })
                    .collect()
            })
            .collect();
        ExportedItinerary { days }
    }
}

/// Concatenates day schedules into one visit sequence.
pub fn flatten(days: &[DaySchedule]) -> Vec<ScheduledVisit> {
    days.iter().flat_map(|d| d.visits.iter().copied()).collect()
}

/// Splits a visit sequence into days wherever the start date changes.
///
/// Runs of equal dates form one day; a date that reappears after another
/// date starts a new day.
pub fn split_by_date(visits: &[ScheduledVisit]) -> Vec<DaySchedule> {
    let mut days: Vec<DaySchedule> = Vec::new();
    let mut current_date: Option<NaiveDate> = None;

    for visit in visits {
        let date = visit.date();
        match days.last_mut() {
            Some(day) if current_date == Some(date) => day.visits.push(*visit),
            _ => {
                days.push(DaySchedule::new(vec![*visit]));
                current_date = Some(date);
            }
        }
    }

    days
}

/// One visit in the caller-facing itinerary format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedVisit {
    pub place_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// A Pareto-front itinerary as consumed by routing, persistence, and
/// presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedItinerary {
    pub days: Vec<Vec<ExportedVisit>>,
}

impl ExportedItinerary {
    /// All visits in order, ignoring day boundaries.
    pub fn visits(&self) -> impl Iterator<Item = &ExportedVisit> + '_ {
        self.days.iter().flatten()
    }
}
