//! Construction strategies.
//!
//! Every strategy builds an itinerary day by day. A day attempt returns its
//! visits; an attempt below the per-day minimum is discarded and the day is
//! retried with fresh randomness. Only accepted days mark their attractions
//! as used, so a failed attempt rolls back on its own.

use super::config::GeneratorConfig;
use super::diversity::{CatalogStats, Priority};
use crate::models::{AttractionId, Catalog, DayWindow, Itinerary, ScheduledVisit, TimeWindow};
use chrono::NaiveDateTime;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Named construction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// First-fit over a priority-sorted order.
    Greedy,
    /// First-fit over a shuffled order.
    Random,
    /// One random pick per fixed-length slot.
    Timeslot,
    /// One random pick per opening-hours bucket.
    Cluster,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Greedy,
        Strategy::Random,
        Strategy::Timeslot,
        Strategy::Cluster,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::Random => "random",
            Strategy::Timeslot => "timeslot",
            Strategy::Cluster => "cluster",
        }
    }
}

/// Opening-hours bucket: `(open_hour / 3, close_hour / 3)`.
type ClusterKey = (u32, u32);

/// Builds single itineraries for a fixed catalog and set of days.
pub struct ScheduleBuilder<'a> {
    catalog: &'a Catalog,
    days: &'a [DayWindow],
    config: &'a GeneratorConfig,
    stats: &'a CatalogStats,
    clusters: BTreeMap<ClusterKey, Vec<AttractionId>>,
}

impl<'a> ScheduleBuilder<'a> {
    pub fn new(
        catalog: &'a Catalog,
        days: &'a [DayWindow],
        config: &'a GeneratorConfig,
        stats: &'a CatalogStats,
    ) -> Self {
        use chrono::Timelike;

        let mut clusters: BTreeMap<ClusterKey, Vec<AttractionId>> = BTreeMap::new();
        for (id, attraction, _) in catalog.iter() {
            let key = (attraction.open.hour() / 3, attraction.close.hour() / 3);
            clusters.entry(key).or_default().push(id);
        }

        Self {
            catalog,
            days,
            config,
            stats,
            clusters,
        }
    }

    /// Runs one attempt of `strategy`.
    pub fn build<R: Rng + ?Sized>(&self, strategy: Strategy, rng: &mut R) -> Option<Itinerary> {
        match strategy {
            Strategy::Greedy => self.greedy(rng),
            Strategy::Random => self.random(rng),
            Strategy::Timeslot => self.timeslot(rng),
            Strategy::Cluster => self.cluster(rng),
        }
    }

    /// The visit window for `id` starting at `cursor`, if it fits.
    ///
    /// Opening hours are anchored on the day's date. The visit must start
    /// at or after opening and end by both closing time and day end.
    pub fn can_place(
        &self,
        id: AttractionId,
        cursor: NaiveDateTime,
        day: &DayWindow,
    ) -> Option<TimeWindow> {
        let attraction = self.catalog.attraction(id);
        let end = cursor + attraction.stay;
        let fits = cursor >= day.at(attraction.open)
            && end <= day.at(attraction.close)
            && end <= day.end();
        fits.then(|| TimeWindow::new(cursor, end))
    }

    fn greedy<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Itinerary> {
        let priority = *Priority::ALL.choose(rng)?;
        let order = priority.order(self.stats, self.catalog);
        self.build_days(rng, |day, used, _| self.fill_in_order(&order, day, used))
    }

    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Itinerary> {
        let mut order: Vec<AttractionId> = self.catalog.ids().collect();
        self.build_days(rng, |day, used, rng| {
            order.shuffle(rng);
            self.fill_in_order(&order, day, used)
        })
    }

    fn timeslot<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Itinerary> {
        self.build_days(rng, |day, used, rng| {
            let mut visits: Vec<ScheduledVisit> = Vec::new();
            for slot_start in self.slot_starts(day) {
                if visits.len() >= self.config.max_attractions_per_day {
                    break;
                }
                // The previous visit may outlast its slot.
                if visits.last().is_some_and(|v| slot_start < v.window.end) {
                    continue;
                }
                let candidates = self.candidates(self.catalog.ids(), slot_start, day, used, &visits);
                if let Some(&(id, window)) = candidates.choose(rng) {
                    visits.push(ScheduledVisit::new(id, window));
                }
            }
            visits
        })
    }

    fn cluster<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Itinerary> {
        let buffer = self.config.travel_buffer();
        self.build_days(rng, |day, used, rng| {
            let mut visits: Vec<ScheduledVisit> = Vec::new();
            let mut cursor = day.start();
            for members in self.clusters.values() {
                if visits.len() >= self.config.max_attractions_per_day {
                    break;
                }
                let candidates =
                    self.candidates(members.iter().copied(), cursor, day, used, &visits);
                if let Some(&(id, window)) = candidates.choose(rng) {
                    visits.push(ScheduledVisit::new(id, window));
                    cursor = window.end + buffer;
                }
            }
            visits
        })
    }

    /// Builds every day with retries; `None` if some day never reaches the
    /// minimum.
    fn build_days<R, F>(&self, rng: &mut R, mut attempt_day: F) -> Option<Itinerary>
    where
        R: Rng + ?Sized,
        F: FnMut(&DayWindow, &HashSet<AttractionId>, &mut R) -> Vec<ScheduledVisit>,
    {
        let mut used: HashSet<AttractionId> = HashSet::new();
        let mut visits: Vec<ScheduledVisit> = Vec::new();

        for day in self.days {
            let accepted = (0..self.config.max_retry_per_day)
                .map(|_| attempt_day(day, &used, rng))
                .find(|attempt| attempt.len() >= self.config.min_attractions_per_day)?;
            used.extend(accepted.iter().map(|v| v.attraction));
            visits.extend(accepted);
        }

        Some(Itinerary::new(visits))
    }

    /// Sequential first-fit: at each cursor admit the first free attraction
    /// in `order` that fits, then advance past it plus the travel buffer.
    fn fill_in_order(
        &self,
        order: &[AttractionId],
        day: &DayWindow,
        used: &HashSet<AttractionId>,
    ) -> Vec<ScheduledVisit> {
        let buffer = self.config.travel_buffer();
        let mut visits: Vec<ScheduledVisit> = Vec::new();
        let mut cursor = day.start();

        while visits.len() < self.config.max_attractions_per_day && cursor < day.end() {
            let next = order
                .iter()
                .filter(|id| is_free(**id, used, &visits))
                .find_map(|&id| self.can_place(id, cursor, day).map(|w| (id, w)));
            let Some((id, window)) = next else {
                break;
            };
            visits.push(ScheduledVisit::new(id, window));
            cursor = window.end + buffer;
        }

        visits
    }

    fn candidates(
        &self,
        pool: impl Iterator<Item = AttractionId>,
        cursor: NaiveDateTime,
        day: &DayWindow,
        used: &HashSet<AttractionId>,
        today: &[ScheduledVisit],
    ) -> Vec<(AttractionId, TimeWindow)> {
        pool.filter(|id| is_free(*id, used, today))
            .filter_map(|id| self.can_place(id, cursor, day).map(|w| (id, w)))
            .collect()
    }

    /// Slot starts from day start, one per `timeslot_hours`; the last slot
    /// is clipped at day end.
    fn slot_starts(&self, day: &DayWindow) -> Vec<NaiveDateTime> {
        let step = self.config.timeslot();
        let mut starts = Vec::new();
        let mut cursor = day.start();
        while cursor < day.end() {
            starts.push(cursor);
            cursor += step;
        }
        starts
    }
}

fn is_free(id: AttractionId, used: &HashSet<AttractionId>, today: &[ScheduledVisit]) -> bool {
    !used.contains(&id) && !today.iter().any(|v| v.attraction == id)
}
