//! Candidate place catalog.
//!
//! Attractions live in an arena and are addressed by [`AttractionId`]; the
//! catalog is built once per request and is read-only afterwards. Visits
//! refer to attractions by id and never hold a reference into the arena.

use super::time::{hours_to_delta, parse_time_of_day, TimeWindow};
use crate::error::{PlanError, Result};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Dense index of an attraction inside its [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttractionId(pub usize);

impl AttractionId {
    /// Arena index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A candidate place with daily opening bounds and an expected stay.
#[derive(Debug, Clone, PartialEq)]
pub struct Attraction {
    /// External place identifier.
    pub place_id: String,
    /// Location used for the distance index.
    pub location: GeoPoint,
    /// Daily opening time.
    pub open: NaiveTime,
    /// Daily closing time.
    pub close: NaiveTime,
    /// Expected stay.
    pub stay: TimeDelta,
}

impl Attraction {
    /// Creates an attraction with a stay given in fractional hours.
    pub fn new(
        place_id: impl Into<String>,
        location: GeoPoint,
        open: NaiveTime,
        close: NaiveTime,
        stay_hours: f64,
    ) -> Self {
        Self {
            place_id: place_id.into(),
            location,
            open,
            close,
            stay: hours_to_delta(stay_hours),
        }
    }

    /// Opening window anchored on `date`, or `None` when the place never
    /// opens on a single calendar day (close at or before open).
    pub fn open_window_on(&self, date: NaiveDate) -> Option<TimeWindow> {
        (self.open < self.close)
            .then(|| TimeWindow::new(date.and_time(self.open), date.and_time(self.close)))
    }

    /// Whether `window` lies inside this attraction's opening hours on the
    /// window's own date.
    pub fn admits(&self, window: &TimeWindow) -> bool {
        self.open_window_on(window.date())
            .is_some_and(|open| open.contains_window(window))
    }
}

/// Evaluation data attached to an attraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceMetadata {
    /// Price level, typically 0–4.
    pub price_level: i32,
    /// Average rating, typically 0–5.
    pub rating: f64,
    /// Number of ratings; used as popularity.
    pub rating_count: u64,
    /// Category tags.
    pub categories: BTreeSet<String>,
}

impl PlaceMetadata {
    /// Whether any tag of this place is in `categories`.
    pub fn has_any_category(&self, categories: &BTreeSet<String>) -> bool {
        !self.categories.is_disjoint(categories)
    }
}

/// Daily opening hours of a place record, as `HHMM` or `HH:MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub open: String,
    pub close: String,
}

/// A fully resolved place as supplied by the place-search collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub place_id: String,
    pub lat: f64,
    pub lng: f64,
    /// Places without opening hours cannot be scheduled and are skipped.
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub price_level: i32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub user_rating_totals: u64,
    #[serde(default, alias = "types")]
    pub categories: Vec<String>,
    /// Overrides the request-wide stay duration.
    #[serde(default)]
    pub stay_hours: Option<f64>,
}

/// Read-only arena of attractions and their metadata.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    attractions: Vec<Attraction>,
    metadata: Vec<PlaceMetadata>,
    by_place_id: HashMap<String, AttractionId>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attraction and returns its id.
    ///
    /// Fails if the place id is already present or the stay is not positive.
    pub fn insert(&mut self, attraction: Attraction, metadata: PlaceMetadata) -> Result<AttractionId> {
        if self.by_place_id.contains_key(&attraction.place_id) {
            return Err(PlanError::InvalidPlace {
                place_id: attraction.place_id,
                reason: "duplicate place id".into(),
            });
        }
        if attraction.stay <= TimeDelta::zero() {
            return Err(PlanError::InvalidPlace {
                place_id: attraction.place_id,
                reason: "stay duration must be positive".into(),
            });
        }
        let id = AttractionId(self.attractions.len());
        self.by_place_id.insert(attraction.place_id.clone(), id);
        self.attractions.push(attraction);
        self.metadata.push(metadata);
        Ok(id)
    }

    /// Builds a catalog from place records.
    ///
    /// Records without opening hours, or whose hours do not form a window
    /// within one day, are skipped with a warning. Malformed hours,
    /// non-finite coordinates, and duplicate ids are errors.
    pub fn from_records(records: &[PlaceRecord], default_stay_hours: f64) -> Result<Self> {
        let mut catalog = Self::new();

        for record in records {
            let Some(hours) = &record.opening_hours else {
                tracing::warn!(place_id = %record.place_id, "skipping place without opening hours");
                continue;
            };
            let open = parse_time_of_day(&hours.open)?;
            let close = parse_time_of_day(&hours.close)?;
            if close <= open {
                tracing::warn!(
                    place_id = %record.place_id,
                    %open,
                    %close,
                    "skipping place whose opening hours cross midnight"
                );
                continue;
            }
            if !record.lat.is_finite() || !record.lng.is_finite() {
                return Err(PlanError::InvalidPlace {
                    place_id: record.place_id.clone(),
                    reason: "coordinates must be finite".into(),
                });
            }
            let stay_hours = record.stay_hours.unwrap_or(default_stay_hours);
            if !stay_hours.is_finite() || stay_hours <= 0.0 {
                return Err(PlanError::InvalidPlace {
                    place_id: record.place_id.clone(),
                    reason: format!("stay of {stay_hours} hours is not positive"),
                });
            }

            let attraction = Attraction::new(
                record.place_id.clone(),
                GeoPoint::new(record.lat, record.lng),
                open,
                close,
                stay_hours,
            );
            let metadata = PlaceMetadata {
                price_level: record.price_level,
                rating: record.rating,
                rating_count: record.user_rating_totals,
                categories: record.categories.iter().cloned().collect(),
            };
            catalog.insert(attraction, metadata)?;
        }

        if catalog.is_empty() {
            return Err(PlanError::EmptyCatalog);
        }
        tracing::info!(
            places = records.len(),
            attractions = catalog.len(),
            "catalog built"
        );
        Ok(catalog)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.attractions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attractions.is_empty()
    }

    /// All ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = AttractionId> + '_ {
        (0..self.attractions.len()).map(AttractionId)
    }

    /// Attraction by id.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this catalog.
    #[inline]
    pub fn attraction(&self, id: AttractionId) -> &Attraction {
        &self.attractions[id.0]
    }

    /// Metadata by id, `None` if `id` was not issued by this catalog.
    #[inline]
    pub fn metadata(&self, id: AttractionId) -> Option<&PlaceMetadata> {
        self.metadata.get(id.0)
    }

    /// Looks up an id by external place identifier.
    pub fn id_of(&self, place_id: &str) -> Option<AttractionId> {
        self.by_place_id.get(place_id).copied()
    }

    /// Iterates `(id, attraction, metadata)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (AttractionId, &Attraction, &PlaceMetadata)> + '_ {
        self.attractions
            .iter()
            .zip(self.metadata.iter())
            .enumerate()
            .map(|(i, (a, m))| (AttractionId(i), a, m))
    }
}
