//! Pairwise great-circle distance index.
//!
//! Precomputes the haversine distance between every unordered pair of
//! catalog attractions and a nominal travel duration at a fixed speed.
//! Feeds the distance objective only; this is not a routing engine.

use crate::models::{AttractionId, Catalog, GeoPoint};

/// Nominal travel speed used to derive durations.
pub const DEFAULT_SPEED_KMH: f64 = 60.0;

/// Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance and nominal duration between two attractions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TravelLeg {
    pub distance_km: f64,
    pub duration_hours: f64,
}

/// Symmetric distance lookup keyed by unordered attraction pairs.
///
/// Stored as a packed upper triangle; `get(a, b) == get(b, a)`.
#[derive(Debug, Clone)]
pub struct DistanceIndex {
    n: usize,
    legs: Vec<TravelLeg>,
}

impl DistanceIndex {
    /// Builds the index at [`DEFAULT_SPEED_KMH`].
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::with_speed(catalog, DEFAULT_SPEED_KMH)
    }

    /// Builds the index with a custom nominal speed.
    pub fn with_speed(catalog: &Catalog, speed_kmh: f64) -> Self {
        let points: Vec<GeoPoint> = catalog.iter().map(|(_, a, _)| a.location).collect();
        let n = points.len();
        let mut legs = Vec::with_capacity(n * n.saturating_sub(1) / 2);

        for i in 0..n {
            for j in (i + 1)..n {
                let distance_km = haversine_km(points[i], points[j]);
                legs.push(TravelLeg {
                    distance_km,
                    duration_hours: distance_km / speed_kmh,
                });
            }
        }

        tracing::debug!(attractions = n, pairs = legs.len(), "distance index built");
        Self { n, legs }
    }

    /// Number of attractions covered.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Leg between `a` and `b`; the zero leg when `a == b`.
    ///
    /// Returns `None` for ids outside the indexed catalog.
    pub fn get(&self, a: AttractionId, b: AttractionId) -> Option<TravelLeg> {
        let (i, j) = if a.0 <= b.0 { (a.0, b.0) } else { (b.0, a.0) };
        if j >= self.n {
            return None;
        }
        if i == j {
            return Some(TravelLeg::default());
        }
        // Row i of the packed triangle starts after the rows above it.
        let row_start = i * (2 * self.n - i - 1) / 2;
        self.legs.get(row_start + (j - i - 1)).copied()
    }
}

/// Great-circle distance in kilometres.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attraction, PlaceMetadata};
    use chrono::NaiveTime;

    fn catalog(points: &[(f64, f64)]) -> Catalog {
        let mut c = Catalog::new();
        for (i, &(lat, lng)) in points.iter().enumerate() {
            c.insert(
                Attraction::new(
                    format!("p{i}"),
                    GeoPoint::new(lat, lng),
                    NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
                    1.0,
                ),
                PlaceMetadata::default(),
            )
            .unwrap();
        }
        c
    }

    #[test]
    fn test_haversine_known_distance() {
        // Taipei 101 to National Palace Museum: roughly 7.8 km as the crow flies.
        let d = haversine_km(GeoPoint::new(25.0340, 121.5645), GeoPoint::new(25.1024, 121.5485));
        assert!((d - 7.75).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_symmetric_and_complete() {
        let c = catalog(&[(25.03, 121.56), (25.10, 121.55), (25.04, 121.50), (24.99, 121.58)]);
        let index = DistanceIndex::from_catalog(&c);
        assert_eq!(index.len(), 4);

        for a in c.ids() {
            for b in c.ids() {
                let ab = index.get(a, b).unwrap();
                let ba = index.get(b, a).unwrap();
                assert_eq!(ab, ba);
                if a == b {
                    assert_eq!(ab.distance_km, 0.0);
                } else {
                    assert!(ab.distance_km > 0.0);
                    assert!((ab.duration_hours - ab.distance_km / DEFAULT_SPEED_KMH).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_packed_index_matches_direct_computation() {
        let pts = [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0), (2.0, 2.0)];
        let c = catalog(&pts);
        let index = DistanceIndex::with_speed(&c, 30.0);
        for i in 0..pts.len() {
            for j in 0..pts.len() {
                let expected = haversine_km(GeoPoint::new(pts[i].0, pts[i].1), GeoPoint::new(pts[j].0, pts[j].1));
                let leg = index.get(AttractionId(i), AttractionId(j)).unwrap();
                assert!((leg.distance_km - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_unknown_id() {
        let index = DistanceIndex::from_catalog(&catalog(&[(0.0, 0.0), (1.0, 1.0)]));
        assert!(index.get(AttractionId(0), AttractionId(5)).is_none());
    }
}
