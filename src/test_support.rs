//! Shared fixtures for unit tests: a small Taipei catalog and a three-day
//! trip.

use crate::models::{
    parse_datetime, Attraction, AttractionId, Catalog, DayWindow, GeoPoint, PlaceMetadata,
    ScheduledVisit, TimeWindow,
};
use crate::planner::DayWindowPlanner;
use chrono::NaiveTime;

struct Place {
    id: &'static str,
    open: &'static str,
    close: &'static str,
    stay: f64,
    price: i32,
    rating: f64,
    count: u64,
    tags: &'static [&'static str],
    lat: f64,
    lng: f64,
}

const PLACES: &[Place] = &[
    Place { id: "taipei_101", open: "09:00", close: "22:00", stay: 2.0, price: 4, rating: 4.6, count: 20_000, tags: &["landmark", "view_point"], lat: 25.0340, lng: 121.5645 },
    Place { id: "palace_museum", open: "08:30", close: "18:30", stay: 3.0, price: 3, rating: 4.7, count: 25_000, tags: &["museum", "culture"], lat: 25.1024, lng: 121.5485 },
    Place { id: "longshan_temple", open: "08:00", close: "19:00", stay: 1.5, price: 1, rating: 4.5, count: 15_000, tags: &["temple", "culture"], lat: 25.0371, lng: 121.4999 },
    Place { id: "shilin_night_market", open: "16:00", close: "23:59", stay: 2.0, price: 2, rating: 4.3, count: 30_000, tags: &["market", "food"], lat: 25.0880, lng: 121.5241 },
    Place { id: "cks_memorial", open: "09:00", close: "18:00", stay: 2.0, price: 1, rating: 4.4, count: 22_000, tags: &["landmark", "culture"], lat: 25.0346, lng: 121.5217 },
    Place { id: "elephant_mountain", open: "06:00", close: "18:00", stay: 2.5, price: 1, rating: 4.5, count: 18_000, tags: &["nature", "outdoor"], lat: 25.0273, lng: 121.5766 },
    Place { id: "taipei_zoo", open: "09:00", close: "17:00", stay: 4.0, price: 2, rating: 4.3, count: 20_000, tags: &["zoo", "family"], lat: 24.9983, lng: 121.5810 },
    Place { id: "ximending", open: "11:00", close: "22:00", stay: 3.0, price: 2, rating: 4.2, count: 25_000, tags: &["shopping", "food"], lat: 25.0422, lng: 121.5078 },
    Place { id: "fine_arts_museum", open: "09:30", close: "17:30", stay: 2.0, price: 2, rating: 4.4, count: 12_000, tags: &["museum", "art"], lat: 25.0724, lng: 121.5246 },
    Place { id: "yangmingshan", open: "10:00", close: "22:00", stay: 3.0, price: 3, rating: 4.3, count: 15_000, tags: &["nature", "leisure"], lat: 25.1550, lng: 121.5480 },
    Place { id: "din_tai_fung", open: "11:00", close: "21:30", stay: 1.5, price: 3, rating: 4.6, count: 40_000, tags: &["restaurant", "food"], lat: 25.0335, lng: 121.5300 },
    Place { id: "raohe_night_market", open: "17:00", close: "23:59", stay: 1.5, price: 1, rating: 4.4, count: 35_000, tags: &["market", "food"], lat: 25.0510, lng: 121.5775 },
    Place { id: "fika_cafe", open: "08:00", close: "18:00", stay: 1.0, price: 2, rating: 4.5, count: 3_000, tags: &["cafe"], lat: 25.0520, lng: 121.5430 },
    Place { id: "beef_noodle_house", open: "10:30", close: "20:30", stay: 1.0, price: 1, rating: 4.3, count: 8_000, tags: &["restaurant"], lat: 25.0440, lng: 121.5070 },
];

fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

/// Fourteen places: ten sights and four eateries.
pub(crate) fn taipei_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for p in PLACES {
        catalog
            .insert(
                Attraction::new(p.id, GeoPoint::new(p.lat, p.lng), time(p.open), time(p.close), p.stay),
                PlaceMetadata {
                    price_level: p.price,
                    rating: p.rating,
                    rating_count: p.count,
                    categories: p.tags.iter().map(|t| t.to_string()).collect(),
                },
            )
            .unwrap();
    }
    catalog
}

/// Three full days, 09:00–21:00, starting 2024-03-20.
pub(crate) fn three_days() -> Vec<DayWindow> {
    DayWindowPlanner::plan_str("2024-03-20T09:00", "2024-03-22T21:00", "09:00", "21:00").unwrap()
}

/// Looks up an id in the fixture catalog.
pub(crate) fn id(catalog: &Catalog, place_id: &str) -> AttractionId {
    catalog.id_of(place_id).unwrap()
}

/// Builds a visit from `YYYY-MM-DDTHH:MM` strings.
pub(crate) fn visit(attraction: AttractionId, start: &str, end: &str) -> ScheduledVisit {
    ScheduledVisit::new(
        attraction,
        TimeWindow::new(parse_datetime(start).unwrap(), parse_datetime(end).unwrap()),
    )
}
