//! Domain models: catalog, time windows, and itineraries.

mod catalog;
mod itinerary;
mod time;

pub use catalog::{
    Attraction, AttractionId, Catalog, GeoPoint, OpeningHours, PlaceMetadata, PlaceRecord,
};
pub use itinerary::{
    flatten, split_by_date, DaySchedule, ExportedItinerary, ExportedVisit, Fitness, Itinerary,
    ScheduledVisit, OBJECTIVE_COUNT,
};
pub use time::{
    hours_to_delta, parse_datetime, parse_time_of_day, DayWindow, TimeWindow, DATETIME_FORMAT,
    TIME_FORMAT,
};
