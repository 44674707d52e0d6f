//! Restaurant distribution penalty.

use super::config::RestaurantConfig;
use crate::models::{Catalog, ScheduledVisit};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Penalty for restaurant frequency and meal timing, summed over every date
/// on which the itinerary has a visit.
///
/// Per date:
/// - fewer than `min_per_day` restaurants: `(min - count) * violation_weight`;
///   more than `max_per_day`: `(count - max) * violation_weight`
/// - a restaurant starting inside the lunch window covers lunch, otherwise
///   one inside the dinner window covers dinner, otherwise it is a bad timing
///   and costs `timing_penalty`
/// - no lunch with at least one restaurant, or no dinner with at least two,
///   costs `timing_penalty` each
pub fn restaurant_penalty(
    visits: &[ScheduledVisit],
    catalog: &Catalog,
    config: &RestaurantConfig,
) -> f64 {
    let mut by_date: BTreeMap<NaiveDate, Vec<&ScheduledVisit>> = BTreeMap::new();
    for visit in visits {
        let restaurants = by_date.entry(visit.date()).or_default();
        let is_restaurant = match catalog.metadata(visit.attraction) {
            Some(meta) => meta.has_any_category(&config.categories),
            None => {
                super::evaluator::missing_entry("metadata", visit.attraction.index());
                false
            }
        };
        if is_restaurant {
            restaurants.push(visit);
        }
    }

    by_date
        .values()
        .map(|restaurants| day_penalty(restaurants, config))
        .sum()
}

fn day_penalty(restaurants: &[&ScheduledVisit], config: &RestaurantConfig) -> f64 {
    let count = restaurants.len();
    let mut penalty = if count < config.min_per_day {
        (config.min_per_day - count) as f64 * config.violation_weight
    } else if count > config.max_per_day {
        (count - config.max_per_day) as f64 * config.violation_weight
    } else {
        0.0
    };

    let mut has_lunch = false;
    let mut has_dinner = false;
    let mut bad_timings = 0usize;
    for visit in restaurants {
        let time = visit.window.start.time();
        if config.lunch_window.contains(time) {
            has_lunch = true;
        } else if config.dinner_window.contains(time) {
            has_dinner = true;
        } else {
            bad_timings += 1;
        }
    }

    if count > 0 && !has_lunch {
        penalty += config.timing_penalty;
    }
    if count > 1 && !has_dinner {
        penalty += config.timing_penalty;
    }
    penalty + bad_timings as f64 * config.timing_penalty
}
