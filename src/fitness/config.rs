//! Evaluation configuration.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive time-of-day range for a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl MealWindow {
    /// Creates a window from hour/minute pairs.
    ///
    /// # Panics
    /// Panics on an invalid hour or minute.
    pub fn hm(start: (u32, u32), end: (u32, u32)) -> Self {
        let t = |(h, m): (u32, u32)| NaiveTime::from_hms_opt(h, m, 0).expect("valid hour and minute");
        Self {
            start: t(start),
            end: t(end),
        }
    }

    /// Whether `time` lies within the window, bounds included.
    #[inline]
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Restaurant frequency and meal-timing rules.
///
/// Defaults: 2–3 restaurants per day, 1000 per count violation, lunch
/// 11:30–14:00, dinner 17:30–21:00, 800 per timing violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantConfig {
    /// Category tags that mark a place as a restaurant.
    pub categories: BTreeSet<String>,
    pub min_per_day: usize,
    pub max_per_day: usize,
    /// Penalty per restaurant below the minimum or above the maximum.
    pub violation_weight: f64,
    pub lunch_window: MealWindow,
    pub dinner_window: MealWindow,
    /// Penalty per missing meal or badly timed restaurant visit.
    pub timing_penalty: f64,
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self {
            categories: ["restaurant", "food", "cafe"]
                .into_iter()
                .map(String::from)
                .collect(),
            min_per_day: 2,
            max_per_day: 3,
            violation_weight: 1000.0,
            lunch_window: MealWindow::hm((11, 30), (14, 0)),
            dinner_window: MealWindow::hm((17, 30), (21, 0)),
            timing_penalty: 800.0,
        }
    }
}

/// Scale factors applied to the normalized distance, price, and rating
/// objectives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveWeights {
    pub distance: f64,
    pub price: f64,
    pub rating: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            distance: 1.0,
            price: 1.0,
            rating: 1.0,
        }
    }
}

/// How normalization bounds are accumulated while evaluating a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Normalization {
    /// Update the running bounds before each individual, in population
    /// order. Identical genomes evaluated at different times may score
    /// differently.
    #[default]
    Online,
    /// Compute every raw metric of the batch first, fold them all into the
    /// running bounds, then normalize. Independent of evaluation order and
    /// safe to compute in parallel.
    PerGeneration,
}

/// Full evaluation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub restaurant: RestaurantConfig,
    pub weights: ObjectiveWeights,
}

impl EvaluationConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        let r = &self.restaurant;
        if r.min_per_day > r.max_per_day {
            return Err("restaurant min_per_day must not exceed max_per_day".into());
        }
        if r.violation_weight < 0.0 || r.timing_penalty < 0.0 {
            return Err("restaurant penalties must be non-negative".into());
        }
        if r.lunch_window.start > r.lunch_window.end || r.dinner_window.start > r.dinner_window.end {
            return Err("meal windows must start before they end".into());
        }
        let w = &self.weights;
        if [w.distance, w.price, w.rating].iter().any(|x| !x.is_finite() || *x < 0.0) {
            return Err("objective weights must be finite and non-negative".into());
        }
        Ok(())
    }
}
