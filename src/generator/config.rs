//! Population generator configuration.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Parameters for initial population construction.
///
/// # Defaults
///
/// ```
/// use u_itinerary::generator::GeneratorConfig;
///
/// let config = GeneratorConfig::default();
/// assert_eq!(config.min_attractions_per_day, 2);
/// assert_eq!(config.max_attractions_per_day, 6);
/// assert_eq!(config.max_population, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// A day with fewer visits is retried, then abandoned.
    pub min_attractions_per_day: usize,

    /// Day capacity.
    pub max_attractions_per_day: usize,

    /// Gap inserted after each visit by the sequential strategies.
    pub travel_buffer_minutes: i64,

    /// Itineraries attempted by each strategy.
    pub attempts_per_strategy: usize,

    /// Attempts per day before the whole itinerary is abandoned.
    pub max_retry_per_day: usize,

    /// Maximum Jaccard similarity between attraction sets of two kept
    /// itineraries.
    pub similarity_threshold: f64,

    /// Below this many feasible candidates, extra random rounds run.
    pub min_population: usize,

    /// Cap on the returned population.
    pub max_population: usize,

    /// Bound on extra random rounds.
    pub max_top_up_rounds: usize,

    /// Slot length for the timeslot strategy.
    pub timeslot_hours: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_attractions_per_day: 2,
            max_attractions_per_day: 6,
            travel_buffer_minutes: 30,
            attempts_per_strategy: 500,
            max_retry_per_day: 10,
            similarity_threshold: 0.95,
            min_population: 20,
            max_population: 100,
            max_top_up_rounds: 10,
            timeslot_hours: 2,
        }
    }
}

impl GeneratorConfig {
    /// Sets the per-day visit bounds.
    pub fn with_attractions_per_day(mut self, min: usize, max: usize) -> Self {
        self.min_attractions_per_day = min;
        self.max_attractions_per_day = max;
        self
    }

    /// Sets the number of attempts per strategy.
    pub fn with_attempts_per_strategy(mut self, n: usize) -> Self {
        self.attempts_per_strategy = n;
        self
    }

    /// Sets the similarity threshold.
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Sets the population bounds.
    pub fn with_population_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_population = min;
        self.max_population = max;
        self
    }

    /// Travel buffer as a duration.
    pub fn travel_buffer(&self) -> TimeDelta {
        TimeDelta::minutes(self.travel_buffer_minutes)
    }

    /// Timeslot length as a duration.
    pub fn timeslot(&self) -> TimeDelta {
        TimeDelta::hours(self.timeslot_hours)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_attractions_per_day == 0 {
            return Err("min_attractions_per_day must be at least 1".into());
        }
        if self.min_attractions_per_day > self.max_attractions_per_day {
            return Err("min_attractions_per_day must not exceed max_attractions_per_day".into());
        }
        if self.travel_buffer_minutes < 0 {
            return Err("travel_buffer_minutes must be non-negative".into());
        }
        if self.attempts_per_strategy == 0 || self.max_retry_per_day == 0 {
            return Err("attempts_per_strategy and max_retry_per_day must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err("similarity_threshold must be in [0, 1]".into());
        }
        if self.max_population == 0 {
            return Err("max_population must be at least 1".into());
        }
        if self.timeslot_hours <= 0 {
            return Err("timeslot_hours must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.travel_buffer(), TimeDelta::minutes(30));
        assert_eq!(config.timeslot(), TimeDelta::hours(2));
        assert_eq!(config.attempts_per_strategy, 500);
        assert_eq!(config.max_retry_per_day, 10);
        assert!((config.similarity_threshold - 0.95).abs() < 1e-12);
        assert_eq!(config.min_population, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_clamps_threshold() {
        let config = GeneratorConfig::default().with_similarity_threshold(1.7);
        assert!((config.similarity_threshold - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(GeneratorConfig::default()
            .with_attractions_per_day(4, 3)
            .validate()
            .is_err());
        assert!(GeneratorConfig::default()
            .with_attractions_per_day(0, 3)
            .validate()
            .is_err());
        assert!(GeneratorConfig::default()
            .with_population_bounds(20, 0)
            .validate()
            .is_err());

        let config = GeneratorConfig {
            timeslot_hours: 0,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
