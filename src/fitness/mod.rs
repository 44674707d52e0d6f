//! Multi-objective fitness evaluation.
//!
//! # Objectives
//!
//! Every objective is maximized:
//!
//! 1. distinct attractions
//! 2. −normalized travel distance × weight
//! 3. −normalized price level sum × weight
//! 4. normalized rating sum × weight
//! 5. rating count sum
//! 6. −restaurant penalty
//!
//! Objectives 2–4 are normalized against running bounds kept in an
//! [`OnlineNormalizer`] that the caller owns for the whole run.

mod config;
mod evaluator;
mod normalizer;
mod restaurant;

pub use config::{EvaluationConfig, MealWindow, Normalization, ObjectiveWeights, RestaurantConfig};
pub use evaluator::FitnessEvaluator;
pub use normalizer::{MetricRange, NormalizedMetrics, OnlineNormalizer, RawMetrics};
pub use restaurant::restaurant_penalty;
