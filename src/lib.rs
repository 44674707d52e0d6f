//! Multi-objective sightseeing itinerary optimization.
//!
//! Given a catalog of candidate places and a trip's departure/return
//! instants, searches for multi-day itineraries that trade off:
//!
//! - **Coverage**: number of distinct attractions visited
//! - **Travel**: great-circle distance between consecutive visits
//! - **Cost**: summed price level
//! - **Quality**: summed rating and rating count
//! - **Meals**: restaurant count and lunch/dinner timing per day
//!
//! The search is NSGA-II: a diverse feasible population is built by four
//! construction strategies, then evolved by itinerary-aware mutation and
//! crossover under Pareto ranking, while an archive keeps every
//! non-dominated itinerary seen.
//!
//! # Pipeline
//!
//! 1. [`planner`]: departure/return → one [`DayWindow`] per calendar day
//! 2. [`distance`]: pairwise haversine distances over the [`Catalog`]
//! 3. [`generator`]: initial population
//! 4. [`fitness`]: six-objective evaluation with running normalization
//! 5. [`ga`]: selection, variation, archive, and the run loop
//!
//! # Example
//!
//! ```ignore
//! use u_itinerary::{EngineConfig, OptimizationEngine, TripProblem, TripRequest};
//!
//! let problem = TripProblem::from_request(&records, &request)?;
//! let result = OptimizationEngine::new(&problem, EngineConfig::fast())?.run()?;
//! let json = serde_json::to_string(&result.itineraries)?;
//! ```
//!
//! All randomness flows through one seedable RNG, so setting
//! [`EngineConfig::seed`] makes a run reproducible.

pub mod distance;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod generator;
pub mod models;
pub mod planner;
pub mod random;

#[cfg(test)]
mod test_support;

pub use error::{PlanError, Result};
pub use ga::{EngineConfig, EngineResult, OptimizationEngine, TripProblem};
pub use models::{
    Catalog, DayWindow, ExportedItinerary, ExportedVisit, Itinerary, PlaceRecord, ScheduledVisit,
};
pub use planner::{DayWindowPlanner, TripRequest};
