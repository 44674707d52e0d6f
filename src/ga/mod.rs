//! NSGA-II search over itineraries.
//!
//! # Key Types
//!
//! - [`EngineConfig`]: Run parameters (population size, rates, presets)
//! - [`OptimizationEngine`]: Executes the evolutionary loop over a [`TripProblem`]
//! - [`EngineResult`]: Terminal population, Pareto archive, and statistics
//! - [`VariationOperators`]: Itinerary mutation and crossover
//! - [`SelectionPolicy`]: Replicated or plain NSGA-II survivor selection
//! - [`ParetoArchive`]: Non-dominated itineraries seen during a run
//!
//! # Submodules
//!
//! - [`operators`]: Mutation kinds and crossover kinds with their toggles
//! - [`multi_objective`]: Pareto non-dominated sorting and crowding distance
//!
//! # References
//!
//! - Deb et al. (2002), *A Fast and Elitist Multiobjective GA: NSGA-II*
//! - Goldberg & Lingle (1985), *Alleles, Loci, and the Traveling Salesman Problem* (PMX)

mod archive;
mod config;
pub mod multi_objective;
pub mod operators;
mod runner;
mod selection;

pub use archive::ParetoArchive;
pub use config::EngineConfig;
pub use operators::{CrossoverKind, MutationKind, OperatorConfig, VariationOperators};
pub use runner::{
    EngineResult, EngineState, GenerationStats, OptimizationEngine, TripProblem,
};
pub use selection::{select_nsga2, SelectionPolicy};
