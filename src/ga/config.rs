//! Engine configuration.
//!
//! [`EngineConfig`] holds every parameter of an optimization run, including
//! the nested generator, evaluation, and operator settings.

use super::operators::OperatorConfig;
use super::selection::SelectionPolicy;
use crate::fitness::{EvaluationConfig, Normalization};
use crate::generator::GeneratorConfig;
use serde::{Deserialize, Serialize};

/// Configuration for the NSGA-II itinerary search.
///
/// # Defaults
///
/// ```
/// use u_itinerary::ga::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 200);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_itinerary::ga::{EngineConfig, SelectionPolicy};
///
/// let config = EngineConfig::default()
///     .with_population_size(60)
///     .with_generations(40)
///     .with_selection(SelectionPolicy::Nsga2)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on the generated initial population.
    ///
    /// The generator may return fewer itineraries when the catalog or the
    /// diversity filter does not allow more.
    pub population_size: usize,

    /// Number of select/vary/evaluate cycles.
    pub generations: usize,

    /// Probability of recombining each consecutive offspring pair (0.0–1.0).
    pub crossover_rate: f64,

    /// Probability of mutating each offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    pub selection: SelectionPolicy,

    pub normalization: Normalization,

    /// Compute raw metrics in parallel with rayon.
    ///
    /// Only used with [`Normalization::PerGeneration`] and the `parallel`
    /// feature.
    pub parallel: bool,

    pub operators: OperatorConfig,

    pub generator: GeneratorConfig,

    pub evaluation: EvaluationConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 200,
            crossover_rate: 0.5,
            mutation_rate: 0.2,
            seed: None,
            selection: SelectionPolicy::default(),
            normalization: Normalization::default(),
            parallel: false,
            operators: OperatorConfig::default(),
            generator: GeneratorConfig::default(),
            evaluation: EvaluationConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the selection policy.
    pub fn with_selection(mut self, selection: SelectionPolicy) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the normalization mode.
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Enables or disables parallel raw-metric computation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the operator toggles.
    pub fn with_operators(mut self, operators: OperatorConfig) -> Self {
        self.operators = operators;
        self
    }

    /// Sets the generator configuration.
    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    /// Sets the evaluation configuration.
    pub fn with_evaluation(mut self, evaluation: EvaluationConfig) -> Self {
        self.evaluation = evaluation;
        self
    }

    /// Preset for interactive use: small population, few generations, and
    /// fewer construction attempts.
    ///
    /// - Population: 50, Generations: 50, Attempts per strategy: 100
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            generations: 50,
            generator: GeneratorConfig::default().with_attempts_per_strategy(100),
            ..Self::default()
        }
    }

    /// Preset balancing quality and latency.
    ///
    /// - Population: 100, Generations: 200
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Preset for offline planning: large population, many generations.
    ///
    /// - Population: 200, Generations: 500, Max generated population: 200
    pub fn quality() -> Self {
        Self {
            population_size: 200,
            generations: 500,
            generator: GeneratorConfig::default().with_population_bounds(20, 200),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err("crossover_rate must be in [0, 1]".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err("mutation_rate must be in [0, 1]".into());
        }
        if let SelectionPolicy::Replicated { replicas: 0 } = self.selection {
            return Err("replicated selection needs at least one replica".into());
        }
        self.operators.validate()?;
        self.generator.validate()?;
        self.evaluation.validate()
    }
}
