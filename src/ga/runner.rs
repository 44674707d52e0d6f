//! NSGA-II evolutionary loop.
//!
//! [`OptimizationEngine`] drives one run over a [`TripProblem`]:
//! population generation → {evaluate → archive update → select → vary} ×
//! generations → final evaluate → archive update.

use super::archive::ParetoArchive;
use super::config::EngineConfig;
use super::operators::VariationOperators;
use crate::distance::DistanceIndex;
use crate::error::{PlanError, Result};
use crate::fitness::{FitnessEvaluator, OnlineNormalizer};
use crate::generator::PopulationGenerator;
use crate::models::{Catalog, DayWindow, ExportedItinerary, Itinerary, PlaceRecord, OBJECTIVE_COUNT};
use crate::planner::TripRequest;
use crate::random::rng_from_option;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Everything fixed for the duration of a run: the catalog, its pairwise
/// distances, and the trip's day windows.
#[derive(Debug, Clone)]
pub struct TripProblem {
    catalog: Catalog,
    distances: DistanceIndex,
    days: Vec<DayWindow>,
}

impl TripProblem {
    /// Builds a problem from an existing catalog and planned day windows.
    ///
    /// # Errors
    /// - [`PlanError::EmptyCatalog`] if `catalog` has no attraction
    /// - [`PlanError::InvalidConfig`] if `days` is empty
    pub fn new(catalog: Catalog, days: Vec<DayWindow>) -> Result<Self> {
        if catalog.is_empty() {
            return Err(PlanError::EmptyCatalog);
        }
        if days.is_empty() {
            return Err(PlanError::InvalidConfig("trip has no day windows".into()));
        }
        let distances = DistanceIndex::from_catalog(&catalog);
        Ok(Self {
            catalog,
            distances,
            days,
        })
    }

    /// Builds a problem from raw place records and a trip request.
    ///
    /// Day windows are planned before the catalog is built, so bad trip
    /// timestamps fail without touching the records.
    pub fn from_request(records: &[PlaceRecord], request: &TripRequest) -> Result<Self> {
        let days = request.day_windows()?;
        let catalog = Catalog::from_records(records, request.stay_hours)?;
        Self::new(catalog, days)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn distances(&self) -> &DistanceIndex {
        &self.distances
    }

    pub fn days(&self) -> &[DayWindow] {
        &self.days
    }
}

/// Lifecycle position of an [`OptimizationEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Initialized,
    PopulationGenerated,
    Evaluating,
    ArchiveUpdated,
    Selecting,
    Varying,
    Terminated,
}

/// Population statistics after one evaluation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// 0 for the initial population, `generations` for the final step.
    pub generation: usize,
    /// Fitness evaluations performed in this step.
    pub evaluations: usize,
    pub population_size: usize,
    pub archive_size: usize,
    /// Per-objective minimum over the evaluated population.
    pub min: [f64; OBJECTIVE_COUNT],
    /// Per-objective maximum over the evaluated population.
    pub max: [f64; OBJECTIVE_COUNT],
}

impl GenerationStats {
    fn collect(
        generation: usize,
        evaluations: usize,
        population: &[Itinerary],
        archive_size: usize,
    ) -> Self {
        let mut min = [f64::INFINITY; OBJECTIVE_COUNT];
        let mut max = [f64::NEG_INFINITY; OBJECTIVE_COUNT];
        for fitness in population.iter().filter_map(|it| it.fitness) {
            for (k, &v) in fitness.values().iter().enumerate() {
                min[k] = min[k].min(v);
                max[k] = max[k].max(v);
            }
        }
        Self {
            generation,
            evaluations,
            population_size: population.len(),
            archive_size,
            min,
            max,
        }
    }
}

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct EngineResult {
    /// Terminal population, fully evaluated.
    pub population: Vec<Itinerary>,

    /// Non-dominated itineraries found during the whole run.
    pub archive: Vec<Itinerary>,

    /// The archive in caller-facing form, same order as `archive`.
    pub itineraries: Vec<ExportedItinerary>,

    /// One entry per evaluation step (`generations + 1` entries).
    pub stats: Vec<GenerationStats>,

    /// Number of generations executed.
    pub generations: usize,
}

impl EngineResult {
    /// Total fitness evaluations over the run.
    pub fn total_evaluations(&self) -> usize {
        self.stats.iter().map(|s| s.evaluations).sum()
    }
}

/// Runs NSGA-II over a [`TripProblem`].
///
/// # Usage
///
/// ```ignore
/// let problem = TripProblem::from_request(&records, &request)?;
/// let config = EngineConfig::fast().with_seed(42);
/// let result = OptimizationEngine::new(&problem, config)?.run()?;
/// println!("{} itineraries on the front", result.itineraries.len());
/// ```
#[derive(Debug)]
pub struct OptimizationEngine<'p> {
    problem: &'p TripProblem,
    config: EngineConfig,
    state: EngineState,
}

impl<'p> OptimizationEngine<'p> {
    /// Creates an engine after validating `config`.
    ///
    /// # Errors
    /// [`PlanError::InvalidConfig`] with the first failing parameter.
    pub fn new(problem: &'p TripProblem, config: EngineConfig) -> Result<Self> {
        config.validate().map_err(PlanError::InvalidConfig)?;
        Ok(Self {
            problem,
            config,
            state: EngineState::Initialized,
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs to completion with an RNG seeded from the configuration.
    pub fn run(&mut self) -> Result<EngineResult> {
        let mut rng = rng_from_option(self.config.seed);
        self.run_with_rng(&mut rng)
    }

    /// Runs to completion drawing every random decision from `rng`.
    ///
    /// # Errors
    /// [`PlanError::Infeasible`] if the generator cannot build a single
    /// valid itinerary.
    pub fn run_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<EngineResult> {
        let problem = self.problem;
        let config = &self.config;
        tracing::info!(
            attractions = problem.catalog.len(),
            days = problem.days.len(),
            population_size = config.population_size,
            generations = config.generations,
            "optimization started"
        );

        let mut generator_config = config.generator.clone();
        generator_config.max_population = generator_config.max_population.min(config.population_size);
        generator_config.min_population = generator_config
            .min_population
            .min(generator_config.max_population);

        let mut population = PopulationGenerator::new(&problem.catalog, &problem.days, &generator_config)
            .generate(rng)?;
        self.state = EngineState::PopulationGenerated;

        let evaluator = FitnessEvaluator::new(&problem.catalog, &problem.distances, &config.evaluation);
        let operators = VariationOperators::new(&problem.catalog, &config.operators);
        let mut normalizer = OnlineNormalizer::new();
        let mut archive = ParetoArchive::new();
        let mut stats = Vec::with_capacity(config.generations + 1);

        for gen in 0..config.generations {
            self.state = EngineState::Evaluating;
            let evaluations = evaluator.evaluate_batch(
                &mut population,
                &mut normalizer,
                config.normalization,
                config.parallel,
            );

            let admitted = archive.update(&population);
            self.state = EngineState::ArchiveUpdated;

            let step = GenerationStats::collect(gen, evaluations, &population, archive.len());
            tracing::debug!(
                generation = gen,
                evaluations,
                admitted,
                archive = archive.len(),
                best_count = step.max[0],
                "generation evaluated"
            );
            stats.push(step);

            self.state = EngineState::Selecting;
            let mut offspring = config.selection.select(&population, population.len());

            self.state = EngineState::Varying;
            vary(&operators, &mut offspring, config, rng);
            population = offspring;
        }

        self.state = EngineState::Evaluating;
        let evaluations = evaluator.evaluate_batch(
            &mut population,
            &mut normalizer,
            config.normalization,
            config.parallel,
        );
        archive.update(&population);
        self.state = EngineState::ArchiveUpdated;
        stats.push(GenerationStats::collect(
            config.generations,
            evaluations,
            &population,
            archive.len(),
        ));

        let archive = archive.into_members();
        let itineraries = archive
            .iter()
            .map(|it| it.export(&problem.catalog))
            .collect();
        self.state = EngineState::Terminated;

        tracing::info!(
            generations = config.generations,
            population = population.len(),
            front = archive.len(),
            "optimization finished"
        );

        Ok(EngineResult {
            population,
            archive,
            itineraries,
            stats,
            generations: config.generations,
        })
    }
}

/// Crosses consecutive pairs `(i-1, i)` and then mutates each offspring,
/// each with its configured probability.
fn vary<R: Rng + ?Sized>(
    operators: &VariationOperators<'_>,
    offspring: &mut [Itinerary],
    config: &EngineConfig,
    rng: &mut R,
) {
    for i in (1..offspring.len()).step_by(2) {
        if rng.random_range(0.0..1.0) < config.crossover_rate {
            let (left, right) = offspring.split_at_mut(i);
            operators.crossover(&mut left[i - 1], &mut right[0], rng);
        }
    }

    for individual in offspring.iter_mut() {
        if rng.random_range(0.0..1.0) < config.mutation_rate {
            operators.mutate(individual, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::Normalization;
    use crate::ga::SelectionPolicy;
    use crate::generator::{is_valid_schedule, GeneratorConfig};
    use crate::models::{OpeningHours, PlaceRecord};
    use crate::random::create_rng;
    use crate::test_support::{taipei_catalog, three_days};

    fn problem() -> TripProblem {
        TripProblem::new(taipei_catalog(), three_days()).unwrap()
    }

    fn small_config() -> EngineConfig {
        EngineConfig::default()
            .with_population_size(20)
            .with_generations(5)
            .with_generator(GeneratorConfig::default().with_attempts_per_strategy(20))
            .with_seed(42)
    }

    /// Variation may break time order and opening hours but never repeats
    /// an attraction or empties an itinerary.
    fn assert_no_repeats(it: &Itinerary) {
        assert!(!it.is_empty());
        assert!(!it.has_duplicates());
    }

    #[test]
    fn test_run_produces_front() {
        let problem = problem();
        let mut engine = OptimizationEngine::new(&problem, small_config()).unwrap();
        assert_eq!(engine.state(), EngineState::Initialized);

        let result = engine.run().unwrap();
        assert_eq!(engine.state(), EngineState::Terminated);

        assert_eq!(result.generations, 5);
        assert_eq!(result.stats.len(), 6);
        assert!(!result.archive.is_empty());
        assert_eq!(result.archive.len(), result.itineraries.len());
        assert!(result.population.iter().all(Itinerary::is_evaluated));
        assert!(result.total_evaluations() > 0);
    }

    #[test]
    fn test_archive_is_non_dominated() {
        let problem = problem();
        let result = OptimizationEngine::new(&problem, small_config())
            .unwrap()
            .run()
            .unwrap();

        for (i, a) in result.archive.iter().enumerate() {
            for (j, b) in result.archive.iter().enumerate() {
                if i != j {
                    let (fa, fb) = (a.fitness.unwrap(), b.fitness.unwrap());
                    assert_ne!(fa, fb);
                    assert!(!fa.dominates(&fb));
                }
            }
        }
    }

    #[test]
    fn test_archive_itineraries_exported() {
        let problem = problem();
        let result = OptimizationEngine::new(&problem, small_config())
            .unwrap()
            .run()
            .unwrap();
        for it in &result.archive {
            assert_no_repeats(it);
        }
        for (exported, it) in result.itineraries.iter().zip(&result.archive) {
            assert_eq!(exported.visits().count(), it.len());
        }
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let problem = problem();
        let a = OptimizationEngine::new(&problem, small_config()).unwrap().run().unwrap();
        let b = OptimizationEngine::new(&problem, small_config()).unwrap().run().unwrap();
        assert_eq!(a.archive, b.archive);
        assert_eq!(a.itineraries, b.itineraries);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_zero_generations_evaluates_initial_population() {
        let problem = problem();
        let config = small_config().with_generations(0);
        let result = OptimizationEngine::new(&problem, config).unwrap().run().unwrap();

        assert_eq!(result.stats.len(), 1);
        assert_eq!(result.stats[0].evaluations, result.population.len());
        for it in &result.population {
            assert!(is_valid_schedule(
                it,
                problem.days(),
                problem.catalog(),
                &GeneratorConfig::default()
            ));
        }
    }

    #[test]
    fn test_population_capped_by_size() {
        let problem = problem();
        let config = small_config().with_population_size(8).with_generations(0);
        let result = OptimizationEngine::new(&problem, config).unwrap().run().unwrap();
        assert!(result.population.len() <= 8);
    }

    #[test]
    fn test_stats_track_archive_and_bounds() {
        let problem = problem();
        let result = OptimizationEngine::new(&problem, small_config())
            .unwrap()
            .run()
            .unwrap();
        for (g, s) in result.stats.iter().enumerate() {
            assert_eq!(s.generation, g);
            assert!(s.archive_size >= 1);
            for k in 0..OBJECTIVE_COUNT {
                assert!(s.min[k] <= s.max[k]);
            }
        }
        assert_eq!(result.stats.last().unwrap().archive_size, result.archive.len());
    }

    #[test]
    fn test_per_generation_normalization_and_nsga2() {
        let problem = problem();
        let config = small_config()
            .with_normalization(Normalization::PerGeneration)
            .with_selection(SelectionPolicy::Nsga2)
            .with_parallel(true);
        let result = OptimizationEngine::new(&problem, config).unwrap().run().unwrap();
        assert!(!result.archive.is_empty());
        for it in &result.archive {
            assert_no_repeats(it);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let problem = problem();
        let err = OptimizationEngine::new(&problem, EngineConfig::default().with_population_size(0))
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidConfig(_)));
    }

    #[test]
    fn test_infeasible_trip() {
        // Every place needs more time than the one-hour day allows.
        let days = crate::planner::DayWindowPlanner::plan_str(
            "2024-03-20T09:00",
            "2024-03-20T10:00",
            "09:00",
            "10:00",
        )
        .unwrap();
        let problem = TripProblem::new(taipei_catalog(), days).unwrap();
        let config = small_config()
            .with_generator(
                GeneratorConfig::default()
                    .with_attempts_per_strategy(5)
                    .with_attractions_per_day(2, 6),
            );
        let err = OptimizationEngine::new(&problem, config).unwrap().run().unwrap_err();
        assert!(matches!(err, PlanError::Infeasible { .. }));
    }

    #[test]
    fn test_from_request() {
        let records = vec![
            PlaceRecord {
                place_id: "museum".into(),
                lat: 25.10,
                lng: 121.55,
                opening_hours: Some(OpeningHours {
                    open: "0900".into(),
                    close: "1800".into(),
                }),
                price_level: 2,
                rating: 4.5,
                user_rating_totals: 100,
                categories: vec!["museum".into()],
                stay_hours: None,
            },
            PlaceRecord {
                place_id: "no_hours".into(),
                lat: 25.0,
                lng: 121.5,
                opening_hours: None,
                price_level: 1,
                rating: 4.0,
                user_rating_totals: 10,
                categories: Vec::new(),
                stay_hours: None,
            },
        ];
        let request = TripRequest {
            departure: "2024-03-20T09:00".into(),
            returning: "2024-03-21T18:00".into(),
            daily_start: "09:00".into(),
            daily_end: "18:00".into(),
            stay_hours: 2.0,
        };
        let problem = TripProblem::from_request(&records, &request).unwrap();
        assert_eq!(problem.catalog().len(), 1);
        assert_eq!(problem.days().len(), 2);
        assert_eq!(problem.distances().len(), 1);

        let bad = TripRequest {
            returning: "2024-03-19T09:00".into(),
            ..request
        };
        assert!(matches!(
            TripProblem::from_request(&records, &bad),
            Err(PlanError::ReturnBeforeDeparture { .. })
        ));
    }

    #[test]
    fn test_vary_respects_zero_rates() {
        let catalog = taipei_catalog();
        let config = EngineConfig::default()
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0);
        let operators = VariationOperators::new(&catalog, &config.operators);
        let problem = problem();
        let mut rng = create_rng(3);
        let mut population = PopulationGenerator::new(
            problem.catalog(),
            problem.days(),
            &GeneratorConfig::default().with_attempts_per_strategy(10),
        )
        .generate(&mut rng)
        .unwrap();
        let before = population.clone();
        vary(&operators, &mut population, &config, &mut rng);
        assert_eq!(population, before);
    }
}
