//! Initial population construction.
//!
//! [`PopulationGenerator`] runs four construction strategies (greedy,
//! random, timeslot, cluster), drops structurally invalid candidates, tops
//! up with extra random rounds when too few survive, and finally keeps a
//! diverse, desirability-ranked subset.

mod config;
mod diversity;
mod strategies;

pub use config::GeneratorConfig;
pub use diversity::{jaccard, select_diverse, CatalogStats, Priority};
pub use strategies::{ScheduleBuilder, Strategy};

use crate::error::{PlanError, Result};
use crate::models::{Catalog, DayWindow, Itinerary};
use rand::Rng;
use std::collections::HashSet;

/// Builds a feasible, diverse starting population.
pub struct PopulationGenerator<'a> {
    catalog: &'a Catalog,
    days: &'a [DayWindow],
    config: &'a GeneratorConfig,
    stats: CatalogStats,
}

impl<'a> PopulationGenerator<'a> {
    pub fn new(catalog: &'a Catalog, days: &'a [DayWindow], config: &'a GeneratorConfig) -> Self {
        Self {
            catalog,
            days,
            config,
            stats: CatalogStats::from_catalog(catalog),
        }
    }

    /// Generates the initial population.
    ///
    /// # Errors
    /// - [`PlanError::InvalidConfig`] if the configuration is invalid
    /// - [`PlanError::Infeasible`] if no valid itinerary could be built
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Itinerary>> {
        self.config.validate().map_err(PlanError::InvalidConfig)?;

        let builder = ScheduleBuilder::new(self.catalog, self.days, self.config, &self.stats);
        let mut candidates: Vec<Itinerary> = Vec::new();
        let mut attempts = 0usize;

        for strategy in Strategy::ALL {
            let valid = self.run_strategy(&builder, strategy, rng, &mut candidates);
            attempts += self.config.attempts_per_strategy;
            tracing::info!(strategy = strategy.name(), valid, "construction strategy finished");
        }

        let mut rounds = 0;
        while candidates.len() < self.config.min_population && rounds < self.config.max_top_up_rounds {
            tracing::debug!(have = candidates.len(), round = rounds + 1, "topping up population");
            self.run_strategy(&builder, Strategy::Random, rng, &mut candidates);
            attempts += self.config.attempts_per_strategy;
            rounds += 1;
        }

        if candidates.is_empty() {
            return Err(PlanError::Infeasible { attempts });
        }
        if candidates.len() < self.config.min_population {
            tracing::warn!(
                have = candidates.len(),
                want = self.config.min_population,
                "population below minimum after top-up rounds"
            );
        }

        let raw = candidates.len();
        let population = select_diverse(
            candidates,
            &self.stats,
            self.config.similarity_threshold,
            self.config.max_population,
        );
        tracing::info!(candidates = raw, kept = population.len(), "initial population built");
        Ok(population)
    }

    fn run_strategy<R: Rng + ?Sized>(
        &self,
        builder: &ScheduleBuilder<'_>,
        strategy: Strategy,
        rng: &mut R,
        out: &mut Vec<Itinerary>,
    ) -> usize {
        let before = out.len();
        for _ in 0..self.config.attempts_per_strategy {
            if let Some(it) = builder.build(strategy, rng) {
                if is_valid_schedule(&it, self.days, self.catalog, self.config) {
                    out.push(it);
                }
            }
        }
        out.len() - before
    }
}

/// Structural validity of a constructed itinerary.
///
/// One day schedule per day window, each on its window's date, within the
/// per-day bounds, time-ordered, and contained in both the day window and
/// the attraction's opening hours. No attraction repeats across days.
pub fn is_valid_schedule(
    itinerary: &Itinerary,
    days: &[DayWindow],
    catalog: &Catalog,
    config: &GeneratorConfig,
) -> bool {
    let schedule = itinerary.days();
    if schedule.len() != days.len() {
        return false;
    }

    let mut seen = HashSet::with_capacity(itinerary.len());
    for (day_schedule, day) in schedule.iter().zip(days) {
        let n = day_schedule.len();
        if n < config.min_attractions_per_day || n > config.max_attractions_per_day {
            return false;
        }
        if !day_schedule.is_time_ordered() {
            return false;
        }
        for visit in &day_schedule.visits {
            if visit.date() != day.date
                || !day.window.contains_window(&visit.window)
                || !catalog.attraction(visit.attraction).admits(&visit.window)
                || !seen.insert(visit.attraction)
            {
                return false;
            }
        }
    }
    true
}
