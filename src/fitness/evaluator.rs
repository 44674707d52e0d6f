//! Six-objective itinerary evaluation.

use super::config::{EvaluationConfig, Normalization};
use super::normalizer::{NormalizedMetrics, OnlineNormalizer, RawMetrics};
use super::restaurant::restaurant_penalty;
use crate::distance::DistanceIndex;
use crate::models::{Catalog, Fitness, Itinerary};
use std::fmt::Display;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Reports a catalog or distance entry that should exist but does not.
///
/// Fatal in debug builds; logged and treated as a zero contribution
/// otherwise.
#[cold]
pub(crate) fn missing_entry(kind: &'static str, key: impl Display) {
    tracing::error!(kind, %key, "missing catalog entry during evaluation");
    debug_assert!(false, "missing {kind} entry for {key}");
}

/// Scores itineraries against a fixed catalog and distance index.
///
/// The evaluator itself is stateless; normalization bounds live in the
/// [`OnlineNormalizer`] the caller passes in.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    catalog: &'a Catalog,
    distances: &'a DistanceIndex,
    config: &'a EvaluationConfig,
}

impl<'a> FitnessEvaluator<'a> {
    pub fn new(
        catalog: &'a Catalog,
        distances: &'a DistanceIndex,
        config: &'a EvaluationConfig,
    ) -> Self {
        Self {
            catalog,
            distances,
            config,
        }
    }

    /// Unnormalized metrics of one itinerary. Pure; safe to call in parallel.
    pub fn raw_metrics(&self, itinerary: &Itinerary) -> RawMetrics {
        let distance_km = itinerary
            .visits
            .windows(2)
            .map(|pair| {
                match self.distances.get(pair[0].attraction, pair[1].attraction) {
                    Some(leg) => leg.distance_km,
                    None => {
                        missing_entry(
                            "distance",
                            format!("{}-{}", pair[0].attraction.index(), pair[1].attraction.index()),
                        );
                        0.0
                    }
                }
            })
            .sum();

        // Price, rating, and popularity accrue per leg from its origin, so
        // the final visit contributes only distance.
        let origins = itinerary.visits.len().saturating_sub(1);
        let mut price_level_sum = 0.0;
        let mut rating_sum = 0.0;
        let mut rating_count_sum = 0.0;
        for visit in &itinerary.visits[..origins] {
            match self.catalog.metadata(visit.attraction) {
                Some(meta) => {
                    price_level_sum += f64::from(meta.price_level);
                    rating_sum += meta.rating;
                    rating_count_sum += meta.rating_count as f64;
                }
                None => missing_entry("metadata", visit.attraction.index()),
            }
        }

        RawMetrics {
            distinct_attractions: itinerary.attraction_set().len(),
            distance_km,
            price_level_sum,
            rating_sum,
            rating_count_sum,
            restaurant_penalty: restaurant_penalty(
                &itinerary.visits,
                self.catalog,
                &self.config.restaurant,
            ),
        }
    }

    /// Assembles the fitness vector from raw and normalized metrics.
    pub fn fitness_from(&self, raw: &RawMetrics, normalized: &NormalizedMetrics) -> Fitness {
        let w = &self.config.weights;
        Fitness([
            raw.distinct_attractions as f64,
            -(normalized.distance * w.distance),
            -(normalized.price * w.price),
            normalized.rating * w.rating,
            raw.rating_count_sum,
            -raw.restaurant_penalty,
        ])
    }

    /// Evaluates one itinerary, updating `normalizer` first.
    pub fn evaluate(&self, itinerary: &Itinerary, normalizer: &mut OnlineNormalizer) -> Fitness {
        let raw = self.raw_metrics(itinerary);
        let normalized = normalizer.observe_and_normalize(&raw);
        self.fitness_from(&raw, &normalized)
    }

    /// Evaluates every itinerary whose fitness is missing.
    ///
    /// Returns the number of evaluations performed. `parallel` only has an
    /// effect with [`Normalization::PerGeneration`] and the `parallel`
    /// feature enabled.
    pub fn evaluate_batch(
        &self,
        population: &mut [Itinerary],
        normalizer: &mut OnlineNormalizer,
        mode: Normalization,
        parallel: bool,
    ) -> usize {
        match mode {
            Normalization::Online => {
                let mut evaluated = 0;
                for itinerary in population.iter_mut().filter(|i| !i.is_evaluated()) {
                    itinerary.fitness = Some(self.evaluate(itinerary, normalizer));
                    evaluated += 1;
                }
                evaluated
            }
            Normalization::PerGeneration => {
                let pending: Vec<usize> = population
                    .iter()
                    .enumerate()
                    .filter(|(_, i)| !i.is_evaluated())
                    .map(|(idx, _)| idx)
                    .collect();

                let raws = self.raw_metrics_of(population, &pending, parallel);
                for raw in &raws {
                    normalizer.observe(raw);
                }
                for (&idx, raw) in pending.iter().zip(&raws) {
                    let normalized = normalizer.normalize(raw);
                    population[idx].fitness = Some(self.fitness_from(raw, &normalized));
                }
                pending.len()
            }
        }
    }

    #[cfg(feature = "parallel")]
    fn raw_metrics_of(
        &self,
        population: &[Itinerary],
        indices: &[usize],
        parallel: bool,
    ) -> Vec<RawMetrics> {
        if parallel {
            indices
                .par_iter()
                .map(|&idx| self.raw_metrics(&population[idx]))
                .collect()
        } else {
            indices
                .iter()
                .map(|&idx| self.raw_metrics(&population[idx]))
                .collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn raw_metrics_of(
        &self,
        population: &[Itinerary],
        indices: &[usize],
        _parallel: bool,
    ) -> Vec<RawMetrics> {
        indices
            .iter()
            .map(|&idx| self.raw_metrics(&population[idx]))
            .collect()
    }
}
