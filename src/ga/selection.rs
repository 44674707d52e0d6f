//! Pareto-based survivor selection.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"

use super::multi_objective::{crowding_distance, non_dominated_sort};
use crate::models::{Fitness, Itinerary, OBJECTIVE_COUNT};
use serde::{Deserialize, Serialize};

/// How the next generation is drawn from the current one.
///
/// # Examples
///
/// ```
/// use u_itinerary::ga::SelectionPolicy;
///
/// // Select a fifth of the population and repeat it five times.
/// let sel = SelectionPolicy::default();
/// assert_eq!(sel, SelectionPolicy::Replicated { replicas: 5 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionPolicy {
    /// NSGA-II selects `⌊k / replicas⌋` (at least 1) individuals and the
    /// subset is repeated `replicas` times, truncated to `k`. The result
    /// never exceeds `k` members and deliberately contains duplicate
    /// genomes.
    Replicated { replicas: usize },

    /// Plain NSGA-II selection of `k` individuals.
    Nsga2,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        SelectionPolicy::Replicated { replicas: 5 }
    }
}

impl SelectionPolicy {
    /// Selects the next generation from `population`.
    pub fn select(&self, population: &[Itinerary], k: usize) -> Vec<Itinerary> {
        match *self {
            SelectionPolicy::Nsga2 => select_nsga2(population, k)
                .into_iter()
                .map(|i| population[i].clone())
                .collect(),
            SelectionPolicy::Replicated { replicas } => {
                let replicas = replicas.max(1);
                let subset = select_nsga2(population, (k / replicas).max(1));
                subset
                    .iter()
                    .cycle()
                    .take(k.min(subset.len() * replicas))
                    .map(|&i| population[i].clone())
                    .collect()
            }
        }
    }
}

/// Fitness used for ranking; unevaluated individuals rank last.
fn ranking_fitness(itinerary: &Itinerary) -> Fitness {
    itinerary
        .fitness
        .unwrap_or(Fitness([f64::NEG_INFINITY; OBJECTIVE_COUNT]))
}

/// NSGA-II selection of `k` indices (at most the population size).
///
/// Whole fronts are taken in rank order. The front that does not fit is
/// sorted by crowding distance, most isolated first, and truncated.
pub fn select_nsga2(population: &[Itinerary], k: usize) -> Vec<usize> {
    let k = k.min(population.len());
    if k == 0 {
        return Vec::new();
    }

    let fitnesses: Vec<Fitness> = population.iter().map(ranking_fitness).collect();
    let sorted = non_dominated_sort(&fitnesses);

    let mut chosen = Vec::with_capacity(k);
    for front in sorted.fronts {
        if chosen.len() + front.len() <= k {
            chosen.extend(front);
            if chosen.len() == k {
                break;
            }
            continue;
        }

        let front_fitness: Vec<Fitness> = front.iter().map(|&i| fitnesses[i]).collect();
        let distances = crowding_distance(&front_fitness);
        let mut order: Vec<usize> = (0..front.len()).collect();
        order.sort_by(|&a, &b| distances[b].total_cmp(&distances[a]));
        let remaining = k - chosen.len();
        chosen.extend(order.into_iter().take(remaining).map(|pos| front[pos]));
        break;
    }
    chosen
}
