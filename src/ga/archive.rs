//! Pareto archive (hall of fame).

use crate::models::{Fitness, Itinerary};

/// Every non-dominated itinerary seen during a run.
///
/// Never holds a dominated member or two members with identical fitness.
#[derive(Debug, Clone, Default)]
pub struct ParetoArchive {
    members: Vec<Itinerary>,
}

impl ParetoArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers every evaluated individual of `population` to the archive.
    ///
    /// Returns the number of individuals admitted.
    pub fn update(&mut self, population: &[Itinerary]) -> usize {
        population
            .iter()
            .filter(|candidate| self.offer(candidate))
            .count()
    }

    /// Offers one individual. Unevaluated individuals are ignored.
    pub fn offer(&mut self, candidate: &Itinerary) -> bool {
        let Some(fitness) = candidate.fitness else {
            return false;
        };

        let rejected = self.fitnesses().any(|member| {
            member == fitness || member.dominates(&fitness)
        });
        if rejected {
            return false;
        }

        self.members.retain(|m| {
            m.fitness
                .is_some_and(|member| !fitness.dominates(&member))
        });
        self.members.push(candidate.clone());
        true
    }

    pub fn members(&self) -> &[Itinerary] {
        &self.members
    }

    pub fn into_members(self) -> Vec<Itinerary> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn fitnesses(&self) -> impl Iterator<Item = Fitness> + '_ {
        self.members.iter().filter_map(|m| m.fitness)
    }
}
