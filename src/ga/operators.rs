//! Feasibility-preserving variation operators for itineraries.
//!
//! Operators work on the flattened visit sequence. They never fail: an
//! inapplicable mutation is a no-op and a crossover that would repeat an
//! attraction is rejected, leaving both parents untouched.
//!
//! # Mutation Operators
//!
//! - point: substitute one attraction with an unused one open during the
//!   same window, then re-chain every later visit
//! - delete: remove one visit (only when more than two remain)
//! - insert: add an unused attraction after a random predecessor
//! - swap: exchange the attractions of two visits
//!
//! Re-chaining starts each later visit exactly at the previous visit's end,
//! with its own stay and no travel buffer. Point re-chains through later
//! days; insert and swap stop at the end of the affected day.
//!
//! # Crossover Operators
//!
//! - one-point, two-point, uniform: positional exchange of whole visits
//! - PMX: Goldberg & Lingle (1985) partially mapped crossover keyed on
//!   attraction ids
//!
//! Crossover performs no re-timing.

use crate::models::{AttractionId, Catalog, Itinerary, ScheduledVisit, TimeWindow};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Mutation sub-operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MutationKind {
    Point,
    Delete,
    Insert,
    Swap,
}

/// Crossover sub-operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CrossoverKind {
    OnePoint,
    TwoPoint,
    Uniform,
    Pmx,
}

/// Which sub-operators are enabled.
///
/// Defaults: point and delete mutation; one-point, two-point, and uniform
/// crossover. Insert, swap, and PMX are available but off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    pub mutations: Vec<MutationKind>,
    pub crossovers: Vec<CrossoverKind>,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            mutations: vec![MutationKind::Point, MutationKind::Delete],
            crossovers: vec![
                CrossoverKind::OnePoint,
                CrossoverKind::TwoPoint,
                CrossoverKind::Uniform,
            ],
        }
    }
}

impl OperatorConfig {
    /// Enables or disables a mutation kind.
    pub fn with_mutation(mut self, kind: MutationKind, enabled: bool) -> Self {
        self.mutations.retain(|k| *k != kind);
        if enabled {
            self.mutations.push(kind);
            self.mutations.sort_unstable();
        }
        self
    }

    /// Enables or disables a crossover kind.
    pub fn with_crossover(mut self, kind: CrossoverKind, enabled: bool) -> Self {
        self.crossovers.retain(|k| *k != kind);
        if enabled {
            self.crossovers.push(kind);
            self.crossovers.sort_unstable();
        }
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.mutations.is_empty() {
            return Err("at least one mutation kind must be enabled".into());
        }
        if self.crossovers.is_empty() {
            return Err("at least one crossover kind must be enabled".into());
        }
        Ok(())
    }
}

/// Mutation and crossover over a fixed catalog.
#[derive(Debug, Clone, Copy)]
pub struct VariationOperators<'a> {
    catalog: &'a Catalog,
    config: &'a OperatorConfig,
}

impl<'a> VariationOperators<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a OperatorConfig) -> Self {
        Self { catalog, config }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Applies one enabled, applicable mutation chosen uniformly at random.
    ///
    /// Returns whether the itinerary changed; a changed itinerary has its
    /// fitness invalidated.
    pub fn mutate<R: Rng + ?Sized>(&self, itinerary: &mut Itinerary, rng: &mut R) -> bool {
        let applicable: Vec<MutationKind> = self
            .config
            .mutations
            .iter()
            .copied()
            .filter(|kind| self.is_applicable(*kind, itinerary))
            .collect();
        let Some(&kind) = applicable.choose(rng) else {
            return false;
        };

        let visits = &mut itinerary.visits;
        let changed = match kind {
            MutationKind::Point => {
                let idx = rng.random_range(0..visits.len());
                self.point_at(visits, idx, rng)
            }
            MutationKind::Delete => {
                let idx = rng.random_range(0..visits.len());
                visits.remove(idx);
                true
            }
            MutationKind::Insert => {
                let idx = rng.random_range(0..=visits.len());
                self.insert_at(visits, idx, rng)
            }
            MutationKind::Swap => {
                let a = rng.random_range(0..visits.len());
                let mut b = rng.random_range(0..visits.len() - 1);
                if b >= a {
                    b += 1;
                }
                self.swap_at(visits, a.min(b), a.max(b));
                true
            }
        };

        if changed {
            itinerary.invalidate_fitness();
        }
        changed
    }

    fn is_applicable(&self, kind: MutationKind, itinerary: &Itinerary) -> bool {
        let n = itinerary.len();
        match kind {
            MutationKind::Point => n >= 1,
            MutationKind::Delete => n > 2,
            MutationKind::Insert => n >= 1 && n < self.catalog.len(),
            MutationKind::Swap => n >= 2,
        }
    }

    fn point_at<R: Rng + ?Sized>(
        &self,
        visits: &mut [ScheduledVisit],
        idx: usize,
        rng: &mut R,
    ) -> bool {
        let window = visits[idx].window;
        let present: HashSet<AttractionId> = visits.iter().map(|v| v.attraction).collect();
        let candidates: Vec<AttractionId> = self
            .catalog
            .ids()
            .filter(|id| !present.contains(id))
            .filter(|id| self.catalog.attraction(*id).admits(&window))
            .collect();

        let Some(&replacement) = candidates.choose(rng) else {
            return false;
        };
        visits[idx].attraction = replacement;
        self.rechain_rest(visits, idx);
        true
    }

    fn insert_at<R: Rng + ?Sized>(
        &self,
        visits: &mut Vec<ScheduledVisit>,
        idx: usize,
        rng: &mut R,
    ) -> bool {
        let present: HashSet<AttractionId> = visits.iter().map(|v| v.attraction).collect();
        let unused: Vec<AttractionId> = self
            .catalog
            .ids()
            .filter(|id| !present.contains(id))
            .collect();
        let Some(&added) = unused.choose(rng) else {
            return false;
        };

        let start = match idx {
            0 => visits[0].window.start,
            _ => visits[idx - 1].window.end,
        };
        let stay = self.catalog.attraction(added).stay;
        visits.insert(idx, ScheduledVisit::new(added, TimeWindow::starting_at(start, stay)));
        self.rechain_after(visits, idx);
        true
    }

    /// `a < b`. Exchanges attractions and re-times from the earlier position;
    /// a later position on another day is re-timed from its own start.
    fn swap_at(&self, visits: &mut [ScheduledVisit], a: usize, b: usize) {
        let first = visits[a].attraction;
        visits[a].attraction = visits[b].attraction;
        visits[b].attraction = first;

        let same_day = visits[a].date() == visits[b].date();
        self.retime_from(visits, a);
        if !same_day {
            self.retime_from(visits, b);
        }
    }

    /// Recomputes the end of `visits[idx]` from its stay, then re-chains.
    fn retime_from(&self, visits: &mut [ScheduledVisit], idx: usize) {
        let stay = self.catalog.attraction(visits[idx].attraction).stay;
        visits[idx].window = TimeWindow::starting_at(visits[idx].window.start, stay);
        self.rechain_after(visits, idx);
    }

    /// Starts every later visit of the same day at the previous visit's end.
    fn rechain_after(&self, visits: &mut [ScheduledVisit], idx: usize) {
        let date = visits[idx].date();
        let end = visits[idx + 1..]
            .iter()
            .position(|v| v.date() != date)
            .map_or(visits.len(), |p| idx + 1 + p);
        self.chain(visits, idx, end);
    }

    /// Starts every later visit, whatever its date, at the previous visit's end.
    fn rechain_rest(&self, visits: &mut [ScheduledVisit], idx: usize) {
        self.chain(visits, idx, visits.len());
    }

    fn chain(&self, visits: &mut [ScheduledVisit], idx: usize, end: usize) {
        for j in (idx + 1)..end {
            let stay = self.catalog.attraction(visits[j].attraction).stay;
            visits[j].window = TimeWindow::starting_at(visits[j - 1].window.end, stay);
        }
    }

    // ========================================================================
    // Crossover
    // ========================================================================

    /// Recombines `a` and `b` in place with one enabled crossover kind.
    ///
    /// If either offspring would repeat an attraction, both parents are left
    /// exactly as they were, fitness included, and `false` is returned.
    /// Otherwise both are replaced by the offspring with fitness invalidated.
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        a: &mut Itinerary,
        b: &mut Itinerary,
        rng: &mut R,
    ) -> bool {
        let Some(&kind) = self.config.crossovers.choose(rng) else {
            return false;
        };

        let (c1, c2) = match kind {
            CrossoverKind::OnePoint => one_point(&a.visits, &b.visits, rng),
            CrossoverKind::TwoPoint => two_point(&a.visits, &b.visits, rng),
            CrossoverKind::Uniform => uniform(&a.visits, &b.visits, rng),
            CrossoverKind::Pmx => pmx(&a.visits, &b.visits, rng),
        };

        if has_repeated_attraction(&c1) || has_repeated_attraction(&c2) {
            return false;
        }

        *a = Itinerary::new(c1);
        *b = Itinerary::new(c2);
        true
    }
}

/// Swaps tails after a cut in `[1, min_len - 1]`.
fn one_point<R: Rng + ?Sized>(
    a: &[ScheduledVisit],
    b: &[ScheduledVisit],
    rng: &mut R,
) -> (Vec<ScheduledVisit>, Vec<ScheduledVisit>) {
    let mut c1 = a.to_vec();
    let mut c2 = b.to_vec();
    if a.len() > 1 && b.len() > 1 {
        let cut = rng.random_range(1..a.len().min(b.len()));
        let tail1 = c1.split_off(cut);
        let tail2 = c2.split_off(cut);
        c1.extend(tail2);
        c2.extend(tail1);
    }
    (c1, c2)
}

/// Swaps the segment `[p1, p2)` with `1 <= p1 < p2 <= min_len - 1`.
fn two_point<R: Rng + ?Sized>(
    a: &[ScheduledVisit],
    b: &[ScheduledVisit],
    rng: &mut R,
) -> (Vec<ScheduledVisit>, Vec<ScheduledVisit>) {
    let mut c1 = a.to_vec();
    let mut c2 = b.to_vec();
    if a.len() > 2 && b.len() > 2 {
        let size = a.len().min(b.len());
        let p1 = rng.random_range(1..=size - 2);
        let p2 = rng.random_range(p1 + 1..=size - 1);
        c1[p1..p2].swap_with_slice(&mut c2[p1..p2]);
    }
    (c1, c2)
}

/// Swaps each position below the shorter length with probability 0.5.
fn uniform<R: Rng + ?Sized>(
    a: &[ScheduledVisit],
    b: &[ScheduledVisit],
    rng: &mut R,
) -> (Vec<ScheduledVisit>, Vec<ScheduledVisit>) {
    let mut c1 = a.to_vec();
    let mut c2 = b.to_vec();
    for i in 0..a.len().min(b.len()) {
        if rng.random_bool(0.5) {
            std::mem::swap(&mut c1[i], &mut c2[i]);
        }
    }
    (c1, c2)
}

/// Partially mapped crossover on attraction ids.
///
/// The segment `[p1, p2)` is exchanged; outside it, an attraction that now
/// clashes with the incoming segment is replaced by following the segment
/// mapping. Each position keeps its original time window.
fn pmx<R: Rng + ?Sized>(
    a: &[ScheduledVisit],
    b: &[ScheduledVisit],
    rng: &mut R,
) -> (Vec<ScheduledVisit>, Vec<ScheduledVisit>) {
    let size = a.len().min(b.len());
    if size <= 2 {
        return (a.to_vec(), b.to_vec());
    }
    let p1 = rng.random_range(0..=size - 2);
    let p2 = rng.random_range(p1 + 1..=size - 1);
    (pmx_child(a, b, p1, p2), pmx_child(b, a, p1, p2))
}

fn pmx_child(
    template: &[ScheduledVisit],
    donor: &[ScheduledVisit],
    p1: usize,
    p2: usize,
) -> Vec<ScheduledVisit> {
    // Incoming segment id → id it displaced.
    let mapping: HashMap<AttractionId, AttractionId> = (p1..p2)
        .map(|i| (donor[i].attraction, template[i].attraction))
        .collect();

    let mut child = template.to_vec();
    child[p1..p2].copy_from_slice(&donor[p1..p2]);

    for (i, visit) in child.iter_mut().enumerate() {
        if (p1..p2).contains(&i) {
            continue;
        }
        let mut id = visit.attraction;
        for _ in 0..mapping.len() {
            match mapping.get(&id) {
                Some(&next) => id = next,
                None => break,
            }
        }
        visit.attraction = id;
    }
    child
}

fn has_repeated_attraction(visits: &[ScheduledVisit]) -> bool {
    let mut seen = HashSet::with_capacity(visits.len());
    !visits.iter().all(|v| seen.insert(v.attraction))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Fitness, OBJECTIVE_COUNT};
    use crate::random::create_rng;
    use crate::test_support::{id, taipei_catalog, visit};
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn day_one(catalog: &Catalog) -> Vec<ScheduledVisit> {
        vec![
            visit(id(catalog, "taipei_101"), "2024-03-20T09:00", "2024-03-20T11:00"),
            visit(id(catalog, "cks_memorial"), "2024-03-20T11:30", "2024-03-20T13:30"),
            visit(id(catalog, "longshan_temple"), "2024-03-20T14:00", "2024-03-20T15:30"),
        ]
    }

    fn evaluated(visits: Vec<ScheduledVisit>, score: f64) -> Itinerary {
        Itinerary {
            visits,
            fitness: Some(Fitness([score; OBJECTIVE_COUNT])),
        }
    }

    fn assert_chained(visits: &[ScheduledVisit], catalog: &Catalog) {
        for pair in visits.windows(2) {
            if pair[0].date() == pair[1].date() {
                assert_eq!(pair[1].window.start, pair[0].window.end);
            }
        }
        for v in visits {
            assert_eq!(v.window.duration(), catalog.attraction(v.attraction).stay);
        }
    }

    // ---- Mutation ----

    #[test]
    fn test_point_keeps_window_and_rechains_without_buffer() {
        let catalog = taipei_catalog();
        let config = OperatorConfig::default();
        let ops = VariationOperators::new(&catalog, &config);
        let mut visits = day_one(&catalog);
        let original = visits[0];

        assert!(ops.point_at(&mut visits, 0, &mut create_rng(42)));

        assert_ne!(visits[0].attraction, original.attraction);
        assert_eq!(visits[0].window, original.window);
        assert!(catalog.attraction(visits[0].attraction).admits(&visits[0].window));
        // The 30-minute gaps are gone.
        assert_eq!(visits[1].window.start, original.window.end);
        assert_eq!(visits[1].window.end, original.window.end + TimeDelta::hours(2));
        assert_eq!(visits[2].window.start, visits[1].window.end);
        assert_eq!(visits[2].window.duration(), TimeDelta::minutes(90));
    }

    #[test]
    fn test_point_without_candidate_is_noop() {
        let catalog = taipei_catalog();
        let config = OperatorConfig::default();
        let ops = VariationOperators::new(&catalog, &config);
        // Nothing in the catalog is open at 05:00.
        let mut visits = vec![visit(
            id(&catalog, "elephant_mountain"),
            "2024-03-20T05:00",
            "2024-03-20T07:30",
        )];
        let before = visits.clone();
        assert!(!ops.point_at(&mut visits, 0, &mut create_rng(1)));
        assert_eq!(visits, before);
    }

    #[test]
    fn test_point_rechains_into_later_days() {
        let catalog = taipei_catalog();
        let config = OperatorConfig::default();
        let ops = VariationOperators::new(&catalog, &config);
        let mut visits = day_one(&catalog);
        visits.push(visit(id(&catalog, "palace_museum"), "2024-03-21T09:00", "2024-03-21T12:00"));

        assert!(ops.point_at(&mut visits, 1, &mut create_rng(3)));

        // The next-day visit follows straight on from the re-chained day.
        assert_eq!(visits[2].window.start, visits[1].window.end);
        assert_eq!(visits[3].window.start, visits[2].window.end);
        assert_eq!(visits[3].window.duration(), TimeDelta::hours(3));
        assert_eq!(visits[3].attraction, id(&catalog, "palace_museum"));
    }

    #[test]
    fn test_insert_rechain_stops_at_day_boundary() {
        let catalog = taipei_catalog();
        let config = OperatorConfig::default();
        let ops = VariationOperators::new(&catalog, &config);
        let mut visits = day_one(&catalog);
        let next_day = visit(id(&catalog, "palace_museum"), "2024-03-21T09:00", "2024-03-21T12:00");
        visits.push(next_day);

        assert!(ops.insert_at(&mut visits, 1, &mut create_rng(3)));
        assert_eq!(visits.len(), 5);
        assert_eq!(visits[4], next_day);
    }

    #[test]
    fn test_delete_requires_more_than_two_visits() {
        let catalog = taipei_catalog();
        let config = OperatorConfig::default()
            .with_mutation(MutationKind::Point, false)
            .with_mutation(MutationKind::Delete, true);
        let ops = VariationOperators::new(&catalog, &config);
        let mut rng = create_rng(5);

        let mut it = evaluated(day_one(&catalog), 1.0);
        assert!(ops.mutate(&mut it, &mut rng));
        assert_eq!(it.len(), 2);
        assert!(!it.is_evaluated());

        let mut it = evaluated(it.visits, 1.0);
        assert!(!ops.mutate(&mut it, &mut rng));
        assert_eq!(it.len(), 2);
        assert!(it.is_evaluated());
    }

    #[test]
    fn test_insert_starts_at_predecessor_end() {
        let catalog = taipei_catalog();
        let config = OperatorConfig::default();
        let ops = VariationOperators::new(&catalog, &config);
        let mut visits = day_one(&catalog);
        let predecessor_end = visits[0].window.end;

        assert!(ops.insert_at(&mut visits, 1, &mut create_rng(9)));
        assert_eq!(visits.len(), 4);
        assert_eq!(visits[1].window.start, predecessor_end);
        assert!(!has_repeated_attraction(&visits));
        assert_chained(&visits, &catalog);
    }

    #[test]
    fn test_swap_exchanges_and_rechains() {
        let catalog = taipei_catalog();
        let config = OperatorConfig::default();
        let ops = VariationOperators::new(&catalog, &config);
        let mut visits = day_one(&catalog);
        let (first, last) = (visits[0].attraction, visits[2].attraction);

        ops.swap_at(&mut visits, 0, 2);
        assert_eq!(visits[0].attraction, last);
        assert_eq!(visits[2].attraction, first);
        assert_eq!(visits[0].window.start, day_one(&catalog)[0].window.start);
        assert_chained(&visits, &catalog);
    }

    #[test]
    fn test_mutation_kinds_toggle() {
        let config = OperatorConfig::default()
            .with_mutation(MutationKind::Swap, true)
            .with_mutation(MutationKind::Delete, false)
            .with_crossover(CrossoverKind::Pmx, true);
        assert_eq!(config.mutations, vec![MutationKind::Point, MutationKind::Swap]);
        assert_eq!(config.crossovers.len(), 4);
        assert!(config.validate().is_ok());

        let empty = OperatorConfig::default()
            .with_mutation(MutationKind::Point, false)
            .with_mutation(MutationKind::Delete, false);
        assert!(empty.validate().is_err());
    }

    // ---- Crossover ----

    #[test]
    fn test_rejected_crossover_returns_parents_unchanged() {
        let catalog = taipei_catalog();
        let config = OperatorConfig {
            crossovers: vec![CrossoverKind::OnePoint, CrossoverKind::TwoPoint],
            ..OperatorConfig::default()
        };
        let ops = VariationOperators::new(&catalog, &config);

        // Same three attractions in rotated order: every cut repeats one.
        let a_visits = day_one(&catalog);
        let b_visits = vec![
            visit(a_visits[1].attraction, "2024-03-20T09:00", "2024-03-20T11:00"),
            visit(a_visits[2].attraction, "2024-03-20T11:30", "2024-03-20T13:00"),
            visit(a_visits[0].attraction, "2024-03-20T13:30", "2024-03-20T15:30"),
        ];

        let mut rng = create_rng(11);
        for _ in 0..20 {
            let mut a = evaluated(a_visits.clone(), 1.0);
            let mut b = evaluated(b_visits.clone(), 2.0);
            assert!(!ops.crossover(&mut a, &mut b, &mut rng));
            assert_eq!(a, evaluated(a_visits.clone(), 1.0));
            assert_eq!(b, evaluated(b_visits.clone(), 2.0));
        }
    }

    #[test]
    fn test_accepted_crossover_does_not_retime() {
        let catalog = taipei_catalog();
        let config = OperatorConfig::default();
        let ops = VariationOperators::new(&catalog, &config);

        let a_visits = day_one(&catalog);
        let b_visits = vec![
            visit(id(&catalog, "palace_museum"), "2024-03-20T09:00", "2024-03-20T12:00"),
            visit(id(&catalog, "taipei_zoo"), "2024-03-20T12:30", "2024-03-20T16:30"),
            visit(id(&catalog, "shilin_night_market"), "2024-03-20T17:00", "2024-03-20T19:00"),
        ];
        let pool: Vec<ScheduledVisit> = a_visits.iter().chain(&b_visits).copied().collect();

        let mut a = evaluated(a_visits, 1.0);
        let mut b = evaluated(b_visits, 2.0);
        // Disjoint parents never clash.
        assert!(ops.crossover(&mut a, &mut b, &mut create_rng(4)));
        assert!(!a.is_evaluated() && !b.is_evaluated());
        for v in a.visits.iter().chain(&b.visits) {
            assert!(pool.contains(v));
        }
    }

    #[test]
    fn test_pmx_child_repairs_clashes() {
        let catalog = taipei_catalog();
        let a = day_one(&catalog);
        let b = vec![
            visit(a[2].attraction, "2024-03-20T09:00", "2024-03-20T10:30"),
            visit(id(&catalog, "palace_museum"), "2024-03-20T11:00", "2024-03-20T14:00"),
            visit(a[0].attraction, "2024-03-20T14:30", "2024-03-20T16:30"),
        ];

        // Segment [0, 2) brings in longshan and palace. Longshan at position
        // 2 clashes and maps back to taipei_101, keeping its own window.
        let child = pmx_child(&a, &b, 0, 2);
        assert_eq!(child[0].attraction, a[2].attraction);
        assert_eq!(child[1].attraction, id(&catalog, "palace_museum"));
        assert_eq!(child[2], ScheduledVisit::new(a[0].attraction, a[2].window));
        assert!(!has_repeated_attraction(&child));

        // Segment [1, 3) brings in palace and taipei_101. Taipei_101 at
        // position 0 maps to longshan.
        let child = pmx_child(&a, &b, 1, 3);
        assert_eq!(child[0].attraction, a[2].attraction);
        assert_eq!(child[0].window, a[0].window);
        assert!(!has_repeated_attraction(&child));
    }

    proptest! {
        #[test]
        fn prop_crossover_is_identity_or_duplicate_free(seed in any::<u64>(), pmx_on in any::<bool>()) {
            let catalog = taipei_catalog();
            let config = OperatorConfig::default().with_crossover(CrossoverKind::Pmx, pmx_on);
            let ops = VariationOperators::new(&catalog, &config);

            let a_visits = day_one(&catalog);
            let b_visits = vec![
                visit(id(&catalog, "cks_memorial"), "2024-03-20T09:00", "2024-03-20T11:00"),
                visit(id(&catalog, "palace_museum"), "2024-03-20T11:30", "2024-03-20T14:30"),
                visit(id(&catalog, "fika_cafe"), "2024-03-20T15:00", "2024-03-20T16:00"),
                visit(id(&catalog, "taipei_101"), "2024-03-20T16:30", "2024-03-20T18:30"),
            ];
            let mut a = evaluated(a_visits.clone(), 1.0);
            let mut b = evaluated(b_visits.clone(), 2.0);

            if ops.crossover(&mut a, &mut b, &mut create_rng(seed)) {
                prop_assert!(!a.has_duplicates() && !b.has_duplicates());
                prop_assert!(a.fitness.is_none() && b.fitness.is_none());
            } else {
                prop_assert_eq!(a, evaluated(a_visits, 1.0));
                prop_assert_eq!(b, evaluated(b_visits, 2.0));
            }
        }
    }
}
