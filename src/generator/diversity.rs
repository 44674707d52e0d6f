//! Catalog statistics, greedy priorities, and the diversity filter.

use crate::models::{AttractionId, Catalog, Itinerary};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Rating, price, and popularity of every attraction, min/max normalized
/// over the catalog. A constant column normalizes to 1.0.
#[derive(Debug, Clone)]
pub struct CatalogStats {
    rating: Vec<f64>,
    price: Vec<f64>,
    popularity: Vec<f64>,
}

impl CatalogStats {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let column = |f: fn(&crate::models::PlaceMetadata) -> f64| -> Vec<f64> {
            let raw: Vec<f64> = catalog
                .ids()
                .map(|id| catalog.metadata(id).map(f).unwrap_or(0.0))
                .collect();
            normalize_column(&raw)
        };
        Self {
            rating: column(|m| m.rating),
            price: column(|m| f64::from(m.price_level)),
            popularity: column(|m| m.rating_count as f64),
        }
    }

    #[inline]
    pub fn rating(&self, id: AttractionId) -> f64 {
        self.rating[id.index()]
    }

    #[inline]
    pub fn price(&self, id: AttractionId) -> f64 {
        self.price[id.index()]
    }

    #[inline]
    pub fn popularity(&self, id: AttractionId) -> f64 {
        self.popularity[id.index()]
    }

    /// `0.4·rating + 0.3·(1 − price) + 0.3·popularity`.
    pub fn desirability(&self, id: AttractionId) -> f64 {
        0.4 * self.rating(id) + 0.3 * (1.0 - self.price(id)) + 0.3 * self.popularity(id)
    }

    /// Mean desirability over every visit; 0 for an empty itinerary.
    pub fn itinerary_score(&self, itinerary: &Itinerary) -> f64 {
        if itinerary.is_empty() {
            return 0.0;
        }
        let total: f64 = itinerary.attraction_ids().map(|id| self.desirability(id)).sum();
        total / itinerary.len() as f64
    }
}

fn normalize_column(raw: &[f64]) -> Vec<f64> {
    let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max > min {
        raw.iter().map(|v| (v - min) / (max - min)).collect()
    } else {
        vec![1.0; raw.len()]
    }
}

/// Ordering used by one greedy attempt. Higher scores come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    /// Rating, descending.
    Rating,
    /// Price level, ascending.
    Price,
    /// Rating count, descending.
    Popularity,
    /// `0.4·rating − 0.3·price + 0.3·popularity`, descending.
    Composite,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Rating,
        Priority::Price,
        Priority::Popularity,
        Priority::Composite,
    ];

    pub fn score(self, stats: &CatalogStats, id: AttractionId) -> f64 {
        match self {
            Priority::Rating => stats.rating(id),
            Priority::Price => -stats.price(id),
            Priority::Popularity => stats.popularity(id),
            Priority::Composite => {
                0.4 * stats.rating(id) - 0.3 * stats.price(id) + 0.3 * stats.popularity(id)
            }
        }
    }

    /// Catalog ids stable-sorted by descending score.
    pub fn order(self, stats: &CatalogStats, catalog: &Catalog) -> Vec<AttractionId> {
        let mut ids: Vec<AttractionId> = catalog.ids().collect();
        ids.sort_by(|a, b| self.score(stats, *b).total_cmp(&self.score(stats, *a)));
        ids
    }
}

/// `|a ∩ b| / |a ∪ b|`; two empty sets are identical.
pub fn jaccard(a: &HashSet<AttractionId>, b: &HashSet<AttractionId>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 1.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Keeps the most desirable candidates whose attraction sets are not too
/// similar to anything already kept.
///
/// Candidates are stable-sorted by [`CatalogStats::itinerary_score`],
/// descending. A candidate is rejected when its Jaccard similarity to any
/// kept itinerary exceeds `threshold`. At most `cap` are kept.
pub fn select_diverse(
    candidates: Vec<Itinerary>,
    stats: &CatalogStats,
    threshold: f64,
    cap: usize,
) -> Vec<Itinerary> {
    let mut scored: Vec<(f64, Itinerary)> = candidates
        .into_iter()
        .map(|it| (stats.itinerary_score(&it), it))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut kept: Vec<Itinerary> = Vec::new();
    let mut kept_sets: Vec<HashSet<AttractionId>> = Vec::new();
    for (_, candidate) in scored {
        if kept.len() >= cap {
            break;
        }
        let set = candidate.attraction_set();
        if kept_sets.iter().all(|k| jaccard(&set, k) <= threshold) {
            kept_sets.push(set);
            kept.push(candidate);
        }
    }
    kept
}
