//! Online min/max normalization.
//!
//! The accumulator is owned by the caller and threaded through every
//! evaluation. Bounds only widen, so the normalized value of a fixed raw
//! metric drifts as the run observes new extremes.

/// Raw, unnormalized metrics of one itinerary.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawMetrics {
    /// Number of distinct attractions.
    pub distinct_attractions: usize,
    /// Total great-circle distance over consecutive visits, km.
    pub distance_km: f64,
    /// Sum of price levels over every visit but the last.
    pub price_level_sum: f64,
    /// Sum of ratings over every visit but the last.
    pub rating_sum: f64,
    /// Sum of rating counts over every visit but the last.
    pub rating_count_sum: f64,
    /// Restaurant distribution penalty.
    pub restaurant_penalty: f64,
}

/// Normalized distance, price, and rating in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalizedMetrics {
    pub distance: f64,
    pub price: f64,
    pub rating: f64,
}

/// Running bounds of one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl Default for MetricRange {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl MetricRange {
    /// Widens the bounds to include `value`.
    #[inline]
    pub fn observe(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// `(value - min) / (max - min)`, or 0 when the range is degenerate.
    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        if self.max > self.min {
            (value - self.min) / (self.max - self.min)
        } else {
            0.0
        }
    }
}

/// Running bounds for the distance, price, and rating objectives.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OnlineNormalizer {
    pub distance: MetricRange,
    pub price: MetricRange,
    pub rating: MetricRange,
}

impl OnlineNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one itinerary's raw metrics into the bounds.
    pub fn observe(&mut self, raw: &RawMetrics) {
        self.distance.observe(raw.distance_km);
        self.price.observe(raw.price_level_sum);
        self.rating.observe(raw.rating_sum);
    }

    /// Normalizes against the current bounds without updating them.
    pub fn normalize(&self, raw: &RawMetrics) -> NormalizedMetrics {
        NormalizedMetrics {
            distance: self.distance.normalize(raw.distance_km),
            price: self.price.normalize(raw.price_level_sum),
            rating: self.rating.normalize(raw.rating_sum),
        }
    }

    /// Updates the bounds with `raw`, then normalizes it against them.
    pub fn observe_and_normalize(&mut self, raw: &RawMetrics) -> NormalizedMetrics {
        self.observe(raw);
        self.normalize(raw)
    }
}
