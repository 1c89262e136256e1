use crate::models::{Metric, NormalizedMetrics, RawMetrics};

/// Declared range of a raw metric and which end of it favors the startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationRange {
    pub min: f64,
    pub max: f64,
    pub higher_is_better: bool,
}

impl NormalizationRange {
    /// Used for metric names without a table entry
    pub const DEFAULT: NormalizationRange = NormalizationRange::new(0.0, 100.0, true);

    const fn new(min: f64, max: f64, higher_is_better: bool) -> Self {
        Self {
            min,
            max,
            higher_is_better,
        }
    }

    pub fn for_metric(metric: Metric) -> Self {
        match metric {
            Metric::MarketGrowthRate => Self::new(0.0, 50.0, true),
            Metric::CompetitionLevel => Self::new(1.0, 10.0, false),
            Metric::RegulatoryDifficulty => Self::new(1.0, 10.0, false),
            Metric::FundingAvailability => Self::new(1.0, 10.0, true),
            Metric::TechComplexity => Self::new(1.0, 10.0, true),
            Metric::MarketSizeBillions => Self::new(0.1, 100.0, true),
            Metric::TimeToMarketMonths => Self::new(1.0, 36.0, false),
            Metric::CustomerAcquisitionCost => Self::new(10.0, 1000.0, false),
            Metric::RevenuePotential => Self::new(50_000.0, 50_000_000.0, true),
        }
    }

    /// Range for a metric by its snake_case name
    pub fn for_name(name: &str) -> Self {
        Metric::from_name(name).map_or(Self::DEFAULT, Self::for_metric)
    }

    /// Rescale `value` to 0-100, clipping outside the declared range
    pub fn apply(&self, value: f64) -> f64 {
        let t = (value - self.min) / (self.max - self.min);
        // NaN lands on the unfavorable end
        let t = if t.is_nan() {
            if self.higher_is_better { 0.0 } else { 1.0 }
        } else {
            t.clamp(0.0, 1.0)
        };

        if self.higher_is_better {
            t * 100.0
        } else {
            (1.0 - t) * 100.0
        }
    }
}

/// Normalize a single named metric value
pub fn normalize_value(name: &str, value: f64) -> f64 {
    NormalizationRange::for_name(name).apply(value)
}

/// Rescale all raw metrics to 0-100 with directionality applied
pub fn normalize(raw: &RawMetrics) -> NormalizedMetrics {
    NormalizedMetrics::from_fn(|metric| NormalizationRange::for_metric(metric).apply(raw.get(metric)))
}
