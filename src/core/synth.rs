use md5::{Digest, Md5};
use std::f64::consts::PI;

use crate::models::{Metric, RawMetrics, StartupInput};

/// Floor applied to the first uniform draw so `ln(u1)` stays finite
const UNIFORM_EPSILON: f64 = 0.000_001;
const HASH_MODULUS: u64 = 1_000_000;
const SECOND_DRAW_MULTIPLIER: u64 = 7;

/// Industry multipliers applied to the growth, competition and regulation means
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndustryFactor {
    pub growth: f64,
    pub competition: f64,
    pub regulation: f64,
}

impl IndustryFactor {
    pub const NEUTRAL: IndustryFactor = IndustryFactor {
        growth: 1.0,
        competition: 1.0,
        regulation: 1.0,
    };

    const fn new(growth: f64, competition: f64, regulation: f64) -> Self {
        Self {
            growth,
            competition,
            regulation,
        }
    }

    fn axis(&self, axis: FactorAxis) -> f64 {
        match axis {
            FactorAxis::Growth => self.growth,
            FactorAxis::Competition => self.competition,
            FactorAxis::Regulation => self.regulation,
        }
    }
}

/// Substring table, first match wins
pub const INDUSTRY_FACTORS: [(&str, IndustryFactor); 7] = [
    ("fintech", IndustryFactor::new(1.2, 1.3, 1.8)),
    ("healthtech", IndustryFactor::new(1.1, 1.1, 2.0)),
    ("edtech", IndustryFactor::new(1.0, 1.2, 1.2)),
    ("ecommerce", IndustryFactor::new(0.9, 1.5, 1.0)),
    ("saas", IndustryFactor::new(1.3, 1.4, 1.1)),
    ("ai", IndustryFactor::new(1.5, 1.2, 1.3)),
    ("blockchain", IndustryFactor::new(1.4, 1.1, 1.9)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorAxis {
    Growth,
    Competition,
    Regulation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Identity,
    /// Sample is drawn in log space
    Exp,
}

/// Synthesis constants for one metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSpec {
    pub metric: Metric,
    pub multiplier: u64,
    pub mean: f64,
    pub std_dev: f64,
    pub axis: Option<FactorAxis>,
    pub transform: Transform,
    pub floor: f64,
    pub ceiling: Option<f64>,
}

/// One entry per metric, in `Metric::ALL` order. Multipliers are distinct primes.
pub static METRIC_SPECS: [MetricSpec; 9] = [
    MetricSpec {
        metric: Metric::MarketGrowthRate,
        multiplier: 3,
        mean: 12.0,
        std_dev: 5.0,
        axis: Some(FactorAxis::Growth),
        transform: Transform::Identity,
        floor: 0.0,
        ceiling: None,
    },
    MetricSpec {
        metric: Metric::CompetitionLevel,
        multiplier: 5,
        mean: 5.0,
        std_dev: 2.0,
        axis: Some(FactorAxis::Competition),
        transform: Transform::Identity,
        floor: 1.0,
        ceiling: Some(10.0),
    },
    MetricSpec {
        metric: Metric::RegulatoryDifficulty,
        multiplier: 7,
        mean: 4.0,
        std_dev: 2.0,
        axis: Some(FactorAxis::Regulation),
        transform: Transform::Identity,
        floor: 1.0,
        ceiling: Some(10.0),
    },
    MetricSpec {
        metric: Metric::FundingAvailability,
        multiplier: 11,
        mean: 6.0,
        std_dev: 2.0,
        axis: None,
        transform: Transform::Identity,
        floor: 1.0,
        ceiling: Some(10.0),
    },
    MetricSpec {
        metric: Metric::TechComplexity,
        multiplier: 13,
        mean: 5.0,
        std_dev: 2.0,
        axis: None,
        transform: Transform::Identity,
        floor: 1.0,
        ceiling: Some(10.0),
    },
    MetricSpec {
        metric: Metric::MarketSizeBillions,
        multiplier: 17,
        mean: 1.0,
        std_dev: 0.5,
        axis: None,
        transform: Transform::Exp,
        floor: 0.1,
        ceiling: None,
    },
    MetricSpec {
        metric: Metric::TimeToMarketMonths,
        multiplier: 19,
        mean: 12.0,
        std_dev: 6.0,
        axis: None,
        transform: Transform::Identity,
        floor: 1.0,
        ceiling: None,
    },
    MetricSpec {
        metric: Metric::CustomerAcquisitionCost,
        multiplier: 23,
        mean: 200.0,
        std_dev: 100.0,
        axis: None,
        transform: Transform::Identity,
        floor: 10.0,
        ceiling: None,
    },
    MetricSpec {
        metric: Metric::RevenuePotential,
        multiplier: 29,
        mean: 5_000_000.0,
        std_dev: 2_000_000.0,
        axis: None,
        transform: Transform::Identity,
        floor: 50_000.0,
        ceiling: None,
    },
];

impl MetricSpec {
    pub fn for_metric(metric: Metric) -> &'static MetricSpec {
        &METRIC_SPECS[metric as usize]
    }

    /// Deterministic value for this metric given the input seed and industry factor
    pub fn sample(&self, seed: u32, factor: &IndustryFactor) -> f64 {
        let scale = self.axis.map_or(1.0, |axis| factor.axis(axis));
        let value = self.mean * scale + pseudo_normal(seed, self.multiplier) * self.std_dev;
        let value = match self.transform {
            Transform::Identity => value,
            Transform::Exp => value.exp(),
        };
        let value = value.max(self.floor);
        match self.ceiling {
            Some(ceiling) => value.min(ceiling),
            None => value,
        }
    }
}

/// MD5 digest of a key string
pub fn content_digest(key: &str) -> [u8; 16] {
    let mut digest = [0u8; 16];
    digest.copy_from_slice(&Md5::digest(key.as_bytes()));
    digest
}

/// Leading eight hex digits of the MD5 digest as an integer
pub fn hash_seed(key: &str) -> u32 {
    let digest = content_digest(key);
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Standard-normal-like value derived from the seed via a Box-Muller transform
pub fn pseudo_normal(seed: u32, multiplier: u64) -> f64 {
    let base = u64::from(seed).wrapping_mul(multiplier);
    let u1 = (base % HASH_MODULUS) as f64 / HASH_MODULUS as f64;
    let u2 = (base.wrapping_mul(SECOND_DRAW_MULTIPLIER) % HASH_MODULUS) as f64 / HASH_MODULUS as f64;
    let u1 = u1.max(UNIFORM_EPSILON);

    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Factor for the first table entry contained in the lowercased industry, else neutral
pub fn industry_factor(industry: &str) -> IndustryFactor {
    let industry = industry.to_lowercase();
    INDUSTRY_FACTORS
        .iter()
        .find(|(key, _)| industry.contains(key))
        .map(|(_, factor)| *factor)
        .unwrap_or(IndustryFactor::NEUTRAL)
}

/// Derive the nine raw metrics for a startup
pub fn synthesize(input: &StartupInput) -> RawMetrics {
    let seed = hash_seed(&input.canonical_key());
    let factor = industry_factor(input.industry());
    RawMetrics::from_fn(|metric| MetricSpec::for_metric(metric).sample(seed, &factor))
}
