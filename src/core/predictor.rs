use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::f64::consts::PI;

use crate::core::error::PredictorError;
use crate::core::forest::{ForestParams, RandomForest};
use crate::core::synth::synthesize;
use crate::models::{Metric, RawMetrics, StartupInput};

pub const TRAINING_INDUSTRIES: [&str; 8] = [
    "FinTech",
    "HealthTech",
    "EdTech",
    "E-commerce",
    "SaaS",
    "AI/ML",
    "IoT",
    "Blockchain",
];
pub const TRAINING_LOCATIONS: [&str; 4] = ["US", "Europe", "Asia", "Global"];
pub const TRAINING_TEAM_SIZES: [&str; 4] = ["1-5", "6-15", "16-50", "50+"];

/// Team size bucket assumed at inference, requests carry no team size
pub const DEFAULT_TEAM_SIZE: &str = "1-5";

/// Three categorical codes followed by the nine raw metrics
pub const FEATURE_COUNT: usize = 3 + Metric::ALL.len();

/// Returned whenever inference fails
pub const NEUTRAL_PROBABILITY: f64 = 50.0;

/// Settings for one training run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingParams {
    pub samples: usize,
    pub validation_fraction: f64,
    pub seed: u64,
    pub forest: ForestParams,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            samples: 1000,
            validation_fraction: 0.2,
            seed: 42,
            forest: ForestParams::default(),
        }
    }
}

/// One synthetic labelled startup
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRecord {
    pub industry: &'static str,
    pub location: &'static str,
    pub team_size: &'static str,
    pub metrics: RawMetrics,
    /// Normalized to 0-100 across the generated set
    pub success_score: f64,
}

/// Generate `samples` labelled records from fixed distributions
///
/// The label is a weighted sum of the raw metrics, min-max scaled to 0-100.
/// It shares no weights with the composite SWOT scorer; keep the two separate.
pub fn generate_training_data(samples: usize, seed: u64) -> Vec<TrainingRecord> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut records: Vec<TrainingRecord> = (0..samples)
        .map(|_| {
            let industry = pick(&mut rng, &TRAINING_INDUSTRIES);
            let location = pick(&mut rng, &TRAINING_LOCATIONS);
            let team_size = pick(&mut rng, &TRAINING_TEAM_SIZES);
            let metrics = RawMetrics {
                market_growth_rate: sample_normal(&mut rng, 15.0, 8.0),
                competition_level: rng.random_range(1.0..10.0),
                regulatory_difficulty: rng.random_range(1.0..10.0),
                funding_availability: rng.random_range(1.0..10.0),
                tech_complexity: rng.random_range(1.0..10.0),
                market_size_billions: sample_normal(&mut rng, 2.0, 1.0).exp(),
                time_to_market_months: rng.random_range(3.0..36.0),
                customer_acquisition_cost: rng.random_range(10.0..1000.0),
                revenue_potential: rng.random_range(100_000.0..50_000_000.0),
            };
            TrainingRecord {
                industry,
                location,
                team_size,
                success_score: raw_success_score(&metrics),
                metrics,
            }
        })
        .collect();

    let (min, max) = records.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
        (lo.min(r.success_score), hi.max(r.success_score))
    });
    let span = max - min;
    for record in &mut records {
        record.success_score = if span > 0.0 {
            (record.success_score - min) / span * 100.0
        } else {
            NEUTRAL_PROBABILITY
        };
    }

    records
}

/// Unnormalized training label
pub fn raw_success_score(m: &RawMetrics) -> f64 {
    m.market_growth_rate * 0.2
        + (11.0 - m.competition_level) * 0.15
        + (11.0 - m.regulatory_difficulty) * 0.1
        + m.funding_availability * 0.15
        + m.tech_complexity * 0.1
        + m.market_size_billions.ln() * 0.15
        + (37.0 - m.time_to_market_months) * 0.05
        + m.revenue_potential.ln() * 0.1
}

fn pick(rng: &mut StdRng, choices: &[&'static str]) -> &'static str {
    choices[rng.random_range(0..choices.len())]
}

fn sample_normal(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    // 1 - [0, 1) keeps u1 away from zero
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    mean + (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos() * std_dev
}

/// Maps category labels to their index in the sorted class list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let classes: BTreeSet<&str> = labels.into_iter().collect();
        Self {
            classes: classes.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn transform(&self, label: &str) -> Result<usize, PredictorError> {
        if self.classes.is_empty() {
            return Err(PredictorError::NotFitted("label encoder"));
        }
        self.classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .map_err(|_| PredictorError::UnseenCategory(label.to_string()))
    }

    /// Code for `label`, falling back to 0 for unseen labels
    pub fn transform_or_default(&self, label: &str) -> usize {
        self.transform(label).unwrap_or(0)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// Zero-mean, unit-variance feature scaler
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self, PredictorError> {
        let width = rows.first().map(Vec::len).ok_or(PredictorError::EmptyTrainingSet)?;
        let n = rows.len() as f64;

        let mut mean = vec![0.0; width];
        for row in rows {
            if row.len() != width {
                return Err(PredictorError::FeatureCount {
                    expected: width,
                    actual: row.len(),
                });
            }
            for (m, x) in mean.iter_mut().zip(row) {
                *m += x / n;
            }
        }

        let mut variance = vec![0.0; width];
        for row in rows {
            for ((v, x), m) in variance.iter_mut().zip(row).zip(&mean) {
                *v += (x - m).powi(2) / n;
            }
        }

        // Constant columns pass through unscaled
        let scale = variance
            .into_iter()
            .map(|v| if v > 0.0 { v.sqrt() } else { 1.0 })
            .collect();

        Ok(Self { mean, scale })
    }

    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>, PredictorError> {
        if self.mean.is_empty() {
            return Err(PredictorError::NotFitted("feature scaler"));
        }
        if row.len() != self.mean.len() {
            return Err(PredictorError::FeatureCount {
                expected: self.mean.len(),
                actual: row.len(),
            });
        }
        if let Some(i) = row.iter().position(|x| !x.is_finite()) {
            return Err(PredictorError::NonFiniteFeature(i));
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }

    pub fn means(&self) -> &[f64] {
        &self.mean
    }

    pub fn scales(&self) -> &[f64] {
        &self.scale
    }
}

/// Validation diagnostics from a training run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub trees: usize,
    pub training_samples: usize,
    pub validation_samples: usize,
    /// `None` when the validation split is empty
    pub r2: Option<f64>,
    pub mse: Option<f64>,
}

/// Encoders for the three categorical features
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryEncoders {
    pub industry: LabelEncoder,
    pub location: LabelEncoder,
    pub team_size: LabelEncoder,
}

impl CategoryEncoders {
    pub fn fit(records: &[TrainingRecord]) -> Self {
        Self {
            industry: LabelEncoder::fit(records.iter().map(|r| r.industry)),
            location: LabelEncoder::fit(records.iter().map(|r| r.location)),
            team_size: LabelEncoder::fit(records.iter().map(|r| r.team_size)),
        }
    }
}

/// Trained success predictor: encoders, scaler and forest
///
/// Immutable once built; share it behind an `Arc` for concurrent reads.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedPredictor {
    encoders: CategoryEncoders,
    scaler: StandardScaler,
    forest: RandomForest,
    report: TrainingReport,
}

impl FittedPredictor {
    /// Generate synthetic data, split it, then fit encoders, scaler and forest
    pub fn train(params: &TrainingParams) -> Result<Self, PredictorError> {
        if !(0.0..1.0).contains(&params.validation_fraction) {
            return Err(PredictorError::InvalidParams(format!(
                "validation_fraction must be in [0, 1), got {}",
                params.validation_fraction
            )));
        }
        params.forest.validate()?;

        let records = generate_training_data(params.samples, params.seed);
        if records.is_empty() {
            return Err(PredictorError::EmptyTrainingSet);
        }

        let encoders = CategoryEncoders::fit(&records);
        let features: Vec<Vec<f64>> = records
            .iter()
            .map(|r| {
                feature_vector(
                    encoders.industry.transform_or_default(r.industry),
                    encoders.location.transform_or_default(r.location),
                    encoders.team_size.transform_or_default(r.team_size),
                    &r.metrics,
                )
            })
            .collect();
        let labels: Vec<f64> = records.iter().map(|r| r.success_score).collect();

        let mut order: Vec<usize> = (0..records.len()).collect();
        order.shuffle(&mut StdRng::seed_from_u64(params.seed));
        let n_validation = (records.len() as f64 * params.validation_fraction).ceil() as usize;
        let (validation_idx, train_idx) = order.split_at(n_validation.min(records.len()));
        if train_idx.is_empty() {
            return Err(PredictorError::EmptyTrainingSet);
        }

        let train_rows: Vec<Vec<f64>> = train_idx.iter().map(|&i| features[i].clone()).collect();
        let train_labels: Vec<f64> = train_idx.iter().map(|&i| labels[i]).collect();

        let scaler = StandardScaler::fit(&train_rows)?;
        let scaled_train = train_rows
            .iter()
            .map(|row| scaler.transform(row))
            .collect::<Result<Vec<_>, _>>()?;

        let forest = RandomForest::fit(&scaled_train, &train_labels, &params.forest)?;

        let mut actual = Vec::with_capacity(validation_idx.len());
        let mut predicted = Vec::with_capacity(validation_idx.len());
        for &i in validation_idx {
            let scaled = scaler.transform(&features[i])?;
            predicted.push(forest.predict(&scaled)?);
            actual.push(labels[i]);
        }

        let report = TrainingReport {
            trees: forest.n_trees(),
            training_samples: train_idx.len(),
            validation_samples: validation_idx.len(),
            r2: (!actual.is_empty()).then(|| r2_score(&actual, &predicted)),
            mse: (!actual.is_empty()).then(|| mean_squared_error(&actual, &predicted)),
        };

        tracing::info!(
            trees = report.trees,
            training_samples = report.training_samples,
            validation_samples = report.validation_samples,
            r2 = ?report.r2,
            mse = ?report.mse,
            "Success predictor trained"
        );

        Ok(Self {
            encoders,
            scaler,
            forest,
            report,
        })
    }

    /// Assemble a predictor from separately fitted parts
    pub fn from_parts(
        encoders: CategoryEncoders,
        scaler: StandardScaler,
        forest: RandomForest,
        report: TrainingReport,
    ) -> Self {
        Self {
            encoders,
            scaler,
            forest,
            report,
        }
    }

    /// Unscaled 12-feature vector for an input; unseen categories encode as 0
    pub fn features(&self, input: &StartupInput) -> Vec<f64> {
        let metrics = synthesize(input);
        feature_vector(
            self.encoders.industry.transform_or_default(input.industry()),
            self.encoders.location.transform_or_default(input.location()),
            self.encoders.team_size.transform_or_default(DEFAULT_TEAM_SIZE),
            &metrics,
        )
    }

    /// Predicted success score clipped to 0-100
    pub fn try_predict(&self, input: &StartupInput) -> Result<f64, PredictorError> {
        let scaled = self.scaler.transform(&self.features(input))?;
        let prediction = self.forest.predict(&scaled)?;
        if !prediction.is_finite() {
            return Err(PredictorError::NonFinitePrediction);
        }
        Ok(prediction.clamp(0.0, 100.0))
    }

    /// Like `try_predict`, but any failure yields the neutral 50.0
    pub fn predict(&self, input: &StartupInput) -> f64 {
        match self.try_predict(input) {
            Ok(probability) => probability,
            Err(e) => {
                tracing::warn!("Prediction failed, using neutral probability: {}", e);
                NEUTRAL_PROBABILITY
            }
        }
    }

    pub fn encoders(&self) -> &CategoryEncoders {
        &self.encoders
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }

    pub fn report(&self) -> &TrainingReport {
        &self.report
    }
}

fn feature_vector(industry: usize, location: usize, team_size: usize, metrics: &RawMetrics) -> Vec<f64> {
    let mut row = Vec::with_capacity(FEATURE_COUNT);
    row.extend([industry as f64, location as f64, team_size as f64]);
    row.extend(metrics.to_array());
    row
}

pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> f64 {
    let n = actual.len().min(predicted.len());
    if n == 0 {
        return 0.0;
    }
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / n as f64
}

/// Coefficient of determination; 0.0 when the targets are constant
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> f64 {
    let n = actual.len().min(predicted.len());
    if n == 0 {
        return 0.0;
    }
    let mean = actual.iter().take(n).sum::<f64>() / n as f64;
    let ss_tot: f64 = actual.iter().take(n).map(|a| (a - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    if ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    }
}
