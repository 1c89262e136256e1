// Core pipeline exports
pub mod engine;
pub mod error;
pub mod forest;
pub mod narrative;
pub mod normalize;
pub mod predictor;
pub mod scoring;
pub mod synth;

pub use engine::SwotEngine;
pub use error::PredictorError;
pub use forest::{ForestParams, RandomForest};
pub use narrative::{narrate, recommend};
pub use normalize::{normalize, normalize_value, NormalizationRange};
pub use predictor::{FittedPredictor, TrainingParams, TrainingReport};
pub use scoring::{overall_score, score};
pub use synth::{hash_seed, industry_factor, synthesize, IndustryFactor};
