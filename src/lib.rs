//! SWOT Engine - deterministic SWOT scoring for startup ideas
//!
//! This library turns a sparse text description of a startup into synthetic
//! market metrics, SWOT category scores, a predicted success probability and
//! qualitative recommendations.

pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{SwotEngine, TrainingParams, synthesize, normalize};
pub use models::{StartupInput, RawMetrics, NormalizedMetrics, ScoringResult, SwotAnalysisRequest, SwotAnalysisResponse};
