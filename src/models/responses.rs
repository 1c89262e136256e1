use serde::{Deserialize, Serialize};
use crate::models::domain::ScoringResult;

/// Response for the SWOT analysis endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwotAnalysisResponse {
    #[serde(flatten)]
    pub result: ScoringResult,
    pub analysis_method: String,
    pub metadata: AnalysisMetadata,
}

/// Provenance attached to every analysis response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "analysisId")]
    pub analysis_id: uuid::Uuid,
    pub industry: String,
    pub location: String,
    pub audience: String,
    #[serde(rename = "cacheKey")]
    pub cache_key: String,
    #[serde(rename = "analysisType")]
    pub analysis_type: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "cacheSize")]
    pub cache_size: u64,
    #[serde(rename = "cacheTtlSecs")]
    pub cache_ttl_secs: u64,
    pub model: ModelHealth,
}

/// Diagnostics of the trained success predictor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelHealth {
    pub trees: usize,
    pub training_samples: usize,
    pub validation_samples: usize,
    pub r2: Option<f64>,
    pub mse: Option<f64>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
