// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Category, CategoryScores, Metric, NormalizedMetrics, RawMetrics, ScoringResult, StartupInput,
    SwotNarrative, DEFAULT_INDUSTRY, DEFAULT_LOCATION,
};
pub use requests::{RequestError, SwotAnalysisRequest};
pub use responses::{AnalysisMetadata, ErrorResponse, HealthResponse, ModelHealth, SwotAnalysisResponse};
