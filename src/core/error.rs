use thiserror::Error;

/// Errors raised while fitting or querying the success predictor
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictorError {
    #[error("{0} has not been fitted")]
    NotFitted(&'static str),

    #[error("Expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("Feature {0} is not finite")]
    NonFiniteFeature(usize),

    #[error("Model produced a non-finite prediction")]
    NonFinitePrediction,

    #[error("Training set is empty")]
    EmptyTrainingSet,

    #[error("Unseen category: {0}")]
    UnseenCategory(String),

    #[error("Invalid training parameters: {0}")]
    InvalidParams(String),
}
