use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::models::domain::StartupInput;

/// Request to run a SWOT analysis
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SwotAnalysisRequest {
    #[validate(length(min = 1))]
    pub industry: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(length(min = 1))]
    pub audience: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[serde(alias = "force_fresh", rename = "forceFresh")]
    pub force_fresh: bool,
}

/// Why a request body could not be turned into a `SwotAnalysisRequest`
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("{0}")]
    Shape(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(#[from] ValidationErrors),
}

impl SwotAnalysisRequest {
    /// Build a validated request from a parsed JSON body
    pub fn from_json(body: Value) -> Result<Self, RequestError> {
        if !body.is_object() {
            return Err(RequestError::NotAnObject);
        }
        let req: Self = serde_json::from_value(body)?;
        req.validate()?;
        Ok(req)
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn to_startup_input(&self) -> StartupInput {
        StartupInput::new(
            self.industry.clone(),
            self.location.clone(),
            self.audience.clone(),
            self.description().to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_audience_fails_validation() {
        let req: SwotAnalysisRequest = serde_json::from_str(
            r#"{"industry":"FinTech","location":"US","audience":""}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_force_fresh_defaults_false() {
        let req: SwotAnalysisRequest = serde_json::from_str(
            r#"{"industry":"FinTech","location":"US","audience":"SMB"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert!(!req.force_fresh);
        assert_eq!(req.to_startup_input().description(), "");
    }

    #[test]
    fn test_from_json_rejects_arrays() {
        let result = SwotAnalysisRequest::from_json(serde_json::json!(["FinTech", "US", "SMB"]));
        assert!(matches!(result, Err(RequestError::NotAnObject)));
    }

    #[test]
    fn test_from_json_missing_field() {
        let result = SwotAnalysisRequest::from_json(serde_json::json!({"industry": "FinTech"}));
        assert!(matches!(result, Err(RequestError::Shape(_))));
    }

    #[test]
    fn test_from_json_empty_field() {
        let result = SwotAnalysisRequest::from_json(
            serde_json::json!({"industry": "FinTech", "location": "", "audience": "SMB"}),
        );
        assert!(matches!(result, Err(RequestError::Invalid(_))));
    }

    #[test]
    fn test_from_json_accepts_object() {
        let req = SwotAnalysisRequest::from_json(serde_json::json!({
            "industry": "FinTech",
            "location": "US",
            "audience": "SMB",
            "forceFresh": true
        }))
        .unwrap();
        assert!(req.force_fresh);
        assert_eq!(req.description(), "");
    }
}
