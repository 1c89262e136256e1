use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::core::SwotEngine;
use crate::models::{
    AnalysisMetadata, ErrorResponse, HealthResponse, ModelHealth, SwotAnalysisRequest,
    SwotAnalysisResponse,
};
use crate::services::{CacheKey, ResultCache};

pub const ANALYSIS_METHOD: &str = "ml_model";
pub const ANALYSIS_TYPE: &str = "comprehensive_swot_analysis";
pub const SERVICE_NAME: &str = "swot-analysis";
pub const MISSING_FIELDS: &str = "Missing required fields: industry, location, audience";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: SwotEngine,
    pub cache: Arc<ResultCache>,
}

/// Configure all analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/swot-analysis", web::post().to(swot_analysis));
}

/// Health check endpoint, includes predictor validation metrics
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let report = state.engine.predictor().report();
    let cache = state.cache.stats().await;

    HttpResponse::Ok().json(HealthResponse {
        status: "operational".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cache_size: cache.entries,
        cache_ttl_secs: cache.ttl_secs,
        model: ModelHealth {
            trees: report.trees,
            training_samples: report.training_samples,
            validation_samples: report.validation_samples,
            r2: report.r2,
            mse: report.mse,
        },
    })
}

/// SWOT analysis endpoint
///
/// POST /api/v1/swot-analysis
///
/// Request body:
/// ```json
/// {
///   "industry": "FinTech",
///   "location": "US",
///   "audience": "SMB",
///   "description": "B2B payments",
///   "forceFresh": false
/// }
/// ```
async fn swot_analysis(
    state: web::Data<AppState>,
    body: web::Json<serde_json::Value>,
) -> impl Responder {
    let req = match SwotAnalysisRequest::from_json(body.into_inner()) {
        Ok(req) => req,
        Err(e) => {
            tracing::info!("Rejected swot_analysis request: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: MISSING_FIELDS.to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    let cache_key = CacheKey::analysis(&req.industry, &req.location, &req.audience, req.description());

    tracing::info!(
        "SWOT analysis for industry: {}, location: {}, audience: {}, force_fresh: {}",
        req.industry,
        req.location,
        req.audience,
        req.force_fresh
    );

    if req.force_fresh {
        tracing::debug!("Force refresh requested, bypassing cache for {}", cache_key);
    } else if let Some(cached) = state.cache.get(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    let result = state.engine.analyze(&req.to_startup_input());

    let response = SwotAnalysisResponse {
        result,
        analysis_method: ANALYSIS_METHOD.to_string(),
        metadata: AnalysisMetadata {
            generated_at: chrono::Utc::now(),
            analysis_id: uuid::Uuid::new_v4(),
            industry: req.industry,
            location: req.location,
            audience: req.audience,
            cache_key: cache_key.clone(),
            analysis_type: ANALYSIS_TYPE.to_string(),
        },
    };

    state.cache.set(&cache_key, response.clone()).await;

    HttpResponse::Ok().json(response)
}
