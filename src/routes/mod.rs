// Route exports
pub mod analysis;

use actix_web::{error, http::StatusCode, web, HttpResponse};

use crate::models::ErrorResponse;

pub use analysis::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(analysis::configure),
    );
}

/// JSON extractor config that reports malformed bodies as `ErrorResponse`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let body = ErrorResponse {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: StatusCode::BAD_REQUEST.as_u16(),
    };
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}
