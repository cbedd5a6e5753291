// Route exports
pub mod content;
pub mod recommendations;

use actix_web::{error, web, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use crate::config::{ExtractionSettings, ServerSettings};
use crate::core::TemplateMatcher;
use crate::models::ErrorResponse;

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub matcher: TemplateMatcher,
    pub extraction: ExtractionSettings,
}

/// Mount the API with the default JSON body limit
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    configure_api(cfg, ServerSettings::default().json_limit_bytes);
}

/// Mount the API with a custom JSON body limit
pub fn configure_routes_with_limit(json_limit: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| configure_api(cfg, json_limit)
}

fn configure_api(cfg: &mut web::ServiceConfig, json_limit: usize) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(json_config(json_limit))
            .configure(recommendations::configure)
            .configure(content::configure),
    );
}

/// JSON extractor config answering malformed bodies with a JSON 400
fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(handle_json_payload_error)
}

/// Handle JSON payload errors (malformed body, catalog that is not a list, ...)
fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    });
    error::InternalError::from_response(err, response).into()
}

/// 400 response for a request that failed validation
pub(crate) fn validation_failed(errors: ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: field_errors={:?}", errors);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}
