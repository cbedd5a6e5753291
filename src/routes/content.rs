use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::extract_array_with_report;
use crate::models::{ErrorResponse, ExtractRequest, ExtractResponse};
use crate::routes::{validation_failed, AppState};

/// Configure content-generation helper routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/content/extract", web::post().to(extract_content));
}

/// Salvage a JSON array from raw model output
///
/// POST /api/v1/content/extract
///
/// Request body:
/// ```json
/// { "raw": "```json\n[{\"caption\": \"...\"}]\n```" }
/// ```
///
/// Responds 422 when nothing usable can be recovered, so callers can tell
/// "the model returned nothing" apart from "the model returned garbage".
async fn extract_content(
    state: web::Data<AppState>,
    req: web::Json<ExtractRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let max_bytes = state.extraction.max_payload_bytes;
    if req.raw.len() > max_bytes {
        tracing::info!("Rejecting {} byte payload (limit {})", req.raw.len(), max_bytes);
        return HttpResponse::PayloadTooLarge().json(ErrorResponse {
            error: "payload_too_large".to_string(),
            message: format!("Payload exceeds {} bytes", max_bytes),
            status_code: 413,
        });
    }

    match extract_array_with_report(&req.raw) {
        Ok(extracted) => {
            if extracted.recovered {
                tracing::warn!(
                    "Returning {} elements salvaged from truncated output",
                    extracted.items.len()
                );
            }

            HttpResponse::Ok().json(ExtractResponse {
                count: extracted.items.len(),
                recovered: extracted.recovered,
                discarded_bytes: extracted.discarded_bytes,
                items: extracted.items,
            })
        }
        Err(e) => {
            tracing::error!("Unrecoverable model output ({} bytes): {}", req.raw.len(), e);
            HttpResponse::UnprocessableEntity().json(ErrorResponse {
                error: "unrecoverable_payload".to_string(),
                message: e.to_string(),
                status_code: 422,
            })
        }
    }
}
