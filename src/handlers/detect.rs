use actix_web::{web, HttpResponse, Result};
use validator::Validate;

use crate::models::{DetectRequest, ErrorResponse};
use crate::AppState;

pub async fn auto_detect(
    state: web::Data<AppState>,
    req: web::Json<DetectRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::with_details(
            "Invalid request",
            format!("Validation error: {}", e),
        )));
    }

    match state.detect_service.detect(&req) {
        Ok(detected) => Ok(HttpResponse::Ok().json(detected)),
        Err(e) => {
            tracing::debug!("Auto-detect failed for {}: {}", req.url, e);
            Ok(HttpResponse::UnprocessableEntity().json(ErrorResponse::new(e.to_string())))
        }
    }
}
