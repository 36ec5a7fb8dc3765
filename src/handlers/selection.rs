use actix_web::{web, HttpResponse, Result};
use chrono::{Duration, Utc};
use validator::Validate;

use crate::config::MAX_SELECTION_TTL_SECONDS;
use crate::models::{ErrorResponse, SelectionRecord, SelectionRequest, SelectionResponse};
use crate::AppState;

pub async fn capture_selection(
    state: web::Data<AppState>,
    req: web::Json<SelectionRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::with_details(
            "Invalid request",
            format!("Validation error: {}", e),
        )));
    }

    let req = req.into_inner();
    let ttl = Duration::seconds(
        state
            .config
            .selection
            .ttl_seconds
            .clamp(1, MAX_SELECTION_TTL_SECONDS),
    );
    let selection = SelectionRecord::capture(&req.text, req.url, Utc::now(), ttl);
    tracing::debug!("Captured selection {} ({} chars)", selection.id, selection.text.len());

    Ok(HttpResponse::Ok().json(SelectionResponse {
        preview: selection.preview(),
        selection,
    }))
}
