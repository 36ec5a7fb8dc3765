use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use std::time::Duration;
use validator::Validate;

use crate::models::{ErrorResponse, LookupResult, SearchRequest, SearchResponse};
use crate::AppState;

pub async fn search_lyrics(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> Result<HttpResponse> {
    // Validate request
    if let Err(e) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::with_details(
            "Invalid request",
            format!("Validation error: {}", e),
        )));
    }

    let Some(query) = req.effective_query(Utc::now()) else {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::new(
            "Please enter a song name or artist",
        )));
    };

    tracing::info!("Received search request for: {}", query);

    let deadline = Duration::from_millis(state.config.server.request_timeout_ms);
    let result = match tokio::time::timeout(deadline, state.resolver.resolve(&query)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Search for {:?} exceeded {:?}", query, deadline);
            LookupResult::error(&query, "Search timed out")
        }
    };

    Ok(HttpResponse::Ok().json(SearchResponse::from(result)))
}
