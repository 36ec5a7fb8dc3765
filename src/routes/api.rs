use crate::handlers;
use actix_web::{web, Scope};

pub fn config() -> Scope {
    web::scope("/api")
        .route("/health", web::get().to(handlers::health_check))
        .route("/lyrics/search", web::post().to(handlers::search_lyrics))
        .route("/selection", web::post().to(handlers::capture_selection))
        .route("/detect", web::post().to(handlers::auto_detect))
}
