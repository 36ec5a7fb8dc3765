pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use actix_web::web;
use std::sync::Arc;
use std::time::Instant;

use config::Config;
use services::{DetectService, LyricsLookup, LyricsOvhClient, QueryResolver, ResolverSettings};

#[derive(Clone)]
pub struct AppState {
    pub resolver: QueryResolver,
    pub detect_service: DetectService,
    pub config: Config,
    pub start_time: Instant,
}

impl AppState {
    /// State backed by the real lyrics.ovh client.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = LyricsOvhClient::new(&config.lookup)?;
        Ok(Self::with_lookup(config, Arc::new(client)))
    }

    pub fn with_lookup(config: Config, lookup: Arc<dyn LyricsLookup>) -> Self {
        let resolver = QueryResolver::new(lookup, ResolverSettings::from(&config.lookup));
        Self {
            resolver,
            detect_service: DetectService,
            config,
            start_time: Instant::now(),
        }
    }
}

/// Registers state, JSON limits, the API scope and the 404 fallback.
pub fn configure(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let json_limit = state.config.server.max_json_payload_size;
        cfg.app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().limit(json_limit))
            .service(routes::api::config())
            .default_service(web::route().to(handlers::not_found));
    }
}
