use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lyrics_finder_service::config::{Config, SecurityConfig};
use lyrics_finder_service::{configure, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let state = match AppState::new(config.clone()) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize lyrics client: {:#}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Starting lyrics finder on port {} (lookup via {}, timeout {}ms)",
        config.server.port, config.lookup.base_url, config.lookup.timeout_ms
    );

    let security = config.security.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&security))
            .wrap(Logger::default())
            .configure(configure(state.clone()))
    })
    .bind(format!("{}:{}", config.server.host, config.server.port))?;

    info!(
        "Server started successfully at http://{}:{}",
        config.server.host, config.server.port
    );

    server.workers(config.server.workers).run().await
}

fn cors(security: &SecurityConfig) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if security.allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin();
    }
    security
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
