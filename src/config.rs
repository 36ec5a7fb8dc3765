use serde::{Deserialize, Serialize};
use std::env;

/// Upper bound for `SELECTION_TTL_SECONDS`.
pub const MAX_SELECTION_TTL_SECONDS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub lookup: LookupConfig,
    pub selection: SelectionConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub max_json_payload_size: usize,
    /// Outer bound on a whole search request, independent of the lookup race.
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    pub base_url: String,
    pub source_label: String,
    pub timeout_ms: u64,
    pub preview_lines: usize,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub ttl_seconds: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5733,
                workers: num_cpus::get(),
                max_json_payload_size: 64 * 1024,
                request_timeout_ms: 10_000,
            },
            lookup: LookupConfig::default(),
            selection: SelectionConfig { ttl_seconds: 30 },
            security: SecurityConfig {
                allowed_origins: vec!["*".to_string()],
            },
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.lyrics.ovh".to_string(),
            source_label: "Lyrics.ovh API".to_string(),
            timeout_ms: 3_000,
            preview_lines: 4,
            user_agent: format!("lyrics-finder/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Config::default();

        // Server configuration
        if let Ok(host) = env::var("HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            config.server.port = port.parse()?;
        }
        if let Ok(workers) = env::var("WORKERS") {
            config.server.workers = workers.parse()?;
        }
        if let Ok(max_json_payload_size) = env::var("MAX_JSON_PAYLOAD_SIZE") {
            config.server.max_json_payload_size = max_json_payload_size.parse()?;
        }
        if let Ok(request_timeout_ms) = env::var("REQUEST_TIMEOUT_MS") {
            config.server.request_timeout_ms = request_timeout_ms.parse()?;
        }

        // Lookup configuration
        if let Ok(base_url) = env::var("LYRICS_API_BASE_URL") {
            config.lookup.base_url = base_url;
        }
        if let Ok(source_label) = env::var("LYRICS_SOURCE_LABEL") {
            config.lookup.source_label = source_label;
        }
        if let Ok(timeout_ms) = env::var("LOOKUP_TIMEOUT_MS") {
            config.lookup.timeout_ms = timeout_ms.parse()?;
        }
        if let Ok(preview_lines) = env::var("PREVIEW_LINES") {
            config.lookup.preview_lines = preview_lines.parse()?;
        }
        if let Ok(user_agent) = env::var("LYRICS_USER_AGENT") {
            config.lookup.user_agent = user_agent;
        }

        // Selection configuration
        if let Ok(ttl_seconds) = env::var("SELECTION_TTL_SECONDS") {
            config.selection.ttl_seconds = ttl_seconds.parse()?;
        }

        // Security configuration
        if let Ok(allowed_origins) = env::var("ALLOWED_ORIGINS") {
            config.security.allowed_origins = allowed_origins
                .split(',')
                .map(|s| s.trim().to_string())
                .collect();
        }

        validate(&config)?;
        Ok(config)
    }
}

pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.lookup.timeout_ms == 0 {
        anyhow::bail!("LOOKUP_TIMEOUT_MS must be greater than zero");
    }
    if config.lookup.preview_lines == 0 {
        anyhow::bail!("PREVIEW_LINES must be greater than zero");
    }
    if config.selection.ttl_seconds <= 0 {
        anyhow::bail!("SELECTION_TTL_SECONDS must be greater than zero");
    }
    if config.selection.ttl_seconds > MAX_SELECTION_TTL_SECONDS
        || chrono::Duration::try_seconds(config.selection.ttl_seconds).is_none()
    {
        anyhow::bail!(
            "SELECTION_TTL_SECONDS must not exceed {}",
            MAX_SELECTION_TTL_SECONDS
        );
    }
    if config.server.request_timeout_ms < config.lookup.timeout_ms {
        anyhow::bail!("REQUEST_TIMEOUT_MS must not be shorter than LOOKUP_TIMEOUT_MS");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.lookup.timeout_ms, 3_000);
        assert_eq!(config.lookup.preview_lines, 4);
        assert_eq!(config.selection.ttl_seconds, 30);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn rejects_request_timeout_shorter_than_lookup() {
        let mut config = Config::default();
        config.server.request_timeout_ms = 1_000;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn rejects_out_of_range_selection_ttl() {
        let mut config = Config::default();
        config.selection.ttl_seconds = i64::MAX / 10;
        assert!(validate(&config).is_err());

        config.selection.ttl_seconds = MAX_SELECTION_TTL_SECONDS + 1;
        assert!(validate(&config).is_err());

        config.selection.ttl_seconds = MAX_SELECTION_TTL_SECONDS;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn rejects_zero_preview_lines() {
        let mut config = Config::default();
        config.lookup.preview_lines = 0;
        assert!(validate(&config).is_err());
    }
}
