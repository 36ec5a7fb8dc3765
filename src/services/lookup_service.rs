use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::LookupConfig;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lyrics service request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("lyrics service answered {0}")]
    Status(StatusCode),
    /// `LyricsOvhClient::new` already rejects bases without a path, so the
    /// production client only hits this if that check is bypassed.
    #[error("cannot build lyrics endpoint from {0}")]
    InvalidEndpoint(String),
}

impl LookupError {
    /// A miss is an ordinary outcome that falls back to search links. The
    /// rest are surfaced as error results.
    pub fn is_miss(&self) -> bool {
        !matches!(self, LookupError::InvalidEndpoint(_))
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LyricsLookup: Send + Sync {
    fn source_label(&self) -> String;

    /// `Ok(None)` when the service knows nothing about the song.
    async fn fetch_lyrics(&self, artist: &str, song: &str) -> Result<Option<String>, LookupError>;
}

#[derive(Debug, Deserialize)]
struct LyricsPayload {
    lyrics: Option<String>,
}

/// Client for the lyrics.ovh `GET /v1/<artist>/<song>` API.
#[derive(Clone)]
pub struct LyricsOvhClient {
    http: reqwest::Client,
    base_url: Url,
    source_label: String,
}

impl LyricsOvhClient {
    pub fn new(config: &LookupConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid lyrics service url: {}", config.base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("Lyrics service url cannot carry a path: {}", config.base_url);
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build lyrics http client")?;

        Ok(Self {
            http,
            base_url,
            source_label: config.source_label.clone(),
        })
    }

    pub fn endpoint(&self, artist: &str, song: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v1", artist, song]);
        Ok(url)
    }
}

#[async_trait]
impl LyricsLookup for LyricsOvhClient {
    fn source_label(&self) -> String {
        self.source_label.clone()
    }

    async fn fetch_lyrics(&self, artist: &str, song: &str) -> Result<Option<String>, LookupError> {
        let url = self.endpoint(artist, song)?;
        tracing::debug!(%url, "Querying lyrics service");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let payload = response.json::<LyricsPayload>().await?;
        Ok(payload.lyrics.filter(|lyrics| !lyrics.is_empty()))
    }
}
