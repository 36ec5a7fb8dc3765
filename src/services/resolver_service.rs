use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::config::LookupConfig;
use crate::models::{LookupResult, ParsedSong};
use crate::services::{LookupError, LyricsLookup};
use crate::utils::{clean_query, parse, search_links};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// Both racing tasks ended without filling the slot. The timer always
    /// fills, so this needs the tasks to be cancelled or to panic.
    #[error("search was abandoned before producing a result")]
    Abandoned,
}

/// Write-once slot shared by the racing tasks. The first `fill` wins; later
/// ones are dropped.
pub struct ResultSlot<T> {
    sender: Mutex<Option<oneshot::Sender<T>>>,
}

impl<T> ResultSlot<T> {
    pub fn open() -> (Arc<Self>, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        let slot = Arc::new(Self {
            sender: Mutex::new(Some(tx)),
        });
        (slot, rx)
    }

    pub fn fill(&self, value: T) -> bool {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match sender {
            Some(tx) => tx.send(value).is_ok(),
            None => false,
        }
    }
}

/// Aborts the task when dropped, including when the caller gives up on
/// `resolve` halfway.
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResolverSettings {
    pub timeout: Duration,
    pub preview_lines: usize,
}

impl From<&LookupConfig> for ResolverSettings {
    fn from(config: &LookupConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.timeout_ms),
            preview_lines: config.preview_lines,
        }
    }
}

#[derive(Clone)]
pub struct QueryResolver {
    lookup: Arc<dyn LyricsLookup>,
    settings: ResolverSettings,
}

impl QueryResolver {
    pub fn new(lookup: Arc<dyn LyricsLookup>, settings: ResolverSettings) -> Self {
        Self { lookup, settings }
    }

    pub fn source_label(&self) -> String {
        self.lookup.source_label()
    }

    /// Resolves a free-text query into something displayable. Never fails:
    /// unexpected errors come back as an error result.
    pub async fn resolve(&self, query: &str) -> LookupResult {
        match self.try_resolve(query).await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!("Search for {:?} failed: {}", query, err);
                LookupResult::error(query, &err.to_string())
            }
        }
    }

    async fn try_resolve(&self, query: &str) -> Result<LookupResult, ResolveError> {
        let cleaned = clean_query(query);
        let parsed = parse(&cleaned);
        tracing::debug!(cleaned = %cleaned, artist = ?parsed.artist, song = %parsed.song, "Parsed query");

        let fallback = LookupResult::quick_fallback(&cleaned, &parsed);
        let (slot, rx) = ResultSlot::open();

        let _timer = AbortOnDrop(tokio::spawn({
            let slot = slot.clone();
            let fallback = fallback.clone();
            let timeout = self.settings.timeout;
            async move {
                sleep(timeout).await;
                if slot.fill(Ok(fallback)) {
                    tracing::debug!("Lookup timed out after {:?}, using quick fallback", timeout);
                }
            }
        }));

        let _lookup = AbortOnDrop(tokio::spawn({
            let lookup = self.lookup.clone();
            let preview_lines = self.settings.preview_lines;
            async move {
                let outcome = lookup_branch(lookup, &parsed, &cleaned, preview_lines, fallback).await;
                slot.fill(outcome);
            }
        }));

        await_slot(rx).await
    }
}

async fn await_slot(
    rx: oneshot::Receiver<Result<LookupResult, ResolveError>>,
) -> Result<LookupResult, ResolveError> {
    rx.await.map_err(|_| ResolveError::Abandoned)?
}

async fn lookup_branch(
    lookup: Arc<dyn LyricsLookup>,
    parsed: &ParsedSong,
    cleaned: &str,
    preview_lines: usize,
    fallback: LookupResult,
) -> Result<LookupResult, ResolveError> {
    let Some((artist, song)) = parsed.lookup_key() else {
        tracing::debug!("No artist in query, skipping lyrics service");
        return Ok(fallback);
    };

    match lookup.fetch_lyrics(artist, song).await {
        Ok(Some(lyrics)) => {
            tracing::info!("Found lyrics for {} - {}", artist, song);
            Ok(LookupResult::preview(
                artist,
                song,
                &lyrics,
                preview_lines,
                &lookup.source_label(),
                search_links(cleaned),
            ))
        }
        Ok(None) => {
            tracing::debug!("Lyrics service has no lyrics for {} - {}", artist, song);
            Ok(fallback)
        }
        Err(err) if err.is_miss() => {
            tracing::warn!("Lyrics lookup missed: {}", err);
            Ok(fallback)
        }
        Err(err) => Err(err.into()),
    }
}
