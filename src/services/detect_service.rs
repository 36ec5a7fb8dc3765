use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::models::{DetectRequest, DetectResponse};
use crate::utils::split_artist_song;

const VIDEO_SITE: &str = "youtube.com";
const BARE_SITE_TITLE: &str = "YouTube";
const MIN_HEADING_CHARS: usize = 10;

static SITE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*-\s*YouTube\s*$").expect("site suffix pattern is valid"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetectError {
    #[error("Please navigate to a YouTube video first")]
    NotVideoPage,
    #[error("Could not detect song info. Try selecting the video title manually.")]
    NothingDetected,
}

/// Guesses a search query from what the caller scraped off a video page.
#[derive(Default, Clone)]
pub struct DetectService;

impl DetectService {
    pub fn detect(&self, request: &DetectRequest) -> Result<DetectResponse, DetectError> {
        if !request.url.contains(VIDEO_SITE) {
            return Err(DetectError::NotVideoPage);
        }

        let query = title_from_page(request.page_title.as_deref())
            .or_else(|| non_blank(request.video_title.as_deref()))
            .or_else(|| {
                request
                    .headings
                    .iter()
                    .map(|heading| heading.trim())
                    .find(|heading| heading.chars().count() > MIN_HEADING_CHARS)
                    .map(str::to_string)
            })
            .ok_or(DetectError::NothingDetected)?;

        tracing::debug!("Auto-detected query {:?} from {}", query, request.url);

        Ok(DetectResponse {
            song: split_artist_song(&query),
            channel: non_blank(request.channel.as_deref()),
            message: format!("Auto-detected: {query}"),
            query,
        })
    }
}

fn title_from_page(page_title: Option<&str>) -> Option<String> {
    let title = page_title?.trim();
    if title.is_empty() || title == BARE_SITE_TITLE {
        return None;
    }
    non_blank(Some(SITE_SUFFIX.replace(title, "").as_ref()))
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
