use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::lyrics::{LookupResult, ParsedSong};
use crate::utils::full_lyrics_search_url;

const SELECTION_PREVIEW_CHARS: usize = 50;

fn not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(max = 1000))]
    pub query: Option<String>,
    #[validate]
    pub selection: Option<SelectionRecord>,
}

impl SearchRequest {
    /// Picks the text to search for: an explicit query first, then a
    /// selection that has not expired yet.
    pub fn effective_query(&self, now: DateTime<Utc>) -> Option<String> {
        if let Some(query) = self.query.as_deref().map(str::trim) {
            if !query.is_empty() {
                return Some(query.to_string());
            }
        }

        self.selection
            .as_ref()
            .filter(|selection| selection.is_fresh_at(now))
            .map(|selection| selection.text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub lyrics: LookupResult,
    pub full_lyrics_url: String,
}

impl From<LookupResult> for SearchResponse {
    fn from(lyrics: LookupResult) -> Self {
        Self {
            success: !lyrics.is_error(),
            full_lyrics_url: full_lyrics_search_url(&lyrics),
            lyrics,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SelectionRequest {
    #[validate(length(min = 1, max = 1000), custom = "not_blank")]
    pub text: String,
    #[validate(url)]
    pub url: Option<String>,
}

/// Short-lived record of text the user selected on a page. Handed back to
/// the caller, who passes it along with a later search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRecord {
    pub id: Uuid,
    #[validate(length(min = 1, max = 1000), custom = "not_blank")]
    pub text: String,
    pub url: Option<String>,
    pub captured_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SelectionRecord {
    pub fn capture(text: &str, url: Option<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.trim().to_string(),
            url,
            captured_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn preview(&self) -> String {
        if self.text.chars().count() > SELECTION_PREVIEW_CHARS {
            let head: String = self.text.chars().take(SELECTION_PREVIEW_CHARS).collect();
            format!("{head}...")
        } else {
            self.text.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub selection: SelectionRecord,
    pub preview: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DetectRequest {
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
    pub page_title: Option<String>,
    pub video_title: Option<String>,
    #[serde(default)]
    pub headings: Vec<String>,
    pub channel: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectResponse {
    pub query: String,
    pub song: Option<ParsedSong>,
    pub channel: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub lookup_source: String,
    pub uptime_seconds: u64,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(text: &str, now: DateTime<Utc>) -> SelectionRecord {
        SelectionRecord::capture(text, None, now, Duration::seconds(30))
    }

    #[test]
    fn explicit_query_wins_over_selection() {
        let now = Utc::now();
        let req = SearchRequest {
            query: Some("  Adele - Hello ".to_string()),
            selection: Some(selection("Other - Song", now)),
        };
        assert_eq!(req.effective_query(now).as_deref(), Some("Adele - Hello"));
    }

    #[test]
    fn blank_query_uses_fresh_selection() {
        let now = Utc::now();
        let req = SearchRequest {
            query: Some("   ".to_string()),
            selection: Some(selection("Hello by Adele", now)),
        };
        assert_eq!(
            req.effective_query(now + Duration::seconds(29)).as_deref(),
            Some("Hello by Adele")
        );
    }

    #[test]
    fn expired_selection_is_ignored() {
        let now = Utc::now();
        let req = SearchRequest {
            query: None,
            selection: Some(selection("Hello by Adele", now)),
        };
        assert_eq!(req.effective_query(now + Duration::seconds(30)), None);
    }

    #[test]
    fn selection_preview_truncates_long_text() {
        let now = Utc::now();
        let long = "x".repeat(60);
        assert_eq!(selection(&long, now).preview(), format!("{}...", "x".repeat(50)));
        assert_eq!(selection("short", now).preview(), "short");
    }

    #[test]
    fn expiry_saturates_instead_of_overflowing() {
        let now = Utc::now();
        let record = SelectionRecord::capture("Hello", None, now, Duration::MAX);
        assert_eq!(record.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(record.is_fresh_at(now));
    }

    #[test]
    fn blank_selection_text_fails_validation() {
        let req = SelectionRequest {
            text: "   ".to_string(),
            url: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn oversize_selection_record_fails_validation() {
        let now = Utc::now();
        let req = SearchRequest {
            query: None,
            selection: Some(selection(&format!("Adele - {}", "a".repeat(1000)), now)),
        };
        assert!(req.validate().is_err());

        let req = SearchRequest {
            query: None,
            selection: Some(selection("Adele - Hello", now)),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn search_response_flags_error_results() {
        let response = SearchResponse::from(LookupResult::error("q", "boom"));
        assert!(!response.success);
    }
}
