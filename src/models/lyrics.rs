use serde::{Deserialize, Serialize};

use crate::utils::search_links;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const SOURCE_QUICK_SEARCH: &str = "Quick Search";
pub const SOURCE_ERROR: &str = "Error";
pub const TRUNCATION_NOTICE: &str = "[Click below to view full lyrics]";

/// Artist and song guessed from a free-text query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSong {
    pub artist: Option<String>,
    pub song: String,
}

impl ParsedSong {
    /// Both halves are present, so the lyrics service can be asked.
    pub fn lookup_key(&self) -> Option<(&str, &str)> {
        match self.artist.as_deref() {
            Some(artist) if !artist.is_empty() && !self.song.is_empty() => {
                Some((artist, self.song.as_str()))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLinks {
    pub genius: String,
    pub google: String,
}

/// Displayable outcome of a lyrics search. Every resolver path yields a
/// complete instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub title: String,
    pub artist: String,
    pub lyrics: String,
    pub source: String,
    pub search_links: SearchLinks,
    #[serde(default)]
    pub full_lyrics_available: bool,
}

impl LookupResult {
    pub fn quick_fallback(cleaned_query: &str, parsed: &ParsedSong) -> Self {
        let title = if parsed.song.is_empty() {
            cleaned_query.to_string()
        } else {
            parsed.song.clone()
        };

        Self {
            title,
            artist: parsed
                .artist
                .clone()
                .filter(|artist| !artist.is_empty())
                .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            lyrics: format!(
                "Search for \"{cleaned_query}\"\n\n\
                 Use the links below to find lyrics on popular sites!\n\n\
                 \u{2022} Genius.com - Most comprehensive database\n\
                 \u{2022} Google Search - Multiple sources\n\n\
                 Tip: Use \"Artist - Song\" format for best results!"
            ),
            source: SOURCE_QUICK_SEARCH.to_string(),
            search_links: search_links(cleaned_query),
            full_lyrics_available: false,
        }
    }

    pub fn preview(
        artist: &str,
        song: &str,
        lyrics: &str,
        preview_lines: usize,
        source_label: &str,
        search_links: SearchLinks,
    ) -> Self {
        let excerpt = lyrics
            .split('\n')
            .take(preview_lines)
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            title: song.to_string(),
            artist: artist.to_string(),
            lyrics: format!(
                "Found \"{song}\" by {artist}!\n\nPreview:\n{excerpt}\n\n{TRUNCATION_NOTICE}"
            ),
            source: source_label.to_string(),
            search_links,
            full_lyrics_available: true,
        }
    }

    pub fn error(query: &str, message: &str) -> Self {
        Self {
            title: query.to_string(),
            artist: SOURCE_ERROR.to_string(),
            lyrics: format!(
                "Search error for \"{query}\"\n\n\
                 Use the links below to search manually:\n\n\
                 \u{2022} Genius.com\n\
                 \u{2022} Google Search\n\n\
                 Error: {message}"
            ),
            source: SOURCE_ERROR.to_string(),
            search_links: search_links(query),
            full_lyrics_available: false,
        }
    }

    pub fn is_error(&self) -> bool {
        self.source == SOURCE_ERROR
    }
}
