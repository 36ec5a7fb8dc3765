use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ParsedSong;

struct SeparatorPattern {
    regex: Regex,
    artist_group: usize,
    song_group: usize,
}

impl SeparatorPattern {
    fn new(pattern: &str, artist_group: usize, song_group: usize) -> Self {
        Self {
            regex: Regex::new(pattern).expect("separator pattern is valid"),
            artist_group,
            song_group,
        }
    }
}

// Checked in order; the first match wins.
static SEPARATORS: Lazy<[SeparatorPattern; 3]> = Lazy::new(|| {
    [
        SeparatorPattern::new(r"^(.+?)\s*-\s*(.+)$", 1, 2),
        SeparatorPattern::new(r"^(.+?)\s*:\s*(.+)$", 1, 2),
        SeparatorPattern::new(r"(?i)^(.+?)\s+by\s+(.+)$", 2, 1),
    ]
});

/// Drops everything except ASCII word characters, whitespace and hyphens.
pub fn clean_query(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Cleans `raw` and splits it into artist and song.
pub fn parse(raw: &str) -> ParsedSong {
    let cleaned = clean_query(raw);
    split_artist_song(&cleaned).unwrap_or(ParsedSong {
        artist: None,
        song: cleaned,
    })
}

/// Applies the separator patterns to `text` as-is. Used directly on page
/// titles, where `:` survives.
pub fn split_artist_song(text: &str) -> Option<ParsedSong> {
    let text = text.trim();
    SEPARATORS.iter().find_map(|pattern| {
        let captures = pattern.regex.captures(text)?;
        let artist = captures.get(pattern.artist_group)?.as_str().trim();
        let song = captures.get(pattern.song_group)?.as_str().trim();
        Some(ParsedSong {
            artist: Some(artist.to_string()),
            song: song.to_string(),
        })
    })
}
