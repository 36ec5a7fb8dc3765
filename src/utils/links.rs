use urlencoding::encode;

use crate::models::{LookupResult, SearchLinks};

const GENIUS_SEARCH: &str = "https://genius.com/search?q=";
const GOOGLE_SEARCH: &str = "https://www.google.com/search?q=";

/// Manual search links for `query`. Everything outside `A-Za-z0-9-_.~` is
/// percent-encoded.
pub fn search_links(query: &str) -> SearchLinks {
    SearchLinks {
        genius: format!("{GENIUS_SEARCH}{}", encode(query)),
        google: format!("{GOOGLE_SEARCH}{}", encode(&format!("{query} lyrics"))),
    }
}

/// Google search for the full lyrics of an already displayed result.
pub fn full_lyrics_search_url(result: &LookupResult) -> String {
    let search = format!("{} {} lyrics", result.title, result.artist);
    format!("{GOOGLE_SEARCH}{}", encode(search.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_space_and_ampersand() {
        let links = search_links("Simon & Garfunkel");
        assert_eq!(links.genius, "https://genius.com/search?q=Simon%20%26%20Garfunkel");
        assert_eq!(
            links.google,
            "https://www.google.com/search?q=Simon%20%26%20Garfunkel%20lyrics"
        );
    }

    #[test]
    fn full_lyrics_url_combines_title_and_artist() {
        let result = LookupResult::error("Hello", "boom");
        assert_eq!(
            full_lyrics_search_url(&result),
            "https://www.google.com/search?q=Hello%20Error%20lyrics"
        );
    }
}
