use actix_web::{web, App, HttpResponse};
use lyrics_finder_service::config::LookupConfig;
use lyrics_finder_service::models::{SOURCE_QUICK_SEARCH, TRUNCATION_NOTICE};
use lyrics_finder_service::services::{
    LookupError, LyricsLookup, LyricsOvhClient, QueryResolver, ResolverSettings,
};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};

const HELLO: &str = "Hello, it's me\nI was wondering if after all these years\nYou'd like to meet\nTo go over everything\nThey say that time's supposed to heal ya";

async fn fake_lyrics(path: web::Path<(String, String)>) -> HttpResponse {
    let (artist, song) = path.into_inner();
    match (artist.as_str(), song.as_str()) {
        ("Adele", "Hello") => HttpResponse::Ok().json(json!({ "lyrics": HELLO })),
        ("AC DC", "Back in Black") => HttpResponse::Ok().json(json!({ "lyrics": "Back in black" })),
        ("Empty", "Song") => HttpResponse::Ok().json(json!({ "lyrics": "" })),
        ("Slow", "Song") => {
            actix_web::rt::time::sleep(Duration::from_secs(1)).await;
            HttpResponse::Ok().json(json!({ "lyrics": "too late" }))
        }
        _ => HttpResponse::NotFound().json(json!({ "error": "No lyrics found" })),
    }
}

fn start_upstream() -> actix_test::TestServer {
    actix_test::start(|| App::new().route("/v1/{artist}/{song}", web::get().to(fake_lyrics)))
}

fn client_for(base_url: String) -> LyricsOvhClient {
    LyricsOvhClient::new(&LookupConfig {
        base_url,
        ..LookupConfig::default()
    })
    .unwrap()
}

#[actix_web::test]
async fn fetches_lyrics_text() {
    let upstream = start_upstream();
    let client = client_for(upstream.url("/"));

    let lyrics = client.fetch_lyrics("Adele", "Hello").await.unwrap();
    assert_eq!(lyrics.as_deref(), Some(HELLO));
}

#[actix_web::test]
async fn encodes_artist_and_song_in_path() {
    let upstream = start_upstream();
    let client = client_for(upstream.url("/"));

    let lyrics = client.fetch_lyrics("AC DC", "Back in Black").await.unwrap();
    assert_eq!(lyrics.as_deref(), Some("Back in black"));
}

#[actix_web::test]
async fn not_found_is_a_miss() {
    let upstream = start_upstream();
    let client = client_for(upstream.url("/"));

    let err = client.fetch_lyrics("Nobody", "Nothing").await.unwrap_err();
    assert!(matches!(err, LookupError::Status(status) if status.as_u16() == 404));
    assert!(err.is_miss());
}

#[actix_web::test]
async fn empty_lyrics_field_is_none() {
    let upstream = start_upstream();
    let client = client_for(upstream.url("/"));

    assert_eq!(client.fetch_lyrics("Empty", "Song").await.unwrap(), None);
}

#[actix_web::test]
async fn resolver_builds_preview_from_live_client() {
    let upstream = start_upstream();
    let resolver = QueryResolver::new(
        Arc::new(client_for(upstream.url("/"))),
        ResolverSettings {
            timeout: Duration::from_secs(3),
            preview_lines: 4,
        },
    );

    let result = resolver.resolve("Adele - Hello").await;
    assert_eq!(result.source, "Lyrics.ovh API");
    assert_eq!(result.title, "Hello");
    assert_eq!(result.artist, "Adele");
    assert!(result.lyrics.contains("To go over everything"));
    assert!(!result.lyrics.contains("heal ya"));
    assert!(result.lyrics.ends_with(TRUNCATION_NOTICE));
}

#[actix_web::test]
async fn slow_upstream_loses_the_race() {
    let upstream = start_upstream();
    let resolver = QueryResolver::new(
        Arc::new(client_for(upstream.url("/"))),
        ResolverSettings {
            timeout: Duration::from_millis(100),
            preview_lines: 4,
        },
    );

    let started = Instant::now();
    let result = resolver.resolve("Slow - Song").await;
    assert_eq!(result.source, SOURCE_QUICK_SEARCH);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[actix_web::test]
async fn unreachable_service_falls_back() {
    let resolver = QueryResolver::new(
        Arc::new(client_for("http://127.0.0.1:1/".to_string())),
        ResolverSettings {
            timeout: Duration::from_secs(3),
            preview_lines: 4,
        },
    );

    let result = resolver.resolve("Adele - Hello").await;
    assert_eq!(result.source, SOURCE_QUICK_SEARCH);
    assert_eq!(result.artist, "Adele");
}
