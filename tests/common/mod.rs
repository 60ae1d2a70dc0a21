#![allow(dead_code)]

use std::{collections::HashMap, net::SocketAddr, path::Path, time::Duration};

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use filmetl::{
    config::ExtractorConfig, db, export::OutputPaths, extractor::Extractor, models::NormalizedRecord,
    store::MovieStore,
};
use jiff::Timestamp;
use serde_json::json;

pub const API_KEY: &str = "test-key";

/// How long the fake API stalls before answering `Slow`.
pub const SLOW_RESPONSE: Duration = Duration::from_secs(2);

/// Serves canned metadata API responses on an ephemeral port.
pub async fn spawn_fake_api() -> SocketAddr {
    spawn(Router::new().route("/", get(fake_lookup))).await
}

pub async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn fake_lookup(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("apikey").map(String::as_str) != Some(API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "Response": "False", "Error": "Invalid API key!" })),
        )
            .into_response();
    }

    match params.get("t").map(String::as_str).unwrap_or_default() {
        "Inception" => Json(json!({
            "Title": "Inception",
            "Year": "2010",
            "Runtime": "148 min",
            "Genre": "Action, Adventure, Sci-Fi",
            "Director": "Christopher Nolan",
            "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page",
            "Language": "English, Japanese, French",
            "Country": "United States, United Kingdom",
            "imdbRating": "8.8",
            "imdbVotes": "2,600,000",
            "BoxOffice": "$292,587,330",
            "Response": "True"
        }))
        .into_response(),
        "The Matrix" => Json(json!({
            "Title": "The Matrix",
            "Year": "1999",
            "Runtime": "136 min",
            "Genre": "Action, Sci-Fi",
            "Director": "Lana Wachowski, Lilly Wachowski",
            "Actors": "Keanu Reeves, Laurence Fishburne",
            "Language": "English",
            "Country": "United States, Australia",
            "imdbRating": "8.7",
            "imdbVotes": "2,100,000",
            "BoxOffice": "N/A",
            "Response": "True"
        }))
        .into_response(),
        "Slow" => {
            tokio::time::sleep(SLOW_RESPONSE).await;
            Json(json!({ "Title": "Slow", "Runtime": "90 min", "Response": "True" })).into_response()
        },
        "Sparse" => Json(json!({
            "Title": "Sparse",
            "Year": "2001",
            "Genre": "",
            "Director": "",
            "Runtime": "N/A",
            "imdbRating": "N/A",
            "BoxOffice": "",
            "Response": "True"
        }))
        .into_response(),
        "Broken" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        "Garbled" => "definitely not json".into_response(),
        _ => Json(json!({ "Response": "False", "Error": "Movie not found!" })).into_response(),
    }
}

pub fn extractor_config(addr: SocketAddr, titles: &[&str]) -> ExtractorConfig {
    ExtractorConfig {
        api_key: API_KEY.to_string(),
        base_url: format!("http://{addr}/"),
        titles: titles.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn extractor(addr: SocketAddr, titles: &[&str], out_dir: &Path) -> Extractor {
    Extractor::new(extractor_config(addr, titles), OutputPaths::in_dir(out_dir), reqwest::Client::new())
        .unwrap()
}

pub async fn setup_store(dir: &Path) -> MovieStore {
    let url = format!("sqlite://{}?mode=rwc", dir.join("movies.db").display());
    MovieStore::new(db::connect_and_migrate(&url).await.expect("failed to open store"))
}

pub fn snapshot(title: &str, rating: &str, runtime: &str, at: &str) -> NormalizedRecord {
    NormalizedRecord {
        title: title.to_string(),
        year: Some("2010".to_string()),
        genre: Some("Drama".to_string()),
        director: Some("Someone".to_string()),
        actors: None,
        duration: Some(runtime.to_string()),
        imdb_rating: Some(rating.to_string()),
        imdb_votes: None,
        language: None,
        country: None,
        box_office: Some("$1,000".to_string()),
        extraction_timestamp: at.parse::<Timestamp>().unwrap(),
    }
}
