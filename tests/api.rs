//! The dashboard JSON API served over a real socket.

mod common;

use serde_json::Value;

async fn get(addr: std::net::SocketAddr, path: &str) -> (reqwest::StatusCode, Value) {
    let resp = reqwest::get(format!("http://{addr}{path}")).await.unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn serves_overview_latest_and_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::setup_store(dir.path()).await;
    let now = jiff::Timestamp::now().to_string();
    for (title, rating) in [("Heat", "8.3"), ("Alien", "8.5"), ("Heat", "8.1")] {
        store.append_snapshot(&common::snapshot(title, rating, "120 min", &now)).await.unwrap();
    }
    let addr = common::spawn(filmetl::router(store)).await;

    let (status, overview) = get(addr, "/api/overview").await;
    assert_eq!(status, 200);
    assert_eq!(overview["movie_count"], 2);
    assert_eq!(overview["record_count"], 3);

    let (_, movies) = get(addr, "/api/movies").await;
    assert_eq!(movies, serde_json::json!(["Alien", "Heat"]));

    let (_, latest) = get(addr, "/api/records/latest?limit=2").await;
    assert_eq!(latest.as_array().unwrap().len(), 2);

    let (status, history) = get(addr, "/api/history?titles=Heat").await;
    assert_eq!(status, 200);
    assert_eq!(history["records"].as_array().unwrap().len(), 2);
    assert_eq!(history["kpis"]["rating_max"], 8.3);
    assert_eq!(history["kpis"]["duration_mean"], 120.0);
}

#[tokio::test]
async fn inverted_history_range_is_a_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::setup_store(dir.path()).await;
    let addr = common::spawn(filmetl::router(store)).await;

    let (status, body) = get(addr, "/api/history?from=2025-02-01&to=2025-01-01").await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("after"));
}

#[tokio::test]
async fn history_up_to_the_last_calendar_day() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::setup_store(dir.path()).await;
    let now = jiff::Timestamp::now().to_string();
    store.append_snapshot(&common::snapshot("Heat", "8.3", "170 min", &now)).await.unwrap();
    let addr = common::spawn(filmetl::router(store)).await;

    let (status, body) = get(addr, "/api/history?from=2025-01-01&to=9999-12-31").await;
    assert_eq!(status, 200);
    assert_eq!(body["records"].as_array().unwrap().len(), 1);
}
