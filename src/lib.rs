pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod export;
pub mod extractor;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod omdb;
pub mod processor;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::store::MovieStore;

#[derive(Clone)]
pub struct AppState {
    pub store: MovieStore,
}

/// Read-only JSON API over the store, for dashboard front ends.
pub fn router(store: MovieStore) -> Router {
    let state = Arc::new(AppState { store });

    Router::new()
        .route("/api/overview", get(routes::overview))
        .route("/api/movies", get(routes::movies))
        .route("/api/records/latest", get(routes::latest))
        .route("/api/history", get(routes::history))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
