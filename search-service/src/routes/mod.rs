pub mod health;
pub mod search;

use crate::config::ServiceConfig;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(config: &ServiceConfig) -> Router {
    Router::new()
        .route("/status", get(health::health_check))
        .route("/search", post(search::search_books))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
