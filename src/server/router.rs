use axum::{Json, Router, http::Method, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::Config;

use super::{
    handlers::{handle_manifest, handle_stream_url},
    state::AppState,
};

/// Create the application router.
pub fn create_router(config: Config) -> Router {
    let state = AppState::new(config);

    // Responses are consumed by browser players on arbitrary origins.
    let cors_origin = std::env::var("CORS_ALLOWED_ORIGIN").unwrap_or_else(|_| "*".to_string());
    let cors = if cors_origin == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(cors_origin.parse::<axum::http::HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    };

    Router::new()
        .route("/get/url/{id}", get(handle_stream_url))
        .route("/get/{id}", get(handle_manifest))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
