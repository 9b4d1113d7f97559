use axum::{routing::get, Json, Router};

pub mod inventory;
pub mod waitlist;

/// Router for all public endpoints, mounted under `/api`.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/inventory", inventory::router())
        .nest("/waitlist", waitlist::router())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
