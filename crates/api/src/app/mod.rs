use std::sync::Arc;

use axum::{extract::Extension, Router};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::{AppConfig, AppServices};

/// Build the full application router (in-memory stores, seeded catalog).
///
/// The same router serves prod and the black-box tests; only the bind
/// address differs.
pub fn build_app(config: AppConfig) -> Router {
    let services = Arc::new(AppServices::in_memory(config));

    // Seed the launch catalog up front so first reads see stock.
    if let Err(e) = services.ledger.seed_if_empty(raze_inventory::default_inventory()) {
        tracing::error!(error = %e, "inventory seeding failed");
    }

    Router::new()
        .nest("/api", routes::router())
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
