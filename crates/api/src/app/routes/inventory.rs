use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use raze_core::{ProductId, VariantKey};
use raze_inventory::CartLine;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_inventory))
        .route("/stats", get(inventory_stats))
        .route("/check/:product_id/:color/:size", get(check_stock))
        .route("/reserve", post(reserve))
        .route("/release", post(release))
        .route("/commit", post(commit))
        .route("/update", post(update_quantity))
        .route("/bulk-update", post(bulk_update))
        .route("/:product_id", get(product_inventory))
}

pub async fn list_inventory(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.ledger.all() {
        Ok(records) => Json(records).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn inventory_stats(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.ledger.stats() {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn product_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Path(product_id): Path<ProductId>,
) -> axum::response::Response {
    match services.ledger.product_inventory(product_id) {
        Ok(view) => Json(view).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn check_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path((product_id, color, size)): Path<(ProductId, String, String)>,
) -> axum::response::Response {
    let key = VariantKey::new(product_id, color, size);
    match services.ledger.check_stock(&key) {
        Ok(status) => Json(status).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

/// Reserve inventory during checkout. All-or-nothing across the cart:
/// a 400 here means no line is left held.
pub async fn reserve(
    Extension(services): Extension<Arc<AppServices>>,
    Json(lines): Json<Vec<CartLine>>,
) -> axum::response::Response {
    match services.ledger.reserve(&lines) {
        Ok(reserved) => Json(serde_json::json!({
            "success": true,
            "reserved": reserved,
        }))
        .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

/// Release reserved inventory (checkout timeout/cancellation).
pub async fn release(
    Extension(services): Extension<Arc<AppServices>>,
    Json(lines): Json<Vec<CartLine>>,
) -> axum::response::Response {
    match services.ledger.release(&lines) {
        Ok(()) => Json(serde_json::json!({ "success": true })).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

/// Commit reserved inventory after successful payment.
pub async fn commit(
    Extension(services): Extension<Arc<AppServices>>,
    Json(lines): Json<Vec<CartLine>>,
) -> axum::response::Response {
    match services.ledger.commit(&lines) {
        Ok(()) => Json(serde_json::json!({ "success": true })).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn update_quantity(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::InventoryUpdateRequest>,
) -> axum::response::Response {
    match services.ledger.set_quantity(&body.key(), body.quantity) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "message": "Inventory updated",
            })),
        )
            .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn bulk_update(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::InventoryBulkUpdateRequest>,
) -> axum::response::Response {
    let updates: Vec<(VariantKey, i64)> = body
        .items
        .iter()
        .map(|item| (item.key(), item.quantity))
        .collect();

    match services.ledger.bulk_set_quantity(&updates) {
        Ok(updated) => Json(serde_json::json!({
            "success": true,
            "updated": updated,
        }))
        .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
