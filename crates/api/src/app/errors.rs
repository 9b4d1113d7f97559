use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use raze_inventory::LedgerError;
use raze_waitlist::WaitlistError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn ledger_error_to_response(err: LedgerError) -> axum::response::Response {
    match err {
        LedgerError::InsufficientStock { .. } => {
            json_error(StatusCode::BAD_REQUEST, "insufficient_stock", err.to_string())
        }
        LedgerError::Domain(e) => json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
        LedgerError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "Inventory item not found"),
        LedgerError::Store(e) => {
            // Never leak backend detail to clients.
            tracing::error!(error = %e, "inventory store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", "storage unavailable")
        }
    }
}

pub fn waitlist_error_to_response(err: WaitlistError) -> axum::response::Response {
    match err {
        // Full is reported in-band by the join handler; reaching here means
        // some other operation bubbled it up.
        WaitlistError::Full => json_error(StatusCode::CONFLICT, "waitlist_full", err.to_string()),
        WaitlistError::AlreadyPurchased => {
            json_error(StatusCode::CONFLICT, "already_purchased", err.to_string())
        }
        WaitlistError::Domain(e) => json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
        WaitlistError::Store(e) => {
            tracing::error!(error = %e, "waitlist store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", "storage unavailable")
        }
    }
}
