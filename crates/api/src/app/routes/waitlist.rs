use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use raze_notify::waitlist_payload;
use raze_waitlist::{AccessCodeStatus, JoinOutcome, JoinRequest, WaitlistError};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/join", post(join))
        .route("/check", post(check))
        .route("/status", get(status))
        .route("/stats", get(stats))
        .route("/verify/:access_code", get(verify))
        .route("/redeem/:access_code", post(redeem))
        .route("/admin", get(admin_entries))
}

/// Join the waitlist for the drop, or merge into an existing entry when
/// `force_add` is set. The entry is persisted and acknowledged before the
/// email webhook is even spawned; delivery failures never undo a join.
pub async fn join(
    Extension(services): Extension<Arc<AppServices>>,
    Json(request): Json<JoinRequest>,
) -> axum::response::Response {
    let outcome = match services.waitlist.join(&request) {
        Ok(outcome) => outcome,
        Err(WaitlistError::Full) => {
            return Json(dto::WaitlistResponse {
                success: false,
                message: WaitlistError::Full.to_string(),
                access_code: None,
                total_items: None,
                is_update: false,
            })
            .into_response();
        }
        Err(e) => return errors::waitlist_error_to_response(e),
    };

    match outcome {
        JoinOutcome::AlreadyListed {
            access_code,
            size_string,
        } => Json(dto::WaitlistResponse {
            success: true,
            message: "You're already on the waitlist for this item!".to_string(),
            access_code: Some(access_code),
            total_items: Some(size_string),
            is_update: false,
        })
        .into_response(),

        JoinOutcome::Updated {
            access_code,
            sizes,
            size_string,
        } => {
            services.webhooks.dispatch(
                "waitlist",
                services.config.waitlist_webhook_url.clone(),
                waitlist_payload(
                    &request.email,
                    &request.product_name,
                    &request.variant,
                    request.image.as_deref(),
                    &sizes,
                    &access_code,
                    true,
                ),
            );

            Json(dto::WaitlistResponse {
                success: true,
                message: format!("Your waitlist updated! Total items: {size_string}"),
                access_code: Some(access_code),
                total_items: Some(size_string),
                is_update: true,
            })
            .into_response()
        }

        JoinOutcome::Joined {
            access_code,
            sizes,
            size_string,
            ..
        } => {
            services.webhooks.dispatch(
                "waitlist",
                services.config.waitlist_webhook_url.clone(),
                waitlist_payload(
                    &request.email,
                    &request.product_name,
                    &request.variant,
                    request.image.as_deref(),
                    &sizes,
                    &access_code,
                    false,
                ),
            );

            Json(dto::WaitlistResponse {
                success: true,
                message: format!("You've joined the waitlist! Items: {size_string}"),
                access_code: Some(access_code),
                total_items: Some(size_string),
                is_update: false,
            })
            .into_response()
        }
    }
}

/// Does this person already hold an entry for the variant? Pure lookup,
/// used to pre-fill the size-adjustment form.
pub async fn check(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::WaitlistCheckRequest>,
) -> axum::response::Response {
    match services
        .waitlist
        .check_existing(&body.email, body.product_id, &body.variant)
    {
        Ok(Some(entry)) => Json(dto::WaitlistCheckResponse {
            exists: true,
            current_sizes: Some(entry.sizes),
            size_string: Some(entry.size_string),
        })
        .into_response(),
        Ok(None) => Json(dto::WaitlistCheckResponse {
            exists: false,
            current_sizes: None,
            size_string: None,
        })
        .into_response(),
        Err(e) => errors::waitlist_error_to_response(e),
    }
}

pub async fn status(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.waitlist.status() {
        Ok(status) => Json(status).into_response(),
        Err(e) => errors::waitlist_error_to_response(e),
    }
}

pub async fn stats(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.waitlist.stats() {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => errors::waitlist_error_to_response(e),
    }
}

/// Verify an access code before checkout. A redeemed code never validates.
pub async fn verify(
    Extension(services): Extension<Arc<AppServices>>,
    Path(access_code): Path<String>,
) -> axum::response::Response {
    match services.waitlist.verify_access_code(&access_code) {
        Ok(AccessCodeStatus::Valid {
            email,
            product_id,
            variant,
            size,
        }) => Json(serde_json::json!({
            "valid": true,
            "email": email,
            "product_id": product_id,
            "variant": variant,
            "size": size,
        }))
        .into_response(),
        Ok(AccessCodeStatus::Unknown) => Json(serde_json::json!({
            "valid": false,
            "message": "Invalid access code",
        }))
        .into_response(),
        Ok(AccessCodeStatus::AlreadyUsed) => Json(serde_json::json!({
            "valid": false,
            "message": "This code has already been used",
        }))
        .into_response(),
        Err(e) => errors::waitlist_error_to_response(e),
    }
}

/// Mark a code redeemed. Called by the payment-confirmation path once the
/// waitlisted order is actually placed.
pub async fn redeem(
    Extension(services): Extension<Arc<AppServices>>,
    Path(access_code): Path<String>,
) -> axum::response::Response {
    match services.waitlist.mark_purchased(&access_code) {
        Ok(()) => Json(serde_json::json!({ "success": true })).into_response(),
        Err(e) => errors::waitlist_error_to_response(e),
    }
}

pub async fn admin_entries(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.waitlist.entries() {
        Ok(entries) => Json(serde_json::json!({
            "total": entries.len(),
            "entries": entries,
        }))
        .into_response(),
        Err(e) => errors::waitlist_error_to_response(e),
    }
}
