//! Request/response bodies for the HTTP surface.

use serde::{Deserialize, Serialize};

use raze_core::{ProductId, SizeMap, VariantKey};

#[derive(Debug, Deserialize)]
pub struct InventoryUpdateRequest {
    pub product_id: ProductId,
    pub color: String,
    pub size: String,
    pub quantity: i64,
}

impl InventoryUpdateRequest {
    pub fn key(&self) -> VariantKey {
        VariantKey::new(self.product_id, self.color.clone(), self.size.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct InventoryBulkUpdateRequest {
    pub items: Vec<InventoryUpdateRequest>,
}

#[derive(Debug, Deserialize)]
pub struct WaitlistCheckRequest {
    pub email: String,
    pub product_id: ProductId,
    pub variant: String,
}

/// Wire shape of a join answer; `success: false` carries the full-waitlist
/// message in-band rather than as an HTTP error.
#[derive(Debug, Serialize)]
pub struct WaitlistResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_items: Option<String>,
    pub is_update: bool,
}

#[derive(Debug, Serialize)]
pub struct WaitlistCheckResponse {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_sizes: Option<SizeMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_string: Option<String>,
}
