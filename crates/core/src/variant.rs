//! Variant identity: the (product, color, size) triple tracked independently
//! in inventory.

use serde::{Deserialize, Serialize};

/// Requested quantity per size label. `BTreeMap` keeps display strings and
/// webhook payloads deterministic.
pub type SizeMap = std::collections::BTreeMap<String, i64>;

/// Catalog product identifier.
///
/// Products are numbered from a small fixed catalog; not a UUID on purpose,
/// the storefront addresses them by ordinal.
pub type ProductId = i64;

/// Key of a single inventory document: one physical stock bucket.
///
/// Two keys with the same fields address the same bucket; color and size are
/// matched verbatim (no normalization).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantKey {
    pub product_id: ProductId,
    pub color: String,
    pub size: String,
}

impl VariantKey {
    pub fn new(product_id: ProductId, color: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            product_id,
            color: color.into(),
            size: size.into(),
        }
    }
}

impl core::fmt::Display for VariantKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{} {} / {}", self.product_id, self.color, self.size)
    }
}
