use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use raze_core::{ProductId, VariantKey};

use crate::error::StoreError;

/// One inventory document: the stock bucket for a single variant.
///
/// Invariant maintained by every implementation: `0 <= reserved <= quantity`
/// is never violated by a conditional reserve, and `reserved` is never
/// persisted negative by a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    pub product_id: ProductId,
    pub product_name: String,
    pub color: String,
    pub size: String,
    /// Total physical stock owned.
    pub quantity: i64,
    /// Stock held against in-flight checkouts.
    pub reserved: i64,
    pub low_stock_threshold: i64,
    pub updated_at: DateTime<Utc>,
}

impl VariantRecord {
    pub fn key(&self) -> VariantKey {
        VariantKey::new(self.product_id, self.color.clone(), self.size.clone())
    }

    pub fn available(&self) -> i64 {
        self.quantity - self.reserved
    }
}

/// Inventory document store.
///
/// `reserve_if_available` is the load-bearing primitive: condition check and
/// increment must execute as one atomic operation against the document. Two
/// concurrent reservations that together would oversell must be rejected at
/// this level, because the ledger performs no locking of its own.
pub trait InventoryStore: Send + Sync {
    /// Insert a new variant document (upsert by key).
    fn insert(&self, record: VariantRecord) -> Result<(), StoreError>;

    /// Number of variant documents.
    fn count(&self) -> Result<usize, StoreError>;

    fn get(&self, key: &VariantKey) -> Result<Option<VariantRecord>, StoreError>;

    fn list(&self) -> Result<Vec<VariantRecord>, StoreError>;

    fn list_product(&self, product_id: ProductId) -> Result<Vec<VariantRecord>, StoreError>;

    /// Increment `reserved` by `qty` only if `quantity - reserved >= qty`
    /// holds at the moment of the update. Returns `true` when the condition
    /// matched and the increment was applied, `false` otherwise (including
    /// when no such variant exists).
    fn reserve_if_available(&self, key: &VariantKey, qty: i64) -> Result<bool, StoreError>;

    /// Unconditionally decrement `reserved` by `qty`. The persisted value is
    /// clamped at zero; callers must only release what they reserved.
    /// Unknown variants are a no-op.
    fn release(&self, key: &VariantKey, qty: i64) -> Result<(), StoreError>;

    /// Decrement both `quantity` and `reserved` by `qty` and stamp
    /// `updated_at`. Unknown variants are a no-op.
    fn commit(&self, key: &VariantKey, qty: i64) -> Result<(), StoreError>;

    /// Absolute quantity set (admin path); `reserved` is left untouched.
    /// Returns `false` when the variant does not exist.
    fn set_quantity(&self, key: &VariantKey, quantity: i64) -> Result<bool, StoreError>;
}

impl<T: InventoryStore + ?Sized> InventoryStore for std::sync::Arc<T> {
    fn insert(&self, record: VariantRecord) -> Result<(), StoreError> {
        (**self).insert(record)
    }

    fn count(&self) -> Result<usize, StoreError> {
        (**self).count()
    }

    fn get(&self, key: &VariantKey) -> Result<Option<VariantRecord>, StoreError> {
        (**self).get(key)
    }

    fn list(&self) -> Result<Vec<VariantRecord>, StoreError> {
        (**self).list()
    }

    fn list_product(&self, product_id: ProductId) -> Result<Vec<VariantRecord>, StoreError> {
        (**self).list_product(product_id)
    }

    fn reserve_if_available(&self, key: &VariantKey, qty: i64) -> Result<bool, StoreError> {
        (**self).reserve_if_available(key, qty)
    }

    fn release(&self, key: &VariantKey, qty: i64) -> Result<(), StoreError> {
        (**self).release(key, qty)
    }

    fn commit(&self, key: &VariantKey, qty: i64) -> Result<(), StoreError> {
        (**self).commit(key, qty)
    }

    fn set_quantity(&self, key: &VariantKey, quantity: i64) -> Result<bool, StoreError> {
        (**self).set_quantity(key, quantity)
    }
}
