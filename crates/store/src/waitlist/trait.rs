use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use raze_core::{ProductId, SizeMap};

use crate::error::StoreError;

/// Key of a waitlist document: one entry per person per product variant.
///
/// `email` is stored lowercased; construct keys through [`WaitlistKey::new`]
/// so lookups never miss on case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaitlistKey {
    pub email: String,
    pub product_id: ProductId,
    pub variant: String,
}

impl WaitlistKey {
    pub fn new(email: &str, product_id: ProductId, variant: impl Into<String>) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            product_id,
            variant: variant.into(),
        }
    }
}

/// One waitlist document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistRecord {
    pub id: Uuid,
    pub email: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub variant: String,
    /// Display form of `sizes`, kept alongside for legacy readers.
    pub size: String,
    pub sizes: SizeMap,
    pub image: Option<String>,
    /// Assigned once at insert, advisory only, never reused.
    pub position: u64,
    pub access_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub notified: bool,
    pub purchased: bool,
}

impl WaitlistRecord {
    pub fn key(&self) -> WaitlistKey {
        WaitlistKey::new(&self.email, self.product_id, self.variant.clone())
    }
}

/// Result of a capacity-gated insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Admitted; carries the assigned position (previous count + 1).
    Inserted(u64),
    /// At or over capacity; nothing was written.
    Full,
}

/// Waitlist document store.
///
/// `insert_if_below` closes the count-then-insert window: the capacity check,
/// position assignment, and insert execute as one atomic store operation, so
/// two concurrent joins can never both take the last slot.
pub trait WaitlistStore: Send + Sync {
    fn find(&self, key: &WaitlistKey) -> Result<Option<WaitlistRecord>, StoreError>;

    /// Lookup by access code; codes are stored uppercase and matched exactly.
    fn find_by_code(&self, access_code: &str) -> Result<Option<WaitlistRecord>, StoreError>;

    fn count(&self) -> Result<u64, StoreError>;

    /// Insert `record` only while the total entry count is below `limit`.
    /// The store assigns `position = count + 1` under the same guard; the
    /// caller's `position` field is ignored.
    fn insert_if_below(&self, record: WaitlistRecord, limit: u64) -> Result<InsertOutcome, StoreError>;

    /// Replace the size map and its display string on an existing entry and
    /// stamp `updated_at`. Returns `false` when no such entry exists.
    fn update_sizes(
        &self,
        key: &WaitlistKey,
        sizes: SizeMap,
        size_string: String,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    /// Flip `purchased` on the entry owning `access_code`. Returns `false`
    /// when the code is unknown.
    fn mark_purchased(&self, access_code: &str) -> Result<bool, StoreError>;

    /// All entries ordered by position (admin listing).
    fn list_by_position(&self) -> Result<Vec<WaitlistRecord>, StoreError>;
}

impl<T: WaitlistStore + ?Sized> WaitlistStore for std::sync::Arc<T> {
    fn find(&self, key: &WaitlistKey) -> Result<Option<WaitlistRecord>, StoreError> {
        (**self).find(key)
    }

    fn find_by_code(&self, access_code: &str) -> Result<Option<WaitlistRecord>, StoreError> {
        (**self).find_by_code(access_code)
    }

    fn count(&self) -> Result<u64, StoreError> {
        (**self).count()
    }

    fn insert_if_below(&self, record: WaitlistRecord, limit: u64) -> Result<InsertOutcome, StoreError> {
        (**self).insert_if_below(record, limit)
    }

    fn update_sizes(
        &self,
        key: &WaitlistKey,
        sizes: SizeMap,
        size_string: String,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        (**self).update_sizes(key, sizes, size_string, now)
    }

    fn mark_purchased(&self, access_code: &str) -> Result<bool, StoreError> {
        (**self).mark_purchased(access_code)
    }

    fn list_by_position(&self) -> Result<Vec<WaitlistRecord>, StoreError> {
        (**self).list_by_position()
    }
}
