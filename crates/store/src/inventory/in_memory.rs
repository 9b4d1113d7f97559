use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use raze_core::{ProductId, VariantKey};

use super::r#trait::{InventoryStore, VariantRecord};
use crate::error::StoreError;

/// In-memory inventory document store.
///
/// Every operation takes a single write (or read) guard, so the conditional
/// update contract of [`InventoryStore`] holds trivially. Intended for
/// tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    variants: RwLock<HashMap<VariantKey, VariantRecord>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<VariantKey, VariantRecord>>, StoreError> {
        self.variants
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<VariantKey, VariantRecord>>, StoreError> {
        self.variants
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))
    }
}

impl InventoryStore for InMemoryInventoryStore {
    fn insert(&self, record: VariantRecord) -> Result<(), StoreError> {
        let mut variants = self.write()?;
        variants.insert(record.key(), record);
        Ok(())
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    fn get(&self, key: &VariantKey) -> Result<Option<VariantRecord>, StoreError> {
        Ok(self.read()?.get(key).cloned())
    }

    fn list(&self) -> Result<Vec<VariantRecord>, StoreError> {
        let mut records: Vec<_> = self.read()?.values().cloned().collect();
        records.sort_by(|a, b| {
            (a.product_id, &a.color, &a.size).cmp(&(b.product_id, &b.color, &b.size))
        });
        Ok(records)
    }

    fn list_product(&self, product_id: ProductId) -> Result<Vec<VariantRecord>, StoreError> {
        let mut records: Vec<_> = self
            .read()?
            .values()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| (&a.color, &a.size).cmp(&(&b.color, &b.size)));
        Ok(records)
    }

    fn reserve_if_available(&self, key: &VariantKey, qty: i64) -> Result<bool, StoreError> {
        let mut variants = self.write()?;
        match variants.get_mut(key) {
            Some(record) if record.quantity - record.reserved >= qty => {
                record.reserved += qty;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn release(&self, key: &VariantKey, qty: i64) -> Result<(), StoreError> {
        let mut variants = self.write()?;
        if let Some(record) = variants.get_mut(key) {
            // Never persist a negative hold.
            record.reserved = (record.reserved - qty).max(0);
        }
        Ok(())
    }

    fn commit(&self, key: &VariantKey, qty: i64) -> Result<(), StoreError> {
        let mut variants = self.write()?;
        if let Some(record) = variants.get_mut(key) {
            record.quantity -= qty;
            record.reserved = (record.reserved - qty).max(0);
            record.updated_at = Utc::now();
        }
        Ok(())
    }

    fn set_quantity(&self, key: &VariantKey, quantity: i64) -> Result<bool, StoreError> {
        let mut variants = self.write()?;
        match variants.get_mut(key) {
            Some(record) => {
                record.quantity = quantity;
                record.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
