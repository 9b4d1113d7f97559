use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use raze_core::SizeMap;

use super::r#trait::{InsertOutcome, WaitlistKey, WaitlistRecord, WaitlistStore};
use crate::error::StoreError;

/// In-memory waitlist document store.
///
/// A single `RwLock` over the entry map; `insert_if_below` counts and inserts
/// under one write guard. Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryWaitlistStore {
    entries: RwLock<HashMap<WaitlistKey, WaitlistRecord>>,
}

impl InMemoryWaitlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<WaitlistKey, WaitlistRecord>>, StoreError> {
        self.entries
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<WaitlistKey, WaitlistRecord>>, StoreError> {
        self.entries
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))
    }
}

impl WaitlistStore for InMemoryWaitlistStore {
    fn find(&self, key: &WaitlistKey) -> Result<Option<WaitlistRecord>, StoreError> {
        Ok(self.read()?.get(key).cloned())
    }

    fn find_by_code(&self, access_code: &str) -> Result<Option<WaitlistRecord>, StoreError> {
        Ok(self
            .read()?
            .values()
            .find(|r| r.access_code == access_code)
            .cloned())
    }

    fn count(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.len() as u64)
    }

    fn insert_if_below(&self, mut record: WaitlistRecord, limit: u64) -> Result<InsertOutcome, StoreError> {
        let mut entries = self.write()?;
        let taken = entries.len() as u64;
        if taken >= limit {
            return Ok(InsertOutcome::Full);
        }

        let position = taken + 1;
        record.position = position;
        entries.insert(record.key(), record);
        Ok(InsertOutcome::Inserted(position))
    }

    fn update_sizes(
        &self,
        key: &WaitlistKey,
        sizes: SizeMap,
        size_string: String,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut entries = self.write()?;
        match entries.get_mut(key) {
            Some(record) => {
                record.sizes = sizes;
                record.size = size_string;
                record.updated_at = Some(now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn mark_purchased(&self, access_code: &str) -> Result<bool, StoreError> {
        let mut entries = self.write()?;
        match entries.values_mut().find(|r| r.access_code == access_code) {
            Some(record) => {
                record.purchased = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn list_by_position(&self) -> Result<Vec<WaitlistRecord>, StoreError> {
        let mut records: Vec<_> = self.read()?.values().cloned().collect();
        records.sort_by_key(|r| r.position);
        Ok(records)
    }
}
