use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use raze_core::{DomainError, ProductId, VariantKey};
use raze_store::{InventoryStore, StoreError, VariantRecord};

/// One line of a checkout cart: the unit of a reservation transaction.
///
/// Transient — never persisted as an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub color: String,
    pub size: String,
    pub quantity: i64,
    #[serde(default)]
    pub product_name: String,
}

impl CartLine {
    pub fn key(&self) -> VariantKey {
        VariantKey::new(self.product_id, self.color.clone(), self.size.clone())
    }

    fn display_name(&self) -> &str {
        if self.product_name.is_empty() {
            "item"
        } else {
            &self.product_name
        }
    }
}

/// Ledger failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A cart line could not be reserved; any lines reserved earlier in the
    /// same call have already been rolled back.
    #[error("Insufficient stock for {product_name} ({color}, {size})")]
    InsufficientStock {
        product_name: String,
        color: String,
        size: String,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Variant does not exist (admin set on an unknown key).
    #[error("inventory item not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Read-only stock answer for a single variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockStatus {
    pub in_stock: bool,
    pub available: i64,
    pub low_stock: bool,
}

/// Per-variant level inside a product's nested inventory view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantLevel {
    pub total: i64,
    pub available: i64,
    pub low_stock: bool,
}

/// color -> size -> level, shaped for the storefront.
pub type ProductInventory = BTreeMap<String, BTreeMap<String, VariantLevel>>;

/// Dashboard aggregate over the whole inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStats {
    pub total_items: i64,
    pub total_reserved: i64,
    pub total_available: i64,
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
    /// Capped at 10 entries for the dashboard.
    pub low_stock_items: Vec<VariantRecord>,
    pub out_of_stock_items: Vec<VariantRecord>,
}

/// The inventory ledger.
///
/// All-or-nothing reservation across a multi-line cart on top of a store
/// offering only single-document atomicity: reserve compensates by rolling
/// back already-held lines instead of relying on cross-document
/// transactions. The ledger itself holds no locks and no state.
#[derive(Debug, Clone)]
pub struct InventoryLedger<S: InventoryStore> {
    store: S,
}

impl<S: InventoryStore> InventoryLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn validate_lines(lines: &[CartLine]) -> Result<(), LedgerError> {
        for line in lines {
            if line.quantity <= 0 {
                return Err(DomainError::validation(format!(
                    "quantity must be positive for {}",
                    line.key()
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Reserve every line of the cart, or nothing.
    ///
    /// Lines are processed in input order. Each line is an atomic conditional
    /// increment of `reserved` in the store; on the first line that fails,
    /// all previously-held lines of this call are released before the error
    /// is returned. Two concurrent reservations that together would oversell
    /// are rejected at the store level, not here.
    pub fn reserve(&self, lines: &[CartLine]) -> Result<usize, LedgerError> {
        Self::validate_lines(lines)?;

        let mut held: Vec<&CartLine> = Vec::with_capacity(lines.len());
        for line in lines {
            if self.store.reserve_if_available(&line.key(), line.quantity)? {
                held.push(line);
                continue;
            }

            // Roll back earlier lines before surfacing the failure. A failed
            // rollback write is logged and skipped so the remaining lines
            // still get released.
            for prior in &held {
                if let Err(e) = self.store.release(&prior.key(), prior.quantity) {
                    tracing::error!(variant = %prior.key(), error = %e, "reserve rollback failed");
                }
            }

            tracing::info!(variant = %line.key(), qty = line.quantity, "reservation rejected");
            return Err(LedgerError::InsufficientStock {
                product_name: line.display_name().to_string(),
                color: line.color.clone(),
                size: line.size.clone(),
            });
        }

        Ok(held.len())
    }

    /// Release holds for an abandoned or cancelled checkout.
    ///
    /// Unconditional; calling twice for the same cart double-decrements
    /// (clamped at zero by the store). Tracking what was actually reserved
    /// is the caller's job.
    pub fn release(&self, lines: &[CartLine]) -> Result<(), LedgerError> {
        Self::validate_lines(lines)?;
        for line in lines {
            self.store.release(&line.key(), line.quantity)?;
        }
        Ok(())
    }

    /// Convert holds into a permanent deduction after confirmed payment.
    ///
    /// Decrements `quantity` and `reserved` together, so `available` is
    /// unchanged. Called exactly once per paid cart by the payment
    /// confirmation path; no rollback wrapper, reservation already proved
    /// the stock exists.
    pub fn commit(&self, lines: &[CartLine]) -> Result<(), LedgerError> {
        Self::validate_lines(lines)?;
        for line in lines {
            self.store.commit(&line.key(), line.quantity)?;
        }
        Ok(())
    }

    /// Stock answer for one variant; unknown variants read as out of stock.
    pub fn check_stock(&self, key: &VariantKey) -> Result<StockStatus, LedgerError> {
        match self.store.get(key)? {
            Some(record) => {
                let available = record.available();
                Ok(StockStatus {
                    in_stock: available > 0,
                    available,
                    low_stock: available <= record.low_stock_threshold,
                })
            }
            None => Ok(StockStatus {
                in_stock: false,
                available: 0,
                low_stock: true,
            }),
        }
    }

    /// Nested color/size view of one product for the storefront.
    pub fn product_inventory(&self, product_id: ProductId) -> Result<ProductInventory, LedgerError> {
        let mut out = ProductInventory::new();
        for record in self.store.list_product(product_id)? {
            let available = record.available();
            out.entry(record.color.clone()).or_default().insert(
                record.size.clone(),
                VariantLevel {
                    total: record.quantity,
                    available,
                    low_stock: available <= record.low_stock_threshold,
                },
            );
        }
        Ok(out)
    }

    /// Full listing for the admin dashboard.
    pub fn all(&self) -> Result<Vec<VariantRecord>, LedgerError> {
        Ok(self.store.list()?)
    }

    pub fn stats(&self) -> Result<InventoryStats, LedgerError> {
        let records = self.store.list()?;

        let total_items: i64 = records.iter().map(|r| r.quantity).sum();
        let total_reserved: i64 = records.iter().map(|r| r.reserved).sum();
        let low_stock: Vec<VariantRecord> = records
            .iter()
            .filter(|r| r.available() <= r.low_stock_threshold)
            .cloned()
            .collect();
        let out_of_stock: Vec<VariantRecord> = records
            .iter()
            .filter(|r| r.available() <= 0)
            .cloned()
            .collect();

        Ok(InventoryStats {
            total_items,
            total_reserved,
            total_available: total_items - total_reserved,
            low_stock_count: low_stock.len(),
            out_of_stock_count: out_of_stock.len(),
            low_stock_items: low_stock.into_iter().take(10).collect(),
            out_of_stock_items: out_of_stock,
        })
    }

    /// Absolute quantity set for one variant (admin). `reserved` untouched.
    pub fn set_quantity(&self, key: &VariantKey, quantity: i64) -> Result<(), LedgerError> {
        if quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative").into());
        }
        if self.store.set_quantity(key, quantity)? {
            Ok(())
        } else {
            Err(LedgerError::NotFound)
        }
    }

    /// Bulk absolute quantity set (admin). Unknown variants are skipped;
    /// returns the number actually updated.
    pub fn bulk_set_quantity(&self, updates: &[(VariantKey, i64)]) -> Result<usize, LedgerError> {
        let mut updated = 0;
        for (key, quantity) in updates {
            if *quantity < 0 {
                return Err(DomainError::validation("quantity cannot be negative").into());
            }
            if self.store.set_quantity(key, *quantity)? {
                updated += 1;
            }
        }
        Ok(updated)
    }

    /// Insert `records` only when the store holds nothing yet. Returns the
    /// number inserted (zero on every call after the first).
    pub fn seed_if_empty(&self, records: Vec<VariantRecord>) -> Result<usize, LedgerError> {
        if self.store.count()? > 0 {
            return Ok(0);
        }
        let inserted = records.len();
        for record in records {
            self.store.insert(record)?;
        }
        tracing::info!(count = inserted, "seeded inventory");
        Ok(inserted)
    }
}
