//! `raze-inventory` — the inventory ledger.
//!
//! Guarantees that outstanding reservations plus committed sales for a
//! variant never exceed physical stock, across concurrent checkouts, on top
//! of a store whose only strong primitive is a per-document atomic
//! conditional update.

pub mod ledger;
pub mod seed;

pub use ledger::{
    CartLine, InventoryLedger, InventoryStats, LedgerError, ProductInventory, StockStatus,
    VariantLevel,
};
pub use seed::default_inventory;
