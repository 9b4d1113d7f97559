//! `raze-store` — document-store abstraction for the commerce core.
//!
//! The engines in `raze-inventory` and `raze-waitlist` never talk to a
//! database directly; they talk to the traits defined here. Each trait
//! exposes exactly the primitives the engines' correctness depends on, the
//! most important being **per-document atomic conditional update**: the
//! store must evaluate the condition and apply the mutation inside a single
//! operation, never as a separate read followed by a write.
//!
//! The in-memory implementations back tests and the dev server. They take a
//! single write guard per operation, which satisfies the atomicity contract.

pub mod error;
pub mod inventory;
pub mod waitlist;

pub use error::StoreError;
pub use inventory::{InMemoryInventoryStore, InventoryStore, VariantRecord};
pub use waitlist::{InMemoryWaitlistStore, InsertOutcome, WaitlistKey, WaitlistRecord, WaitlistStore};
