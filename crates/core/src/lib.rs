//! `raze-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod variant;

pub use error::{DomainError, DomainResult};
pub use variant::{ProductId, SizeMap, VariantKey};
