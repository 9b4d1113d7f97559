//! `raze-waitlist` — the waitlist merge engine.
//!
//! Turns repeated, possibly-overlapping size requests from the same person
//! for the same product variant into one canonical row with monotonically
//! accumulated quantities, under a hard global capacity.

pub mod engine;
pub mod sizes;

pub use engine::{
    AccessCodeStatus, ExistingEntry, JoinOutcome, JoinRequest, WaitlistEngine, WaitlistError,
    WaitlistStats, WaitlistStatus, WAITLIST_LIMIT,
};
pub use sizes::{merge_sizes, parse_size_string, selections_to_map, size_map_to_string, SizeSelection};
