use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use raze_core::{DomainError, ProductId, SizeMap};
use raze_store::{InsertOutcome, StoreError, WaitlistKey, WaitlistRecord, WaitlistStore};

use crate::sizes::{self, SizeSelection};

/// Hard global capacity: limited spots for the drop.
pub const WAITLIST_LIMIT: u64 = 100;

// Vanity numbers shown on the public stats endpoint.
const DISPLAY_BASE_COUNT: u64 = 2847;
const NEXT_DROP_DATE: &str = "2025-02-02T00:00:00Z";

/// Incoming join/update request, already deserialized by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub email: String,
    pub product_id: ProductId,
    #[serde(default)]
    pub product_name: String,
    pub variant: String,
    /// Structured selections; preferred over `size` when non-empty.
    #[serde(default)]
    pub size_selections: Vec<SizeSelection>,
    /// Legacy free-text size string, e.g. `"M x2, L x1"`.
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub force_add: bool,
}

/// Successful join result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Entry already exists and `force_add` was off: a safe no-op peek.
    AlreadyListed {
        access_code: String,
        size_string: String,
    },
    /// Existing entry merged with the new selections.
    Updated {
        access_code: String,
        sizes: SizeMap,
        size_string: String,
    },
    /// Fresh entry admitted under capacity.
    Joined {
        access_code: String,
        position: u64,
        sizes: SizeMap,
        size_string: String,
    },
}

impl JoinOutcome {
    pub fn is_update(&self) -> bool {
        matches!(self, JoinOutcome::Updated { .. })
    }
}

/// Waitlist failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WaitlistError {
    /// Capacity reached; no row was created.
    #[error("Sorry, the waitlist is full! Follow us on Instagram for future drops.")]
    Full,

    /// The entry's access code was already redeemed; no further merges.
    #[error("this entry has already been used to purchase")]
    AlreadyPurchased,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Answer to an access-code verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessCodeStatus {
    Valid {
        email: String,
        product_id: ProductId,
        variant: String,
        size: String,
    },
    Unknown,
    AlreadyUsed,
}

/// Existing-entry lookup result, used to pre-fill size-adjustment forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingEntry {
    pub sizes: SizeMap,
    pub size_string: String,
}

/// Spots summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistStatus {
    pub total_spots: u64,
    pub spots_taken: u64,
    pub spots_remaining: u64,
    pub is_full: bool,
}

/// Public display stats (inflated by a fixed base count).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistStats {
    pub total_waitlist: u64,
    pub progress: u64,
    pub next_drop_date: String,
}

/// The waitlist merge engine.
///
/// One row per (email, product, variant). Joins either peek, merge, or
/// insert; quantities only ever grow. Capacity is enforced inside the
/// store's atomic gated insert, so concurrent joins cannot overshoot
/// [`WAITLIST_LIMIT`].
#[derive(Debug, Clone)]
pub struct WaitlistEngine<S: WaitlistStore> {
    store: S,
    limit: u64,
}

impl<S: WaitlistStore> WaitlistEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            limit: WAITLIST_LIMIT,
        }
    }

    /// Override the capacity (tests exercise small limits).
    pub fn with_limit(store: S, limit: u64) -> Self {
        Self { store, limit }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Join the waitlist, or merge into an existing entry.
    ///
    /// Either the full merge persists or nothing changes; there is no
    /// partially-applied join.
    pub fn join(&self, request: &JoinRequest) -> Result<JoinOutcome, WaitlistError> {
        let email = request.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("a valid email is required").into());
        }

        let new_sizes = if request.size_selections.is_empty() {
            sizes::parse_size_string(&request.size)
        } else {
            sizes::selections_to_map(&request.size_selections)
        };
        if new_sizes.is_empty() {
            return Err(DomainError::validation("at least one size is required").into());
        }

        let key = WaitlistKey::new(&email, request.product_id, request.variant.clone());

        if let Some(existing) = self.store.find(&key)? {
            if !request.force_add {
                return Ok(JoinOutcome::AlreadyListed {
                    access_code: existing.access_code,
                    size_string: existing.size,
                });
            }

            if existing.purchased {
                return Err(WaitlistError::AlreadyPurchased);
            }

            // Rows written before the structured map existed carry only the
            // display string; parse it back before merging.
            let existing_sizes = if existing.sizes.is_empty() {
                sizes::parse_size_string(&existing.size)
            } else {
                existing.sizes
            };

            let merged = sizes::merge_sizes(&existing_sizes, &new_sizes);
            let merged_string = sizes::size_map_to_string(&merged);
            self.store
                .update_sizes(&key, merged.clone(), merged_string.clone(), Utc::now())?;

            tracing::info!(email = %key.email, product_id = key.product_id, "waitlist entry merged");
            return Ok(JoinOutcome::Updated {
                access_code: existing.access_code,
                sizes: merged,
                size_string: merged_string,
            });
        }

        let access_code = generate_access_code();
        let size_string = sizes::size_map_to_string(&new_sizes);
        let record = WaitlistRecord {
            id: Uuid::new_v4(),
            email: key.email.clone(),
            product_id: request.product_id,
            product_name: request.product_name.clone(),
            variant: request.variant.clone(),
            size: size_string.clone(),
            sizes: new_sizes.clone(),
            image: request.image.clone(),
            position: 0, // assigned by the store's gated insert
            access_code: access_code.clone(),
            created_at: Utc::now(),
            updated_at: None,
            notified: false,
            purchased: false,
        };

        match self.store.insert_if_below(record, self.limit)? {
            InsertOutcome::Inserted(position) => {
                tracing::info!(email = %key.email, position, "waitlist entry created");
                Ok(JoinOutcome::Joined {
                    access_code,
                    position,
                    sizes: new_sizes,
                    size_string,
                })
            }
            InsertOutcome::Full => Err(WaitlistError::Full),
        }
    }

    /// Verify an access code for purchase. Codes are stored uppercase;
    /// lookup is case-insensitive. A redeemed entry's code never validates
    /// again.
    pub fn verify_access_code(&self, code: &str) -> Result<AccessCodeStatus, WaitlistError> {
        let code = code.trim().to_uppercase();
        match self.store.find_by_code(&code)? {
            None => Ok(AccessCodeStatus::Unknown),
            Some(entry) if entry.purchased => Ok(AccessCodeStatus::AlreadyUsed),
            Some(entry) => Ok(AccessCodeStatus::Valid {
                email: entry.email,
                product_id: entry.product_id,
                variant: entry.variant,
                size: entry.size,
            }),
        }
    }

    /// Pure lookup: does this person already hold an entry for the variant?
    pub fn check_existing(
        &self,
        email: &str,
        product_id: ProductId,
        variant: &str,
    ) -> Result<Option<ExistingEntry>, WaitlistError> {
        let key = WaitlistKey::new(email, product_id, variant);
        Ok(self.store.find(&key)?.map(|entry| ExistingEntry {
            sizes: if entry.sizes.is_empty() {
                sizes::parse_size_string(&entry.size)
            } else {
                entry.sizes
            },
            size_string: entry.size,
        }))
    }

    /// Flip an entry to `purchased` when its code is redeemed for an order.
    /// Terminal: the entry accepts no further merges afterwards.
    pub fn mark_purchased(&self, code: &str) -> Result<(), WaitlistError> {
        let code = code.trim().to_uppercase();
        if self.store.mark_purchased(&code)? {
            tracing::info!(access_code = %code, "access code redeemed");
            Ok(())
        } else {
            Err(DomainError::validation("unknown access code").into())
        }
    }

    pub fn status(&self) -> Result<WaitlistStatus, WaitlistError> {
        let taken = self.store.count()?;
        let remaining = self.limit.saturating_sub(taken);
        Ok(WaitlistStatus {
            total_spots: self.limit,
            spots_taken: taken,
            spots_remaining: remaining,
            is_full: remaining == 0,
        })
    }

    pub fn stats(&self) -> Result<WaitlistStats, WaitlistError> {
        let taken = self.store.count()?;
        Ok(WaitlistStats {
            total_waitlist: taken + DISPLAY_BASE_COUNT,
            progress: (65 + taken * 2).min(95),
            next_drop_date: NEXT_DROP_DATE.to_string(),
        })
    }

    /// Admin listing, ordered by position.
    pub fn entries(&self) -> Result<Vec<WaitlistRecord>, WaitlistError> {
        Ok(self.store.list_by_position()?)
    }
}

/// Opaque, unpredictable access code: `RAZE-` + 8 uppercase hex chars.
fn generate_access_code() -> String {
    format!("RAZE-{:08X}", rand::random::<u32>())
}
