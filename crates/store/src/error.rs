use thiserror::Error;

/// Store-level failure.
///
/// Deliberately coarse: callers map any variant to a generic "storage
/// unavailable" response and never surface backend detail to clients.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store rejected or failed the operation.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
