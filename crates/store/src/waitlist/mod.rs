mod in_memory;
mod r#trait;

pub use in_memory::InMemoryWaitlistStore;
pub use r#trait::{InsertOutcome, WaitlistKey, WaitlistRecord, WaitlistStore};
