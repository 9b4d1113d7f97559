//! `raze-notify` — outbound webhook dispatch.
//!
//! Waitlist joins and updates feed a no-code automation endpoint that sends
//! the transactional email. Delivery is strictly best-effort and
//! fire-and-forget: the engines' state mutations are acknowledged to the
//! caller before (and independently of) anything here running, and a failed
//! delivery never rolls anything back.

pub mod payload;
pub mod webhook;

pub use payload::waitlist_payload;
pub use webhook::{DeadLetter, DeadLetterSink, InMemoryDeadLetters, RetryPolicy, WebhookClient};
