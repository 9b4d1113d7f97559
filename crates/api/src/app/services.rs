use std::sync::Arc;

use raze_inventory::InventoryLedger;
use raze_notify::{InMemoryDeadLetters, WebhookClient};
use raze_store::{InMemoryInventoryStore, InMemoryWaitlistStore};
use raze_waitlist::WaitlistEngine;

/// Startup configuration, resolved from the environment in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Automation endpoint receiving waitlist join/update notifications.
    pub waitlist_webhook_url: String,
}

/// Shared per-process services handed to every handler via `Extension`.
#[derive(Clone)]
pub struct AppServices {
    pub ledger: InventoryLedger<Arc<InMemoryInventoryStore>>,
    pub waitlist: WaitlistEngine<Arc<InMemoryWaitlistStore>>,
    pub webhooks: WebhookClient,
    pub dead_letters: Arc<InMemoryDeadLetters>,
    pub config: AppConfig,
}

impl AppServices {
    /// In-memory wiring (dev/test): stores + engines + webhook client.
    pub fn in_memory(config: AppConfig) -> Self {
        let dead_letters = Arc::new(InMemoryDeadLetters::new());
        Self {
            ledger: InventoryLedger::new(Arc::new(InMemoryInventoryStore::new())),
            waitlist: WaitlistEngine::new(Arc::new(InMemoryWaitlistStore::new())),
            webhooks: WebhookClient::new(dead_letters.clone()),
            dead_letters,
            config,
        }
    }
}
