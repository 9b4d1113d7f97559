//! Webhook delivery with retry and a dead-letter sink.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Retry schedule for a single delivery.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles each attempt (1s, 2s, 4s).
    pub initial_delay: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            timeout: Duration::from_secs(10),
        }
    }
}

/// A payload whose delivery exhausted every attempt.
#[derive(Debug, Clone)]
pub struct DeadLetter {
    pub webhook_name: String,
    pub url: String,
    pub payload: Value,
    pub attempts: u32,
    pub failed_at: DateTime<Utc>,
}

/// Where exhausted deliveries go for manual replay.
pub trait DeadLetterSink: Send + Sync {
    fn record(&self, letter: DeadLetter);
}

/// In-memory dead-letter sink for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryDeadLetters {
    inner: Mutex<Vec<DeadLetter>>,
}

impl InMemoryDeadLetters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<DeadLetter> {
        self.inner.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl DeadLetterSink for InMemoryDeadLetters {
    fn record(&self, letter: DeadLetter) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.push(letter);
        }
    }
}

/// Outbound webhook client.
///
/// `send` runs the full retry schedule inline; callers that must not wait
/// (request handlers) use `dispatch`, which spawns the delivery and returns
/// immediately.
#[derive(Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    policy: RetryPolicy,
    dead_letters: Arc<dyn DeadLetterSink>,
}

impl WebhookClient {
    pub fn new(dead_letters: Arc<dyn DeadLetterSink>) -> Self {
        Self::with_policy(RetryPolicy::default(), dead_letters)
    }

    pub fn with_policy(policy: RetryPolicy, dead_letters: Arc<dyn DeadLetterSink>) -> Self {
        Self {
            http: reqwest::Client::new(),
            policy,
            dead_letters,
        }
    }

    /// Deliver `payload` to `url`, retrying with exponential backoff.
    /// Returns whether any attempt got an HTTP 200 back.
    pub async fn send(&self, webhook_name: &str, url: &str, payload: Value) -> bool {
        let attempts = self.policy.max_retries + 1;
        let mut delay = self.policy.initial_delay;

        for attempt in 1..=attempts {
            match self
                .http
                .post(url)
                .json(&payload)
                .timeout(self.policy.timeout)
                .send()
                .await
            {
                Ok(response) if response.status() == reqwest::StatusCode::OK => {
                    tracing::info!(webhook = webhook_name, attempt, "webhook delivered");
                    return true;
                }
                Ok(response) => {
                    tracing::warn!(
                        webhook = webhook_name,
                        attempt,
                        status = %response.status(),
                        "webhook rejected"
                    );
                }
                Err(e) => {
                    tracing::warn!(webhook = webhook_name, attempt, error = %e, "webhook send failed");
                }
            }

            if attempt < attempts {
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
        }

        tracing::error!(
            webhook = webhook_name,
            attempts,
            "webhook delivery exhausted, dead-lettering"
        );
        self.dead_letters.record(DeadLetter {
            webhook_name: webhook_name.to_string(),
            url: url.to_string(),
            payload,
            attempts,
            failed_at: Utc::now(),
        });
        false
    }

    /// Fire-and-forget delivery: spawn the retry loop and return. The caller
    /// acknowledges its own state change regardless of what happens here.
    pub fn dispatch(&self, webhook_name: &'static str, url: String, payload: Value) {
        let client = self.clone();
        tokio::spawn(async move {
            client.send(webhook_name, &url, payload).await;
        });
    }
}
