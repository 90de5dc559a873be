//! Subscription confirmation.
//!
//! The bus gives no synchronous acknowledgement that a subscribe request has
//! been applied remotely. [`SubscriptionConfirmer`] polls the broker's
//! introspection endpoint until the target name appears among its active
//! subscriptions — a bounded retry loop with a fixed delay, not exponential
//! backoff (≈2.5 s worst case at the defaults).

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use rover_core::ClientConfig;

use crate::connection::ConnectionManager;
use crate::errors::Result;

/// Retry budget for one confirmation.
#[derive(Clone, Copy, Debug)]
pub struct ConfirmOptions {
    /// Number of retries after the initial poll.
    pub max_retries: u32,
    /// Fixed delay before every poll in ms.
    pub delay_ms: u64,
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            max_retries: 50,
            delay_ms: 50,
        }
    }
}

impl ConfirmOptions {
    /// Budget from the runtime configuration.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            max_retries: config.confirm_max_retries,
            delay_ms: config.confirm_delay_ms,
        }
    }
}

/// Polls broker introspection to confirm a subscription took effect.
#[derive(Debug)]
pub struct SubscriptionConfirmer {
    connection: Arc<ConnectionManager>,
}

impl SubscriptionConfirmer {
    /// Create a confirmer over the given connection.
    #[must_use]
    pub fn new(connection: Arc<ConnectionManager>) -> Self {
        Self { connection }
    }

    /// Confirm with the default budget (50 retries × 50 ms).
    pub async fn confirm(&self, subscription_name: &str) -> Result<bool> {
        self.confirm_with(subscription_name, ConfirmOptions::default())
            .await
    }

    /// Poll until `subscription_name` appears in the broker's subscription
    /// list or the budget runs out.
    ///
    /// Makes `max_retries + 1` polls at most (initial attempt plus retries),
    /// each preceded by the fixed delay. Returns `Ok(false)` on an exhausted
    /// budget; an introspection failure propagates as an error — the caller
    /// decides between retry and abort.
    pub async fn confirm_with(
        &self,
        subscription_name: &str,
        options: ConfirmOptions,
    ) -> Result<bool> {
        for attempt in 0..=options.max_retries {
            tokio::time::sleep(Duration::from_millis(options.delay_ms)).await;
            let introspection = self.connection.introspect().await?;
            if introspection.is_subscribed(subscription_name) {
                debug!(subscription_name, attempt, "subscription confirmed");
                return Ok(true);
            }
        }
        debug!(
            subscription_name,
            retries = options.max_retries,
            "subscription not confirmed within budget"
        );
        Ok(false)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
