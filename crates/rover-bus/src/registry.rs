//! Listener registry.
//!
//! Central catalog of named listener bindings plus ad-hoc one-off listeners.
//! Named listeners are start-once: the registry guarantees at most one live
//! subscription per key, no matter how many times re-entrant UI code calls
//! [`ListenerRegistry::register_named`]. Ad-hoc listeners are the only kind
//! that can be torn down, via the returned [`AdHocListener`] capability.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::debug;

use rover_core::{LogLevel, Message, TelemetrySink, TopicBinding};

use crate::catalog;
use crate::connection::ConnectionManager;
use crate::errors::{BusError, Result};
use crate::transport::TopicChannel;

/// One catalog slot: the binding plus its start-once flag.
struct ListenerEntry {
    binding: TopicBinding,
    started: bool,
}

/// Registry of named topic listeners.
pub struct ListenerRegistry {
    connection: Arc<ConnectionManager>,
    telemetry: Arc<dyn TelemetrySink>,
    entries: Mutex<HashMap<String, ListenerEntry>>,
}

impl ListenerRegistry {
    /// Create a registry seeded with the default named-topic catalog.
    #[must_use]
    pub fn new(connection: Arc<ConnectionManager>, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self::with_catalog(connection, telemetry, catalog::default_catalog())
    }

    /// Create a registry seeded with an explicit catalog.
    #[must_use]
    pub fn with_catalog(
        connection: Arc<ConnectionManager>,
        telemetry: Arc<dyn TelemetrySink>,
        catalog: Vec<(&'static str, TopicBinding)>,
    ) -> Self {
        let entries = catalog
            .into_iter()
            .map(|(key, binding)| {
                (
                    key.to_string(),
                    ListenerEntry {
                        binding,
                        started: false,
                    },
                )
            })
            .collect();
        Self {
            connection,
            telemetry,
            entries: Mutex::new(entries),
        }
    }

    /// Start the named listener for `key`.
    ///
    /// No-op if the listener is already started — duplicate registration
    /// calls must never create a second live subscription on the same key.
    /// On each inbound message the registry mirrors it to the log sidecar
    /// (when the binding asks for it), applies `transform`, and hands the
    /// result to `dispatch`.
    pub fn register_named<T, D>(&self, key: &str, transform: T, dispatch: D) -> Result<()>
    where
        T: Fn(Message) -> serde_json::Value + Send + 'static,
        D: Fn(serde_json::Value) + Send + 'static,
    {
        // Check-then-act stays under the lock: the started flag is the only
        // shared state guarding the at-most-one-subscription invariant.
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let entry = entries
            .get_mut(key)
            .ok_or_else(|| BusError::UnknownListener(key.to_string()))?;
        if entry.started {
            debug!(key, "listener already started");
            return Ok(());
        }

        let binding = entry.binding.clone();
        let channel = self.connection.topic(&binding);
        let mut rx = channel.subscribe().map_err(BusError::from)?;
        entry.started = true;
        drop(entries);

        debug!(key, topic = %binding.name, "starting named listener");
        let telemetry = Arc::clone(&self.telemetry);
        drop(tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                if binding.log_enabled {
                    telemetry
                        .save_log(LogLevel::Info, &subscribe_log_line(&message))
                        .await;
                }
                dispatch(transform(message));
            }
        }));
        Ok(())
    }

    /// Start an unmanaged listener on an arbitrary topic.
    ///
    /// Not tied to a registry key; every inbound message is mirrored to the
    /// log sidecar. Returns the unsubscribe capability — the only listener
    /// kind that can be cancelled.
    pub fn register_ad_hoc<C>(
        &self,
        topic_name: &str,
        message_type: &str,
        throttle_rate_ms: Option<u64>,
        callback: C,
    ) -> Result<AdHocListener>
    where
        C: Fn(Message) + Send + 'static,
    {
        let mut binding = TopicBinding::new(topic_name, message_type).logged();
        if let Some(rate) = throttle_rate_ms {
            binding = binding.with_throttle(rate);
        }
        let channel = self.connection.topic(&binding);
        let mut rx = channel.subscribe().map_err(BusError::from)?;

        debug!(topic = %binding.name, "starting ad-hoc listener");
        let telemetry = Arc::clone(&self.telemetry);
        let task = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                telemetry
                    .save_log(LogLevel::Info, &subscribe_log_line(&message))
                    .await;
                callback(message);
            }
        });
        Ok(AdHocListener { channel, task })
    }

    /// Whether the named listener for `key` is started.
    #[must_use]
    pub fn is_started(&self, key: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .is_some_and(|e| e.started)
    }

    /// Keys present in the catalog.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("keys", &self.keys())
            .finish_non_exhaustive()
    }
}

/// Cancellation capability for an ad-hoc listener.
///
/// Named listeners live for the process lifetime; this handle exists only
/// for the unmanaged kind.
pub struct AdHocListener {
    channel: Arc<dyn TopicChannel>,
    task: JoinHandle<()>,
}

impl AdHocListener {
    /// Cancel the subscription and stop the forwarding task.
    pub fn cancel(self) {
        self.task.abort();
        self.channel.unsubscribe();
    }
}

impl std::fmt::Debug for AdHocListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdHocListener").finish_non_exhaustive()
    }
}

/// Log line mirrored for an inbound message.
fn subscribe_log_line(message: &Message) -> String {
    format!(
        "bus-sub topic: '{}' type: '{}' message: {}",
        message.topic_name, message.message_type, message.payload
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
