//! Client configuration.
//!
//! Compiled defaults overridden by `ROVER_*` environment variables. The
//! endpoints default to the well-known local deployment: the bus bridge on
//! `ws://localhost:9090` and the log/persistence service on `http://localhost`.

use serde::{Deserialize, Serialize};

/// Configuration for the rover client runtime.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Bus bridge WebSocket endpoint.
    pub bus_endpoint: String,
    /// Base URL of the log/persistence sidecar service.
    pub sidecar_base_url: String,
    /// Broker node queried for subscription introspection.
    pub introspection_node: String,
    /// Fixed delay between reconnect attempts in ms.
    pub reconnect_delay_ms: u64,
    /// Subscription-confirmation retry budget.
    pub confirm_max_retries: u32,
    /// Fixed delay between confirmation polls in ms.
    pub confirm_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            bus_endpoint: "ws://localhost:9090".into(),
            sidecar_base_url: "http://localhost".into(),
            introspection_node: "/rosbridge_websocket".into(),
            reconnect_delay_ms: 1000,
            confirm_max_retries: 50,
            confirm_delay_ms: 50,
        }
    }
}

impl ClientConfig {
    /// Load defaults with environment overrides applied.
    ///
    /// Recognized variables: `ROVER_BUS_ENDPOINT`, `ROVER_SIDECAR_URL`,
    /// `ROVER_INTROSPECTION_NODE`, `ROVER_RECONNECT_DELAY_MS`. Unparseable
    /// numeric values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(v) = std::env::var("ROVER_BUS_ENDPOINT") {
            config.bus_endpoint = v;
        }
        if let Ok(v) = std::env::var("ROVER_SIDECAR_URL") {
            config.sidecar_base_url = v;
        }
        if let Ok(v) = std::env::var("ROVER_INTROSPECTION_NODE") {
            config.introspection_node = v;
        }
        if let Ok(v) = std::env::var("ROVER_RECONNECT_DELAY_MS") {
            if let Ok(ms) = v.parse() {
                config.reconnect_delay_ms = ms;
            }
        }
        config
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
