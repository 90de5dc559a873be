//! Message and topic shapes shared by the publish and subscribe paths.

use serde::{Deserialize, Serialize};

/// Client-side configuration for a named, typed channel on the bus.
///
/// Immutable value describing how a topic is used: its name, serialization
/// contract, whether inbound traffic is mirrored to the log sidecar, and the
/// transport-level throttle/latch hints (passed through unmodified).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicBinding {
    /// Topic name on the bus (e.g. `/robot_pose`).
    pub name: String,
    /// Message type identifier (e.g. `geometry_msgs/Pose`).
    pub message_type: String,
    /// Whether inbound messages are mirrored to the remote log service.
    #[serde(default)]
    pub log_enabled: bool,
    /// Minimum interval between delivered messages, enforced by the bus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throttle_rate_ms: Option<u64>,
    /// Whether the last published message is replayed to new subscribers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latch: Option<bool>,
}

impl TopicBinding {
    /// Create a binding with logging disabled and no transport hints.
    #[must_use]
    pub fn new(name: impl Into<String>, message_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message_type: message_type.into(),
            log_enabled: false,
            throttle_rate_ms: None,
            latch: None,
        }
    }

    /// Enable mirroring of inbound messages to the log sidecar.
    #[must_use]
    pub fn logged(mut self) -> Self {
        self.log_enabled = true;
        self
    }

    /// Set the transport throttle hint.
    #[must_use]
    pub fn with_throttle(mut self, rate_ms: u64) -> Self {
        self.throttle_rate_ms = Some(rate_ms);
        self
    }

    /// Set the transport latch hint.
    #[must_use]
    pub fn with_latch(mut self, latch: bool) -> Self {
        self.latch = Some(latch);
        self
    }
}

/// A message travelling over the bus, outbound or inbound.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Topic the message was published on.
    pub topic_name: String,
    /// Message type identifier.
    pub message_type: String,
    /// Arbitrary structured payload.
    pub payload: serde_json::Value,
}

impl Message {
    /// Build a message for the given topic.
    #[must_use]
    pub fn new(
        topic_name: impl Into<String>,
        message_type: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            topic_name: topic_name.into(),
            message_type: message_type.into(),
            payload,
        }
    }
}

/// Broker node details returned by the introspection query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerIntrospection {
    /// Published topic names.
    pub publications: Vec<String>,
    /// Subscribed topic names.
    pub subscriptions: Vec<String>,
    /// Hosted service names.
    pub services: Vec<String>,
}

impl BrokerIntrospection {
    /// Whether the broker currently lists `name` among its subscriptions.
    #[must_use]
    pub fn is_subscribed(&self, name: &str) -> bool {
        self.subscriptions.iter().any(|s| s == name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
