//! Outbound publishing.
//!
//! [`Publisher`] wraps payloads in the [`Message`] envelope, emits them on a
//! topic channel, and mirrors every outbound event to the log sidecar. The
//! one-shot control surface (volume, camera mode, UI intents, …) is a single
//! parameterized [`Publisher::send`] driven by the static [`Command`] table —
//! no per-topic bespoke methods.

use std::sync::Arc;

use tracing::debug;

use rover_core::{LogLevel, Message, TelemetrySink, TopicBinding};

use crate::connection::ConnectionManager;
use crate::errors::Result;

/// Publishes outbound messages over the shared session.
pub struct Publisher {
    connection: Arc<ConnectionManager>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl Publisher {
    /// Create a publisher over the given connection.
    #[must_use]
    pub fn new(connection: Arc<ConnectionManager>, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self {
            connection,
            telemetry,
        }
    }

    /// Publish `payload` as-is on `topic_name`.
    ///
    /// Emits exactly one message and mirrors exactly one INFO record (topic,
    /// type, serialized payload) to the log sidecar.
    pub async fn publish(
        &self,
        topic_name: &str,
        message_type: &str,
        payload: serde_json::Value,
        latch: Option<bool>,
    ) -> Result<()> {
        let mut binding = TopicBinding::new(topic_name, message_type);
        if let Some(latch) = latch {
            binding = binding.with_latch(latch);
        }
        let channel = self.connection.topic(&binding);
        let message = Message::new(topic_name, message_type, payload);
        channel.publish(&message)?;
        debug!(topic = topic_name, message_type, "published message");
        self.telemetry
            .save_log(
                LogLevel::Info,
                &format!(
                    "bus-pub topic: '{topic_name}' type: '{message_type}' message: {}",
                    message.payload
                ),
            )
            .await;
        Ok(())
    }

    /// Publish a scalar wrapped in the transport's `{"data": …}` convention.
    pub async fn publish_data(
        &self,
        topic_name: &str,
        message_type: &str,
        value: serde_json::Value,
        latch: Option<bool>,
    ) -> Result<()> {
        self.publish(
            topic_name,
            message_type,
            serde_json::json!({ "data": value }),
            latch,
        )
        .await
    }

    /// Publish a one-shot control command from the outbound catalog.
    pub async fn send(&self, command: Command, value: serde_json::Value) -> Result<()> {
        let spec = command.spec();
        self.publish_data(
            spec.topic,
            spec.message_type,
            value,
            spec.latch.then_some(true),
        )
        .await
    }
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher").finish_non_exhaustive()
    }
}

/// One-shot outbound control command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Speaker volume (latched so late joiners hear the current setting).
    Volume,
    /// Torso camera mode selection.
    CameraMode,
    /// Torso camera angle trigger.
    TorsoCameraAngle,
    /// GUI intent / button press announcement.
    UiIntent,
    /// Offline/demo mode flag.
    OfflineMode,
    /// Text to speak aloud.
    Speech,
    /// Vitals reading to speak aloud.
    VitalsSpeech,
}

/// Fixed topic/type pair behind a [`Command`].
#[derive(Clone, Copy, Debug)]
pub struct CommandSpec {
    /// Target topic.
    pub topic: &'static str,
    /// Message type identifier.
    pub message_type: &'static str,
    /// Whether the publish is latched.
    pub latch: bool,
}

impl Command {
    /// Catalog row for this command.
    #[must_use]
    pub const fn spec(self) -> CommandSpec {
        match self {
            Self::Volume => CommandSpec {
                topic: "/nlp_internal/volume",
                message_type: "std_msgs/Int8",
                latch: true,
            },
            Self::CameraMode => CommandSpec {
                topic: "/torsoCV/setCameraMode",
                message_type: "std_msgs/String",
                latch: false,
            },
            Self::TorsoCameraAngle => CommandSpec {
                topic: "/ctrl_interface/torso_camera_command",
                message_type: "std_msgs/Int8",
                latch: false,
            },
            Self::UiIntent => CommandSpec {
                topic: "/hri_interface/gui_intent",
                message_type: "std_msgs/String",
                latch: false,
            },
            Self::OfflineMode => CommandSpec {
                topic: "/ctrl_interface/demo",
                message_type: "std_msgs/Int8",
                latch: false,
            },
            Self::Speech => CommandSpec {
                topic: "/nlp_internal/play_audio",
                message_type: "std_msgs/String",
                latch: false,
            },
            Self::VitalsSpeech => CommandSpec {
                topic: "/nlp_internal/vital_speech",
                message_type: "std_msgs/String",
                latch: false,
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
