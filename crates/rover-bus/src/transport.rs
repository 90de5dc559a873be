//! Transport seam.
//!
//! The wire protocol of the bus is an external collaborator — this crate
//! consumes it through [`BusTransport`] and [`TopicChannel`] and never
//! reimplements it. A production implementation wraps the bridge's WebSocket
//! session; tests use the channel-backed fake in [`crate::testing`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use rover_core::{BrokerIntrospection, Message, TopicBinding};

use crate::errors::TransportError;

/// Session lifecycle signal emitted by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// Handshake completed; the session is live.
    Connected,
    /// The transport surfaced a failure. Does not imply the session ended —
    /// a `Closed` event follows when it does.
    Error(String),
    /// The session ended. Recovery is the connection manager's job.
    Closed,
}

/// One logical session to the bus.
///
/// Implementations multiplex every topic channel over a single underlying
/// connection and are expected to queue/buffer topic operations until the
/// handshake completes (the external transport's contract).
#[async_trait]
pub trait BusTransport: Send + Sync {
    /// Begin the connection handshake to `endpoint`.
    ///
    /// Idempotent: calling while already connected or connecting is safe.
    /// The outcome arrives as a [`SessionEvent`], not as a return value.
    async fn open(&self, endpoint: &str) -> Result<(), TransportError>;

    /// Wait for the next session lifecycle event.
    ///
    /// Returns `None` when the transport has been torn down for good.
    async fn next_event(&self) -> Option<SessionEvent>;

    /// Obtain a channel for the given topic binding.
    ///
    /// Throttle and latch hints are passed through to the bus unmodified.
    fn topic(&self, binding: &TopicBinding) -> Arc<dyn TopicChannel>;

    /// Query the broker's node details (active publications, subscriptions,
    /// and services).
    async fn introspect(&self, node: &str) -> Result<BrokerIntrospection, TransportError>;
}

/// A named, typed channel multiplexed over the session.
pub trait TopicChannel: Send + Sync {
    /// Emit one message on the channel.
    fn publish(&self, message: &Message) -> Result<(), TransportError>;

    /// Register this channel as a subscriber.
    ///
    /// Inbound messages arrive on the returned receiver until
    /// [`unsubscribe`](Self::unsubscribe) is called or the session dies.
    fn subscribe(&self) -> Result<mpsc::UnboundedReceiver<Message>, TransportError>;

    /// Cancel this channel's subscription.
    fn unsubscribe(&self);
}
