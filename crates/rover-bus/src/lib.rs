//! # rover-bus
//!
//! The bus session core: everything between the GUI and the robot's
//! publish/subscribe bridge.
//!
//! - [`connection::ConnectionManager`] — owns the single transport session,
//!   fixed-delay indefinite reconnection
//! - [`registry::ListenerRegistry`] — start-once named listeners seeded from
//!   the [`catalog`], plus cancellable ad-hoc listeners
//! - [`publisher::Publisher`] — outbound messages and the one-shot
//!   [`publisher::Command`] catalog
//! - [`confirm::SubscriptionConfirmer`] — bounded fixed-delay polling of
//!   broker introspection
//! - [`transport`] — the seam to the external bus transport; [`testing`]
//!   holds a channel-backed fake for tests
//!
//! The wire protocol itself is an external collaborator, consumed through
//! the [`transport::BusTransport`] trait. Traffic mirroring goes through the
//! `TelemetrySink` seam from `rover-core`; the HTTP implementation lives in
//! `rover-telemetry`.

#![deny(unsafe_code)]

pub mod catalog;
pub mod client;
pub mod confirm;
pub mod connection;
pub mod errors;
pub mod publisher;
pub mod registry;
pub mod testing;
pub mod transport;

pub use client::RoverClient;
pub use confirm::{ConfirmOptions, SubscriptionConfirmer};
pub use connection::ConnectionManager;
pub use errors::{BusError, Result, TransportError};
pub use publisher::{Command, CommandSpec, Publisher};
pub use registry::{AdHocListener, ListenerRegistry};
pub use transport::{BusTransport, SessionEvent, TopicChannel};

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
