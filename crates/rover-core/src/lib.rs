//! # rover-core
//!
//! Foundation types and ports for the rover bus client.
//!
//! This crate provides the shared vocabulary the other rover crates depend on:
//!
//! - **Messages**: [`messages::TopicBinding`], [`messages::Message`], and the
//!   broker introspection shape
//! - **Logging**: [`logging::LogLevel`] (remote log levels) and
//!   [`logging::init_subscriber`] for local `tracing` output
//! - **Notification port**: [`notify::Notification`] events emitted on a
//!   channel — the core never renders anything itself
//! - **Telemetry seam**: [`telemetry::TelemetrySink`], the trait the bus crate
//!   mirrors publish/subscribe events through
//! - **Configuration**: [`config::ClientConfig`] with env overrides
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by `rover-telemetry` and `rover-bus`.

#![deny(unsafe_code)]

pub mod config;
pub mod logging;
pub mod messages;
pub mod notify;
pub mod telemetry;

pub use config::ClientConfig;
pub use logging::{LogLevel, init_subscriber};
pub use messages::{BrokerIntrospection, Message, TopicBinding};
pub use notify::{Notification, NotificationReceiver, NotificationSender, notification_channel};
pub use telemetry::TelemetrySink;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
