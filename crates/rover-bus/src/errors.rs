//! Error types for the bus session core.

use thiserror::Error;

/// Transport-level failure.
///
/// These are never fatal to the process: connection failures are retried
/// forever by the reconnect loop, and callers of publish/subscribe
/// operations are expected to tolerate transient unavailability.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection attempt to the bus endpoint failed.
    #[error("connect to {endpoint} failed: {reason}")]
    Connect {
        /// Endpoint that was being dialed.
        endpoint: String,
        /// Transport-reported failure detail.
        reason: String,
    },

    /// A topic channel operation was attempted on a dead session.
    #[error("channel for '{topic}' is closed")]
    ChannelClosed {
        /// Topic the channel was bound to.
        topic: String,
    },

    /// Broker introspection query failed.
    ///
    /// Distinct from "not yet subscribed", which the confirmer reports as
    /// `Ok(false)` after its retry budget runs out.
    #[error("introspection of {node} failed: {reason}")]
    Introspection {
        /// Broker node that was queried.
        node: String,
        /// Failure detail.
        reason: String,
    },
}

/// Top-level error type for bus operations.
#[derive(Debug, Error)]
pub enum BusError {
    /// Underlying transport failure.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// A named registration referenced a key absent from the catalog.
    #[error("unknown listener key: {0}")]
    UnknownListener(String),
}

/// Convenience type alias for bus results.
pub type Result<T> = std::result::Result<T, BusError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
