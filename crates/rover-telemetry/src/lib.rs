//! # rover-telemetry
//!
//! Fire-and-forget mirroring of bus traffic to the remote log service, plus
//! a small namespaced JSON blob store, both over the sidecar's HTTP API.
//!
//! Log writes are best-effort and never fail the caller. Storage reads and
//! deletes are strict: the caller asked a definite question and gets a
//! definite answer, [`SidecarError`] included.

#![deny(unsafe_code)]

pub mod errors;
pub mod sidecar;

pub use errors::{Result, SidecarError};
pub use sidecar::{SidecarStatus, TelemetrySidecar};
