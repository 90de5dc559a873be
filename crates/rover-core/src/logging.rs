//! Log levels and local `tracing` subscriber setup.
//!
//! [`LogLevel`] is the level vocabulary of the *remote* log service — the
//! sidecar POSTs it verbatim as the `log_type` field. Local console logging
//! goes through the `tracing` ecosystem and is configured once at startup
//! via [`init_subscriber`].

use serde::{Deserialize, Serialize};

/// Log level understood by the remote log service.
///
/// Serialized in upper case on the wire (`"FATAL"` … `"DEBUG"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Unrecoverable errors.
    Fatal,
    /// Errors.
    Error,
    /// Non-fatal issues.
    Warn,
    /// Outcomes, summaries (the default mirroring level).
    Info,
    /// Intermediate values, decisions.
    Debug,
}

impl LogLevel {
    /// Wire name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fatal => "FATAL",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Initialize the global tracing subscriber with stderr output.
///
/// Call once at application startup. Subsequent calls are no-ops.
///
/// # Arguments
///
/// * `level` - Minimum log level to display when `RUST_LOG` is unset.
pub fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // try_init is a no-op if a subscriber is already set
    let _ = subscriber.try_init();
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
