//! Telemetry seam.
//!
//! The bus crate mirrors publish/subscribe events to a remote log service,
//! but only ever through this trait — the concrete HTTP client lives in
//! `rover-telemetry`. Tests substitute [`RecordingSink`] to count calls.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::logging::LogLevel;

/// Destination for mirrored log events.
///
/// Implementations are best-effort and must never fail the caller: the
/// method returns nothing and any delivery problem is handled internally.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Record one log line at the given level.
    async fn save_log(&self, level: LogLevel, text: &str);
}

/// Sink that drops everything. Useful when mirroring is disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

#[async_trait]
impl TelemetrySink for NullSink {
    async fn save_log(&self, _level: LogLevel, _text: &str) {}
}

/// Sink that records every call in memory.
///
/// Test helper for asserting exactly which log mirrors an operation
/// produced.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries, in call order.
    #[must_use]
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded entries at the given level.
    #[must_use]
    pub fn count_at(&self, level: LogLevel) -> usize {
        self.entries().iter().filter(|(l, _)| *l == level).count()
    }
}

#[async_trait]
impl TelemetrySink for RecordingSink {
    async fn save_log(&self, level: LogLevel, text: &str) {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((level, text.to_string()));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recording_sink_preserves_order_and_level() {
        let sink = RecordingSink::new();
        sink.save_log(LogLevel::Info, "first").await;
        sink.save_log(LogLevel::Error, "second").await;

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], (LogLevel::Info, "first".to_string()));
        assert_eq!(entries[1], (LogLevel::Error, "second".to_string()));
        assert_eq!(sink.count_at(LogLevel::Error), 1);
    }

    #[tokio::test]
    async fn null_sink_accepts_everything() {
        let sink = NullSink;
        sink.save_log(LogLevel::Fatal, "dropped").await;
    }

    #[test]
    fn sinks_are_object_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn TelemetrySink>>();
    }
}
