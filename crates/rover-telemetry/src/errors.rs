//! Error types for the telemetry sidecar.
//!
//! Only storage reads and deletes surface errors; log and storage writes are
//! best-effort by design and swallow their failures after logging locally.

use thiserror::Error;

/// Errors returned by strict sidecar operations.
#[derive(Debug, Error)]
pub enum SidecarError {
    /// Network-level failure: the service could not be reached or the
    /// response body could not be decoded.
    #[error("sidecar request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Storage read rejected with a non-success HTTP status.
    #[error("storage read failed for '{namespace}': HTTP {status}")]
    Read {
        /// Namespace that was being read.
        namespace: String,
        /// HTTP status returned by the service.
        status: reqwest::StatusCode,
    },

    /// Storage delete rejected with a non-success HTTP status.
    #[error("storage delete failed for '{namespace}': HTTP {status}")]
    Delete {
        /// Namespace that was being deleted.
        namespace: String,
        /// HTTP status returned by the service.
        status: reqwest::StatusCode,
    },
}

/// Convenience type alias for sidecar results.
pub type Result<T> = std::result::Result<T, SidecarError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_display_names_namespace_and_status() {
        let err = SidecarError::Read {
            namespace: "cfg".into(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        let text = err.to_string();
        assert!(text.contains("cfg"));
        assert!(text.contains("404"));
    }

    #[test]
    fn delete_error_is_a_distinct_variant() {
        let err = SidecarError::Delete {
            namespace: "cfg".into(),
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert!(matches!(err, SidecarError::Delete { .. }));
    }
}
