//! HTTP client for the remote log/persistence service.
//!
//! Four operations over two endpoints:
//!
//! - `POST /api/gui-logs/` — append one log record
//! - `POST /api/local-storage/` — write a namespaced JSON blob
//! - `GET /api/local-storage/?storage=<ns>` — read a blob
//! - `DELETE /api/local-storage/?storage=<ns>` — remove a blob
//!
//! Writes (log and storage) tolerate every failure: a remote-reported error
//! status is logged locally — and, for storage writes, mirrored to the log
//! endpoint — but never propagated. Reads and deletes are strict and return
//! [`SidecarError`] on a non-success HTTP status, after first mirroring the
//! failure to the log endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use rover_core::{ClientConfig, LogLevel, TelemetrySink};

use crate::errors::{Result, SidecarError};

/// Log append endpoint path.
const LOGS_PATH: &str = "/api/gui-logs/";

/// Blob storage endpoint path.
const STORAGE_PATH: &str = "/api/local-storage/";

/// Wire body for a log append.
#[derive(Debug, Serialize)]
struct LogRecord<'a> {
    log_type: LogLevel,
    log_data: &'a str,
}

/// Wire body for a storage write.
#[derive(Debug, Serialize)]
struct StorageRecord<'a> {
    storage: &'a str,
    json_data: &'a serde_json::Value,
}

/// Logical outcome reported by the service in a 2xx response.
#[derive(Clone, Debug, Deserialize)]
pub struct SidecarStatus {
    /// `"success"` or `"error"`.
    pub status: String,
    /// Optional detail, present on errors.
    #[serde(default)]
    pub message: Option<String>,
}

impl SidecarStatus {
    /// Whether the service reported a logical error despite the 2xx status.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

/// Client for the log/persistence sidecar service.
///
/// Cheap to clone; the inner `reqwest::Client` is shared.
#[derive(Clone, Debug)]
pub struct TelemetrySidecar {
    http: reqwest::Client,
    base_url: String,
}

impl TelemetrySidecar {
    /// Create a client against the given base URL (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a client from the runtime configuration.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.sidecar_base_url.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Append one record to the remote log.
    ///
    /// Best-effort: remote rejections and network failures are logged
    /// locally and swallowed. Never fails or blocks the caller's primary
    /// action beyond the single round trip.
    pub async fn save_log(&self, level: LogLevel, text: &str) {
        let body = LogRecord {
            log_type: level,
            log_data: text,
        };
        match self.http.post(self.url(LOGS_PATH)).json(&body).send().await {
            Ok(response) => match response.json::<SidecarStatus>().await {
                Ok(status) if status.is_error() => {
                    warn!(
                        message = status.message.as_deref().unwrap_or(""),
                        "remote log service rejected entry"
                    );
                }
                Ok(_) => debug!(level = %level, "log entry saved"),
                Err(e) => warn!(error = %e, "unreadable response from log service"),
            },
            Err(e) => warn!(error = %e, "failed to reach log service"),
        }
    }

    /// Write a JSON blob under `namespace`.
    ///
    /// Tolerant like [`save_log`](Self::save_log): a remote-reported error is
    /// logged locally and mirrored to the log endpoint, then the call
    /// returns normally. The caller's action is never interrupted by a
    /// failed persistence write.
    pub async fn write_storage(&self, namespace: &str, json: &serde_json::Value) {
        let body = StorageRecord {
            storage: namespace,
            json_data: json,
        };
        let url = self.url(STORAGE_PATH);
        match self.http.post(&url).json(&body).send().await {
            Ok(response) => {
                let http_status = response.status();
                match response.json::<SidecarStatus>().await {
                    Ok(status) if status.is_error() => {
                        let text = format!(
                            "storage write rejected for '{namespace}': {url} with status {http_status}"
                        );
                        warn!(namespace, %http_status, "remote storage rejected write");
                        self.save_log(LogLevel::Error, &text).await;
                    }
                    Ok(_) => debug!(namespace, "storage blob written"),
                    Err(e) => warn!(error = %e, "unreadable response from storage service"),
                }
            }
            Err(e) => warn!(error = %e, "failed to reach storage service"),
        }
    }

    /// Read the JSON blob stored under `namespace`.
    ///
    /// Strict: a non-success HTTP status is mirrored to the log endpoint and
    /// returned as [`SidecarError::Read`].
    pub async fn read_storage(&self, namespace: &str) -> Result<serde_json::Value> {
        let url = self.url(STORAGE_PATH);
        let response = self
            .http
            .get(&url)
            .query(&[("storage", namespace)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = format!("storage read failed for '{namespace}': {url} with status {status}");
            warn!(namespace, %status, "storage read failed");
            self.save_log(LogLevel::Error, &text).await;
            return Err(SidecarError::Read {
                namespace: namespace.to_string(),
                status,
            });
        }
        Ok(response.json().await?)
    }

    /// Delete the blob stored under `namespace`.
    ///
    /// Strict like [`read_storage`](Self::read_storage); failures surface as
    /// [`SidecarError::Delete`].
    pub async fn delete_storage(&self, namespace: &str) -> Result<SidecarStatus> {
        let url = self.url(STORAGE_PATH);
        let response = self
            .http
            .delete(&url)
            .query(&[("storage", namespace)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text =
                format!("storage delete failed for '{namespace}': {url} with status {status}");
            warn!(namespace, %status, "storage delete failed");
            self.save_log(LogLevel::Error, &text).await;
            return Err(SidecarError::Delete {
                namespace: namespace.to_string(),
                status,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl TelemetrySink for TelemetrySidecar {
    async fn save_log(&self, level: LogLevel, text: &str) {
        Self::save_log(self, level, text).await;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn success_body() -> serde_json::Value {
        serde_json::json!({"status": "success"})
    }

    fn error_body(message: &str) -> serde_json::Value {
        serde_json::json!({"status": "error", "message": message})
    }

    #[tokio::test]
    async fn save_log_posts_wire_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/gui-logs/"))
            .and(body_partial_json(serde_json::json!({
                "log_type": "INFO",
                "log_data": "connected to bus",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let sidecar = TelemetrySidecar::new(server.uri());
        sidecar.save_log(LogLevel::Info, "connected to bus").await;
    }

    #[tokio::test]
    async fn save_log_swallows_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/gui-logs/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(error_body("disk full")))
            .expect(1)
            .mount(&server)
            .await;

        let sidecar = TelemetrySidecar::new(server.uri());
        // Must not panic or propagate
        sidecar.save_log(LogLevel::Error, "boom").await;
    }

    #[tokio::test]
    async fn save_log_swallows_network_failure() {
        // Nothing listening on this port
        let sidecar = TelemetrySidecar::new("http://127.0.0.1:1");
        sidecar.save_log(LogLevel::Info, "unreachable").await;
    }

    #[tokio::test]
    async fn write_storage_posts_namespace_and_blob() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/local-storage/"))
            .and(body_partial_json(serde_json::json!({
                "storage": "cfg",
                "json_data": {"a": 1},
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let sidecar = TelemetrySidecar::new(server.uri());
        sidecar
            .write_storage("cfg", &serde_json::json!({"a": 1}))
            .await;
    }

    #[tokio::test]
    async fn write_storage_remote_error_mirrors_exactly_one_error_log() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/local-storage/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(error_body("nope")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/gui-logs/"))
            .and(body_partial_json(serde_json::json!({"log_type": "ERROR"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let sidecar = TelemetrySidecar::new(server.uri());
        // Tolerant: returns normally despite the remote error
        sidecar
            .write_storage("cfg", &serde_json::json!({"a": 1}))
            .await;
    }

    #[tokio::test]
    async fn read_storage_returns_blob() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/local-storage/"))
            .and(query_param("storage", "cfg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"a": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let sidecar = TelemetrySidecar::new(server.uri());
        let blob = sidecar.read_storage("cfg").await.unwrap();
        assert_eq!(blob, serde_json::json!({"a": 1}));
    }

    #[tokio::test]
    async fn read_storage_non_2xx_propagates_after_mirroring() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/local-storage/"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/gui-logs/"))
            .and(body_partial_json(serde_json::json!({"log_type": "ERROR"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let sidecar = TelemetrySidecar::new(server.uri());
        let err = sidecar.read_storage("gone").await.unwrap_err();
        match err {
            SidecarError::Read { namespace, status } => {
                assert_eq!(namespace, "gone");
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
            }
            other => panic!("expected Read error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_storage_returns_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/local-storage/"))
            .and(query_param("storage", "cfg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let sidecar = TelemetrySidecar::new(server.uri());
        let status = sidecar.delete_storage("cfg").await.unwrap();
        assert!(!status.is_error());
    }

    #[tokio::test]
    async fn delete_storage_non_2xx_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/local-storage/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/gui-logs/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;

        let sidecar = TelemetrySidecar::new(server.uri());
        let err = sidecar.delete_storage("cfg").await.unwrap_err();
        assert!(matches!(err, SidecarError::Delete { .. }));
    }

    #[tokio::test]
    async fn write_then_read_round_trip() {
        let server = MockServer::start().await;
        let blob = serde_json::json!({"a": 1});
        Mock::given(method("POST"))
            .and(path("/api/local-storage/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/local-storage/"))
            .and(query_param("storage", "cfg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(blob.clone()))
            .mount(&server)
            .await;

        let sidecar = TelemetrySidecar::new(server.uri());
        sidecar.write_storage("cfg", &blob).await;
        let back = sidecar.read_storage("cfg").await.unwrap();
        assert_eq!(back, blob);
    }

    #[tokio::test]
    async fn delete_then_read_reports_missing() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/local-storage/"))
            .and(query_param("storage", "cfg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/local-storage/"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/gui-logs/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;

        let sidecar = TelemetrySidecar::new(server.uri());
        let status = sidecar.delete_storage("cfg").await.unwrap();
        assert!(!status.is_error());
        assert!(matches!(
            sidecar.read_storage("cfg").await,
            Err(SidecarError::Read { .. })
        ));
    }

    #[tokio::test]
    async fn read_2xx_with_error_body_is_not_an_http_failure() {
        // A 2xx body carrying status:"error" is a logical payload, distinct
        // from the non-2xx failure kind — the caller receives it as data.
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/local-storage/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(error_body("missing")))
            .mount(&server)
            .await;

        let sidecar = TelemetrySidecar::new(server.uri());
        let blob = sidecar.read_storage("cfg").await.unwrap();
        assert_eq!(blob["status"], "error");
    }

    #[tokio::test]
    async fn sink_impl_delegates_to_save_log() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/gui-logs/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let sidecar = TelemetrySidecar::new(server.uri());
        let sink: &dyn TelemetrySink = &sidecar;
        sink.save_log(LogLevel::Debug, "via trait").await;
    }
}
