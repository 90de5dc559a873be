//! Connection lifecycle management.
//!
//! One [`ConnectionManager`] per process owns the single transport session.
//! It reacts to the transport's lifecycle events: `Connected` flips the
//! connected flag, `Error` is surfaced (mirrored and notified) but triggers
//! no recovery, and `Closed` drives the reconnect loop — a fixed 1 s delay,
//! retried indefinitely with no backoff growth and no cap. Always keep
//! trying: transient bus outages must never take the client down.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, warn};

use rover_core::{
    BrokerIntrospection, ClientConfig, LogLevel, Notification, NotificationSender, TelemetrySink,
    TopicBinding,
};

use crate::errors::TransportError;
use crate::transport::{BusTransport, SessionEvent, TopicChannel};

/// Notification shown when the session comes up.
const CONNECTED_TEXT: &str = "Connected to websocket server.";

/// Notification shown when a connection attempt fails.
const CONNECT_FAILED_TEXT: &str = "Bus connection failed";

/// Owns the process-wide bus session.
///
/// Constructed once at startup and passed by handle to every consumer —
/// never a global singleton accessor, so tests can substitute a fake
/// transport.
pub struct ConnectionManager {
    transport: Arc<dyn BusTransport>,
    telemetry: Arc<dyn TelemetrySink>,
    notifier: NotificationSender,
    config: ClientConfig,
    connected_tx: watch::Sender<bool>,
    started: AtomicBool,
}

impl ConnectionManager {
    /// Create a manager over the given transport.
    #[must_use]
    pub fn new(
        transport: Arc<dyn BusTransport>,
        telemetry: Arc<dyn TelemetrySink>,
        notifier: NotificationSender,
        config: ClientConfig,
    ) -> Self {
        let (connected_tx, _) = watch::channel(false);
        Self {
            transport,
            telemetry,
            notifier,
            config,
            connected_tx,
            started: AtomicBool::new(false),
        }
    }

    /// Establish the session and start the lifecycle loop.
    ///
    /// Idempotent: calling while already connected or connecting is safe.
    pub fn connect(self: &Arc<Self>) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }
        let manager = Arc::clone(self);
        drop(tokio::spawn(async move { manager.run().await }));
    }

    /// Current connected state.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        *self.connected_tx.borrow()
    }

    /// Watch the connected state.
    #[must_use]
    pub fn connected(&self) -> watch::Receiver<bool> {
        self.connected_tx.subscribe()
    }

    /// Obtain a channel for `binding`, multiplexed over the session.
    ///
    /// The transport queues operations until the handshake completes, so
    /// this is valid whenever a session conceptually exists.
    #[must_use]
    pub fn topic(&self, binding: &TopicBinding) -> Arc<dyn TopicChannel> {
        self.transport.topic(binding)
    }

    /// Query the configured broker node's details.
    pub async fn introspect(&self) -> Result<BrokerIntrospection, TransportError> {
        self.transport
            .introspect(&self.config.introspection_node)
            .await
    }

    async fn run(self: Arc<Self>) {
        self.open().await;
        while let Some(event) = self.transport.next_event().await {
            match event {
                SessionEvent::Connected => {
                    let _ = self.connected_tx.send_replace(true);
                    info!(endpoint = %self.config.bus_endpoint, "connected to bus");
                    self.telemetry.save_log(LogLevel::Info, CONNECTED_TEXT).await;
                    let _ = self.notifier.send(Notification::new(CONNECTED_TEXT, 2.5));
                }
                SessionEvent::Error(detail) => {
                    // Surfacing only — the Closed event that follows drives recovery.
                    error!(detail, "bus connection error");
                    self.telemetry
                        .save_log(
                            LogLevel::Error,
                            &format!("Error connecting to websocket server: {detail}"),
                        )
                        .await;
                    let _ = self.notifier.send(Notification::new(CONNECT_FAILED_TEXT, 1.0));
                }
                SessionEvent::Closed => {
                    let _ = self.connected_tx.send_replace(false);
                    info!("connection to bus closed");
                    self.telemetry
                        .save_log(LogLevel::Info, "Connection to websocket server closed.")
                        .await;
                    tokio::time::sleep(Duration::from_millis(self.config.reconnect_delay_ms)).await;
                    self.open().await;
                }
            }
        }
    }

    async fn open(&self) {
        if let Err(e) = self.transport.open(&self.config.bus_endpoint).await {
            warn!(error = %e, "connection attempt failed");
        }
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("endpoint", &self.config.bus_endpoint)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use rover_core::notify::notification_channel;
    use rover_core::telemetry::RecordingSink;

    fn make_manager(
        transport: Arc<FakeTransport>,
    ) -> (
        Arc<ConnectionManager>,
        Arc<RecordingSink>,
        rover_core::NotificationReceiver,
    ) {
        let telemetry = Arc::new(RecordingSink::new());
        let (notifier, notifications) = notification_channel();
        let manager = Arc::new(ConnectionManager::new(
            transport,
            Arc::clone(&telemetry) as Arc<dyn TelemetrySink>,
            notifier,
            ClientConfig::default(),
        ));
        (manager, telemetry, notifications)
    }

    /// Let spawned tasks progress without advancing the paused clock.
    async fn settle() {
        for _ in 0..32 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn connect_is_idempotent() {
        let transport = FakeTransport::new();
        let (manager, _telemetry, _notifications) = make_manager(Arc::clone(&transport));

        manager.connect();
        manager.connect();
        settle().await;

        assert_eq!(transport.opens(), 1);
        assert!(manager.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn connected_event_mirrors_and_notifies() {
        let transport = FakeTransport::new();
        let (manager, telemetry, mut notifications) = make_manager(Arc::clone(&transport));

        manager.connect();
        settle().await;

        assert_eq!(telemetry.count_at(LogLevel::Info), 1);
        let notification = notifications.try_recv().unwrap();
        assert_eq!(notification.text, CONNECTED_TEXT);
        assert!(!notification.compact);
    }

    #[tokio::test(start_paused = true)]
    async fn error_event_surfaces_without_reconnecting() {
        let transport = FakeTransport::new();
        let (manager, telemetry, mut notifications) = make_manager(Arc::clone(&transport));

        manager.connect();
        settle().await;
        assert_eq!(transport.opens(), 1);

        transport.emit(SessionEvent::Error("handshake rejected".into()));
        settle().await;
        tokio::time::advance(Duration::from_secs(10)).await;
        settle().await;

        // No reconnect: only Closed drives recovery
        assert_eq!(transport.opens(), 1);
        assert_eq!(telemetry.count_at(LogLevel::Error), 1);
        let failure = notifications.try_recv().unwrap(); // connected toast
        assert_eq!(failure.text, CONNECTED_TEXT);
        assert_eq!(notifications.try_recv().unwrap().text, CONNECT_FAILED_TEXT);
    }

    #[tokio::test(start_paused = true)]
    async fn reconnects_once_per_delay_tick_until_connected() {
        let transport = FakeTransport::new();
        transport.set_accept(false);
        let (manager, _telemetry, _notifications) = make_manager(Arc::clone(&transport));

        // Initial attempt fails and schedules the first retry
        manager.connect();
        settle().await;
        assert_eq!(transport.opens(), 1);
        assert!(!manager.is_connected());

        // Half a tick: no attempt yet
        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        assert_eq!(transport.opens(), 1);

        // Each full tick produces exactly one attempt
        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        assert_eq!(transport.opens(), 2);

        tokio::time::advance(Duration::from_millis(1000)).await;
        settle().await;
        assert_eq!(transport.opens(), 3);

        // Broker comes back: next tick connects and retrying stops
        transport.set_accept(true);
        tokio::time::advance(Duration::from_millis(1000)).await;
        settle().await;
        assert_eq!(transport.opens(), 4);
        assert!(manager.is_connected());

        tokio::time::advance(Duration::from_secs(30)).await;
        settle().await;
        assert_eq!(transport.opens(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_clears_connected_flag() {
        let transport = FakeTransport::new();
        let (manager, _telemetry, _notifications) = make_manager(Arc::clone(&transport));

        manager.connect();
        settle().await;
        assert!(manager.is_connected());

        transport.emit(SessionEvent::Closed);
        settle().await;
        assert!(!manager.is_connected());

        // The reconnect then restores the session
        tokio::time::advance(Duration::from_millis(1000)).await;
        settle().await;
        assert!(manager.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn watch_receiver_observes_transitions() {
        let transport = FakeTransport::new();
        let (manager, _telemetry, _notifications) = make_manager(Arc::clone(&transport));
        let mut connected = manager.connected();
        assert!(!*connected.borrow());

        manager.connect();
        settle().await;
        connected.mark_unchanged();
        assert!(*connected.borrow());
    }
}
