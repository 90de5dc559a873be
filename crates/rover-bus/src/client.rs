//! Client runtime facade.
//!
//! Bundles the session components into one long-lived service instance,
//! constructed once at startup and handed by reference to every consumer.

use std::sync::Arc;

use rover_core::{ClientConfig, NotificationReceiver, TelemetrySink, notification_channel};

use crate::confirm::SubscriptionConfirmer;
use crate::connection::ConnectionManager;
use crate::publisher::Publisher;
use crate::registry::ListenerRegistry;
use crate::transport::BusTransport;

/// The assembled client runtime.
///
/// Owns the connection manager, the listener registry seeded with the
/// default catalog, the publisher, and the subscription confirmer. The
/// returned [`NotificationReceiver`] is the rendering collaborator's end of
/// the notification port.
pub struct RoverClient {
    connection: Arc<ConnectionManager>,
    registry: ListenerRegistry,
    publisher: Publisher,
    confirmer: SubscriptionConfirmer,
}

impl RoverClient {
    /// Assemble the runtime over the given transport and telemetry sink.
    #[must_use]
    pub fn new(
        transport: Arc<dyn BusTransport>,
        telemetry: Arc<dyn TelemetrySink>,
        config: ClientConfig,
    ) -> (Self, NotificationReceiver) {
        let (notifier, notifications) = notification_channel();
        let connection = Arc::new(ConnectionManager::new(
            transport,
            Arc::clone(&telemetry),
            notifier,
            config,
        ));
        let registry = ListenerRegistry::new(Arc::clone(&connection), Arc::clone(&telemetry));
        let publisher = Publisher::new(Arc::clone(&connection), telemetry);
        let confirmer = SubscriptionConfirmer::new(Arc::clone(&connection));
        (
            Self {
                connection,
                registry,
                publisher,
                confirmer,
            },
            notifications,
        )
    }

    /// Establish the session and start the reconnect loop. Idempotent.
    pub fn connect(&self) {
        self.connection.connect();
    }

    /// The connection manager.
    #[must_use]
    pub fn connection(&self) -> &Arc<ConnectionManager> {
        &self.connection
    }

    /// The named/ad-hoc listener registry.
    #[must_use]
    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    /// The outbound publisher.
    #[must_use]
    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    /// The subscription confirmer.
    #[must_use]
    pub fn confirmer(&self) -> &SubscriptionConfirmer {
        &self.confirmer
    }
}

impl std::fmt::Debug for RoverClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoverClient")
            .field("connected", &self.connection.is_connected())
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
