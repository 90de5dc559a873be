//! Test support: a channel-backed in-memory transport.
//!
//! [`FakeTransport`] implements [`BusTransport`] without any network. Tests
//! script session events and introspection answers, inject inbound messages,
//! and observe published traffic and live subscription counts.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc;

use rover_core::{BrokerIntrospection, Message, TopicBinding};

use crate::errors::TransportError;
use crate::transport::{BusTransport, SessionEvent, TopicChannel};

/// In-memory topic channel shared by every [`FakeTransport::topic`] call for
/// the same topic name.
pub struct FakeTopic {
    binding: TopicBinding,
    published: Mutex<Vec<Message>>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<Message>>>,
    active: AtomicUsize,
}

impl FakeTopic {
    fn new(binding: TopicBinding) -> Self {
        Self {
            binding,
            published: Mutex::new(Vec::new()),
            subscribers: Mutex::new(Vec::new()),
            active: AtomicUsize::new(0),
        }
    }

    fn deliver(&self, payload: serde_json::Value) {
        let message = Message::new(
            self.binding.name.clone(),
            self.binding.message_type.clone(),
            payload,
        );
        let subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        for tx in subscribers.iter() {
            let _ = tx.send(message.clone());
        }
    }
}

impl TopicChannel for FakeTopic {
    fn publish(&self, message: &Message) -> Result<(), TransportError> {
        self.published
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(message.clone());
        Ok(())
    }

    fn subscribe(&self) -> Result<mpsc::UnboundedReceiver<Message>, TransportError> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(tx);
        let _ = self.active.fetch_add(1, Ordering::SeqCst);
        Ok(rx)
    }

    fn unsubscribe(&self) {
        self.subscribers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clear();
        self.active.store(0, Ordering::SeqCst);
    }
}

/// Scriptable in-memory transport.
pub struct FakeTransport {
    opens: AtomicUsize,
    accept: AtomicBool,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<SessionEvent>>,
    topics: Mutex<HashMap<String, Arc<FakeTopic>>>,
    introspection_queue: Mutex<VecDeque<Result<BrokerIntrospection, TransportError>>>,
    introspection_fallback: Mutex<BrokerIntrospection>,
    introspect_calls: AtomicUsize,
}

impl FakeTransport {
    /// New transport that accepts connections.
    #[must_use]
    pub fn new() -> Arc<Self> {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Arc::new(Self {
            opens: AtomicUsize::new(0),
            accept: AtomicBool::new(true),
            events_tx,
            events_rx: tokio::sync::Mutex::new(events_rx),
            topics: Mutex::new(HashMap::new()),
            introspection_queue: Mutex::new(VecDeque::new()),
            introspection_fallback: Mutex::new(BrokerIntrospection::default()),
            introspect_calls: AtomicUsize::new(0),
        })
    }

    /// Whether subsequent `open` calls succeed (emit `Connected`) or fail
    /// (emit `Error` then `Closed`).
    pub fn set_accept(&self, accept: bool) {
        self.accept.store(accept, Ordering::SeqCst);
    }

    /// Number of `open` calls observed.
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    /// Emit a raw session event, as the wire would.
    pub fn emit(&self, event: SessionEvent) {
        let _ = self.events_tx.send(event);
    }

    /// Deliver an inbound payload to every subscriber of `topic`.
    pub fn inject(&self, topic: &str, payload: serde_json::Value) {
        let channel = {
            let topics = self
                .topics
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            topics.get(topic).cloned()
        };
        if let Some(channel) = channel {
            channel.deliver(payload);
        }
    }

    /// Messages published on `topic`, in order.
    pub fn published(&self, topic: &str) -> Vec<Message> {
        let topics = self
            .topics
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        topics.get(topic).map_or_else(Vec::new, |t| {
            t.published
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .clone()
        })
    }

    /// Count of live subscriptions on `topic`.
    pub fn active_subscriptions(&self, topic: &str) -> usize {
        let topics = self
            .topics
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        topics
            .get(topic)
            .map_or(0, |t| t.active.load(Ordering::SeqCst))
    }

    /// Queue one scripted introspection answer (consumed in order).
    pub fn queue_introspection(&self, result: Result<BrokerIntrospection, TransportError>) {
        self.introspection_queue
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push_back(result);
    }

    /// Set the standing introspection answer used once the queue is empty.
    pub fn set_subscriptions(&self, names: &[&str]) {
        let mut fallback = self
            .introspection_fallback
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        fallback.subscriptions = names.iter().map(ToString::to_string).collect();
    }

    /// Number of introspection calls observed.
    pub fn introspect_calls(&self) -> usize {
        self.introspect_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BusTransport for FakeTransport {
    async fn open(&self, _endpoint: &str) -> Result<(), TransportError> {
        let _ = self.opens.fetch_add(1, Ordering::SeqCst);
        if self.accept.load(Ordering::SeqCst) {
            self.emit(SessionEvent::Connected);
        } else {
            self.emit(SessionEvent::Error("connection refused".into()));
            self.emit(SessionEvent::Closed);
        }
        Ok(())
    }

    async fn next_event(&self) -> Option<SessionEvent> {
        self.events_rx.lock().await.recv().await
    }

    fn topic(&self, binding: &TopicBinding) -> Arc<dyn TopicChannel> {
        let mut topics = self
            .topics
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let channel = topics
            .entry(binding.name.clone())
            .or_insert_with(|| Arc::new(FakeTopic::new(binding.clone())));
        Arc::clone(channel) as Arc<dyn TopicChannel>
    }

    async fn introspect(&self, _node: &str) -> Result<BrokerIntrospection, TransportError> {
        let _ = self.introspect_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self
            .introspection_queue
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front();
        match scripted {
            Some(result) => result,
            None => Ok(self
                .introspection_fallback
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .clone()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
