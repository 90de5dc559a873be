//! Notification port.
//!
//! The runtime surfaces transient, user-visible events (connection ups and
//! downs, inbound traffic previews) as structured [`Notification`] values on
//! an unbounded channel. A collaborator — typically the presentation layer —
//! consumes the receiver and renders them however it likes. The core never
//! depends on a rendering surface.

use tokio::sync::mpsc;

/// A transient, auto-dismissing user-facing notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    /// Text to display.
    pub text: String,
    /// Suggested display duration in seconds.
    pub duration_secs: f32,
    /// Render in the compact (small) style.
    pub compact: bool,
}

impl Notification {
    /// Full-size notification.
    #[must_use]
    pub fn new(text: impl Into<String>, duration_secs: f32) -> Self {
        Self {
            text: text.into(),
            duration_secs,
            compact: false,
        }
    }

    /// Compact notification, used for per-message previews.
    #[must_use]
    pub fn compact(text: impl Into<String>, duration_secs: f32) -> Self {
        Self {
            text: text.into(),
            duration_secs,
            compact: true,
        }
    }
}

/// Sending half of the notification port.
pub type NotificationSender = mpsc::UnboundedSender<Notification>;

/// Receiving half of the notification port.
pub type NotificationReceiver = mpsc::UnboundedReceiver<Notification>;

/// Create a notification channel pair.
///
/// Unbounded on purpose: emitting a notification must never suspend or fail
/// the primary action. If the receiver is gone, sends are silently dropped.
#[must_use]
pub fn notification_channel() -> (NotificationSender, NotificationReceiver) {
    mpsc::unbounded_channel()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_delivers_in_order() {
        let (tx, mut rx) = notification_channel();
        let _ = tx.send(Notification::new("connected", 2.5));
        let _ = tx.send(Notification::compact("estop: 1", 0.5));

        let first = rx.try_recv().unwrap();
        assert_eq!(first.text, "connected");
        assert!(!first.compact);

        let second = rx.try_recv().unwrap();
        assert!(second.compact);
    }

    #[test]
    fn send_after_receiver_dropped_is_err_not_panic() {
        let (tx, rx) = notification_channel();
        drop(rx);
        assert!(tx.send(Notification::new("late", 1.0)).is_err());
    }
}
