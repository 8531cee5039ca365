//! Auth-required notifications.
//!
//! A broadcast channel stands in for a global event bus: every observed 401
//! publishes `AuthEvent::AuthRequired` to each live subscriber. Dropping a
//! receiver unsubscribes it.

use tokio::sync::broadcast;

/// Buffered events per subscriber before the slowest one starts lagging.
const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// A request came back 401 and the stored credential was dropped.
    AuthRequired,
}

#[derive(Debug, Clone)]
pub struct AuthNotifier {
    tx: broadcast::Sender<AuthEvent>,
}

impl AuthNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Register a new subscriber. It only sees events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn emit(&self, event: AuthEvent) {
        match self.tx.send(event) {
            Ok(n) => log::debug!("Delivered {:?} to {} subscriber(s)", event, n),
            Err(_) => log::debug!("No subscribers for {:?}", event),
        }
    }
}

impl Default for AuthNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[test]
    fn test_emit_reaches_every_subscriber() {
        let notifier = AuthNotifier::new();
        let mut a = notifier.subscribe();
        let mut b = notifier.subscribe();
        assert_eq!(notifier.subscriber_count(), 2);

        notifier.emit(AuthEvent::AuthRequired);

        assert_eq!(a.try_recv().unwrap(), AuthEvent::AuthRequired);
        assert_eq!(b.try_recv().unwrap(), AuthEvent::AuthRequired);
        assert!(matches!(a.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_emit_without_subscribers() {
        let notifier = AuthNotifier::new();
        assert_eq!(notifier.subscriber_count(), 0);
        notifier.emit(AuthEvent::AuthRequired);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let notifier = AuthNotifier::new();
        let rx = notifier.subscribe();
        assert_eq!(notifier.subscriber_count(), 1);
        drop(rx);
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    fn test_late_subscriber_misses_earlier_events() {
        let notifier = AuthNotifier::new();
        let _early = notifier.subscribe();
        notifier.emit(AuthEvent::AuthRequired);
        let mut late = notifier.subscribe();
        assert!(matches!(late.try_recv(), Err(TryRecvError::Empty)));
    }
}
