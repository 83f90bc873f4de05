//! Change notifications for store subscribers.

use serde::Serialize;
use tokio::sync::broadcast;

/// The slice of store state an action changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StoreEvent {
    Theme,
    Sidebar,
    Jobs,
    Candidates,
    Assessments,
    CandidateFilters,
    CandidatesPagination,
    Selection,
    Loading,
    /// State was merged from a stored snapshot.
    Restored,
}

#[derive(Clone)]
pub struct StoreEvents {
    sender: broadcast::Sender<StoreEvent>,
}

impl StoreEvents {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn send(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }
}

impl Default for StoreEvents {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_without_subscribers() {
        StoreEvents::default().send(StoreEvent::Jobs);
    }

    #[test]
    fn test_subscriber_receives_in_order() {
        let events = StoreEvents::new(8);
        let mut rx = events.subscribe();
        events.send(StoreEvent::Theme);
        events.send(StoreEvent::Candidates);

        assert_eq!(rx.try_recv().unwrap(), StoreEvent::Theme);
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::Candidates);
        assert!(rx.try_recv().is_err());
    }
}
