//! Lifecycle bus: typed publish/subscribe for workspace transitions

use workspace_types::WorkspaceEvent;

/// Identifier for a bus subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "obs:{}", self.0)
    }
}

/// Observer of workspace lifecycle events
///
/// Implemented by the external subsystems (UI shell, change tracking,
/// sync) that key their own state off workspace transitions. Observers
/// are notified synchronously, in subscription order, and must not call
/// back into the manager from inside the notification.
pub trait LifecycleObserver {
    /// Called for every published event
    fn on_workspace_event(&mut self, event: &WorkspaceEvent);
}

/// Publish/subscribe channel for workspace lifecycle events
///
/// Every published event is also appended to an inspectable history with
/// a monotonically stamped sequence number, so the exact Will/Did ordering
/// of a transition can be audited after the fact.
pub struct LifecycleBus {
    observers: Vec<(ObserverId, Box<dyn LifecycleObserver>)>,
    history: Vec<WorkspaceEvent>,
    next_observer_id: u64,
    next_sequence: u64,
}

impl LifecycleBus {
    /// Creates a bus with no observers
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
            history: Vec::new(),
            next_observer_id: 1,
            next_sequence: 0,
        }
    }

    /// Subscribes an observer, returning its subscription id
    pub fn subscribe(&mut self, observer: Box<dyn LifecycleObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Removes a subscription
    ///
    /// Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Publishes an event
    ///
    /// The closure receives the stamped sequence number and builds the
    /// event. The event is recorded in the history, then delivered to
    /// observers in subscription order.
    pub fn publish(&mut self, make: impl FnOnce(u64) -> WorkspaceEvent) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let event = make(sequence);
        self.history.push(event.clone());
        for (_, observer) in &mut self.observers {
            observer.on_workspace_event(&event);
        }
    }

    /// Event history, oldest first
    pub fn history(&self) -> &[WorkspaceEvent] {
        &self.history
    }

    /// Clears the event history
    ///
    /// Subscriptions and the sequence counter are untouched.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Number of subscribed observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl Default for LifecycleBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use workspace_types::WorkspaceHandle;

    /// Observer that records every event it sees
    struct Recorder {
        seen: Rc<RefCell<Vec<WorkspaceEvent>>>,
    }

    impl LifecycleObserver for Recorder {
        fn on_workspace_event(&mut self, event: &WorkspaceEvent) {
            self.seen.borrow_mut().push(event.clone());
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<WorkspaceEvent>>>, Box<Recorder>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let observer = Box::new(Recorder { seen: seen.clone() });
        (seen, observer)
    }

    #[test]
    fn test_publish_records_history() {
        let mut bus = LifecycleBus::new();
        let handle = WorkspaceHandle::from_raw(1);

        bus.publish(|sequence| WorkspaceEvent::WillAdd { handle, sequence });
        bus.publish(|sequence| WorkspaceEvent::DidAdd { handle, sequence });

        let history = bus.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].sequence(), 0);
        assert_eq!(history[1].sequence(), 1);
    }

    #[test]
    fn test_observers_see_events_in_order() {
        let mut bus = LifecycleBus::new();
        let (seen, observer) = recorder();
        bus.subscribe(observer);

        let handle = WorkspaceHandle::from_raw(2);
        bus.publish(|sequence| WorkspaceEvent::WillEnter { handle, sequence });
        bus.publish(|sequence| WorkspaceEvent::DidEnter { handle, sequence });

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(matches!(seen[0], WorkspaceEvent::WillEnter { .. }));
        assert!(matches!(seen[1], WorkspaceEvent::DidEnter { .. }));
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut bus = LifecycleBus::new();
        let (seen, observer) = recorder();
        let id = bus.subscribe(observer);
        assert_eq!(bus.observer_count(), 1);

        assert!(bus.unsubscribe(id));
        assert_eq!(bus.observer_count(), 0);
        assert!(!bus.unsubscribe(id));

        let handle = WorkspaceHandle::from_raw(3);
        bus.publish(|sequence| WorkspaceEvent::WillClose { handle, sequence });
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_clear_history_keeps_sequence_monotonic() {
        let mut bus = LifecycleBus::new();
        let handle = WorkspaceHandle::from_raw(4);

        bus.publish(|sequence| WorkspaceEvent::WillAdd { handle, sequence });
        bus.clear_history();
        bus.publish(|sequence| WorkspaceEvent::DidAdd { handle, sequence });

        assert_eq!(bus.history().len(), 1);
        assert_eq!(bus.history()[0].sequence(), 1);
    }
}
