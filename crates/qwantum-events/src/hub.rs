//! Single-threaded event fan-out to in-process subscribers.
//!
//! # Design
//! - Subscribers are plain callbacks; they run after the hub releases its
//!   borrow, so a subscriber may publish or unsubscribe re-entrantly.
//! - A subscriber removed while an event is being delivered does not see it.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use chrono::{DateTime, Utc};

use crate::payloads::{EventEnvelope, EventId, UiEvent};

type Callback = Rc<dyn Fn(&EventEnvelope)>;

struct HubState {
    next_id: EventId,
    subscribers: BTreeMap<u64, Callback>,
    next_subscriber: u64,
}

/// Shared hub; clones publish to the same subscribers.
#[derive(Clone)]
pub struct EventHub {
    state: Rc<RefCell<HubState>>,
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        formatter
            .debug_struct("EventHub")
            .field("next_id", &state.next_id)
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}

impl EventHub {
    /// Hub with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(HubState {
                next_id: 1,
                subscribers: BTreeMap::new(),
                next_subscriber: 1,
            })),
        }
    }

    /// Deliver an event stamped with `timestamp` to every subscriber,
    /// returning its id.
    pub fn publish(&self, event: UiEvent, timestamp: DateTime<Utc>) -> EventId {
        let (envelope, subscribers) = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id = state.next_id.saturating_add(1);
            let subscribers: Vec<(u64, Callback)> = state
                .subscribers
                .iter()
                .map(|(key, callback)| (*key, callback.clone()))
                .collect();
            let envelope = EventEnvelope {
                id,
                timestamp,
                event,
            };
            (envelope, subscribers)
        };

        for (key, callback) in subscribers {
            let live = self.state.borrow().subscribers.contains_key(&key);
            if live {
                callback(&envelope);
            }
        }
        envelope.id
    }

    /// Register a subscriber for events published from now on. The
    /// subscription ends when the returned guard is dropped.
    #[must_use]
    pub fn subscribe(&self, callback: impl Fn(&EventEnvelope) + 'static) -> Subscription {
        let mut state = self.state.borrow_mut();
        let key = state.next_subscriber;
        state.next_subscriber += 1;
        state.subscribers.insert(key, Rc::new(callback));
        Subscription {
            state: Rc::downgrade(&self.state),
            key,
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().subscribers.len()
    }
}

/// Subscription guard; dropping it unsubscribes.
pub struct Subscription {
    state: Weak<RefCell<HubState>>,
    key: u64,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Subscription")
            .field("key", &self.key)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().subscribers.remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap_or_default()
    }

    fn recorder(hub: &EventHub) -> (Rc<RefCell<Vec<EventEnvelope>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let subscription = {
            let seen = seen.clone();
            hub.subscribe(move |envelope| seen.borrow_mut().push(envelope.clone()))
        };
        (seen, subscription)
    }

    #[test]
    fn publish_assigns_sequential_ids_and_keeps_timestamps() {
        let hub = EventHub::new();
        let (seen, _subscription) = recorder(&hub);
        assert_eq!(hub.publish(UiEvent::MenuOpened, at(0)), 1);
        assert_eq!(hub.publish(UiEvent::MenuClosed, at(5)), 2);
        let seen = seen.borrow();
        let kinds: Vec<_> = seen.iter().map(|e| e.event.kind()).collect();
        assert_eq!(kinds, vec!["menu_opened", "menu_closed"]);
        assert_eq!(seen[1].timestamp, at(5));
    }

    #[test]
    fn late_subscribers_only_see_later_events() {
        let hub = EventHub::new();
        let _ = hub.publish(UiEvent::MenuOpened, at(0));
        let (seen, subscription) = recorder(&hub);
        let _ = hub.publish(UiEvent::MenuClosed, at(1));
        drop(subscription);
        let _ = hub.publish(UiEvent::MenuOpened, at(2));

        let ids: Vec<_> = seen.borrow().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn subscribers_may_publish_reentrantly() {
        let hub = EventHub::new();
        let count = Rc::new(RefCell::new(0));
        let _subscription = {
            let inner = hub.clone();
            let count = count.clone();
            hub.subscribe(move |envelope| {
                *count.borrow_mut() += 1;
                if envelope.event == UiEvent::MenuOpened {
                    let _ = inner.publish(UiEvent::MenuClosed, envelope.timestamp);
                }
            })
        };
        let _ = hub.publish(UiEvent::MenuOpened, at(0));
        assert_eq!(*count.borrow(), 2);
    }
}
