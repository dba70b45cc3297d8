//! Change notifications emitted by the [`ConversationStore`].
//!
//! Observers are registered with [`ConversationStore::subscribe`] and called
//! after the mutation is visible to readers, outside the store lock. They run
//! on the thread that performed the mutation; marshalling to a UI thread is
//! the observer's business.
//!
//! [`ConversationStore`]: crate::ConversationStore
//! [`ConversationStore::subscribe`]: crate::ConversationStore::subscribe

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chirp_shared::{Message, MessageId, MessageStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A message was sent or received and appended to the store.
    MessageAppended(Message),
    /// A message's status was replaced; `message` is the stored copy.
    StatusChanged {
        id: MessageId,
        status: MessageStatus,
        message: Message,
    },
    /// Capacity eviction dropped these messages, oldest first.
    Evicted(Vec<MessageId>),
    /// Every message was removed.
    Cleared,
}

/// Receives [`StoreEvent`]s.
pub trait StoreObserver: Send + Sync {
    fn on_event(&self, event: &StoreEvent);
}

impl<F> StoreObserver for F
where
    F: Fn(&StoreEvent) + Send + Sync,
{
    fn on_event(&self, event: &StoreEvent) {
        self(event)
    }
}

/// Token returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered observers.
#[derive(Default)]
pub(crate) struct ObserverList {
    next_id: AtomicU64,
    observers: Mutex<Vec<(SubscriptionId, Arc<dyn StoreObserver>)>>,
}

impl ObserverList {
    pub(crate) fn add(&self, observer: Arc<dyn StoreObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, observer));
        id
    }

    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        let mut observers = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(sub, _)| *sub != id);
        observers.len() != before
    }

    /// Deliver events in order to a snapshot of the current observers.
    ///
    /// The observer list lock is released before any callback runs, so an
    /// observer may subscribe, unsubscribe or mutate the store.
    pub(crate) fn notify(&self, events: &[StoreEvent]) {
        if events.is_empty() {
            return;
        }
        let snapshot: Vec<Arc<dyn StoreObserver>> = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for event in events {
            for observer in &snapshot {
                observer.on_event(event);
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
