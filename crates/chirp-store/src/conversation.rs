//! The bounded, ordered message store.
//!
//! Every mutation happens inside one critical section; projections take a
//! snapshot under the same lock. The simulated transmission delay of a send
//! runs with the lock released, so receives and status updates proceed while
//! a send is in flight. Observers are notified after the lock is dropped.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chirp_shared::constants::{DEFAULT_MAX_MESSAGES, DEFAULT_SEND_DELAY_MS};
use chirp_shared::{Message, MessageId, MessageStatus, ValidationError};
use tracing::{debug, info};

use crate::error::Result;
use crate::events::{ObserverList, StoreEvent, StoreObserver, SubscriptionId};

/// Which slice of the store a query looks at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Conversation {
    /// Every non-private message.
    Public,
    /// Every private message, whoever the peer.
    AllPrivate,
    /// The two-party private conversation with this peer, both directions.
    Peer(String),
}

impl Conversation {
    pub fn peer(nickname: impl Into<String>) -> Self {
        Self::Peer(nickname.into())
    }

    /// Map an `(is_private, peer)` pair; the peer is ignored for public
    /// queries.
    pub fn from_parts(is_private: bool, peer: Option<&str>) -> Self {
        match (is_private, peer) {
            (false, _) => Self::Public,
            (true, None) => Self::AllPrivate,
            (true, Some(peer)) => Self::Peer(peer.to_string()),
        }
    }

    pub fn contains(&self, message: &Message) -> bool {
        match self {
            Self::Public => !message.is_private(),
            Self::AllPrivate => message.is_private(),
            Self::Peer(peer) => message.involves(peer),
        }
    }
}

/// Single source of truth for all chat messages.
pub struct ConversationStore {
    messages: Mutex<VecDeque<Message>>,
    capacity: usize,
    send_delay: Duration,
    observers: ObserverList,
}

impl ConversationStore {
    /// Create an empty store holding at most `capacity` messages (at least
    /// one) and simulating `send_delay` of transmission latency per send.
    pub fn new(capacity: usize, send_delay: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: Mutex::new(VecDeque::with_capacity(capacity.min(DEFAULT_MAX_MESSAGES))),
            capacity,
            send_delay,
            observers: ObserverList::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(capacity, Duration::from_millis(DEFAULT_SEND_DELAY_MS))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn send_delay(&self) -> Duration {
        self.send_delay
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    pub fn subscribe(&self, observer: Arc<dyn StoreObserver>) -> SubscriptionId {
        self.observers.add(observer)
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.remove(id)
    }

    // ------------------------------------------------------------------
    // Sending
    // ------------------------------------------------------------------

    /// Send a public message authored locally.
    ///
    /// The message is appended as `Sending`, marked `Sent` once the
    /// transmission delay has elapsed, and returned in its `Sent` state.
    pub async fn send_public(&self, content: &str, sender: &str) -> Result<Message> {
        self.send(content, sender, None).await
    }

    /// Send a private message authored locally to `recipient`.
    pub async fn send_private(
        &self,
        content: &str,
        sender: &str,
        recipient: &str,
    ) -> Result<Message> {
        if recipient.trim().is_empty() {
            return Err(ValidationError::EmptyRecipient.into());
        }
        self.send(content, sender, Some(recipient)).await
    }

    async fn send(&self, content: &str, sender: &str, recipient: Option<&str>) -> Result<Message> {
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyContent.into());
        }
        if sender.trim().is_empty() {
            return Err(ValidationError::EmptySender.into());
        }

        let message = Message::outgoing(sender, content, recipient.map(str::to_string));
        let id = message.id;
        self.append(message.clone());

        tokio::time::sleep(self.send_delay).await;

        // The message may have been evicted or cleared meanwhile; the caller
        // still learns that it went out.
        Ok(self
            .mark_sent(&id)
            .unwrap_or_else(|| message.with_status(MessageStatus::Sent)))
    }

    /// Move a stored message from `Sending` to `Sent` and return the stored
    /// copy. A status set while the send was in flight is kept.
    fn mark_sent(&self, id: &MessageId) -> Option<Message> {
        let (stored, event) = {
            let mut messages = self.lock();
            let slot = messages.iter_mut().find(|m| m.id == *id)?;
            if slot.status != MessageStatus::Sending {
                debug!(msg_id = %id, status = %slot.status, "status changed in flight, not marking sent");
                return Some(slot.clone());
            }
            *slot = slot.with_status(MessageStatus::Sent);
            let event = StoreEvent::StatusChanged {
                id: *id,
                status: MessageStatus::Sent,
                message: slot.clone(),
            };
            (slot.clone(), event)
        };

        debug!(msg_id = %id, "message sent");
        self.observers.notify(&[event]);
        Some(stored)
    }

    // ------------------------------------------------------------------
    // Receiving
    // ------------------------------------------------------------------

    /// Store a message that arrived from elsewhere and return the stored copy.
    ///
    /// The copy is never treated as our own, and lands as `Read` if it
    /// already was, `Delivered` otherwise.
    pub fn receive(&self, mut message: Message) -> Message {
        message.is_own_message = false;
        message.status = match message.status {
            MessageStatus::Read => MessageStatus::Read,
            _ => MessageStatus::Delivered,
        };
        self.append(message.clone());
        message
    }

    // ------------------------------------------------------------------
    // Status
    // ------------------------------------------------------------------

    /// Replace the status of message `id` in place.
    ///
    /// Returns `Ok(false)` when no such message is stored.
    pub fn update_status(&self, id: &MessageId, status: MessageStatus) -> Result<bool> {
        if id.is_nil() {
            return Err(ValidationError::EmptyMessageId.into());
        }

        let event = {
            let mut messages = self.lock();
            let Some(slot) = messages.iter_mut().find(|m| m.id == *id) else {
                debug!(msg_id = %id, %status, "status update for unknown message ignored");
                return Ok(false);
            };
            *slot = slot.with_status(status);
            StoreEvent::StatusChanged {
                id: *id,
                status,
                message: slot.clone(),
            }
        };

        debug!(msg_id = %id, %status, "message status updated");
        self.observers.notify(&[event]);
        Ok(true)
    }

    /// Mark every unread received message in `conversation` as `Read`.
    ///
    /// Returns how many messages changed.
    pub fn mark_read(&self, conversation: &Conversation) -> usize {
        let events: Vec<StoreEvent> = {
            let mut messages = self.lock();
            messages
                .iter_mut()
                .filter(|m| conversation.contains(m) && m.is_unread())
                .map(|slot| {
                    *slot = slot.with_status(MessageStatus::Read);
                    StoreEvent::StatusChanged {
                        id: slot.id,
                        status: MessageStatus::Read,
                        message: slot.clone(),
                    }
                })
                .collect()
        };

        let changed = events.len();
        if changed > 0 {
            debug!(?conversation, changed, "conversation marked read");
        }
        self.observers.notify(&events);
        changed
    }

    // ------------------------------------------------------------------
    // Clear
    // ------------------------------------------------------------------

    /// Remove every message. Observers get a single [`StoreEvent::Cleared`].
    pub fn clear(&self) {
        let removed = {
            let mut messages = self.lock();
            let removed = messages.len();
            messages.clear();
            removed
        };
        info!(removed, "conversation store cleared");
        self.observers.notify(&[StoreEvent::Cleared]);
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Messages in `conversation`, in insertion order.
    pub fn messages(&self, conversation: &Conversation) -> Vec<Message> {
        self.lock()
            .iter()
            .filter(|m| conversation.contains(m))
            .cloned()
            .collect()
    }

    /// Received messages in `conversation` that are not yet `Read`.
    pub fn unread_count(&self, conversation: &Conversation) -> usize {
        self.lock()
            .iter()
            .filter(|m| conversation.contains(m) && m.is_unread())
            .count()
    }

    /// Every stored message, in insertion order.
    pub fn all(&self) -> Vec<Message> {
        self.lock().iter().cloned().collect()
    }

    pub fn get(&self, id: &MessageId) -> Option<Message> {
        self.lock().iter().find(|m| m.id == *id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Counterparties of private conversations as seen by `own_nickname`,
    /// in order of first appearance.
    pub fn private_peers(&self, own_nickname: &str) -> Vec<String> {
        let messages = self.lock();
        let mut peers: Vec<String> = Vec::new();
        for message in messages.iter() {
            let Some(recipient) = message.recipient.as_deref() else {
                continue;
            };
            let peer = if message.sender == own_nickname {
                recipient
            } else {
                message.sender.as_str()
            };
            if !peers.iter().any(|p| p == peer) {
                peers.push(peer.to_string());
            }
        }
        peers
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn append(&self, message: Message) {
        let id = message.id;
        let events = {
            let mut messages = self.lock();
            messages.push_back(message.clone());

            let mut evicted = Vec::new();
            while messages.len() > self.capacity {
                if let Some(oldest) = messages.pop_front() {
                    evicted.push(oldest.id);
                }
            }

            let mut events = vec![StoreEvent::MessageAppended(message)];
            if !evicted.is_empty() {
                debug!(count = evicted.len(), capacity = self.capacity, "evicted oldest messages");
                events.push(StoreEvent::Evicted(evicted));
            }
            events
        };

        debug!(msg_id = %id, "message appended");
        self.observers.notify(&events);
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Message>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_MESSAGES)
    }
}

impl std::fmt::Debug for ConversationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationStore")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("send_delay", &self.send_delay)
            .field("observers", &self.observers.len())
            .finish()
    }
}
