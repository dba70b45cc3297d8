//! The chat message model.
//!
//! A [`Message`] is a value: status changes produce a copy through
//! [`Message::with_status`] and the store swaps that copy into the original
//! slot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::SYSTEM_SENDER;
use crate::types::{MessageId, MessageStatus};

/// A single chat entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// Display name of the author.
    pub sender: String,
    /// Body text.
    pub content: String,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
    /// Set for private messages; a message is private iff this is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    /// Set for relayed messages; a message is a relay iff this is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_sender: Option<String>,
    #[serde(default)]
    pub status: MessageStatus,
    /// True iff the message was produced locally by the current identity.
    #[serde(default)]
    pub is_own_message: bool,
}

impl Message {
    /// A public message from `sender`, not yet sent, not authored locally.
    pub fn new(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender: sender.into(),
            content: content.into(),
            created_at: Utc::now(),
            recipient: None,
            original_sender: None,
            status: MessageStatus::Sending,
            is_own_message: false,
        }
    }

    /// A message authored by the local identity.
    pub fn outgoing(
        sender: impl Into<String>,
        content: impl Into<String>,
        recipient: Option<String>,
    ) -> Self {
        Self {
            recipient,
            is_own_message: true,
            ..Self::new(sender, content)
        }
    }

    /// Command feedback shown as a public message from [`SYSTEM_SENDER`].
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(SYSTEM_SENDER, content)
    }

    /// Address the message privately to `recipient`.
    pub fn to(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    /// Mark the message as relayed on behalf of `original_sender`.
    pub fn relayed_from(mut self, original_sender: impl Into<String>) -> Self {
        self.original_sender = Some(original_sender.into());
        self
    }

    /// A copy carrying `status`; every other field is unchanged.
    pub fn with_status(&self, status: MessageStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    pub fn is_private(&self) -> bool {
        self.recipient.is_some()
    }

    pub fn is_relay(&self) -> bool {
        self.original_sender.is_some()
    }

    pub fn is_unread(&self) -> bool {
        !self.is_own_message && self.status != MessageStatus::Read
    }

    /// Whether this private message belongs to the two-party conversation
    /// with `peer`, in either direction.
    pub fn involves(&self, peer: &str) -> bool {
        self.is_private() && (self.sender == peer || self.recipient.as_deref() == Some(peer))
    }
}
