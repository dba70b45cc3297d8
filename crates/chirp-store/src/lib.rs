//! # chirp-store
//!
//! In-memory conversation storage and the key-value settings collaborator.
//!
//! [`ConversationStore`] is the single source of truth for chat messages,
//! their delivery status and the per-conversation views derived from them.
//! [`SettingsStore`] abstracts the small amount of state that outlives the
//! process (the nickname), with an in-memory and a SQLite implementation.

pub mod conversation;
pub mod database;
pub mod events;
pub mod migrations;
pub mod settings;

mod error;

pub use conversation::{Conversation, ConversationStore};
pub use database::Database;
pub use error::{Result, StoreError};
pub use events::{StoreEvent, StoreObserver, SubscriptionId};
pub use settings::{MemorySettings, SettingsStore, SqliteSettings};
