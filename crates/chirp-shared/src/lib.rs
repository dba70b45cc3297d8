//! # chirp-shared
//!
//! Types shared by every chirp crate: the chat [`Message`] model, the
//! [`Nickname`] identity with its validator, and the validation errors the
//! store and client layers surface to their callers.

pub mod constants;
pub mod error;
pub mod message;
pub mod nickname;
pub mod types;

pub use error::{InvalidNickname, ValidationError};
pub use message::Message;
pub use nickname::{Nickname, NicknameError};
pub use types::{MessageId, MessageStatus};
