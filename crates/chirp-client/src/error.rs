use chirp_shared::InvalidNickname;
use chirp_store::StoreError;
use thiserror::Error;

/// Failures of the identity layer.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error(transparent)]
    InvalidNickname(#[from] InvalidNickname),

    #[error("Failed to persist nickname: {0}")]
    Settings(#[from] StoreError),
}

/// Errors surfaced to whatever drives the client (terminal, UI bridge).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Not a command: {0}")]
    NotACommand(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
