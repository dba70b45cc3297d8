use thiserror::Error;

use crate::nickname::NicknameError;

/// Rejections for malformed message operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Message content cannot be empty")]
    EmptyContent,

    #[error("Sender cannot be empty")]
    EmptySender,

    #[error("Recipient cannot be empty")]
    EmptyRecipient,

    #[error("Message id cannot be empty")]
    EmptyMessageId,
}

/// A nickname that failed one or more validation rules.
///
/// The display form joins every violated rule, so a caller can show it
/// directly in an alert.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid nickname: {}", join_errors(.errors))]
pub struct InvalidNickname {
    pub errors: Vec<NicknameError>,
}

fn join_errors(errors: &[NicknameError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
