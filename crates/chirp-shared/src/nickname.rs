//! Nickname validation
//!
//! A nickname is the display name of the local user. Every rule is checked
//! independently so a caller can report all violations at once; the only
//! exception is a blank name, which yields just [`NicknameError::Empty`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_NICKNAME, MAX_NICKNAME_LENGTH};
use crate::error::InvalidNickname;

/// A single violated nickname rule.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NicknameError {
    #[error("Nickname cannot be empty")]
    Empty,

    #[error("Nickname cannot exceed 20 characters")]
    TooLong,

    #[error("Nickname can only contain letters, numbers, spaces, dots, dashes, and underscores")]
    InvalidCharacters,

    #[error("Nickname cannot start or end with spaces")]
    SurroundingWhitespace,
}

/// Validate a nickname
///
/// Checks:
/// - Not blank (short-circuits every other check)
/// - At most 20 characters, counted before trimming
/// - Only letters, digits, whitespace, `.`, `-` and `_` (any script)
/// - No leading or trailing whitespace
pub fn validate(name: &str) -> Vec<NicknameError> {
    if name.trim().is_empty() {
        return vec![NicknameError::Empty];
    }

    let mut errors = Vec::new();
    if name.chars().count() > MAX_NICKNAME_LENGTH {
        errors.push(NicknameError::TooLong);
    }
    if !name.chars().all(is_allowed_char) {
        errors.push(NicknameError::InvalidCharacters);
    }
    if name.trim() != name {
        errors.push(NicknameError::SurroundingWhitespace);
    }
    errors
}

pub fn is_valid(name: &str) -> bool {
    validate(name).is_empty()
}

/// Turn `name` into a [`Nickname`], or report every rule it breaks.
pub fn normalize(name: &str) -> Result<Nickname, InvalidNickname> {
    let errors = validate(name);
    if !errors.is_empty() {
        return Err(InvalidNickname { errors });
    }
    Ok(Nickname(name.trim().to_string()))
}

fn is_allowed_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch.is_whitespace() || matches!(ch, '.' | '-' | '_')
}

/// A validated display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Nickname(String);

impl Nickname {
    pub fn parse(name: &str) -> Result<Self, InvalidNickname> {
        normalize(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_NICKNAME
    }
}

impl Default for Nickname {
    fn default() -> Self {
        Self(DEFAULT_NICKNAME.to_string())
    }
}

impl std::fmt::Display for Nickname {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Nickname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Nickname {
    type Error = InvalidNickname;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        normalize(&value)
    }
}

impl From<Nickname> for String {
    fn from(nickname: Nickname) -> Self {
        nickname.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_nicknames() {
        for name in [
            "alice",
            "Alice123",
            "nick_name",
            "nick-name",
            "nick.name",
            "Mary Jane",
            "用户",
            "Пользователь",
            "Zoë",
        ] {
            assert!(validate(name).is_empty(), "{name} should be valid");
            assert!(is_valid(name));
        }
        assert!(is_valid(&"a".repeat(MAX_NICKNAME_LENGTH)));
    }

    #[test]
    fn test_empty_short_circuits() {
        assert_eq!(validate(""), vec![NicknameError::Empty]);
        assert_eq!(validate("   "), vec![NicknameError::Empty]);
        assert_eq!(validate("\t\n"), vec![NicknameError::Empty]);
    }

    #[test]
    fn test_too_long() {
        assert_eq!(
            validate(&"a".repeat(MAX_NICKNAME_LENGTH + 1)),
            vec![NicknameError::TooLong]
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 20 two-byte characters
        assert!(is_valid(&"é".repeat(MAX_NICKNAME_LENGTH)));
    }

    #[test]
    fn test_invalid_characters() {
        for name in ["nick!", "a/b", "emoji😀", "at@home", "semi;colon"] {
            assert_eq!(
                validate(name),
                vec![NicknameError::InvalidCharacters],
                "{name}"
            );
        }
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(validate(" alice"), vec![NicknameError::SurroundingWhitespace]);
        assert_eq!(validate("alice "), vec![NicknameError::SurroundingWhitespace]);
    }

    #[test]
    fn test_length_and_characters_reported_together() {
        let name = format!("{}!", "a".repeat(MAX_NICKNAME_LENGTH));
        assert_eq!(
            validate(&name),
            vec![NicknameError::TooLong, NicknameError::InvalidCharacters]
        );
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Alice").unwrap().as_str(), "Alice");

        let err = normalize("bad!").unwrap_err();
        assert_eq!(err.errors, vec![NicknameError::InvalidCharacters]);
    }

    #[test]
    fn test_default_nickname() {
        let nick = Nickname::default();
        assert_eq!(nick.as_str(), DEFAULT_NICKNAME);
        assert!(nick.is_default());
        assert!(is_valid(DEFAULT_NICKNAME));
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let ok: Nickname = serde_json::from_str("\"Alice\"").unwrap();
        assert_eq!(ok.as_str(), "Alice");
        assert!(serde_json::from_str::<Nickname>("\" Alice\"").is_err());
    }
}
