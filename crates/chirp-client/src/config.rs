//! Client configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the client can start with zero
//! configuration.

use std::path::PathBuf;
use std::time::Duration;

use chirp_shared::constants::{DEFAULT_MAX_MESSAGES, DEFAULT_SEND_DELAY_MS};

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Maximum number of messages kept in memory.
    /// Env: `CHIRP_MAX_MESSAGES`
    /// Default: `1337`
    pub max_messages: usize,

    /// Simulated transmission latency for outgoing messages.
    /// Env: `CHIRP_SEND_DELAY_MS`
    /// Default: `100`
    pub send_delay: Duration,

    /// Settings database location.
    /// Env: `CHIRP_SETTINGS_PATH`
    /// Default: platform data directory.
    pub settings_path: Option<PathBuf>,

    /// Keep settings in memory only (nothing written to disk).
    /// Env: `CHIRP_EPHEMERAL` (true/false)
    /// Default: `false`
    pub ephemeral: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_messages: DEFAULT_MAX_MESSAGES,
            send_delay: Duration::from_millis(DEFAULT_SEND_DELAY_MS),
            settings_path: None,
            ephemeral: false,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("CHIRP_MAX_MESSAGES") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => config.max_messages = n,
                _ => tracing::warn!(value = %val, "Invalid CHIRP_MAX_MESSAGES, using default"),
            }
        }

        if let Some(val) = lookup("CHIRP_SEND_DELAY_MS") {
            match val.parse::<u64>() {
                Ok(ms) => config.send_delay = Duration::from_millis(ms),
                Err(_) => tracing::warn!(value = %val, "Invalid CHIRP_SEND_DELAY_MS, using default"),
            }
        }

        if let Some(path) = lookup("CHIRP_SETTINGS_PATH") {
            if !path.is_empty() {
                config.settings_path = Some(PathBuf::from(path));
            }
        }

        if let Some(val) = lookup("CHIRP_EPHEMERAL") {
            config.ephemeral = val != "false" && val != "0";
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.max_messages, 1337);
        assert_eq!(config.send_delay, Duration::from_millis(100));
        assert!(config.settings_path.is_none());
        assert!(!config.ephemeral);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CHIRP_MAX_MESSAGES", "50"),
            ("CHIRP_SEND_DELAY_MS", "0"),
            ("CHIRP_SETTINGS_PATH", "/tmp/chirp.db"),
            ("CHIRP_EPHEMERAL", "true"),
        ]);
        assert_eq!(config.max_messages, 50);
        assert_eq!(config.send_delay, Duration::ZERO);
        assert_eq!(config.settings_path, Some(PathBuf::from("/tmp/chirp.db")));
        assert!(config.ephemeral);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = config_from(&[
            ("CHIRP_MAX_MESSAGES", "0"),
            ("CHIRP_SEND_DELAY_MS", "soon"),
            ("CHIRP_EPHEMERAL", "0"),
        ]);
        assert_eq!(config, ClientConfig::default());
    }
}
