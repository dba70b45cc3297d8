//! Application state shared by the terminal front-end.
//!
//! [`AppState`] wires the conversation store, the identity store and the peer
//! roster together according to a [`ClientConfig`].

use std::sync::Arc;

use chirp_store::{ConversationStore, MemorySettings, SettingsStore, SqliteSettings, StoreError};

use crate::commands::CommandInterpreter;
use crate::config::ClientConfig;
use crate::identity::IdentityStore;
use crate::peers::PeerRoster;

/// Central application state.
#[derive(Debug)]
pub struct AppState {
    pub config: ClientConfig,

    /// Every message of the session.
    pub store: Arc<ConversationStore>,

    /// The local user's nickname, persisted through the settings backend.
    pub identity: Arc<IdentityStore>,

    /// Peers currently reachable. Fed by the transport layer; empty when
    /// there is none.
    pub peers: Arc<PeerRoster>,
}

impl AppState {
    /// Build the state, opening the settings backend the config asks for.
    pub fn new(config: ClientConfig) -> Result<Self, StoreError> {
        let settings: Arc<dyn SettingsStore> = if config.ephemeral {
            tracing::info!("using in-memory settings");
            Arc::new(MemorySettings::new())
        } else if let Some(path) = &config.settings_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            tracing::info!(path = %path.display(), "opening settings database");
            Arc::new(SqliteSettings::open_at(path)?)
        } else {
            Arc::new(SqliteSettings::open_default()?)
        };

        Ok(Self::with_settings(config, settings))
    }

    pub fn with_settings(config: ClientConfig, settings: Arc<dyn SettingsStore>) -> Self {
        let store = Arc::new(ConversationStore::new(
            config.max_messages,
            config.send_delay,
        ));
        Self {
            config,
            store,
            identity: Arc::new(IdentityStore::new(settings)),
            peers: Arc::new(PeerRoster::new()),
        }
    }

    pub fn interpreter(&self) -> CommandInterpreter {
        CommandInterpreter::new(
            Arc::clone(&self.store),
            Arc::clone(&self.identity),
            self.peers.clone(),
        )
    }
}
