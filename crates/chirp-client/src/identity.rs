//! The local user's nickname.
//!
//! [`IdentityStore`] keeps the current [`Nickname`] in memory and persists it
//! through a [`SettingsStore`]. Reads never fail: a storage fault falls back
//! to the default nickname. Writes are validated, serialized against each
//! other, and announced on a broadcast channel so subscribers react on their
//! own tasks.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chirp_shared::constants::NICKNAME_SETTING_KEY;
use chirp_shared::{nickname, Nickname};
use chirp_store::SettingsStore;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::error::IdentityError;

const CHANGE_CHANNEL_CAPACITY: usize = 16;

pub struct IdentityStore {
    settings: Arc<dyn SettingsStore>,
    current: RwLock<Option<Nickname>>,
    writer: Mutex<()>,
    changes: broadcast::Sender<Nickname>,
}

impl IdentityStore {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            settings,
            current: RwLock::new(None),
            writer: Mutex::new(()),
            changes,
        }
    }

    /// The current nickname, or the default when none is stored or the
    /// settings backend cannot be read.
    pub fn get(&self) -> Nickname {
        if let Some(current) = self
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return current.clone();
        }

        let loaded = match self.settings.get(NICKNAME_SETTING_KEY) {
            Ok(Some(raw)) => match Nickname::parse(&raw) {
                Ok(nickname) => nickname,
                Err(e) => {
                    warn!(stored = %raw, error = %e, "stored nickname is invalid, using default");
                    return Nickname::default();
                }
            },
            Ok(None) => Nickname::default(),
            Err(e) => {
                warn!(error = %e, "failed to read nickname, using default");
                return Nickname::default();
            }
        };

        // A concurrent `set` may have landed while we were reading storage;
        // its value wins.
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(loaded)
            .clone()
    }

    /// Validate, persist and publish a new nickname.
    ///
    /// Returns `(previous, new)`, both read under the writer lock so the pair
    /// describes this change even when other writers race. Nothing changes in
    /// memory if persisting fails.
    pub fn set(&self, name: &str) -> Result<(Nickname, Nickname), IdentityError> {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let nickname = nickname::normalize(name)?;
        let previous = self.get();
        self.settings.set(NICKNAME_SETTING_KEY, nickname.as_str())?;
        self.replace(nickname.clone());

        info!(previous = %previous, nickname = %nickname, "nickname updated");
        Ok((previous, nickname))
    }

    /// Reset to the default nickname.
    pub fn clear(&self) -> Result<(), IdentityError> {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        self.settings.remove(NICKNAME_SETTING_KEY)?;
        self.replace(Nickname::default());

        info!("nickname reset to default");
        Ok(())
    }

    /// Receive every subsequent nickname change.
    pub fn subscribe(&self) -> broadcast::Receiver<Nickname> {
        self.changes.subscribe()
    }

    fn replace(&self, nickname: Nickname) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(nickname.clone());
        // No receivers is fine.
        let _ = self.changes.send(nickname);
    }
}

impl std::fmt::Debug for IdentityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityStore")
            .field("current", &self.get())
            .field("subscribers", &self.changes.receiver_count())
            .finish()
    }
}
