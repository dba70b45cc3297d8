//! Connected-peer tracking.
//!
//! The transport layer reports peers coming and going; the command layer only
//! needs to know how many are reachable, through [`PeerCount`].

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

/// Number of peers currently reachable.
pub trait PeerCount: Send + Sync {
    fn connected_peer_count(&self) -> usize;
}

/// Nicknames of all currently connected peers.
#[derive(Debug, Default)]
pub struct PeerRoster {
    peers: RwLock<HashSet<String>>,
}

impl PeerRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a connected peer. Reconnecting under the same nickname is a
    /// no-op.
    pub fn on_connected(&self, nickname: &str) {
        let added = self
            .peers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(nickname.to_string());
        if added {
            debug!(peer = %nickname, "Tracking new peer connection");
        }
    }

    /// Remove a peer that has fully disconnected.
    pub fn on_disconnected(&self, nickname: &str) {
        let removed = self
            .peers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(nickname);
        if removed {
            debug!(peer = %nickname, "Removed peer from roster");
        }
    }
}

impl PeerCount for PeerRoster {
    fn connected_peer_count(&self) -> usize {
        self.peers.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
