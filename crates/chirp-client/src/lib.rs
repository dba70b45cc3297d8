//! # chirp-client
//!
//! The local side of a chirp session: the user's identity, the peers in
//! range, and the `/command` interpreter layered over the conversation store.

pub mod commands;
pub mod config;
pub mod error;
pub mod identity;
pub mod peers;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

pub use commands::{CommandInterpreter, CommandOutcome};
pub use config::ClientConfig;
pub use error::{ClientError, IdentityError};
pub use identity::IdentityStore;
pub use peers::{PeerCount, PeerRoster};
pub use state::AppState;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "chirp=info,chirp_client=debug,chirp_store=info,warn";

/// Install the global tracing subscriber (respects `RUST_LOG`).
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
