/// Application name
pub const APP_NAME: &str = "chirp";

/// Nickname used until the user picks one
pub const DEFAULT_NICKNAME: &str = "Anonymous";

/// Sender name carried by command feedback messages
pub const SYSTEM_SENDER: &str = "System";

/// Maximum nickname length in characters
pub const MAX_NICKNAME_LENGTH: usize = 20;

/// Default number of messages kept by a conversation store
pub const DEFAULT_MAX_MESSAGES: usize = 1337;

/// Default simulated transmission latency for outgoing messages (milliseconds)
pub const DEFAULT_SEND_DELAY_MS: u64 = 100;

/// Settings key under which the nickname is persisted
pub const NICKNAME_SETTING_KEY: &str = "nickname";

/// Prefix that marks chat input as a command
pub const COMMAND_PREFIX: char = '/';
