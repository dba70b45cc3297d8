//! Chat input command system
//!
//! Input starting with `/` is split on the first whitespace run into a
//! case-insensitive command name and its arguments, then dispatched. Usage
//! mistakes come back as in-band system messages; an invalid `/nick` is an
//! error for the caller to surface.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `/clear` | Clear all messages |
//! | `/help` | Show available commands |
//! | `/msg <nickname> <message>` | Send a private message |
//! | `/nick <new_nickname>` | Change your nickname |
//! | `/who` | Show connected peers |

mod clear;
mod help;
mod identity;
mod messaging;
mod network;

use std::sync::Arc;

use chirp_shared::constants::COMMAND_PREFIX;
use chirp_shared::Message;
use chirp_store::ConversationStore;

use crate::error::{ClientError, Result};
use crate::identity::IdentityStore;
use crate::peers::PeerCount;

/// Registry entry used for `/help` output.
#[derive(Debug)]
pub struct CommandInfo {
    /// Primary command name, without the prefix
    pub name: &'static str,
    /// Argument synopsis, empty when the command takes none
    pub args: &'static str,
    pub description: &'static str,
}

/// All registered commands (alphabetical order)
pub static COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "clear",
        args: "",
        description: "Clear all messages",
    },
    CommandInfo {
        name: "help",
        args: "",
        description: "Show available commands",
    },
    CommandInfo {
        name: "msg",
        args: "<nickname> <message>",
        description: "Send a private message",
    },
    CommandInfo {
        name: "nick",
        args: "<new_nickname>",
        description: "Change your nickname",
    },
    CommandInfo {
        name: "who",
        args: "",
        description: "Show connected peers",
    },
];

/// What an interpreted line did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A system message was injected into the store.
    System(Message),
    /// A message authored by the user was sent.
    Sent(Message),
    /// The store was emptied.
    Cleared,
    /// Blank input; nothing happened.
    Ignored,
}

/// Split a command line into the lower-cased command (prefix included) and
/// its trimmed arguments.
pub fn split_command(input: &str) -> (String, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((command, args)) => (command.to_lowercase(), args.trim()),
        None => (input.to_lowercase(), ""),
    }
}

pub fn is_command(input: &str) -> bool {
    input.starts_with(COMMAND_PREFIX)
}

/// Interprets chat input on behalf of the local user.
pub struct CommandInterpreter {
    store: Arc<ConversationStore>,
    identity: Arc<IdentityStore>,
    peers: Arc<dyn PeerCount>,
}

impl CommandInterpreter {
    pub fn new(
        store: Arc<ConversationStore>,
        identity: Arc<IdentityStore>,
        peers: Arc<dyn PeerCount>,
    ) -> Self {
        Self {
            store,
            identity,
            peers,
        }
    }

    /// Route a raw input line: commands are executed, anything else is sent
    /// publicly under the current nickname.
    pub async fn submit(&self, input: &str) -> Result<CommandOutcome> {
        if input.trim().is_empty() {
            return Ok(CommandOutcome::Ignored);
        }
        if is_command(input) {
            self.execute(input).await
        } else {
            self.send_public(input).await
        }
    }

    /// Execute a `/`-prefixed command line.
    pub async fn execute(&self, input: &str) -> Result<CommandOutcome> {
        if !is_command(input) {
            return Err(ClientError::NotACommand(input.to_string()));
        }

        let (command, args) = split_command(input);
        tracing::debug!(%command, "executing command");

        match &command[COMMAND_PREFIX.len_utf8()..] {
            "nick" => self.nick(args),
            "msg" => self.msg(args).await,
            "who" => Ok(self.who()),
            "clear" => Ok(self.clear()),
            "help" => Ok(self.help()),
            _ => Ok(self.system(format!(
                "Unknown command: {command}. Type /help for available commands."
            ))),
        }
    }

    /// Inject command feedback as a received public message from `System`.
    fn system(&self, text: impl Into<String>) -> CommandOutcome {
        CommandOutcome::System(self.store.receive(Message::system(text)))
    }
}

impl std::fmt::Debug for CommandInterpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandInterpreter")
            .field("store", &self.store)
            .field("identity", &self.identity)
            .field("peers", &self.peers.connected_peer_count())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::time::Duration;

    use chirp_shared::constants::SYSTEM_SENDER;
    use chirp_shared::MessageStatus;
    use chirp_store::{Conversation, MemorySettings};

    use super::*;
    use crate::peers::PeerRoster;

    pub(crate) struct Fixture {
        pub store: Arc<ConversationStore>,
        pub identity: Arc<IdentityStore>,
        pub peers: Arc<PeerRoster>,
        pub interpreter: CommandInterpreter,
    }

    pub(crate) fn fixture() -> Fixture {
        let store = Arc::new(ConversationStore::new(100, Duration::ZERO));
        let identity = Arc::new(IdentityStore::new(Arc::new(MemorySettings::new())));
        let peers = Arc::new(PeerRoster::new());
        let interpreter =
            CommandInterpreter::new(store.clone(), identity.clone(), peers.clone());
        Fixture {
            store,
            identity,
            peers,
            interpreter,
        }
    }

    pub(crate) fn system_text(outcome: &CommandOutcome) -> &str {
        match outcome {
            CommandOutcome::System(msg) => {
                assert_eq!(msg.sender, SYSTEM_SENDER);
                msg.content.as_str()
            }
            other => panic!("expected a system message, got {other:?}"),
        }
    }

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("/nick  Alice "), ("/nick".to_string(), "Alice"));
        assert_eq!(split_command("/WHO"), ("/who".to_string(), ""));
        assert_eq!(
            split_command("/msg Bob hello there"),
            ("/msg".to_string(), "Bob hello there")
        );
        assert_eq!(split_command("/msg\tBob hi"), ("/msg".to_string(), "Bob hi"));
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let f = fixture();
        let outcome = f.interpreter.execute("/unknowncmd").await.unwrap();
        assert_eq!(
            system_text(&outcome),
            "Unknown command: /unknowncmd. Type /help for available commands."
        );
        assert_eq!(f.store.len(), 1);
    }

    #[tokio::test]
    async fn test_commands_are_case_insensitive() {
        let f = fixture();
        let outcome = f.interpreter.execute("/HELP").await.unwrap();
        assert!(system_text(&outcome).starts_with("Available commands"));
    }

    #[tokio::test]
    async fn test_system_messages_are_delivered_public() {
        let f = fixture();
        f.interpreter.execute("/who").await.unwrap();

        let public = f.store.messages(&Conversation::Public);
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].sender, SYSTEM_SENDER);
        assert_eq!(public[0].status, MessageStatus::Delivered);
        assert!(!public[0].is_own_message);
        assert_eq!(f.store.unread_count(&Conversation::Public), 1);
    }

    #[tokio::test]
    async fn test_execute_rejects_plain_text() {
        let f = fixture();
        assert!(matches!(
            f.interpreter.execute("hello").await,
            Err(ClientError::NotACommand(_))
        ));
        assert!(f.store.is_empty());
    }

    #[tokio::test]
    async fn test_submit_routes_plain_text_to_public_send() {
        let f = fixture();
        f.identity.set("Alice").unwrap();

        let outcome = f.interpreter.submit("hello everyone").await.unwrap();
        let CommandOutcome::Sent(msg) = outcome else {
            panic!("expected a sent message");
        };
        assert_eq!(msg.sender, "Alice");
        assert_eq!(msg.content, "hello everyone");
        assert_eq!(msg.status, MessageStatus::Sent);
        assert!(msg.is_own_message);
        assert!(!msg.is_private());
    }

    #[tokio::test]
    async fn test_submit_ignores_blank_input() {
        let f = fixture();
        assert_eq!(f.interpreter.submit("   ").await.unwrap(), CommandOutcome::Ignored);
        assert!(f.store.is_empty());
    }

    #[tokio::test]
    async fn test_leading_space_is_not_a_command() {
        let f = fixture();
        let outcome = f.interpreter.submit(" /who").await.unwrap();
        assert!(matches!(outcome, CommandOutcome::Sent(_)));
        assert_eq!(f.peers.connected_peer_count(), 0);
    }
}
