use super::{CommandInterpreter, CommandOutcome, COMMANDS};
use chirp_shared::constants::COMMAND_PREFIX;

/// The `/help` text, one line per registered command.
pub(super) fn help_text() -> String {
    let mut text = String::from("Available commands:");
    for info in COMMANDS {
        text.push('\n');
        text.push(COMMAND_PREFIX);
        text.push_str(info.name);
        if !info.args.is_empty() {
            text.push(' ');
            text.push_str(info.args);
        }
        text.push_str(" - ");
        text.push_str(info.description);
    }
    text
}

impl CommandInterpreter {
    /// `/help`
    pub(super) fn help(&self) -> CommandOutcome {
        self.system(help_text())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{fixture, system_text};
    use super::*;

    #[test]
    fn test_help_lists_every_command() {
        let text = help_text();
        for command in ["/nick <new_nickname>", "/msg <nickname> <message>", "/who", "/clear", "/help"] {
            assert!(text.contains(command), "missing {command}");
        }
    }

    #[tokio::test]
    async fn test_help_emits_system_message() {
        let f = fixture();
        let outcome = f.interpreter.execute("/help").await.unwrap();
        assert_eq!(system_text(&outcome), help_text());
    }
}
