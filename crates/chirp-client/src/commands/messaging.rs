use super::{CommandInterpreter, CommandOutcome};
use crate::error::Result;

impl CommandInterpreter {
    /// `/msg <nickname> <message>`
    pub(super) async fn msg(&self, args: &str) -> Result<CommandOutcome> {
        let Some((recipient, body)) = args
            .split_once(char::is_whitespace)
            .map(|(recipient, body)| (recipient, body.trim()))
            .filter(|(_, body)| !body.is_empty())
        else {
            return Ok(self.system("Usage: /msg <nickname> <message>"));
        };

        let sender = self.identity.get();
        let sent = self
            .store
            .send_private(body, sender.as_str(), recipient)
            .await?;
        Ok(CommandOutcome::Sent(sent))
    }

    pub(super) async fn send_public(&self, content: &str) -> Result<CommandOutcome> {
        let sender = self.identity.get();
        let sent = self.store.send_public(content, sender.as_str()).await?;
        Ok(CommandOutcome::Sent(sent))
    }
}
