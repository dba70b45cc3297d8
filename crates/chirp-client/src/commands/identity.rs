use super::{CommandInterpreter, CommandOutcome};
use crate::error::Result;

impl CommandInterpreter {
    /// `/nick <new_nickname>`
    pub(super) fn nick(&self, args: &str) -> Result<CommandOutcome> {
        if args.is_empty() {
            return Ok(self.system("Usage: /nick <new_nickname>"));
        }

        let (old, new) = self.identity.set(args)?;
        Ok(self.system(format!("Nickname changed from {old} to {new}")))
    }
}
