use super::{CommandInterpreter, CommandOutcome};

impl CommandInterpreter {
    /// `/clear`
    pub(super) fn clear(&self) -> CommandOutcome {
        self.store.clear();
        CommandOutcome::Cleared
    }
}
