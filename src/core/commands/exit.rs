use super::{Command, CommandError};
use crate::core::state::ShellState;

/// Ends the session by flipping the running flag; the dispatch loop breaks
/// out on its own and saves history on the way down. Arguments are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(&self, _args: &[String], state: &mut ShellState) -> Result<(), CommandError> {
        state.request_exit();
        Ok(())
    }
}
