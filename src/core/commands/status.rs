use super::{Command, CommandError};
use crate::core::state::ShellState;

/// Prints how the last foreground command finished, `exit value 0` if none
/// has run yet. Background completions never show up here.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusCommand;

impl StatusCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for StatusCommand {
    fn execute(&self, _args: &[String], state: &mut ShellState) -> Result<(), CommandError> {
        println!("{}", state.last_status());
        Ok(())
    }
}
