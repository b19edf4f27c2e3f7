use std::env;
use std::path::PathBuf;

use super::{Command, CommandError};
use crate::core::state::ShellState;

#[derive(Debug, Clone, Copy, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String], _state: &mut ShellState) -> Result<(), CommandError> {
        // Bare `cd` goes home; arguments past the first are ignored.
        let target: PathBuf = match args.first() {
            Some(path) => PathBuf::from(path),
            None => dirs::home_dir().ok_or_else(|| {
                CommandError::ExecutionError("cd: home directory not set".to_string())
            })?,
        };

        env::set_current_dir(&target).map_err(|err| {
            CommandError::ExecutionError(format!("cd: {}: {}", target.display(), err))
        })
    }
}
