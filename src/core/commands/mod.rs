use std::collections::BTreeMap;

mod cd;
mod exit;
mod status;

pub use cd::CdCommand;
pub use exit::ExitCommand;
pub use status::StatusCommand;

use crate::core::state::ShellState;

#[derive(Debug)]
pub enum CommandError {
    ExecutionError(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::ExecutionError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CommandError {}

/// A built-in runs inside the shell process and may rewrite session state.
/// `args` is the argument list after the command name.
pub trait Command {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<(), CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Status(StatusCommand),
    Exit(ExitCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<(), CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, state),
            CommandType::Status(cmd) => cmd.execute(args, state),
            CommandType::Exit(cmd) => cmd.execute(args, state),
        }
    }
}

#[derive(Clone)]
pub struct BuiltinRegistry {
    commands: BTreeMap<String, CommandType>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd".to_string(), CommandType::Cd(CdCommand::new()));
        commands.insert(
            "status".to_string(),
            CommandType::Status(StatusCommand::new()),
        );
        commands.insert("exit".to_string(), CommandType::Exit(ExitCommand::new()));
        Self { commands }
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Runs `name` when it is a built-in. `Some` carries the command's own
    /// result; `None` means the name is not a built-in at all.
    pub fn execute(
        &self,
        name: &str,
        args: &[String],
        state: &mut ShellState,
    ) -> Option<Result<(), CommandError>> {
        self.commands.get(name).map(|cmd| cmd.execute(args, state))
    }

    /// Built-in names in sorted order, for completion.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(|name| name.as_str())
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}
