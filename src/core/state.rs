use std::fmt;

use nix::unistd::{self, Pid};

/// How the most recent foreground command finished.
///
/// The `Display` form is the exact text the `status` builtin prints and the
/// reaper reuses when it announces finished background commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Exited(i32),
    Signaled(i32),
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandStatus::Exited(code) => write!(f, "exit value {}", code),
            CommandStatus::Signaled(signal) => write!(f, "terminated by signal {}", signal),
        }
    }
}

impl Default for CommandStatus {
    fn default() -> Self {
        // Before any foreground command has run, `status` reports a clean exit.
        CommandStatus::Exited(0)
    }
}

/// Session state shared by the dispatch loop and the builtins: the status of
/// the last foreground command, who last held the foreground, and whether the
/// loop should keep going.
///
/// Background completions never touch `last_status`; only foreground waits
/// and the dispatch loop write it.
#[derive(Debug)]
pub struct ShellState {
    last_status: CommandStatus,
    last_foreground_pid: Pid,
    running: bool,
}

impl ShellState {
    pub fn new() -> Self {
        Self {
            last_status: CommandStatus::default(),
            // The shell itself holds the foreground until a child takes it.
            last_foreground_pid: unistd::getpid(),
            running: true,
        }
    }

    pub fn last_status(&self) -> CommandStatus {
        self.last_status
    }

    pub fn record_status(&mut self, status: CommandStatus) {
        self.last_status = status;
    }

    /// Pid of whichever process held the foreground last: a child after a
    /// foreground wait, the shell itself after a background launch.
    pub fn last_foreground_pid(&self) -> Pid {
        self.last_foreground_pid
    }

    pub fn record_foreground_pid(&mut self, pid: Pid) {
        self.last_foreground_pid = pid;
    }

    pub fn reset_foreground_pid(&mut self) {
        self.last_foreground_pid = unistd::getpid();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_exit(&mut self) {
        self.running = false;
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state_reports_clean_exit() {
        let state = ShellState::new();
        assert_eq!(state.last_status(), CommandStatus::Exited(0));
        assert_eq!(state.last_foreground_pid(), unistd::getpid());
        assert!(state.is_running());
    }

    #[test]
    fn test_foreground_pid_record_and_reset() {
        let mut state = ShellState::new();
        let child = Pid::from_raw(4242);

        state.record_foreground_pid(child);
        assert_eq!(state.last_foreground_pid(), child);

        state.reset_foreground_pid();
        assert_eq!(state.last_foreground_pid(), unistd::getpid());
    }

    #[test]
    fn test_record_status_round_trip() {
        let mut state = ShellState::new();
        state.record_status(CommandStatus::Exited(2));
        assert_eq!(state.last_status(), CommandStatus::Exited(2));

        state.record_status(CommandStatus::Signaled(15));
        assert_eq!(state.last_status(), CommandStatus::Signaled(15));
    }

    #[test]
    fn test_request_exit_stops_the_session() {
        let mut state = ShellState::new();
        state.request_exit();
        assert!(!state.is_running());
    }

    #[test]
    fn test_status_display_formats() {
        assert_eq!(CommandStatus::Exited(0).to_string(), "exit value 0");
        assert_eq!(CommandStatus::Exited(1).to_string(), "exit value 1");
        assert_eq!(
            CommandStatus::Signaled(15).to_string(),
            "terminated by signal 15"
        );
    }
}
