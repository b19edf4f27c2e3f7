use std::fmt;

pub mod executor;
pub mod registry;
pub mod signal;

pub use executor::{ProcessExecutor, EXEC_FAILURE_CODE, REDIRECT_FAILURE_CODE};
pub use registry::BackgroundRegistry;

#[derive(Debug)]
pub enum ProcessError {
    Fork(nix::Error),
    Wait(nix::Error),
    Signal(String),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Fork(errno) => write!(f, "Fork failed: {}", errno),
            ProcessError::Wait(errno) => write!(f, "Wait failed: {}", errno),
            ProcessError::Signal(msg) => write!(f, "Signal error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {}
