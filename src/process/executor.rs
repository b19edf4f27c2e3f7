use std::ffi::CString;
use std::os::unix::io::RawFd;
use std::process;

use nix::errno::Errno;
use nix::fcntl::{self, OFlag};
use nix::sys::stat::Mode;
use nix::sys::wait::{self, WaitStatus};
use nix::unistd::{self, ForkResult, Pid};

use super::{signal, BackgroundRegistry, ProcessError};
use crate::core::state::{CommandStatus, ShellState};
use crate::parser::CommandLine;

/// Exit code a child reports when a redirection target cannot be opened.
pub const REDIRECT_FAILURE_CODE: i32 = 1;

/// Exit code a child reports when exec fails, distinct from
/// [`REDIRECT_FAILURE_CODE`] so the two failures stay distinguishable
/// through `status`.
pub const EXEC_FAILURE_CODE: i32 = 2;

const NULL_DEVICE: &str = "/dev/null";

/// Runs external commands: fork, rewrite the child's signal table and file
/// descriptors, exec, then either wait (foreground) or hand the pid to the
/// background registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(
        &self,
        command: &CommandLine,
        state: &mut ShellState,
        registry: &mut BackgroundRegistry,
    ) -> Result<(), ProcessError> {
        // The SIGTSTP toggle overrides the request, never the reverse.
        let background = command.background && !signal::foreground_only();

        match unsafe { unistd::fork() }.map_err(ProcessError::Fork)? {
            ForkResult::Child => run_child(command, background),
            ForkResult::Parent { child } => {
                if background {
                    println!("background pid is {}", child);
                    state.reset_foreground_pid();
                    registry.register(child);
                } else {
                    let status = wait_foreground(child)?;
                    state.record_status(status);
                    state.record_foreground_pid(child);
                    if let CommandStatus::Signaled(signal_number) = status {
                        println!("terminated by signal {}", signal_number);
                    }
                }

                // Courtesy poll: a background command that finished already
                // gets its notice now instead of a prompt cycle later.
                if let Some((pid, status)) = registry.try_reap_one() {
                    println!("background pid {} is done: {}", pid, status);
                }

                Ok(())
            }
        }
    }
}

fn wait_foreground(child: Pid) -> Result<CommandStatus, ProcessError> {
    loop {
        match wait::waitpid(child, None) {
            Ok(WaitStatus::Exited(_, code)) => return Ok(CommandStatus::Exited(code)),
            Ok(WaitStatus::Signaled(_, sig, _)) => {
                return Ok(CommandStatus::Signaled(sig as i32))
            }
            Ok(_) => continue,
            Err(Errno::EINTR) => continue,
            Err(errno) => return Err(ProcessError::Wait(errno)),
        }
    }
}

/// Child side of the fork. Never returns: ends in exec or in `exit` with
/// one of the two failure codes.
fn run_child(command: &CommandLine, background: bool) -> ! {
    if let Err(err) = signal::prepare_child(background) {
        eprintln!("{}", err);
        process::exit(REDIRECT_FAILURE_CODE);
    }

    // Explicit redirects win; a background command with no redirect gets the
    // null device so it cannot read from or write over the terminal.
    if let Some(path) = stream_path(&command.input_redirect, background) {
        attach_stream(path, libc::STDIN_FILENO, OFlag::O_RDONLY, Mode::empty(), "input");
    }
    if let Some(path) = stream_path(&command.output_redirect, background) {
        attach_stream(
            path,
            libc::STDOUT_FILENO,
            OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
            Mode::from_bits_truncate(0o644),
            "output",
        );
    }

    let argv: Vec<CString> = match command
        .args
        .iter()
        .map(|arg| CString::new(arg.as_str()))
        .collect()
    {
        Ok(argv) => argv,
        Err(_) => {
            eprintln!("{}: argument contains an interior nul byte", command.name);
            process::exit(EXEC_FAILURE_CODE);
        }
    };

    match unistd::execvp(&argv[0], &argv) {
        Err(errno) => {
            eprintln!("{}: {}", command.name, errno.desc());
            process::exit(EXEC_FAILURE_CODE);
        }
        Ok(infallible) => match infallible {},
    }
}

fn stream_path(explicit: &Option<String>, background: bool) -> Option<&str> {
    match explicit {
        Some(path) => Some(path.as_str()),
        None if background => Some(NULL_DEVICE),
        None => None,
    }
}

fn attach_stream(path: &str, target: RawFd, flags: OFlag, mode: Mode, stream: &str) {
    let fd = match fcntl::open(path, flags, mode) {
        Ok(fd) => fd,
        Err(_) => {
            eprintln!("cannot open {} for {}", path, stream);
            process::exit(REDIRECT_FAILURE_CODE);
        }
    };
    if let Err(errno) = unistd::dup2(fd, target) {
        eprintln!("cannot redirect standard {}: {}", stream, errno.desc());
        process::exit(REDIRECT_FAILURE_CODE);
    }
    let _ = unistd::close(fd);
}
