//! Signal dispositions for the shell and its children.
//!
//! The shell ignores SIGINT, and because `SIG_IGN` is a disposition rather
//! than a handler it survives both fork and exec; foreground children undo
//! it, background children keep it. SIGTSTP drives the foreground-only
//! toggle through a handler that stays on async-signal-safe ground.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use nix::sys::signal::{self, SigHandler, Signal};

use super::ProcessError;

/// Written by the SIGTSTP handler when the toggle lands in foreground-only
/// mode. The leading newline pushes the notice off the interrupted line.
pub const ENTER_FOREGROUND_ONLY_NOTICE: &str =
    "\nEntering foreground-only mode (& is now ignored)\n";

/// Written by the SIGTSTP handler when the toggle returns to normal mode.
pub const EXIT_FOREGROUND_ONLY_NOTICE: &str = "\nExiting foreground-only mode\n";

static FOREGROUND_ONLY: AtomicBool = AtomicBool::new(false);
static INSTALL: Once = Once::new();

/// True while SIGTSTP has toggled the shell into foreground-only mode.
pub fn foreground_only() -> bool {
    FOREGROUND_ONLY.load(Ordering::SeqCst)
}

fn handle_sigtstp() {
    // Runs in signal context: nothing here beyond the atomic and write(2).
    let entering = !FOREGROUND_ONLY.fetch_xor(true, Ordering::SeqCst);
    let notice = if entering {
        ENTER_FOREGROUND_ONLY_NOTICE
    } else {
        EXIT_FOREGROUND_ONLY_NOTICE
    };
    let _ = unsafe {
        libc::write(
            libc::STDOUT_FILENO,
            notice.as_ptr() as *const libc::c_void,
            notice.len(),
        )
    };
}

/// Installs the shell-side dispositions: SIGINT ignored, SIGTSTP routed to
/// the foreground-only toggle. Only the first call installs anything, so
/// building a second shell in the same process cannot stack handlers.
pub fn install_shell_handlers() -> Result<(), ProcessError> {
    let mut result = Ok(());
    INSTALL.call_once(|| result = install());
    result
}

fn install() -> Result<(), ProcessError> {
    unsafe {
        signal::signal(Signal::SIGINT, SigHandler::SigIgn)
            .map_err(|e| ProcessError::Signal(e.to_string()))?;
        signal_hook::low_level::register(signal_hook::consts::SIGTSTP, handle_sigtstp)
            .map_err(|e| ProcessError::Signal(e.to_string()))?;
    }
    Ok(())
}

/// Rewrites the signal table of a just-forked child, before exec. Every
/// child ignores SIGTSTP; a foreground child takes the default SIGINT
/// action again, while a background child keeps the inherited ignore.
pub fn prepare_child(background: bool) -> Result<(), ProcessError> {
    unsafe {
        signal::signal(Signal::SIGTSTP, SigHandler::SigIgn)
            .map_err(|e| ProcessError::Signal(e.to_string()))?;
        if !background {
            signal::signal(Signal::SIGINT, SigHandler::SigDfl)
                .map_err(|e| ProcessError::Signal(e.to_string()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn set_foreground_only(value: bool) {
    FOREGROUND_ONLY.store(value, Ordering::SeqCst);
}
