use nix::sys::wait::{self, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;

use crate::core::state::CommandStatus;

/// Pids of launched background commands that have not been reaped yet.
///
/// Insertion order carries no meaning. The registry never blocks: finished
/// children are collected one at a time through [`try_reap_one`], which the
/// dispatch loop calls once per iteration.
///
/// [`try_reap_one`]: BackgroundRegistry::try_reap_one
#[derive(Debug, Default)]
pub struct BackgroundRegistry {
    pids: Vec<Pid>,
}

impl BackgroundRegistry {
    pub fn new() -> Self {
        Self { pids: Vec::new() }
    }

    pub fn register(&mut self, pid: Pid) {
        self.pids.push(pid);
    }

    /// Drops `pid` from the registry, reporting whether it was present.
    pub fn remove(&mut self, pid: Pid) -> bool {
        match self.pids.iter().position(|&tracked| tracked == pid) {
            Some(index) => {
                self.pids.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub fn pids(&self) -> &[Pid] {
        &self.pids
    }

    pub fn is_empty(&self) -> bool {
        self.pids.is_empty()
    }

    /// One non-blocking `waitpid` across all children. A reaped child is
    /// removed from the registry and handed back with its decoded status;
    /// `None` when nothing is tracked or nothing has finished. The status
    /// is reported even for a pid the registry never saw.
    pub fn try_reap_one(&mut self) -> Option<(Pid, CommandStatus)> {
        if self.pids.is_empty() {
            return None;
        }

        let any_child = Pid::from_raw(-1);
        match wait::waitpid(any_child, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(pid, code)) => {
                self.remove(pid);
                Some((pid, CommandStatus::Exited(code)))
            }
            Ok(WaitStatus::Signaled(pid, sig, _)) => {
                self.remove(pid);
                Some((pid, CommandStatus::Signaled(sig as i32)))
            }
            // Still running, stopped, or no children left to wait for.
            Ok(_) | Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::signal::{self, Signal};
    use serial_test::serial;
    use std::process::Command;
    use std::thread;
    use std::time::Duration;

    fn poll_until_reaped(registry: &mut BackgroundRegistry) -> (Pid, CommandStatus) {
        for _ in 0..200 {
            if let Some(result) = registry.try_reap_one() {
                return result;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("child never finished");
    }

    #[test]
    fn test_register_and_remove() {
        let mut registry = BackgroundRegistry::new();
        let first = Pid::from_raw(100);
        let second = Pid::from_raw(200);

        registry.register(first);
        registry.register(second);
        assert_eq!(registry.pids(), &[first, second]);

        assert!(registry.remove(first));
        assert!(!registry.remove(first));
        assert_eq!(registry.pids(), &[second]);
    }

    #[test]
    fn test_reap_with_nothing_tracked() {
        let mut registry = BackgroundRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.try_reap_one(), None);
    }

    #[test]
    #[serial]
    fn test_reap_reports_clean_exit() {
        let mut registry = BackgroundRegistry::new();
        let child = Command::new("true").spawn().expect("spawn true");
        let pid = Pid::from_raw(child.id() as i32);
        registry.register(pid);

        let (reaped, status) = poll_until_reaped(&mut registry);
        assert_eq!(reaped, pid);
        assert_eq!(status, CommandStatus::Exited(0));
        assert!(registry.is_empty());
    }

    #[test]
    #[serial]
    fn test_reap_reports_failure_exit() {
        let mut registry = BackgroundRegistry::new();
        let child = Command::new("false").spawn().expect("spawn false");
        registry.register(Pid::from_raw(child.id() as i32));

        let (_, status) = poll_until_reaped(&mut registry);
        assert_eq!(status, CommandStatus::Exited(1));
    }

    #[test]
    #[serial]
    fn test_reap_reports_killed_child() {
        let mut registry = BackgroundRegistry::new();
        let child = Command::new("sleep").arg("30").spawn().expect("spawn sleep");
        let pid = Pid::from_raw(child.id() as i32);
        registry.register(pid);

        assert_eq!(registry.try_reap_one(), None);

        signal::kill(pid, Signal::SIGKILL).expect("kill");
        let (reaped, status) = poll_until_reaped(&mut registry);
        assert_eq!(reaped, pid);
        assert_eq!(status, CommandStatus::Signaled(Signal::SIGKILL as i32));
    }
}
