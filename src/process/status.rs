use nix::{
    errno::Errno,
    sys::{
        signal::Signal,
        wait::{waitpid, WaitPidFlag, WaitStatus},
    },
    unistd::Pid,
};

use crate::error::ShellError;

/// How a waited-for child ended. Children stopped by a signal count as
/// finished so a suspended foreground process never wedges the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStatus {
    Exited(i32),
    Signaled(Signal),
    Stopped(Signal),
}

impl ChildStatus {
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Exited(code) => Some(*code),
            Self::Signaled(_) | Self::Stopped(_) => None,
        }
    }

    pub fn success(&self) -> bool {
        self.code() == Some(0)
    }
}

/// Blocks until `pid` exits, is killed, or stops.
pub fn wait_for(pid: Pid) -> Result<ChildStatus, ShellError> {
    loop {
        let status = match waitpid(pid, Some(WaitPidFlag::WUNTRACED)) {
            Ok(status) => status,
            Err(Errno::EINTR) => continue,
            Err(errno) => return Err(ShellError::Wait(errno)),
        };

        trace!(?status, "child changed state");

        match status {
            WaitStatus::Exited(_, code) => return Ok(ChildStatus::Exited(code)),
            WaitStatus::Signaled(_, signal, _) => return Ok(ChildStatus::Signaled(signal)),
            WaitStatus::Stopped(_, signal) => return Ok(ChildStatus::Stopped(signal)),
            _ => continue,
        }
    }
}

/// Waits for every pid, in order. A pid that cannot be waited on is logged
/// and skipped so the rest are still reaped.
pub fn wait_all(pids: &[Pid]) -> Vec<ChildStatus> {
    pids.iter()
        .filter_map(|&pid| match wait_for(pid) {
            Ok(status) => Some(status),
            Err(err) => {
                warn!(%pid, "failed to wait for child: {err}");
                None
            }
        })
        .collect()
}
