use std::{
    ffi::{CStr, CString},
    os::{
        fd::{AsRawFd, OwnedFd},
        unix::ffi::OsStrExt,
    },
    path::Path,
    ptr,
};

use nix::{
    libc,
    sys::signal::{signal, SigHandler, Signal},
    unistd::{self, chdir, dup2, fork, ForkResult, Pid},
};
use serde::Deserialize;

use crate::{cmd::split::Command, error::ShellError};

/// Signals the shell ignores so Ctrl-C and Ctrl-Z only reach its children.
pub const INTERACTIVE_SIGNALS: [Signal; 2] = [Signal::SIGINT, Signal::SIGTSTP];

const EXEC_FAILED: &[u8] = b"Shell: Incorrect command\n";

/// Makes the calling process ignore [`INTERACTIVE_SIGNALS`].
pub fn ignore_interactive_signals() -> nix::Result<()> {
    for sig in INTERACTIVE_SIGNALS {
        // SAFETY: installing SIG_IGN does not run any handler code
        unsafe { signal(sig, SigHandler::SigIgn) }?;
    }
    Ok(())
}

/// What a child does with signal dispositions between fork and exec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartupPolicy {
    /// Restore the default disposition of [`INTERACTIVE_SIGNALS`].
    #[default]
    Reset,
    /// Keep whatever the shell had.
    Inherit,
}

impl StartupPolicy {
    /// Runs in the child. SIGPIPE is always restored since the Rust runtime
    /// ignores it in the shell.
    fn apply(self) -> nix::Result<()> {
        // SAFETY: restoring SIG_DFL in the freshly forked child
        unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) }?;

        if self == Self::Reset {
            for sig in INTERACTIVE_SIGNALS {
                // SAFETY: restoring SIG_DFL in the freshly forked child
                unsafe { signal(sig, SigHandler::SigDfl) }?;
            }
        }
        Ok(())
    }
}

/// Descriptors a child gets as its stdin and stdout. The shell's copies are
/// closed when the wiring is dropped, which happens right after the fork on
/// every path.
#[derive(Debug, Default)]
pub struct Wiring {
    pub stdin: Option<OwnedFd>,
    pub stdout: Option<OwnedFd>,
}

impl Wiring {
    pub fn stdout(fd: impl Into<OwnedFd>) -> Self {
        Self {
            stdin: None,
            stdout: Some(fd.into()),
        }
    }

    /// Runs in the child. Everything else the shell holds is close-on-exec.
    fn install(&self) -> nix::Result<()> {
        if let Some(fd) = &self.stdin {
            dup2(fd.as_raw_fd(), libc::STDIN_FILENO)?;
        }
        if let Some(fd) = &self.stdout {
            dup2(fd.as_raw_fd(), libc::STDOUT_FILENO)?;
        }
        Ok(())
    }
}

/// Forks and executes external programs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Launcher {
    policy: StartupPolicy,
}

impl Launcher {
    pub fn new(policy: StartupPolicy) -> Self {
        Self { policy }
    }

    /// Spawns `command` inside `dir` with the given wiring and returns its pid.
    ///
    /// A program that cannot be executed still yields a pid: the child prints
    /// the error and exits with status 1.
    pub fn spawn(&self, command: &Command, dir: &Path, wiring: Wiring) -> Result<Pid, ShellError> {
        // everything the child touches is allocated before the fork
        let args = command.to_cstrings()?;
        if args.is_empty() {
            return Err(ShellError::EmptyCommand);
        }
        let argv = args
            .iter()
            .map(|arg| arg.as_ptr())
            .chain([ptr::null()])
            .collect::<Vec<_>>();
        let dir = CString::new(dir.as_os_str().as_bytes())?;

        trace!(%command, ?dir, ?wiring, "forking");

        // SAFETY: between fork and exec the child only calls sigaction, chdir,
        // dup2, execvp, write and _exit on buffers built above.
        match unsafe { fork() } {
            Ok(ForkResult::Parent { child }) => {
                trace!(pid = %child, "spawned");
                drop(wiring);
                Ok(child)
            }
            Ok(ForkResult::Child) => exec_child(self.policy, &dir, &argv, &wiring),
            Err(errno) => Err(ShellError::Fork(errno)),
        }
    }
}

fn exec_child(
    policy: StartupPolicy,
    dir: &CStr,
    argv: &[*const libc::c_char],
    wiring: &Wiring,
) -> ! {
    if policy.apply().is_ok() && chdir(dir).is_ok() && wiring.install().is_ok() {
        // SAFETY: argv is a null-terminated array of pointers into live CStrings
        unsafe { libc::execvp(argv[0], argv.as_ptr()) };
    }

    let _ = unistd::write(libc::STDERR_FILENO, EXEC_FAILED);
    // SAFETY: skips destructors and atexit handlers that belong to the shell
    unsafe { libc::_exit(1) }
}
