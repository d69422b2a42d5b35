use std::os::fd::{FromRawFd, OwnedFd};

use nix::unistd;

pub mod launcher;
pub mod status;

/// Creates a pipe whose ends are closed on exec, returned as `(read, write)`.
///
/// Children only keep the ends explicitly wired onto their stdin or stdout.
#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
pub fn cloexec_pipe() -> nix::Result<(OwnedFd, OwnedFd)> {
    use nix::fcntl::OFlag;

    let (read, write) = unistd::pipe2(OFlag::O_CLOEXEC)?;
    // SAFETY: both descriptors were just created and are owned by nobody else
    Ok(unsafe { (OwnedFd::from_raw_fd(read), OwnedFd::from_raw_fd(write)) })
}

#[cfg(not(any(target_os = "linux", target_os = "android", target_os = "freebsd")))]
pub fn cloexec_pipe() -> nix::Result<(OwnedFd, OwnedFd)> {
    use nix::fcntl::{fcntl, FcntlArg, FdFlag};

    let (read, write) = unistd::pipe()?;
    // SAFETY: both descriptors were just created and are owned by nobody else
    let pipe = unsafe { (OwnedFd::from_raw_fd(read), OwnedFd::from_raw_fd(write)) };
    fcntl(read, FcntlArg::F_SETFD(FdFlag::FD_CLOEXEC))?;
    fcntl(write, FcntlArg::F_SETFD(FdFlag::FD_CLOEXEC))?;
    Ok(pipe)
}
