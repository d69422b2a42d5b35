use std::{ffi::NulError, io, path::PathBuf};

use nix::errno::Errno;
use thiserror::Error;

use crate::{cmd::execution_plan::CommandSyntaxError, config::ConfigError};

/// Fixed message shown for every operational failure.
pub const INCORRECT_COMMAND: &str = "Shell: Incorrect command";

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Syntax(#[from] CommandSyntaxError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("nothing to execute")]
    EmptyCommand,
    #[error("argument contains a nul byte")]
    Nul(#[from] NulError),
    #[error("cannot change directory to {path:?}")]
    ChangeDir { path: PathBuf, source: io::Error },
    #[error("no home directory to change to")]
    NoHome,
    #[error("cannot open redirection target {path:?}")]
    Redirect { path: PathBuf, source: io::Error },
    #[error("fork failed")]
    Fork(#[source] Errno),
    #[error("pipe creation failed")]
    Pipe(#[source] Errno),
    #[error("waiting for child failed")]
    Wait(#[source] Errno),
    #[error("pipeline could not be built")]
    BrokenPipeline(#[source] Box<ShellError>),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Fatal errors end the shell; everything else is reported and the
    /// prompt comes back.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::BrokenPipeline(_) | Self::Io(_) | Self::Config(_))
    }
}
