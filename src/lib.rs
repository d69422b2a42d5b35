//! A small interactive shell.
//!
//! Each line is classified into one execution shape (single command,
//! `##` sequence, `&&` fan-out, `>` redirection or `|` pipeline) and run
//! with plain fork/exec/wait. See [`state::State`] for the prompt loop.

#[macro_use]
extern crate tracing;

pub mod builtins;
pub mod cmd;
pub mod config;
pub mod error;
pub mod input;
pub mod parse;
pub mod process;
pub mod state;

pub use cmd::execution_plan::ExecutionPlan;
pub use config::Config;
pub use error::ShellError;
pub use state::{Flow, OsFilesystem, State};
