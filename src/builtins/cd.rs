use std::path::PathBuf;

use crate::{
    error::ShellError,
    state::{Flow, State},
};

use super::BuiltinCommand;

#[derive(Default)]
pub struct Cd;

impl BuiltinCommand for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn execute(&self, state: &mut State, args: &[String]) -> Result<Flow, ShellError> {
        trace!("executing cd builtin: {args:?}");

        let path = match args.first() {
            Some(path) => PathBuf::from(path),
            None => state.home_dir().ok_or(ShellError::NoHome)?,
        };

        state.change_dir(&path)?;

        Ok(Flow::Continue)
    }
}
