use crate::{
    error::ShellError,
    state::{Flow, State},
};

use super::BuiltinCommand;

#[derive(Default)]
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn execute(&self, _state: &mut State, _args: &[String]) -> Result<Flow, ShellError> {
        trace!("exit requested");
        Ok(Flow::Exit)
    }
}
