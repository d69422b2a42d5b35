use std::os::fd::OwnedFd;

use nix::{
    sys::signal::{kill, Signal},
    unistd::Pid,
};

use super::{
    execution_plan::{ExecutionPlan, Redirection},
    split::Command,
};
use crate::{
    error::ShellError,
    process::{
        cloexec_pipe,
        launcher::Wiring,
        status::{wait_all, wait_for},
    },
    state::{Flow, Launch, State},
};

impl ExecutionPlan {
    pub fn execute(&self, state: &mut State) -> Result<Flow, ShellError> {
        match self {
            Self::NoOp => Ok(Flow::Continue),
            Self::Exit => Ok(Flow::Exit),
            Self::Single(command) => run_single(state, command),
            Self::Sequential(commands) => run_sequential(state, commands),
            Self::Parallel(commands) => run_parallel(state, commands),
            Self::Redirected(redirection) => run_redirected(state, redirection),
            Self::Piped(stages) => run_piped(state, stages),
        }
    }
}

fn run_single(state: &mut State, command: &Command) -> Result<Flow, ShellError> {
    if command.is_empty() {
        return Ok(Flow::Continue);
    }

    match state.launch(command, Wiring::default())? {
        Launch::Spawned(pid) => {
            wait_for(pid)?;
            Ok(Flow::Continue)
        }
        Launch::Builtin(flow) => Ok(flow),
    }
}

fn run_sequential(state: &mut State, commands: &[Command]) -> Result<Flow, ShellError> {
    for command in commands.iter().filter(|c| !c.is_empty()) {
        trace!(%command, "SEQ: running");

        match run_single(state, command) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(Flow::Exit),
            Err(err) => state.report(&err),
        }
    }

    Ok(Flow::Continue)
}

fn run_parallel(state: &mut State, commands: &[Command]) -> Result<Flow, ShellError> {
    let mut children = Vec::with_capacity(commands.len());
    let mut flow = Flow::Continue;

    for command in commands.iter().filter(|c| !c.is_empty()) {
        trace!(%command, "PAR: launching");

        match state.launch(command, Wiring::default()) {
            Ok(Launch::Spawned(pid)) => children.push(pid),
            Ok(Launch::Builtin(Flow::Exit)) => flow = Flow::Exit,
            Ok(Launch::Builtin(Flow::Continue)) => {}
            Err(err) => state.report(&err),
        }
    }

    trace!(count = children.len(), "PAR: waiting for children");
    wait_all(&children);

    Ok(flow)
}

fn run_redirected(state: &mut State, redirection: &Redirection) -> Result<Flow, ShellError> {
    let path = state.working_dir().join(&redirection.target);
    let file = state
        .redirect
        .open(&path)
        .map_err(|source| ShellError::Redirect {
            path: path.clone(),
            source,
        })?;

    trace!(?path, mode = ?state.redirect, "REDIRECT: opened target");

    match state.launch(&redirection.command, Wiring::stdout(file))? {
        Launch::Spawned(pid) => {
            wait_for(pid)?;
            Ok(Flow::Continue)
        }
        Launch::Builtin(flow) => Ok(flow),
    }
}

fn run_piped(state: &mut State, stages: &[Command]) -> Result<Flow, ShellError> {
    let stages = stages.iter().filter(|c| !c.is_empty()).collect::<Vec<_>>();
    let mut children = Vec::with_capacity(stages.len());
    let mut flow = Flow::Continue;

    let built = spawn_stages(state, &stages, &mut children, &mut flow);

    if built.is_err() {
        for &pid in &children {
            // already gone is fine, it is reaped below either way
            let _ = kill(pid, Signal::SIGTERM);
        }
    }

    trace!(count = children.len(), "PIPE: waiting for stages");
    wait_all(&children);

    built.map_err(|err| ShellError::BrokenPipeline(Box::new(err)))?;

    Ok(flow)
}

/// Spawns every stage, connecting each one's stdout to the next one's stdin.
/// Only pipe and fork failures are returned; anything else is reported and
/// the stage is skipped.
fn spawn_stages(
    state: &mut State,
    stages: &[&Command],
    children: &mut Vec<Pid>,
    flow: &mut Flow,
) -> Result<(), ShellError> {
    let mut upstream: Option<OwnedFd> = None;

    for (i, stage) in stages.iter().enumerate() {
        let (downstream, stdout) = if i + 1 < stages.len() {
            let (read, write) = cloexec_pipe().map_err(ShellError::Pipe)?;
            (Some(read), Some(write))
        } else {
            (None, None)
        };

        trace!(%stage, index = i, "PIPE: launching");

        let wiring = Wiring {
            stdin: upstream.take(),
            stdout,
        };

        match state.launch(stage, wiring) {
            Ok(Launch::Spawned(pid)) => children.push(pid),
            Ok(Launch::Builtin(Flow::Exit)) => *flow = Flow::Exit,
            Ok(Launch::Builtin(Flow::Continue)) => {}
            Err(err @ ShellError::Fork(_)) => return Err(err),
            Err(err) => state.report(&err),
        }

        upstream = downstream;
    }

    Ok(())
}
