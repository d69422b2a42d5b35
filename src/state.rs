use std::{
    error::Error,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use itertools::Itertools;

use crate::{
    builtins::{BuiltinCommand, BuiltinCommands},
    cmd::{execution_plan::ExecutionPlan, split::Command},
    config::{Config, RedirectMode},
    error::{ShellError, INCORRECT_COMMAND},
    input,
    process::launcher::{Launcher, Wiring},
};

/// Whether the prompt loop keeps going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Outcome of handing one command to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    Spawned(nix::unistd::Pid),
    Builtin(Flow),
}

/// Where the working directory actually lives.
pub trait Filesystem {
    fn current_dir(&self) -> io::Result<PathBuf>;
    /// Changes directory and returns the new absolute working directory.
    fn change_dir(&mut self, path: &Path) -> io::Result<PathBuf>;
    fn home_dir(&self) -> Option<PathBuf>;
}

/// The process's own working directory.
#[derive(Debug, Default)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn change_dir(&mut self, path: &Path) -> io::Result<PathBuf> {
        std::env::set_current_dir(path)?;
        std::env::current_dir()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        std::env::var_os("HOME").map(PathBuf::from)
    }
}

pub struct State {
    pub prompt_suffix: String,
    pub redirect: RedirectMode,
    pub launcher: Launcher,
    working_dir: PathBuf,
    fs: Box<dyn Filesystem>,
}

impl State {
    pub fn new(config: &Config, fs: impl Filesystem + 'static) -> Result<Self, ShellError> {
        Ok(Self {
            prompt_suffix: config.prompt_suffix.clone(),
            redirect: config.redirect,
            launcher: Launcher::new(config.child_signals),
            working_dir: fs.current_dir()?,
            fs: Box::new(fs),
        })
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn prompt(&self) -> String {
        format!("{}{}", self.working_dir.display(), self.prompt_suffix)
    }

    pub fn home_dir(&self) -> Option<PathBuf> {
        self.fs.home_dir()
    }

    /// Leaves the working directory untouched when the change fails.
    pub fn change_dir(&mut self, path: &Path) -> Result<(), ShellError> {
        let dir = self
            .fs
            .change_dir(path)
            .map_err(|source| ShellError::ChangeDir {
                path: path.to_owned(),
                source,
            })?;

        trace!(?dir, "changed directory");
        self.working_dir = dir;

        Ok(())
    }

    /// Runs built-ins in the shell and forks everything else.
    pub fn launch(&mut self, command: &Command, wiring: Wiring) -> Result<Launch, ShellError> {
        if let Some(builtin) = command.program().and_then(BuiltinCommands::from_name) {
            drop(wiring);
            return builtin.execute(self, command.args()).map(Launch::Builtin);
        }

        self.launcher
            .spawn(command, &self.working_dir, wiring)
            .map(Launch::Spawned)
    }

    pub fn report(&self, err: &ShellError) {
        let chain = std::iter::successors(Some(err as &(dyn Error + 'static)), |e| (*e).source())
            .join(": ");
        warn!("{chain}");
        eprintln!("{INCORRECT_COMMAND}");
    }

    pub fn execute(&mut self, line: &str) -> Result<Flow, ShellError> {
        let plan: ExecutionPlan = line.parse()?;

        trace!(?plan, "execution plan");

        plan.execute(self)
    }

    /// The prompt loop. Returns on `exit`, end of input, or a fatal error.
    pub fn run<R: BufRead, W: Write>(&mut self, mut reader: R, mut out: W) -> Result<(), ShellError> {
        loop {
            write!(out, "{}", self.prompt())?;
            out.flush()?;

            let Some(line) = input::read_line(&mut reader)? else {
                trace!("end of input");
                writeln!(out)?;
                break;
            };

            match self.execute(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => {
                    writeln!(out, "Exiting shell...")?;
                    break;
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => self.report(&err),
            }
        }

        out.flush()?;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashSet;

    use super::*;

    /// Directory tree that only exists in memory.
    #[derive(Debug, Clone)]
    pub struct MemoryFilesystem {
        pub cwd: PathBuf,
        pub dirs: HashSet<PathBuf>,
        pub home: Option<PathBuf>,
    }

    impl MemoryFilesystem {
        pub fn new(cwd: &str, dirs: &[&str]) -> Self {
            Self {
                cwd: PathBuf::from(cwd),
                dirs: dirs.iter().map(PathBuf::from).chain([PathBuf::from(cwd)]).collect(),
                home: None,
            }
        }
    }

    impl Filesystem for MemoryFilesystem {
        fn current_dir(&self) -> io::Result<PathBuf> {
            Ok(self.cwd.clone())
        }

        fn change_dir(&mut self, path: &Path) -> io::Result<PathBuf> {
            let target = self.cwd.join(path);
            if !self.dirs.contains(&target) {
                return Err(io::ErrorKind::NotFound.into());
            }
            self.cwd = target.clone();
            Ok(target)
        }

        fn home_dir(&self) -> Option<PathBuf> {
            self.home.clone()
        }
    }

    pub fn state(fs: MemoryFilesystem) -> State {
        State::new(&Config::default(), fs).unwrap()
    }

    #[test]
    fn prompt_shows_working_dir() {
        let state = state(MemoryFilesystem::new("/home/user", &[]));
        assert_eq!(state.prompt(), "/home/user$");
    }

    #[test]
    fn prompt_suffix_comes_from_config() {
        let config = Config {
            prompt_suffix: " % ".into(),
            ..Config::default()
        };
        let state = State::new(&config, MemoryFilesystem::new("/srv", &[])).unwrap();
        assert_eq!(state.prompt(), "/srv % ");
    }

    #[test]
    fn failed_change_keeps_directory() {
        let mut state = state(MemoryFilesystem::new("/home/user", &["/tmp"]));
        assert!(matches!(
            state.change_dir(Path::new("/nope")),
            Err(ShellError::ChangeDir { .. })
        ));
        assert_eq!(state.working_dir(), Path::new("/home/user"));
    }

    #[test]
    fn relative_change_resolves_against_working_dir() {
        let mut state = state(MemoryFilesystem::new("/home/user", &["/home/user/src"]));
        state.change_dir(Path::new("src")).unwrap();
        assert_eq!(state.working_dir(), Path::new("/home/user/src"));
    }

    #[test]
    fn exit_line_ends_the_loop() {
        let mut state = state(MemoryFilesystem::new("/w", &[]));
        let mut out = Vec::new();
        state
            .run(&b"\n##\nexit now please\necho never\n"[..], &mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "/w$/w$/w$Exiting shell...\n"
        );
    }

    #[test]
    fn end_of_input_ends_the_loop() {
        let mut state = state(MemoryFilesystem::new("/w", &[]));
        let mut out = Vec::new();
        state.run(&b""[..], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "/w$\n");
    }

    #[test]
    fn loop_survives_user_errors() {
        let mut state = state(MemoryFilesystem::new("/w", &["/w/sub"]));
        let mut out = Vec::new();
        state
            .run(&b"cd /missing\necho hi > \"\"\ncd sub\n"[..], &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "/w$/w$/w$/w/sub$\n");
    }
}
