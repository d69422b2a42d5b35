#![allow(dead_code)]

use std::{
    io,
    path::{Path, PathBuf},
};

use topsh::{state::Filesystem, Config, State};

/// Pretends the working directory is `dir` without touching the test
/// process's real one, which other tests share.
pub struct FixedDir(pub PathBuf);

impl Filesystem for FixedDir {
    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.0.clone())
    }

    fn change_dir(&mut self, path: &Path) -> io::Result<PathBuf> {
        let target = self.0.join(path);
        if !target.is_dir() {
            return Err(io::ErrorKind::NotFound.into());
        }
        self.0 = target.clone();
        Ok(target)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        None
    }
}

pub fn shell(dir: &Path) -> State {
    shell_with(dir, Config::default())
}

pub fn shell_with(dir: &Path, config: Config) -> State {
    State::new(&config, FixedDir(dir.to_owned())).expect("state")
}

pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_default()
}
