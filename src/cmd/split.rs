use std::ffi::{CString, NulError};

use itertools::Itertools;

use crate::parse::token::{Symbol, Token};

/// One program invocation: the program name followed by its arguments.
///
/// An empty command stands for a no-op and is skipped by every orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    argv: Vec<String>,
}

impl Command {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a command from a run of tokens. Symbols other than the one the
    /// line was split on are passed through as literal arguments.
    pub fn from_tokens(tokens: &[Token<'_>]) -> Self {
        Self {
            argv: tokens.iter().map(Token::text).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }

    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or_default()
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub(crate) fn to_cstrings(&self) -> Result<Vec<CString>, NulError> {
        self.argv.iter().map(|arg| CString::new(arg.as_bytes())).collect()
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.argv.iter().join(" "))
    }
}

/// Cuts `tokens` at every `separator`, dropping the separators. The input is
/// only borrowed; each command owns a copy of its arguments.
pub fn split_commands(tokens: &[Token<'_>], separator: Symbol) -> Vec<Command> {
    tokens
        .split(|token| token.symbol() == Some(separator))
        .map(Command::from_tokens)
        .collect()
}
