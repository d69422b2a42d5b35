use std::{path::PathBuf, str::FromStr};

use thiserror::Error;

use super::{
    split::{split_commands, Command},
    topology::{classify, Topology},
};
use crate::parse::{
    token::{Symbol, Token},
    tokenize, CommandParseError,
};

/// What a single input line asks the shell to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionPlan {
    Exit,
    Parallel(Vec<Command>),
    Sequential(Vec<Command>),
    Redirected(Redirection),
    Piped(Vec<Command>),
    Single(Command),
    NoOp,
}

#[derive(Debug, Error)]
pub enum CommandSyntaxError {
    #[error(transparent)]
    Parse(#[from] CommandParseError),
    #[error("missing redirection target")]
    MissingTarget,
    #[error("empty redirection target")]
    EmptyTarget,
    #[error("nothing to redirect")]
    MissingCommand,
    #[error("unexpected `{0}` after redirection target")]
    TrailingToken(String),
}

/// `command args... > target`, with `>` and the target already stripped
/// from the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub command: Command,
    pub target: PathBuf,
}

impl Redirection {
    pub fn from_tokens(tokens: &[Token<'_>]) -> Result<Self, CommandSyntaxError> {
        let split = tokens
            .iter()
            .position(|t| t.symbol() == Some(Symbol::Redirect))
            .unwrap_or(tokens.len());

        let command = Command::from_tokens(&tokens[..split]);
        let mut rest = tokens.get(split + 1..).unwrap_or_default().iter();

        let target = match rest.next() {
            None => return Err(CommandSyntaxError::MissingTarget),
            Some(Token::Empty) => return Err(CommandSyntaxError::EmptyTarget),
            Some(Token::Word(word)) => PathBuf::from(word),
            Some(symbol) => return Err(CommandSyntaxError::TrailingToken(symbol.text())),
        };

        if let Some(extra) = rest.next() {
            return Err(CommandSyntaxError::TrailingToken(extra.text()));
        }

        if command.is_empty() {
            return Err(CommandSyntaxError::MissingCommand);
        }

        Ok(Self { command, target })
    }
}

impl ExecutionPlan {
    pub fn from_tokens(tokens: &[Token<'_>]) -> Result<Self, CommandSyntaxError> {
        if tokens.is_empty() {
            return Ok(Self::NoOp);
        }

        let topology = classify(tokens);
        debug!(%topology, "classified line");

        let split = || {
            topology
                .separator()
                .map(|symbol| split_commands(tokens, symbol))
                .unwrap_or_default()
        };

        Ok(match topology {
            Topology::Exit => Self::Exit,
            Topology::Parallel => Self::Parallel(split()),
            Topology::Sequential => Self::Sequential(split()),
            Topology::Redirected => Self::Redirected(Redirection::from_tokens(tokens)?),
            Topology::Piped => Self::Piped(split()),
            Topology::Single => Self::Single(Command::from_tokens(tokens)),
        })
    }
}

impl FromStr for ExecutionPlan {
    type Err = CommandSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tokens(&tokenize(s)?)
    }
}
