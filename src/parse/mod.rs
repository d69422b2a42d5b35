use logos::Logos;
use thiserror::Error;

use self::token::{LexerError, Token};

pub mod token;

#[derive(Debug, Error)]
pub enum CommandParseError {
    #[error("failed to tokenize command")]
    Lexer(Vec<LexerError>),
}

/// Splits a line into tokens. An empty line yields an empty sequence.
pub fn tokenize(line: &str) -> Result<Vec<Token<'_>>, CommandParseError> {
    let tokens = Token::lexer(line).collect::<Vec<_>>();

    if tokens.iter().any(|r| r.is_err()) {
        return Err(CommandParseError::Lexer(
            tokens.into_iter().filter_map(|r| r.err()).collect(),
        ));
    }

    Ok(tokens.into_iter().filter_map(|r| r.ok()).collect())
}
