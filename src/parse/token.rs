use logos::Logos;
use strum::Display;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Default, Error)]
pub enum LexerError {
    #[default]
    #[error("unknown token")]
    UnknownToken,
}

/// Control symbols that decide how a line is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Symbol {
    #[strum(serialize = "&&")]
    Parallel,
    #[strum(serialize = "##")]
    Sequential,
    #[strum(serialize = ">")]
    Redirect,
    #[strum(serialize = "|")]
    Pipe,
}

#[derive(Debug, Clone, PartialEq, Eq, Logos)]
#[logos(skip r"[ \t\n\f\r]+", error = LexerError)]
pub enum Token<'a> {
    #[token("&&")]
    And,
    #[token("##")]
    Then,
    #[token(">")]
    Write,
    #[token("|")]
    Pipe,
    // the only quoting understood: an explicit empty argument
    #[token("\"\"")]
    #[token("''")]
    Empty,
    #[regex(r"[^ \t\n\f\r]+", |lex| lex.slice())]
    Word(&'a str),
}

impl<'a> Token<'a> {
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Self::And => Some(Symbol::Parallel),
            Self::Then => Some(Symbol::Sequential),
            Self::Write => Some(Symbol::Redirect),
            Self::Pipe => Some(Symbol::Pipe),
            Self::Empty | Self::Word(_) => None,
        }
    }

    /// The text this token contributes to an argument list.
    pub fn text(&self) -> String {
        match self {
            Self::Word(word) => (*word).to_owned(),
            Self::Empty => String::new(),
            symbol => symbol
                .symbol()
                .map(|s| s.to_string())
                .unwrap_or_default(),
        }
    }
}
