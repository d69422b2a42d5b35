use strum::{Display, EnumIter};

use crate::parse::token::{Symbol, Token};

/// The execution shape a line resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Topology {
    Exit,
    Parallel,
    Sequential,
    Redirected,
    Piped,
    Single,
}

/// Symbol checks in precedence order; the first symbol present wins.
const PRECEDENCE: [(Symbol, Topology); 4] = [
    (Symbol::Parallel, Topology::Parallel),
    (Symbol::Sequential, Topology::Sequential),
    (Symbol::Redirect, Topology::Redirected),
    (Symbol::Pipe, Topology::Piped),
];

pub fn classify(tokens: &[Token<'_>]) -> Topology {
    if tokens.first() == Some(&Token::Word("exit")) {
        return Topology::Exit;
    }

    PRECEDENCE
        .iter()
        .find(|(symbol, _)| tokens.iter().any(|t| t.symbol() == Some(*symbol)))
        .map(|(_, topology)| *topology)
        .unwrap_or(Topology::Single)
}

impl Topology {
    /// The symbol a line of this shape is split on, if any.
    pub fn separator(&self) -> Option<Symbol> {
        PRECEDENCE
            .iter()
            .find(|(_, topology)| topology == self)
            .map(|(symbol, _)| *symbol)
    }
}
