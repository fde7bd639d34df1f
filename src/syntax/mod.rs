//! The syntax tree this crate consumes.
//!
//! Parsing Hime grammar text is the job of an upstream collaborator; this
//! module only fixes the shape of its output ([`Root`] and friends) and the
//! failure value it reports ([`ParseError`]).

mod ast;
mod literals;

pub use ast::{
    ContextBlock, GrammarNode, LexExpr, OptionNode, PlainRule, Quantifier, Root, RuleDef,
    RuleExpr, TemplateRule, TerminalDef, TerminalEntry, Token, TreeAction,
};
pub use literals::{unescape, unquote};

use text_size::TextRange;
use thiserror::Error;

/// Why the upstream parser could not produce a [`Root`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("syntax error at {range:?}: {message}")]
    Syntax { message: String, range: TextRange },
    #[error("failed to read grammar source: {0}")]
    Io(String),
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::Io(err.to_string())
    }
}
