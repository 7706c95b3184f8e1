//! Error types for the engine and its submodules.
//!
//! Each submodule gets its own focused error enum; they convert into
//! [`EngineError`] via `#[from]` so callers only ever have to match on one
//! type at the public boundary.

use thiserror::Error;

/// Errors raised while turning query text into a token stream.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TokenizeError {
    #[error("unrecognized character {ch:?} at byte offset {offset}")]
    UnrecognizedCharacter { ch: char, offset: usize },
    #[error("unterminated string literal starting at byte offset {offset}")]
    UnterminatedString { offset: usize },
}

/// Errors raised while turning a token stream into an AST.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SyntaxError {
    #[error("unexpected token {found}, expected {expected}")]
    UnexpectedToken { found: String, expected: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },
    #[error("a query must start with MATCH or CREATE")]
    NoLeadingClause,
}

/// Top-level error type returned by [`crate::query`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("tokenization error: {0}")]
    Tokenize(#[from] TokenizeError),

    #[error("parse error: {0}")]
    Parse(#[from] SyntaxError),

    #[error("RETURN references undefined designation `{designation}`")]
    Binding { designation: String },

    #[error("graph adapter error: {0}")]
    Adapter(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("graph vertex universe size {size} exceeds configured max_domain_size {max}")]
    DomainTooLarge { size: usize, max: usize },

    #[error("query has no RETURN clause")]
    MissingReturnClause,
}

impl EngineError {
    pub fn adapter<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        EngineError::Adapter(Box::new(err))
    }
}
