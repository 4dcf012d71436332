//! Error types surfaced at the edges of the engine.
//!
//! The core evaluation engine (unifier, renamer, resolver) never returns
//! an `Err`: unification failure is an ordinary `None`, and the resolver
//! reports no errors to its consumer, only an answer stream that may be
//! empty. `MonologError` covers everything outside that boundary: parsing,
//! program loading, and the small set of conditions the REPL must surface
//! to a user.

use thiserror::Error;

/// Errors that can reach a caller of the parser, program loader, or REPL.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MonologError {
    /// Raised by the lexer/parser. Never reaches the resolution core.
    #[error("parse error: {0}")]
    ParseError(String),

    /// A top-level query goal that is a bare variable rather than a
    /// callable compound. The resolver itself never constructs this
    /// variant (it just treats such a goal as failing); the REPL
    /// constructs it before even attempting resolution, so it can give a
    /// more specific answer than a flat "false".
    #[error("unbound goal: {0} is not a callable goal")]
    UnboundGoal(String),
}

pub type MonologResult<T> = Result<T, MonologError>;
