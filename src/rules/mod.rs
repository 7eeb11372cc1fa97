//! # Rules
//!
//! Compilation of textual predicate expressions into callable rules.
//!
//! A rule body is a small expression - `return val % 6 == 0;` - over
//! named parameters. Compilation tokenizes and parses the body into an
//! AST once; calls bind arguments positionally to the parameter names
//! and walk the AST. There is no caching: compiling the same source
//! twice yields two independent rules.
//!
//! Errors come in two kinds, surfaced directly to the caller:
//! - `CompileError` - malformed source, detected at compile time
//! - `EvalError` - execution fault (unbound name, arity or type
//!   mismatch), detected at call time

mod compile;
mod parser;
mod token;

pub use compile::{compile, CompiledRule};

use thiserror::Error;

/// Malformed rule source, detected at compile time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// A character the tokenizer cannot place
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    /// A string literal with no closing quote
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A numeric literal that does not parse
    #[error("malformed number '{0}'")]
    MalformedNumber(String),

    /// A token where the grammar expects something else
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    /// Source ended mid-expression
    #[error("unexpected end of rule body")]
    UnexpectedEnd,

    /// Text left over after the expression
    #[error("trailing input after expression: '{0}'")]
    TrailingInput(String),
}

/// Execution fault inside a compiled rule body, detected at call time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// An identifier with no bound parameter
    #[error("unbound identifier '{0}'")]
    UnboundIdentifier(String),

    /// Wrong number of call arguments
    #[error("rule takes {expected} argument(s), got {got}")]
    ArityMismatch {
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// An operator applied to shapes it does not support
    #[error("cannot apply '{op}' to {lhs} and {rhs}")]
    TypeMismatch {
        /// Operator text
        op: &'static str,
        /// Left operand shape
        lhs: &'static str,
        /// Right operand shape
        rhs: &'static str,
    },

    /// Division or remainder by zero
    #[error("division by zero")]
    DivisionByZero,

    /// A property access the value does not support
    #[error("{shape} value has no property '{name}'")]
    NoSuchProperty {
        /// Shape of the value accessed
        shape: &'static str,
        /// Property name
        name: String,
    },
}
