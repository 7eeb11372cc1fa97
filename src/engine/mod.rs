//! # Engine
//!
//! Ordered rule dispatch over compiled predicates and structural
//! case matching.
//!
//! - `Dispatcher` - first-match-wins predicate dispatch with
//!   shape-driven result resolution
//! - `CaseMatcher` - first-match-wins structural matching of a value
//!   mapping against pattern mappings

mod cases;
mod dispatch;

pub use cases::CaseMatcher;
pub use dispatch::Dispatcher;

use crate::rules::{CompileError, EvalError};
use thiserror::Error;

/// A fault while building or running a dispatch table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// Predicates and results must be aligned
    #[error("{predicates} predicate(s) but {results} result(s)")]
    LengthMismatch {
        /// Number of predicates or patterns
        predicates: usize,
        /// Number of results
        results: usize,
    },

    /// No predicate or pattern matched the value
    #[error("no predicate matched the value")]
    NoMatch,

    /// A predicate source failed to compile
    #[error("predicate {index} failed to compile: {source}")]
    BadPredicate {
        /// Position of the offending predicate
        index: usize,
        /// Underlying compile error
        source: CompileError,
    },

    /// A predicate faulted while evaluating
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// A mapping result had no entry for the value's key
    #[error("mapping result has no entry for key '{0}'")]
    KeyNotFound(String),

    /// A sequence result cannot be indexed by the value
    #[error("value {value} cannot select from a sequence of length {len}")]
    BadSelector {
        /// Rendered value used as selector
        value: String,
        /// Length of the sequence result
        len: usize,
    },
}
