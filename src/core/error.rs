//! # Domain Errors
//!
//! Invalid numeric domain inputs, shared by the prime and array
//! utilities. These fail fast rather than silently coercing.

use thiserror::Error;

/// An input outside a function's numeric domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Zero has no prime factorization
    #[error("zero has no prime factorization")]
    FactorOfZero,

    /// Integer division by zero
    #[error("division by zero")]
    DivisionByZero,

    /// A multiple search needs a nonzero step
    #[error("multiple step must be nonzero")]
    ZeroStep,
}
