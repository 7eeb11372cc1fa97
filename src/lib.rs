//! # arrmath - numeric primitives and rule dispatch
//!
//! Small numeric/array primitives plus a rule-dispatch engine for
//! ad-hoc branching built from textual predicate expressions.
//!
//! ## Philosophy
//!
//! - **Pure core** - every call is synchronous, deterministic, and
//!   allocates only call-local scratch memory
//! - **Shapes over inspection** - heterogeneous results are a tagged
//!   `Value` sum type with one resolution rule per variant
//! - **Errors surface, never coerce** - malformed rules, evaluation
//!   faults, and domain violations all propagate to the direct caller
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       arrmath                                │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  CORE (shared data types)                                    │
//! │    Value, DomainError                                        │
//! │                                                              │
//! │  PRIMES (independent of everything else)                     │
//! │    primes_to - Sieve of Eratosthenes                         │
//! │    prime_factors - trial division                            │
//! │                                                              │
//! │  RULES (predicate compilation)                               │
//! │    compile - source text + parameter names -> CompiledRule   │
//! │                                                              │
//! │  ENGINE (ordered dispatch, built on RULES)                   │
//! │    Dispatcher - first truthy predicate selects the result    │
//! │    CaseMatcher - structural submapping match                 │
//! │                                                              │
//! │  ARRAY (single-pass peer utilities)                          │
//! │    to_int, int_to_array, digits, pow10, int_div,             │
//! │    list_below, first_multiple_above, flat_sum, product,      │
//! │    lengths_so_far                                            │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use arrmath::{primes_to, Dispatcher, Value};
//!
//! // Primes up to a bound
//! let primes = primes_to(100);
//! assert_eq!(primes.len(), 25);
//!
//! // First-match-wins rule dispatch
//! let dispatcher = Dispatcher::new(
//!     &[
//!         "return val % 7 == 0;",
//!         "return val % 5 == 0;",
//!         "return val % 6 == 0;",
//!         "return val % 2 == 0;",
//!     ],
//!     vec![
//!         Value::from("divides by 7"),
//!         Value::from("divides by 5"),
//!         Value::from("divides by 6"),
//!         Value::from("divides by 2"),
//!     ],
//! ).unwrap();
//!
//! // 12 divides by 6 and 2; the earlier branch wins.
//! assert_eq!(dispatcher.dispatch(&Value::Int(12)).unwrap(), Value::from("divides by 6"));
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Shared data types - the `Value` sum type and domain errors
pub mod core;

/// Prime generation (sieve) and factorization (trial division)
pub mod primes;

/// Predicate compilation: source text into callable rules
pub mod rules;

/// Ordered dispatch: `Dispatcher` and `CaseMatcher`
pub mod engine;

/// Array and digit utilities
pub mod array;

// ============================================================================
// RE-EXPORTS (public API)
// ============================================================================

// Core types
pub use crate::core::{DomainError, Value};

// Primes
pub use crate::primes::{prime_factors, primes_to};

// Rules
pub use crate::rules::{compile, CompileError, CompiledRule, EvalError};

// Engine
pub use crate::engine::{CaseMatcher, DispatchError, Dispatcher};

// Array utilities
pub use crate::array::{
    digits, even, first_multiple_above, flat_sum, int_div, int_to_array, lengths_so_far,
    list_below, odd, pow10, product, to_int,
};
