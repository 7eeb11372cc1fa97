//! # Case Matcher
//!
//! Structural matching of a value mapping against ordered pattern
//! mappings. No compiled predicates here, only equality.
//!
//! A pattern matches when every key of the *value* is present in the
//! pattern with a strictly equal value - the value must be a
//! submapping of the pattern. Extra pattern keys never disqualify a
//! match. The direction matters: against `{a: 12}`, the pattern
//! `{c: 0, a: 12}` matches while `{b: 12}` and `{a: "12"}` do not.

use std::collections::BTreeMap;

use super::DispatchError;
use crate::core::Value;

/// An ordered table of pattern mappings and their aligned results.
#[derive(Debug, Clone)]
pub struct CaseMatcher {
    patterns: Vec<BTreeMap<String, Value>>,
    results: Vec<Value>,
}

impl CaseMatcher {
    /// Build a case matcher from patterns and aligned results.
    pub fn new(
        patterns: Vec<BTreeMap<String, Value>>,
        results: Vec<Value>,
    ) -> Result<Self, DispatchError> {
        if patterns.len() != results.len() {
            return Err(DispatchError::LengthMismatch {
                predicates: patterns.len(),
                results: results.len(),
            });
        }
        Ok(Self { patterns, results })
    }

    /// Number of pattern/result pairs.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Return the result aligned with the first matching pattern.
    ///
    /// The result is returned as-is; unlike the dispatcher there is no
    /// shape-driven resolution. No match is an error.
    pub fn match_value(&self, value: &BTreeMap<String, Value>) -> Result<Value, DispatchError> {
        for (pattern, result) in self.patterns.iter().zip(&self.results) {
            if matches(pattern, value) {
                return Ok(result.clone());
            }
        }
        Err(DispatchError::NoMatch)
    }
}

/// True when every value entry appears in the pattern, strictly equal.
fn matches(pattern: &BTreeMap<String, Value>, value: &BTreeMap<String, Value>) -> bool {
    value
        .iter()
        .all(|(key, v)| pattern.get(key).is_some_and(|p| p == v))
}
