//! # Dispatcher
//!
//! Ordered predicate dispatch: the value is tested against each
//! compiled predicate in turn, and the first truthy match selects the
//! aligned result. Later predicates that would also match are never
//! evaluated.
//!
//! The matched result resolves by its shape:
//! - mapping: look up the value's key form
//! - sequence: use the value as a position
//! - absent: fall back to the input value itself
//! - anything else (including explicit null): returned literally
//!
//! When nothing matches, `dispatch` returns `DispatchError::NoMatch`
//! rather than a sentinel value, so callers cannot confuse "no branch"
//! with a branch that legitimately produced null.

use super::DispatchError;
use crate::core::Value;
use crate::rules::{compile, CompiledRule};

/// Parameter name every predicate source is compiled against.
const VALUE_PARAM: &str = "val";

/// An ordered table of compiled predicates and their aligned results.
///
/// Predicate sources reference the dispatched value as `val`. All
/// sources are compiled up front, so malformed rules fail at
/// construction rather than mid-dispatch.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    rules: Vec<CompiledRule>,
    results: Vec<Value>,
}

impl Dispatcher {
    /// Build a dispatcher from predicate sources and aligned results.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrmath::{Dispatcher, Value};
    ///
    /// let dispatcher = Dispatcher::new(
    ///     &["return val % 2 == 0;", "return val % 2 == 1;"],
    ///     vec![Value::from("even"), Value::from("odd")],
    /// ).unwrap();
    ///
    /// assert_eq!(dispatcher.dispatch(&Value::Int(3)).unwrap(), Value::from("odd"));
    /// ```
    pub fn new(predicates: &[&str], results: Vec<Value>) -> Result<Self, DispatchError> {
        if predicates.len() != results.len() {
            return Err(DispatchError::LengthMismatch {
                predicates: predicates.len(),
                results: results.len(),
            });
        }

        let rules = predicates
            .iter()
            .enumerate()
            .map(|(index, source)| {
                compile(source, &[VALUE_PARAM])
                    .map_err(|source| DispatchError::BadPredicate { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules, results })
    }

    /// Number of predicate/result pairs.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate predicates in order and resolve the first match.
    pub fn dispatch(&self, value: &Value) -> Result<Value, DispatchError> {
        for (rule, result) in self.rules.iter().zip(&self.results) {
            let outcome = rule.call(std::slice::from_ref(value))?;
            if outcome.is_truthy() {
                return resolve(result, value);
            }
        }
        Err(DispatchError::NoMatch)
    }
}

/// Resolve a matched result by its shape.
fn resolve(result: &Value, value: &Value) -> Result<Value, DispatchError> {
    match result {
        Value::Map(entries) => {
            let key = value.key_string().ok_or_else(|| {
                DispatchError::KeyNotFound(value.to_string())
            })?;
            entries
                .get(&key)
                .cloned()
                .ok_or(DispatchError::KeyNotFound(key))
        }
        Value::Seq(items) => {
            let index = value
                .as_index()
                .filter(|&i| i >= 0 && (i as usize) < items.len())
                .ok_or_else(|| DispatchError::BadSelector {
                    value: value.to_string(),
                    len: items.len(),
                })?;
            Ok(items[index as usize].clone())
        }
        Value::Absent => Ok(value.clone()),
        other => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIVISIBILITY: [&str; 4] = [
        "return val % 7 == 0;",
        "return val % 5 == 0;",
        "return val % 6 == 0;",
        "return val % 2 == 0;",
    ];

    #[test]
    fn test_first_match_wins() {
        // 12 divides by both 6 and 2, but the 6-branch comes first.
        let dispatcher = Dispatcher::new(
            &DIVISIBILITY,
            vec!["7".into(), "5".into(), "6".into(), "2".into()],
        )
        .unwrap();

        assert_eq!(dispatcher.dispatch(&Value::Int(12)).unwrap(), Value::from("6"));
        assert_eq!(dispatcher.dispatch(&Value::Int(35)).unwrap(), Value::from("7"));
        assert_eq!(dispatcher.dispatch(&Value::Int(4)).unwrap(), Value::from("2"));
    }

    #[test]
    fn test_mapping_results_key_on_the_value() {
        let by_word = |text: &str| {
            Value::map([
                ("apple", Value::from(format!("\"apple\" has {} letters", text))),
                ("orange", Value::from(format!("\"orange\" has {} letters", text))),
            ])
        };
        let dispatcher = Dispatcher::new(
            &[
                "return val.length == 4;",
                "return val.length == 5;",
                "return val.length == 6;",
            ],
            vec![by_word("4"), by_word("5"), by_word("6")],
        )
        .unwrap();

        assert_eq!(
            dispatcher.dispatch(&Value::from("apple")).unwrap(),
            Value::from("\"apple\" has 5 letters")
        );
        assert_eq!(
            dispatcher.dispatch(&Value::from("orange")).unwrap(),
            Value::from("\"orange\" has 6 letters")
        );
    }

    const SELECTORS: [&str; 3] = ["return val == 2;", "return val == 3;", "return val == 1;"];

    fn seq_of(words: [&str; 3]) -> Value {
        Value::seq(words.map(Value::from))
    }

    #[test]
    fn test_sequence_results_select_by_position() {
        let dispatcher = Dispatcher::new(
            &SELECTORS,
            vec![
                seq_of(["x", "x", "two"]),
                seq_of(["x", "x", "x"]),
                seq_of(["x", "one", "x"]),
            ],
        )
        .unwrap();

        assert_eq!(dispatcher.dispatch(&Value::Int(1)).unwrap(), Value::from("one"));
        assert_eq!(dispatcher.dispatch(&Value::Int(2)).unwrap(), Value::from("two"));
    }

    #[test]
    fn test_null_results_are_returned_literally() {
        let dispatcher = Dispatcher::new(
            &SELECTORS,
            vec![Value::Null, seq_of(["x", "x", "x"]), seq_of(["x", "one", "x"])],
        )
        .unwrap();

        assert_eq!(dispatcher.dispatch(&Value::Int(1)).unwrap(), Value::from("one"));
        assert_eq!(dispatcher.dispatch(&Value::Int(2)).unwrap(), Value::Null);
    }

    #[test]
    fn test_boolean_results_are_returned_literally() {
        let dispatcher = Dispatcher::new(
            &SELECTORS,
            vec![Value::Bool(true), seq_of(["x", "x", "x"]), Value::Bool(false)],
        )
        .unwrap();

        assert_eq!(dispatcher.dispatch(&Value::Int(1)).unwrap(), Value::Bool(false));
        assert_eq!(dispatcher.dispatch(&Value::Int(2)).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_scalar_and_string_results() {
        let dispatcher = Dispatcher::new(
            &SELECTORS,
            vec![Value::Int(200), seq_of(["x", "x", "x"]), Value::from("100")],
        )
        .unwrap();

        assert_eq!(dispatcher.dispatch(&Value::Int(1)).unwrap(), Value::from("100"));
        assert_eq!(dispatcher.dispatch(&Value::Int(2)).unwrap(), Value::Int(200));
    }

    #[test]
    fn test_absent_result_falls_back_to_the_input() {
        let dispatcher = Dispatcher::new(
            &SELECTORS,
            vec![Value::Int(200), seq_of(["x", "x", "x"]), Value::Absent],
        )
        .unwrap();

        assert_eq!(dispatcher.dispatch(&Value::Int(1)).unwrap(), Value::Int(1));
        assert_eq!(dispatcher.dispatch(&Value::Int(2)).unwrap(), Value::Int(200));
    }

    #[test]
    fn test_no_match_is_an_error() {
        let dispatcher =
            Dispatcher::new(&["return val % 2 == 0;"], vec![Value::from("even")]).unwrap();

        assert_eq!(
            dispatcher.dispatch(&Value::Int(3)),
            Err(DispatchError::NoMatch)
        );
    }

    #[test]
    fn test_misaligned_table_is_rejected() {
        let result = Dispatcher::new(&["return true;"], vec![]);
        assert_eq!(
            result.unwrap_err(),
            DispatchError::LengthMismatch { predicates: 1, results: 0 }
        );
    }

    #[test]
    fn test_malformed_predicate_fails_at_construction() {
        let result = Dispatcher::new(
            &["return val % 2 == 0;", "return val %%;"],
            vec![Value::Int(0), Value::Int(1)],
        );
        assert!(matches!(
            result,
            Err(DispatchError::BadPredicate { index: 1, .. })
        ));
    }

    #[test]
    fn test_predicate_fault_propagates() {
        let dispatcher =
            Dispatcher::new(&["return unbound == 1;"], vec![Value::Int(0)]).unwrap();
        assert!(matches!(
            dispatcher.dispatch(&Value::Int(1)),
            Err(DispatchError::Eval(_))
        ));
    }

    #[test]
    fn test_out_of_range_selector_is_an_error() {
        let dispatcher = Dispatcher::new(
            &["return true;"],
            vec![Value::seq([Value::from("only")])],
        )
        .unwrap();

        assert!(matches!(
            dispatcher.dispatch(&Value::Int(5)),
            Err(DispatchError::BadSelector { len: 1, .. })
        ));
    }

    #[test]
    fn test_missing_map_key_is_an_error() {
        let dispatcher = Dispatcher::new(
            &["return true;"],
            vec![Value::map([("apple", Value::Int(1))])],
        )
        .unwrap();

        assert_eq!(
            dispatcher.dispatch(&Value::from("pear")),
            Err(DispatchError::KeyNotFound("pear".into()))
        );
    }
}
