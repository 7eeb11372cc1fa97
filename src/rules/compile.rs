//! # Rule Compilation
//!
//! `compile` builds a `CompiledRule` from a body and parameter names;
//! `CompiledRule::call` binds arguments by position and evaluates the
//! AST. A body may yield any value, not just a boolean - the dispatch
//! engine applies truthiness on top.

use super::parser::{parse_body, BinOp, Expr, UnOp};
use super::token::tokenize;
use super::{CompileError, EvalError};
use crate::core::Value;

/// A rule body compiled against an ordered list of parameter names.
///
/// Each call binds exactly as many arguments as there are parameters.
/// Rules are never cached: each `compile` yields an independent rule.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    params: Vec<String>,
    body: Expr,
}

/// Compile a rule body over the given parameter names.
///
/// Malformed source fails here; faults that depend on the arguments
/// (unbound names, shape mismatches) surface from [`CompiledRule::call`].
///
/// # Examples
///
/// ```
/// use arrmath::{compile, Value};
///
/// let rule = compile("return 2*a+2*b;", &["a", "b"]).unwrap();
/// let result = rule.call(&[Value::Int(3), Value::Int(4)]).unwrap();
/// assert_eq!(result, Value::Int(14));
/// ```
pub fn compile(body: &str, params: &[&str]) -> Result<CompiledRule, CompileError> {
    let tokens = tokenize(body)?;
    let body = parse_body(&tokens)?;
    Ok(CompiledRule {
        params: params.iter().map(|p| p.to_string()).collect(),
        body,
    })
}

impl CompiledRule {
    /// The parameter names this rule binds, in order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Evaluate the rule with arguments bound positionally.
    pub fn call(&self, args: &[Value]) -> Result<Value, EvalError> {
        if args.len() != self.params.len() {
            return Err(EvalError::ArityMismatch {
                expected: self.params.len(),
                got: args.len(),
            });
        }
        eval(&self.body, &self.params, args)
    }
}

fn eval(expr: &Expr, params: &[String], args: &[Value]) -> Result<Value, EvalError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Ident(name) => params
            .iter()
            .position(|p| p == name)
            .map(|i| args[i].clone())
            .ok_or_else(|| EvalError::UnboundIdentifier(name.clone())),
        Expr::Property(inner, name) => property(&eval(inner, params, args)?, name),
        Expr::Unary(op, inner) => {
            let value = eval(inner, params, args)?;
            match op {
                UnOp::Not => Ok(Value::Bool(!value.is_truthy())),
                UnOp::Neg => match value {
                    Value::Int(i) => Ok(Value::Int(-i)),
                    Value::Float(f) => Ok(Value::Float(-f)),
                    other => Err(EvalError::TypeMismatch {
                        op: "-",
                        lhs: other.shape(),
                        rhs: "nothing",
                    }),
                },
            }
        }
        Expr::Binary(op, lhs, rhs) => {
            // Short-circuit before the right side is touched.
            if let BinOp::And | BinOp::Or = op {
                let left = eval(lhs, params, args)?.is_truthy();
                let needs_right = match op {
                    BinOp::And => left,
                    _ => !left,
                };
                if !needs_right {
                    return Ok(Value::Bool(left));
                }
                let right = eval(rhs, params, args)?.is_truthy();
                return Ok(Value::Bool(right));
            }

            let left = eval(lhs, params, args)?;
            let right = eval(rhs, params, args)?;
            binary(*op, left, right)
        }
    }
}

fn property(value: &Value, name: &str) -> Result<Value, EvalError> {
    match (value, name) {
        (Value::Str(s), "length" | "len") => Ok(Value::Int(s.chars().count() as i64)),
        (Value::Seq(items), "length" | "len") => Ok(Value::Int(items.len() as i64)),
        (Value::Map(entries), _) => {
            entries
                .get(name)
                .cloned()
                .ok_or_else(|| EvalError::NoSuchProperty {
                    shape: "mapping",
                    name: name.to_string(),
                })
        }
        _ => Err(EvalError::NoSuchProperty {
            shape: value.shape(),
            name: name.to_string(),
        }),
    }
}

fn binary(op: BinOp, left: Value, right: Value) -> Result<Value, EvalError> {
    match op {
        BinOp::Eq => Ok(Value::Bool(left == right)),
        BinOp::Ne => Ok(Value::Bool(left != right)),
        BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => compare(op, &left, &right),
        BinOp::Add => add(left, right),
        BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Rem => arithmetic(op, &left, &right),
        BinOp::And | BinOp::Or => unreachable!("short-circuited in eval"),
    }
}

fn compare(op: BinOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let ordering = match (left, right) {
        (Value::Str(a), Value::Str(b)) => a.cmp(b),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => {
                a.partial_cmp(&b).ok_or(EvalError::TypeMismatch {
                    op: op.symbol(),
                    lhs: left.shape(),
                    rhs: right.shape(),
                })?
            }
            _ => {
                return Err(EvalError::TypeMismatch {
                    op: op.symbol(),
                    lhs: left.shape(),
                    rhs: right.shape(),
                })
            }
        },
    };

    let result = match op {
        BinOp::Lt => ordering.is_lt(),
        BinOp::Le => ordering.is_le(),
        BinOp::Gt => ordering.is_gt(),
        _ => ordering.is_ge(),
    };
    Ok(Value::Bool(result))
}

/// `+` concatenates when either side is a string, otherwise adds.
fn add(left: Value, right: Value) -> Result<Value, EvalError> {
    match (&left, &right) {
        (Value::Str(a), _) => Ok(Value::Str(format!("{}{}", a, right))),
        (_, Value::Str(b)) => Ok(Value::Str(format!("{}{}", left, b))),
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => Ok(Value::Float(a + b)),
            _ => Err(EvalError::TypeMismatch {
                op: "+",
                lhs: left.shape(),
                rhs: right.shape(),
            }),
        },
    }
}

fn arithmetic(op: BinOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    // Int op Int stays Int, except `/` which always yields Float.
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        match op {
            BinOp::Sub => return Ok(Value::Int(a - b)),
            BinOp::Mul => return Ok(Value::Int(a * b)),
            BinOp::Rem => {
                if *b == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                return Ok(Value::Int(a % b));
            }
            _ => {}
        }
    }

    let (a, b) = match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            return Err(EvalError::TypeMismatch {
                op: op.symbol(),
                lhs: left.shape(),
                rhs: right.shape(),
            })
        }
    };

    match op {
        BinOp::Sub => Ok(Value::Float(a - b)),
        BinOp::Mul => Ok(Value::Float(a * b)),
        BinOp::Div => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(Value::Float(a / b))
        }
        _ => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(Value::Float(a % b))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observed_contract() {
        let rule = compile("return 2*a+2*b;", &["a", "b"]).unwrap();
        let result = rule.call(&[Value::Int(3), Value::Int(4)]).unwrap();
        assert_eq!(result, Value::Int(14));
    }

    #[test]
    fn test_single_parameter_body() {
        let rule = compile("return str.length;", &["str"]).unwrap();
        let result = rule.call(&[Value::Str("hello world".into())]).unwrap();
        assert_eq!(result, Value::Int(11));
    }

    #[test]
    fn test_mixed_shapes_across_parameters() {
        let rule =
            compile("return str.length + arr.length + a*b;", &["str", "arr", "a", "b"]).unwrap();
        let args = [
            Value::Str("hello".into()),
            Value::seq([Value::Int(1), Value::Int(1), Value::Int(1)]),
            Value::Int(2),
            Value::Float(2.5),
        ];
        assert_eq!(rule.call(&args).unwrap(), Value::Float(13.0));
    }

    #[test]
    fn test_identity_body_is_callable() {
        let rule = compile("return a;", &["a"]).unwrap();
        assert_eq!(rule.call(&[Value::Int(7)]).unwrap(), Value::Int(7));
    }

    #[test]
    fn test_recompilation_yields_independent_rules() {
        let a = compile("return val;", &["val"]).unwrap();
        let b = compile("return val;", &["val"]).unwrap();
        // Both work on their own; nothing is shared or interned.
        assert_eq!(a.call(&[Value::Int(1)]).unwrap(), Value::Int(1));
        assert_eq!(b.call(&[Value::Int(2)]).unwrap(), Value::Int(2));
    }

    #[test]
    fn test_division_always_floats() {
        let rule = compile("return a / b;", &["a", "b"]).unwrap();
        let result = rule.call(&[Value::Int(1), Value::Int(2)]).unwrap();
        assert_eq!(result, Value::Float(0.5));
    }

    #[test]
    fn test_string_concatenation() {
        let rule = compile("return 'n = ' + n + '!';", &["n"]).unwrap();
        let result = rule.call(&[Value::Int(12)]).unwrap();
        assert_eq!(result, Value::Str("n = 12!".into()));
    }

    #[test]
    fn test_logical_short_circuit() {
        // The right side would fault on an unbound name; && must not
        // reach it when the left side is false.
        let rule = compile("return a && nope;", &["a"]).unwrap();
        assert_eq!(rule.call(&[Value::Bool(false)]).unwrap(), Value::Bool(false));
        assert_eq!(
            rule.call(&[Value::Bool(true)]),
            Err(EvalError::UnboundIdentifier("nope".into()))
        );
    }

    #[test]
    fn test_unbound_identifier_is_a_call_time_fault() {
        // Compiles fine; the fault surfaces on call.
        let rule = compile("return missing % 2 == 0;", &["val"]).unwrap();
        assert_eq!(
            rule.call(&[Value::Int(4)]),
            Err(EvalError::UnboundIdentifier("missing".into()))
        );
    }

    #[test]
    fn test_arity_is_exact() {
        let rule = compile("return a;", &["a"]).unwrap();
        assert_eq!(
            rule.call(&[]),
            Err(EvalError::ArityMismatch { expected: 1, got: 0 })
        );
        assert_eq!(
            rule.call(&[Value::Int(1), Value::Int(2)]),
            Err(EvalError::ArityMismatch { expected: 1, got: 2 })
        );
    }

    #[test]
    fn test_malformed_source_fails_at_compile_time() {
        assert!(compile("return 2*;", &["a"]).is_err());
        assert!(compile("val %% 2", &["val"]).is_err());
        assert!(compile("", &["val"]).is_err());
    }

    #[test]
    fn test_remainder_by_zero() {
        let rule = compile("return a % b;", &["a", "b"]).unwrap();
        assert_eq!(
            rule.call(&[Value::Int(1), Value::Int(0)]),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_strict_equality_across_shapes() {
        let rule = compile("return a == b;", &["a", "b"]).unwrap();
        let eq = |a: Value, b: Value| rule.call(&[a, b]).unwrap();

        assert_eq!(eq(Value::Str("12".into()), Value::Int(12)), Value::Bool(false));
        assert_eq!(eq(Value::Int(12), Value::Float(12.0)), Value::Bool(true));
        assert_eq!(eq(Value::Null, Value::Null), Value::Bool(true));
    }

    #[test]
    fn test_mapping_property_access() {
        let rule = compile("return point.x > point.y;", &["point"]).unwrap();
        let point = Value::map([("x", Value::Int(3)), ("y", Value::Int(1))]);
        assert_eq!(rule.call(&[point]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_relational_on_unrelated_shapes_faults() {
        let rule = compile("return a < b;", &["a", "b"]).unwrap();
        assert!(matches!(
            rule.call(&[Value::Str("x".into()), Value::Int(1)]),
            Err(EvalError::TypeMismatch { .. })
        ));
    }
}
