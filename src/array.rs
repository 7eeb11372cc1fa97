//! # Array & Digit Utilities
//!
//! Small single-pass helpers over integers and arrays:
//! digit-sequence conversions, reductions, range filtering, and
//! multiple searches. Everything here is pure and call-local.

use crate::core::{DomainError, Value};

/// Concatenate the decimal text of each element into one integer.
///
/// Elements may be multi-digit: `to_int(&[10, 11, 12]) == 101112`.
/// Results beyond `u64` wrap; guarding that is out of scope, like the
/// sieve's unbounded upper limit.
///
/// # Examples
///
/// ```
/// use arrmath::to_int;
///
/// assert_eq!(to_int(&[1, 2, 3, 4]), 1234);
/// assert_eq!(to_int(&[10, 0, 120]), 100120);
/// ```
pub fn to_int(arr: &[u64]) -> u64 {
    arr.iter()
        .fold(0, |acc, &v| acc * 10u64.pow(digits(v)) + v)
}

/// Decimal digits of `n`, most-significant first. `0` yields `[0]`.
pub fn int_to_array(n: u64) -> Vec<u64> {
    if n == 0 {
        return vec![0];
    }
    let mut digits = Vec::new();
    let mut rest = n;
    while rest > 0 {
        digits.push(rest % 10);
        rest /= 10;
    }
    digits.reverse();
    digits
}

/// Number of decimal digits in `n`. `digits(0) == 1`.
pub fn digits(n: u64) -> u32 {
    let mut count = 1;
    let mut rest = n / 10;
    while rest > 0 {
        count += 1;
        rest /= 10;
    }
    count
}

/// 10 raised to `k`; negative exponents give fractional results.
pub fn pow10(k: i32) -> f64 {
    10f64.powi(k)
}

/// How many whole times `b` divides into `a` (floor division).
pub fn int_div(a: i64, b: i64) -> Result<i64, DomainError> {
    if b == 0 {
        return Err(DomainError::DivisionByZero);
    }
    Ok(a.div_euclid(b))
}

/// Elements of `arr` strictly below `x`, relative order preserved.
pub fn list_below(arr: &[i64], x: i64) -> Vec<i64> {
    arr.iter().copied().filter(|&v| v < x).collect()
}

/// Smallest multiple of `y` strictly greater than `x` that satisfies
/// `predicate` (every multiple qualifies when no predicate is given).
///
/// A predicate no multiple can satisfy loops forever; that is the
/// caller's contract, same as an oversized sieve bound.
///
/// # Examples
///
/// ```
/// use arrmath::{first_multiple_above, odd};
///
/// assert_eq!(first_multiple_above(100, 7, None), Ok(105));
/// assert_eq!(first_multiple_above(106, 7, Some(odd)), Ok(119));
/// ```
pub fn first_multiple_above(
    x: u64,
    y: u64,
    predicate: Option<fn(u64) -> bool>,
) -> Result<u64, DomainError> {
    if y == 0 {
        return Err(DomainError::ZeroStep);
    }

    let mut candidate = (x / y + 1) * y;
    if let Some(pred) = predicate {
        while !pred(candidate) {
            candidate += y;
        }
    }
    Ok(candidate)
}

/// Whether `n` is odd. Companion predicate for [`first_multiple_above`].
pub fn odd(n: u64) -> bool {
    n % 2 == 1
}

/// Whether `n` is even.
pub fn even(n: u64) -> bool {
    n % 2 == 0
}

/// Sum of every numeric leaf across arbitrarily nested sequences.
///
/// Non-numeric leaves are skipped.
///
/// # Examples
///
/// ```
/// use arrmath::{flat_sum, Value};
///
/// let nested = [Value::seq([
///     Value::Int(1),
///     Value::seq([Value::Int(2), Value::Int(3)]),
/// ])];
/// assert_eq!(flat_sum(&nested), 6.0);
/// ```
pub fn flat_sum(values: &[Value]) -> f64 {
    values
        .iter()
        .map(|v| match v {
            Value::Seq(items) => flat_sum(items),
            other => other.as_f64().unwrap_or(0.0),
        })
        .sum()
}

/// Multiplicative reduction: empty slices reduce to 1, any zero
/// element collapses the product to 0.
pub fn product(arr: &[i64]) -> i64 {
    arr.iter().product()
}

/// Cumulative decimal-digit lengths of the elements.
///
/// `lengths_so_far(&[22, 33, 44]) == [2, 4, 6]`.
pub fn lengths_so_far(arr: &[u64]) -> Vec<u64> {
    arr.iter()
        .scan(0u64, |total, &v| {
            *total += digits(v) as u64;
            Some(*total)
        })
        .collect()
}
