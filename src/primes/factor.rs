//! # Prime Factorization
//!
//! Trial division. Independent of the sieve: candidates are tested in
//! ascending order, so every divisor that survives is prime.

use crate::core::DomainError;

/// Ascending prime factors of `m`, repeated by multiplicity.
///
/// The product of the result equals `m`; `m == 1` yields an empty
/// vector. `m == 0` is outside the domain.
///
/// # Examples
///
/// ```
/// use arrmath::prime_factors;
///
/// assert_eq!(prime_factors(12).unwrap(), vec![2, 2, 3]);
/// assert!(prime_factors(1).unwrap().is_empty());
/// ```
pub fn prime_factors(m: u64) -> Result<Vec<u64>, DomainError> {
    if m == 0 {
        return Err(DomainError::FactorOfZero);
    }

    let mut factors = Vec::new();
    let mut remaining = m;
    let mut candidate = 2;

    // Advance the candidate only once it stops dividing, so each
    // factor is appended with its full multiplicity.
    while candidate * candidate <= remaining {
        if remaining % candidate == 0 {
            factors.push(candidate);
            remaining /= candidate;
        } else {
            candidate += 1;
        }
    }

    if remaining > 1 {
        factors.push(remaining);
    }

    Ok(factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::product;

    #[test]
    fn test_one_has_no_factors() {
        assert_eq!(prime_factors(1).unwrap(), Vec::<u64>::new());
    }

    #[test]
    fn test_prime_factors_itself() {
        assert_eq!(prime_factors(2).unwrap(), vec![2]);
        assert_eq!(prime_factors(97).unwrap(), vec![97]);
    }

    #[test]
    fn test_zero_is_out_of_domain() {
        assert_eq!(prime_factors(0), Err(DomainError::FactorOfZero));
    }

    #[test]
    fn test_multiplicity_and_order() {
        assert_eq!(prime_factors(8).unwrap(), vec![2, 2, 2]);
        assert_eq!(prime_factors(360).unwrap(), vec![2, 2, 2, 3, 3, 5]);
    }

    #[test]
    fn test_round_trip_known_multisets() {
        let multisets: [&[u64]; 5] = [
            &[2, 2, 2],
            &[3, 5, 11, 17],
            &[2, 2, 3, 3, 5, 5, 101],
            &[31, 37, 41],
            &[2, 47, 47, 47],
        ];

        for factors in multisets {
            let m: u64 = factors.iter().product();
            assert_eq!(prime_factors(m).unwrap(), factors.to_vec());
        }
    }

    #[test]
    fn test_product_law() {
        // product(prime_factors(m)) == m
        for m in [1u64, 2, 12, 100, 9_973, 1_000_000] {
            let factors = prime_factors(m).unwrap();
            let back: i64 = product(&factors.iter().map(|&f| f as i64).collect::<Vec<_>>());
            assert_eq!(back as u64, m);
        }
    }
}
