//! # Prime Sieve
//!
//! Sieve of Eratosthenes: O(n log log n) time, O(n) space.
//!
//! Scratch memory is local to the call and released on return. A
//! pathologically large bound is an accepted operational limit, not
//! guarded against.

/// All primes less than or equal to `n`, ascending, each exactly once.
///
/// Bounds below 2 yield an empty vector.
///
/// # Examples
///
/// ```
/// use arrmath::primes_to;
///
/// assert_eq!(primes_to(10), vec![2, 3, 5, 7]);
/// assert!(primes_to(1).is_empty());
/// ```
pub fn primes_to(n: usize) -> Vec<usize> {
    if n < 2 {
        return Vec::new();
    }

    // Marker array: is_prime[i] means i is still considered prime.
    let mut is_prime = vec![true; n + 1];
    is_prime[0] = false;
    is_prime[1] = false;

    let mut i = 2;
    while i * i <= n {
        if is_prime[i] {
            // Multiples below i*i were struck by smaller primes.
            let mut multiple = i * i;
            while multiple <= n {
                is_prime[multiple] = false;
                multiple += i;
            }
        }
        i += 1;
    }

    is_prime
        .iter()
        .enumerate()
        .filter_map(|(i, &p)| if p { Some(i) } else { None })
        .collect()
}
