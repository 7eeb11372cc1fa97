//! # Primes
//!
//! Prime generation and factorization.
//!
//! The two halves are independent:
//! - `primes_to` - Sieve of Eratosthenes up to a bound
//! - `prime_factors` - trial-division factorization, no sieve needed

mod factor;
mod sieve;

pub use factor::prime_factors;
pub use sieve::primes_to;
