use crate::error::Error;
use crate::modulus::operations::pow;
use prime_factorization::Factorization;

/// Primality testing and primitive root discovery for arbitrary primes.
///
/// Implementations are expected to be deterministic and free of side effects.
pub trait NumberTheory {
    fn is_prime(&self, x: u64) -> bool;

    /// Returns a generator of the multiplicative group of Z_q.
    fn primitive_root(&self, q: u64) -> Result<u64, Error>;
}

impl<T: NumberTheory + ?Sized> NumberTheory for &T {
    fn is_prime(&self, x: u64) -> bool {
        (**self).is_prime(x)
    }

    fn primitive_root(&self, q: u64) -> Result<u64, Error> {
        (**self).primitive_root(q)
    }
}

/// [NumberTheory] backed by `primality_test` and `prime_factorization`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultOracle;

impl DefaultOracle {
    /// Returns the distinct prime factors of x.
    pub fn distinct_factors(x: u64) -> Vec<u64> {
        Factorization::run(x)
            .prime_factor_repr()
            .iter()
            .map(|factor| factor.0)
            .collect()
    }
}

impl NumberTheory for DefaultOracle {
    fn is_prime(&self, x: u64) -> bool {
        x >= 2 && primality_test::is_prime(x)
    }

    /// Returns the smallest primitive root of q.
    fn primitive_root(&self, q: u64) -> Result<u64, Error> {
        if q < 3 || !self.is_prime(q) {
            return Err(Error::PrimitiveRootNotFound { q });
        }

        let phi: u64 = q - 1;
        let factors: Vec<u64> = Self::distinct_factors(phi);

        (2..q)
            .find(|&candidate| {
                factors
                    .iter()
                    .all(|&factor| pow(candidate, phi / factor, q) != 1)
            })
            .ok_or(Error::PrimitiveRootNotFound { q })
    }
}
