use crate::error::Error;
use crate::modulus::oracle::NumberTheory;
use crate::modulus::{MAX_LOG_N, MAX_MODULUS_BITS};
use tracing::{debug, instrument, trace};

pub const DEFAULT_MAX_CANDIDATES: u64 = 1 << 16;

/// Searches NTT-friendly primes q = 2nk + 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModulusFinder {
    max_candidates: u64,
}

impl Default for ModulusFinder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CANDIDATES)
    }
}

impl ModulusFinder {
    pub fn new(max_candidates: u64) -> Self {
        Self { max_candidates }
    }

    pub fn max_candidates(&self) -> u64 {
        self.max_candidates
    }

    /// Returns the smallest prime q such that:
    /// - q = 2nk + 1 for some k >= 1,
    /// - q >= min_modulus > n,
    /// - q = 1 mod 2n.
    ///
    /// At most `max_candidates` values of k are examined, starting from the
    /// smallest k for which q >= min_modulus.
    #[instrument(level = "debug", skip(self, oracle))]
    pub fn find<T: NumberTheory>(
        &self,
        n: usize,
        min_modulus: u64,
        oracle: &T,
    ) -> Result<u64, Error> {
        if n < 2 || !n.is_power_of_two() {
            return Err(Error::PowerOfTwoLengthRequired { n });
        }

        if n as u64 > 1 << MAX_LOG_N {
            return Err(Error::LengthTooLarge {
                n,
                max_log_n: MAX_LOG_N,
            });
        }

        if min_modulus <= n as u64 {
            return Err(Error::MinModulusTooSmall { min_modulus, n });
        }

        let not_found: Error = Error::ModulusNotFound {
            n,
            min_modulus,
            max_candidates: self.max_candidates,
        };

        let two_n: u64 = (n as u64) << 1;
        let k_start: u64 = ((min_modulus - 1).div_ceil(two_n)).max(1);

        for k in k_start..k_start.saturating_add(self.max_candidates) {
            let q: u64 = match two_n.checked_mul(k).and_then(|q| q.checked_add(1)) {
                Some(q) if q >> MAX_MODULUS_BITS == 0 => q,
                _ => return Err(not_found),
            };

            debug_assert!(q >= min_modulus);

            if !oracle.is_prime(q) {
                trace!(q, k, "rejected composite candidate");
                continue;
            }

            if q % two_n != 1 {
                continue;
            }

            debug!(q, k, n, min_modulus, "found NTT-friendly modulus");
            return Ok(q);
        }

        Err(not_found)
    }
}
