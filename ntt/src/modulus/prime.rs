use crate::error::Error;
use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::operations;
use crate::modulus::oracle::NumberTheory;
use crate::modulus::MAX_MODULUS_BITS;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prime<O> {
    pub q: O,
    /// q-1, the order of the multiplicative group.
    pub phi: O,
    pub barrett: BarrettPrecomp<O>,
}

impl Prime<u64> {
    /// Returns a new instance of Prime<u64>.
    /// Fails if the oracle rejects q or if q is
    /// not an odd prime below 2^MAX_MODULUS_BITS.
    pub fn new<T: NumberTheory>(q: u64, oracle: &T) -> Result<Self, Error> {
        if q < 3 || !oracle.is_prime(q) {
            return Err(Error::NotPrime { q });
        }
        Self::new_unchecked(q)
    }

    /// Returns a new instance of Prime<u64>.
    /// Does not check if q is a prime.
    pub fn new_unchecked(q: u64) -> Result<Self, Error> {
        if q >> MAX_MODULUS_BITS != 0 {
            return Err(Error::ModulusTooLarge {
                q,
                max_bits: MAX_MODULUS_BITS,
            });
        }
        if q < 3 || q & 1 == 0 {
            return Err(Error::NotPrime { q });
        }
        Ok(Self {
            q,
            phi: q - 1,
            barrett: BarrettPrecomp::new(q),
        })
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    /// Returns x^exponent mod q.
    #[inline(always)]
    pub fn pow(&self, x: u64, exponent: u64) -> u64 {
        operations::pow(x, exponent, self.q)
    }

    /// Returns x^-1 mod q.
    #[inline(always)]
    pub fn inv(&self, x: u64) -> Result<u64, Error> {
        operations::inv(x, self.q)
    }

    /// Returns a square root of x mod q.
    #[inline(always)]
    pub fn sqrt(&self, x: u64) -> Result<u64, Error> {
        operations::sqrt(x, self.q)
    }

    /// Returns a primitive nth_root-th root of unity mod q,
    /// derived from the oracle's generator of Z_q^*.
    pub fn primitive_nth_root<T: NumberTheory>(
        &self,
        nth_root: usize,
        oracle: &T,
    ) -> Result<u64, Error> {
        if nth_root < 2 || !nth_root.is_power_of_two() {
            return Err(Error::PowerOfTwoLengthRequired { n: nth_root });
        }

        if self.phi % nth_root as u64 != 0 {
            return Err(Error::ModulusPrecondition {
                q: self.q,
                modulus: nth_root as u64,
            });
        }

        let g: u64 = oracle.primitive_root(self.q)?;
        let omega: u64 = self.pow(g, self.phi / nth_root as u64);

        self.certify_root(omega, nth_root)?;

        debug!(q = self.q, g, omega, nth_root, "derived primitive root of unity");

        Ok(omega)
    }

    /// Checks that omega has exact multiplicative order nth_root,
    /// which must be a power of two.
    pub fn certify_root(&self, omega: u64, nth_root: usize) -> Result<(), Error> {
        if self.pow(omega, nth_root as u64) != 1 {
            return Err(Error::InvalidRoot {
                root: omega,
                order: nth_root,
                q: self.q,
                reason: "omega^n != 1",
            });
        }

        if self.pow(omega, (nth_root >> 1) as u64) != self.q - 1 {
            return Err(Error::InvalidRoot {
                root: omega,
                order: nth_root,
                q: self.q,
                reason: "omega^(n/2) != -1",
            });
        }

        Ok(())
    }

    /// Returns [omega^0, omega^1, ..., omega^(n-1)] mod q.
    pub fn power_table(&self, omega: u64, n: usize) -> Vec<u64> {
        let mut powers: Vec<u64> = Vec::with_capacity(n);
        let mut power: u64 = 1;
        for _ in 0..n {
            powers.push(power);
            power = operations::mul(power, omega, self.q);
        }
        powers
    }
}
