use crate::bit_reversal;
use crate::dft::Scheme;
use crate::error::Error;
use crate::modulus::barrett::Barrett;
use crate::modulus::operations::mul;
use crate::modulus::oracle::NumberTheory;
use crate::modulus::prime::Prime;
use crate::modulus::MAX_LOG_N;
use tracing::{debug, instrument};

/// Forward and inverse twiddle factors for transforms of length n mod q.
///
/// Both tables are stored in bit-reversed order, which lets the butterflies
/// read `table[m + i]` for group `i` of the stage with `m` groups while the
/// data itself stays in natural order. Once built, a table is immutable and
/// can be shared between threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TwiddleTable {
    prime: Prime<u64>,
    n: usize,
    omega: u64,
    scheme: Scheme,
    powers: Vec<u64>,
    forward: Vec<u64>,
    inverse: Vec<u64>,
    pub(crate) psi_forward_rev: Vec<Barrett<u64>>,
    pub(crate) psi_backward_rev: Vec<Barrett<u64>>,
    pub(crate) n_inv: Barrett<u64>,
}

impl TwiddleTable {
    /// Builds the tables for length n mod q, deriving omega from the
    /// oracle's primitive root of q. Requires q prime and q = 1 mod 2n.
    #[instrument(level = "debug", skip(oracle))]
    pub fn build<T: NumberTheory>(
        n: usize,
        q: u64,
        scheme: Scheme,
        oracle: &T,
    ) -> Result<Self, Error> {
        check_length(n)?;

        let two_n: u64 = (n as u64) << 1;
        if q % two_n != 1 {
            return Err(Error::ModulusPrecondition { q, modulus: two_n });
        }

        let prime: Prime<u64> = Prime::new(q, oracle)?;
        let omega: u64 = prime.primitive_nth_root(n, oracle)?;

        Self::new(prime, omega, n, scheme)
    }

    /// Builds the tables from an externally chosen root omega of order n.
    /// Requires q prime and q = 1 mod n.
    pub fn from_root<T: NumberTheory>(
        q: u64,
        omega: u64,
        n: usize,
        scheme: Scheme,
        oracle: &T,
    ) -> Result<Self, Error> {
        check_length(n)?;

        if q % n as u64 != 1 {
            return Err(Error::ModulusPrecondition {
                q,
                modulus: n as u64,
            });
        }

        let prime: Prime<u64> = Prime::new(q, oracle)?;
        prime.certify_root(omega % q, n)?;

        Self::new(prime, omega % q, n, scheme)
    }

    /// Builds the tables from an externally supplied natural-order
    /// power table [omega^0, ..., omega^(n-1)].
    pub fn from_powers<T: NumberTheory>(
        q: u64,
        powers: &[u64],
        scheme: Scheme,
        oracle: &T,
    ) -> Result<Self, Error> {
        let n: usize = powers.len();
        check_length(n)?;

        let omega: u64 = powers[1];

        if powers[0] != 1 {
            return Err(Error::InvalidRoot {
                root: omega,
                order: n,
                q,
                reason: "power table does not start at 1",
            });
        }

        let table: Self = Self::from_root(q, omega, n, scheme, oracle)?;

        if table.powers != powers {
            return Err(Error::InvalidRoot {
                root: omega,
                order: n,
                q,
                reason: "power table is not the consecutive powers of omega",
            });
        }

        Ok(table)
    }

    fn new(prime: Prime<u64>, omega: u64, n: usize, scheme: Scheme) -> Result<Self, Error> {
        let powers: Vec<u64> = prime.power_table(omega, n);

        let mut forward: Vec<u64> = match scheme {
            Scheme::RootOfUnity => powers.clone(),
            Scheme::NegativeWrapPhi => phi_table(&prime, &powers)?,
        };

        let mut inverse: Vec<u64> = forward
            .iter()
            .map(|&x| prime.inv(x))
            .collect::<Result<Vec<u64>, Error>>()?;

        bit_reversal::permute(&mut forward)?;
        bit_reversal::permute(&mut inverse)?;

        let psi_forward_rev: Vec<Barrett<u64>> =
            forward.iter().map(|&x| prime.barrett.prepare(x)).collect();
        let psi_backward_rev: Vec<Barrett<u64>> =
            inverse.iter().map(|&x| prime.barrett.prepare(x)).collect();

        let n_inv: Barrett<u64> = prime.barrett.prepare(prime.inv(n as u64)?);

        debug!(n, q = prime.q, omega, ?scheme, "built twiddle table");

        Ok(Self {
            prime,
            n,
            omega,
            scheme,
            powers,
            forward,
            inverse,
            psi_forward_rev,
            psi_backward_rev,
            n_inv,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn q(&self) -> u64 {
        self.prime.q
    }

    pub fn prime(&self) -> &Prime<u64> {
        &self.prime
    }

    /// The primitive n-th root of unity the table is derived from.
    pub fn omega(&self) -> u64 {
        self.omega
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// [omega^0, ..., omega^(n-1)] in natural order.
    pub fn powers(&self) -> &[u64] {
        &self.powers
    }

    /// Forward twiddles in bit-reversed order.
    pub fn forward(&self) -> &[u64] {
        &self.forward
    }

    /// Inverses of the forward twiddles, in bit-reversed order.
    pub fn inverse(&self) -> &[u64] {
        &self.inverse
    }

    /// n^-1 mod q.
    pub fn n_inv(&self) -> u64 {
        *self.n_inv.value()
    }
}

fn check_length(n: usize) -> Result<(), Error> {
    if n < 2 || !n.is_power_of_two() {
        return Err(Error::PowerOfTwoLengthRequired { n });
    }
    if n as u64 > 1 << MAX_LOG_N {
        return Err(Error::LengthTooLarge {
            n,
            max_log_n: MAX_LOG_N,
        });
    }
    Ok(())
}

/// Returns phi_i with phi_i^2 = omega^i for every entry of `powers`.
///
/// Each phi_i is a Tonelli-Shanks root whose sign is chosen so that
/// phi_i = psi^i, where psi = sqrt(omega) is a primitive 2n-th root of unity.
fn phi_table(prime: &Prime<u64>, powers: &[u64]) -> Result<Vec<u64>, Error> {
    let psi: u64 = prime.sqrt(powers[1])?;
    let mut psi_pow: u64 = 1;
    powers
        .iter()
        .map(|&omega_i| {
            let root: u64 = prime.sqrt(omega_i)?;
            let phi: u64 = if root == psi_pow { root } else { prime.q - root };
            debug_assert_eq!(phi, psi_pow, "sqrt({}) is neither +psi^i nor -psi^i", omega_i);
            psi_pow = mul(psi_pow, psi, prime.q);
            Ok(phi)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modulus::oracle::DefaultOracle;
    use crate::modulus::WordOps;
    use assert_matches::assert_matches;

    #[test]
    fn root_of_unity_layout() {
        let table: TwiddleTable =
            TwiddleTable::from_root(5, 2, 4, Scheme::RootOfUnity, &DefaultOracle).unwrap();
        assert_eq!(table.powers(), &[1, 2, 4, 3]);
        assert_eq!(table.forward(), &[1, 4, 2, 3]);
        assert_eq!(table.inverse(), &[1, 4, 3, 2]);
        assert_eq!(table.n_inv(), 4);
    }

    #[test]
    fn tables_are_bit_reversed_and_inverse() {
        let n: usize = 64;
        let q: u64 = 65537;
        for scheme in [Scheme::RootOfUnity, Scheme::NegativeWrapPhi] {
            let table: TwiddleTable = TwiddleTable::build(n, q, scheme, &DefaultOracle).unwrap();
            let log_n: u32 = n.log2();
            for i in 0..n {
                let i_rev: usize = i.reverse_bits_msb(log_n);
                assert_eq!(mul(table.forward()[i], table.inverse()[i], q), 1);
                if scheme == Scheme::RootOfUnity {
                    assert_eq!(table.forward()[i_rev], table.powers()[i]);
                }
            }
        }
    }

    #[test]
    fn powers_conjugate_symmetry() {
        let n: usize = 256;
        let table: TwiddleTable =
            TwiddleTable::build(n, 7681, Scheme::RootOfUnity, &DefaultOracle).unwrap();
        let q: u64 = table.q();
        assert_eq!(q.wrapping_sub(1) % (2 * n as u64), 0);
        for i in 1..n {
            assert_eq!(mul(table.powers()[i], table.powers()[n - i], q), 1);
        }
    }

    #[test]
    fn phi_squares_to_omega_powers() {
        let n: usize = 128;
        let table: TwiddleTable =
            TwiddleTable::build(n, 0x1fffffffffe00001, Scheme::NegativeWrapPhi, &DefaultOracle)
                .unwrap();
        let q: u64 = table.q();
        let log_n: u32 = n.log2();
        for i in 0..n {
            let phi: u64 = table.forward()[i.reverse_bits_msb(log_n)];
            assert_eq!(mul(phi, phi, q), table.powers()[i]);
        }
        // phi_1 has order 2n.
        let psi: u64 = table.forward()[1usize.reverse_bits_msb(log_n)];
        assert_eq!(table.prime().pow(psi, n as u64), q - 1);
    }

    #[test]
    fn build_preconditions() {
        assert_matches!(
            TwiddleTable::build(4, 5, Scheme::RootOfUnity, &DefaultOracle),
            Err(Error::ModulusPrecondition { q: 5, modulus: 8 })
        );
        assert_matches!(
            TwiddleTable::build(12, 97, Scheme::RootOfUnity, &DefaultOracle),
            Err(Error::PowerOfTwoLengthRequired { n: 12 })
        );
        assert_matches!(
            TwiddleTable::build(1, 97, Scheme::RootOfUnity, &DefaultOracle),
            Err(Error::PowerOfTwoLengthRequired { n: 1 })
        );
        // 25 = 1 mod 8 but is not prime.
        assert_matches!(
            TwiddleTable::build(4, 25, Scheme::RootOfUnity, &DefaultOracle),
            Err(Error::NotPrime { q: 25 })
        );
    }

    #[test]
    fn oversized_length() {
        let n: usize = 1 << (usize::BITS - 1);
        assert_matches!(
            TwiddleTable::build(n, 3, Scheme::RootOfUnity, &DefaultOracle),
            Err(Error::LengthTooLarge { .. })
        );
        assert_matches!(
            TwiddleTable::from_root(3, 2, n, Scheme::RootOfUnity, &DefaultOracle),
            Err(Error::LengthTooLarge { .. })
        );
    }

    #[test]
    fn phi_scheme_needs_two_n_th_roots() {
        // 2 is a non-residue mod 5: no 8-th root of unity exists.
        assert_matches!(
            TwiddleTable::from_root(5, 2, 4, Scheme::NegativeWrapPhi, &DefaultOracle),
            Err(Error::NonResidue { x: 2, q: 5 })
        );
    }

    #[test]
    fn from_powers_validation() {
        let table: TwiddleTable =
            TwiddleTable::from_powers(5, &[1, 2, 4, 3], Scheme::RootOfUnity, &DefaultOracle)
                .unwrap();
        assert_eq!(table.omega(), 2);

        assert_matches!(
            TwiddleTable::from_powers(5, &[1, 2, 4, 2], Scheme::RootOfUnity, &DefaultOracle),
            Err(Error::InvalidRoot { .. })
        );
        assert_matches!(
            TwiddleTable::from_powers(5, &[2, 2, 4, 3], Scheme::RootOfUnity, &DefaultOracle),
            Err(Error::InvalidRoot { .. })
        );
        // 4 has order 2 mod 5.
        assert_matches!(
            TwiddleTable::from_powers(5, &[1, 4, 1, 4], Scheme::RootOfUnity, &DefaultOracle),
            Err(Error::InvalidRoot { .. })
        );
        assert_matches!(
            TwiddleTable::from_powers(7, &[1, 2, 4, 1], Scheme::RootOfUnity, &DefaultOracle),
            Err(Error::ModulusPrecondition { q: 7, modulus: 4 })
        );
    }

    #[test]
    fn deterministic() {
        let a: TwiddleTable =
            TwiddleTable::build(32, 65537, Scheme::NegativeWrapPhi, &DefaultOracle).unwrap();
        let b: TwiddleTable =
            TwiddleTable::build(32, 65537, Scheme::NegativeWrapPhi, &DefaultOracle).unwrap();
        assert_eq!(a, b);
    }
}
