use crate::dft::table::TwiddleTable;
use crate::dft::{Scheme, DFT};
use crate::error::Error;
use crate::modulus::operations::mul;
use itertools::izip;

/// Returns a * b mod (X^n + 1, q).
///
/// The negative-wrap table evaluates at the odd powers of a primitive
/// 2n-th root of unity, the roots of X^n + 1, so no zero padding is needed.
pub fn negacyclic_mul(table: &TwiddleTable, a: &[u64], b: &[u64]) -> Result<Vec<u64>, Error> {
    if table.scheme() != Scheme::NegativeWrapPhi {
        return Err(Error::UnsupportedScheme {
            expected: Scheme::NegativeWrapPhi,
        });
    }

    let q: u64 = table.q();
    let mut a_ntt: Vec<u64> = a.to_vec();
    let mut b_ntt: Vec<u64> = b.to_vec();

    table.forward_inplace(&mut a_ntt)?;
    table.forward_inplace(&mut b_ntt)?;

    izip!(a_ntt.iter_mut(), b_ntt.iter()).for_each(|(a, b)| *a = mul(*a, *b, q));

    table.backward_inplace(&mut a_ntt)?;

    Ok(a_ntt)
}
