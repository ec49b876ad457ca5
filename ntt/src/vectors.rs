//! JSON test vectors exchanged with external simulators.
//!
//! A vector carries the input sequence (`inp0`), the modulus (`prime0`),
//! the natural-order powers of omega (`omegas0`) and the natural-order
//! transform `ret0[i] = sum_j inp0[j] * omegas0[i*j mod n]` (zeros when not
//! emitted), each as a `{ "data": [...], "bitwidth": w }` record.

use crate::dft::table::TwiddleTable;
use crate::dft::Scheme;
use crate::error::Error;
use crate::modulus::operations::mul;
use crate::modulus::oracle::NumberTheory;
use crate::validator::verify;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BITWIDTH: u32 = 32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Data {
    pub data: Vec<u64>,
    pub bitwidth: u32,
}

impl Data {
    pub fn new(data: Vec<u64>, bitwidth: u32) -> Self {
        Self { data, bitwidth }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestVector {
    pub inp0: Data,
    pub prime0: Data,
    pub omegas0: Data,
    pub ret0: Data,
}

/// Bit width wide enough for every value in [0, q).
pub fn bitwidth(q: u64) -> u32 {
    DEFAULT_BITWIDTH.max(u64::BITS - q.leading_zeros())
}

/// Natural-order transform `ret[i] = sum_j a[j] * powers[i*j mod n] mod q`,
/// evaluated directly in quadratic time.
pub fn reference_transform(a: &[u64], powers: &[u64], q: u64) -> Result<Vec<u64>, Error> {
    let n: usize = powers.len();
    if !n.is_power_of_two() {
        return Err(Error::PowerOfTwoLengthRequired { n });
    }
    if a.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: a.len(),
        });
    }

    let mask: usize = n - 1;
    Ok((0..n)
        .map(|i| {
            a.iter().enumerate().fold(0u64, |acc, (j, &a_j)| {
                (acc + mul(a_j, powers[i.wrapping_mul(j) & mask], q)) % q
            })
        })
        .collect())
}

impl TestVector {
    /// `ret0` is zero-filled.
    pub fn new(input: &[u64], table: &TwiddleTable) -> Self {
        let width: u32 = bitwidth(table.q());
        Self {
            inp0: Data::new(input.to_vec(), width),
            prime0: Data::new(vec![table.q()], width),
            omegas0: Data::new(table.powers().to_vec(), width),
            ret0: Data::new(vec![0; table.n()], width),
        }
    }

    /// Same as [TestVector::new] with `ret0` set to the natural-order
    /// transform of `input`.
    pub fn with_transform(input: &[u64], table: &TwiddleTable) -> Result<Self, Error> {
        let mut vector: Self = Self::new(input, table);
        vector.ret0.data = reference_transform(input, table.powers(), table.q())?;
        Ok(vector)
    }

    pub fn q(&self) -> Result<u64, Error> {
        match self.prime0.data.as_slice() {
            [q] => Ok(*q),
            data => Err(Error::DimensionMismatch {
                expected: 1,
                found: data.len(),
            }),
        }
    }

    pub fn input(&self) -> &[u64] {
        &self.inp0.data
    }

    /// Whether `ret0` carries a transform rather than zero padding.
    pub fn has_transform(&self) -> bool {
        self.ret0.data.iter().any(|&x| x != 0)
    }

    /// Checks `ret0` against the transform of `inp0` under `prime0` and `omegas0`.
    pub fn check_transform(&self) -> Result<(), Error> {
        let expected: Vec<u64> =
            reference_transform(&self.inp0.data, &self.omegas0.data, self.q()?)?;
        verify(&expected, &self.ret0.data)
    }

    /// Rebuilds the twiddle table from `prime0` and `omegas0`.
    pub fn table<T: NumberTheory>(&self, scheme: Scheme, oracle: &T) -> Result<TwiddleTable, Error> {
        let table: TwiddleTable =
            TwiddleTable::from_powers(self.q()?, &self.omegas0.data, scheme, oracle)?;
        if self.inp0.data.len() != table.n() {
            return Err(Error::DimensionMismatch {
                expected: table.n(),
                found: self.inp0.data.len(),
            });
        }
        Ok(table)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
