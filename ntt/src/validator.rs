use std::sync::Arc;

use crate::dft::table::TwiddleTable;
use crate::dft::{Scheme, DFT};
use crate::error::Error;
use crate::modulus::oracle::NumberTheory;
use crate::modulus::prime_generation::{ModulusFinder, DEFAULT_MAX_CANDIDATES};
use itertools::izip;
use sampling::Source;
use tracing::{debug, instrument};

/// Round-trip configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parameters {
    /// Transform length, a power of two.
    pub n: usize,
    /// Largest input value.
    pub input_bound: u64,
    pub scheme: Scheme,
    /// Cap on the number of moduli examined by the search.
    pub max_candidates: u64,
}

impl Parameters {
    pub fn new(n: usize, input_bound: u64, scheme: Scheme) -> Self {
        Self {
            n,
            input_bound,
            scheme,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }

    /// input_bound * n + 1, large enough that no sum of n bounded
    /// inputs wraps around q.
    pub fn min_modulus(&self) -> Result<u64, Error> {
        self.input_bound
            .checked_mul(self.n as u64)
            .and_then(|x| x.checked_add(1))
            .ok_or(Error::ModulusNotFound {
                n: self.n,
                min_modulus: u64::MAX,
                max_candidates: self.max_candidates,
            })
    }
}

/// Forward then inverse transform of an input, checked against the input.
#[derive(Clone, Debug)]
pub struct RoundTrip {
    table: Arc<TwiddleTable>,
    input_bound: u64,
}

impl RoundTrip {
    /// Chooses q with [ModulusFinder] and builds the twiddle tables.
    #[instrument(level = "debug", skip(oracle))]
    pub fn setup<T: NumberTheory>(params: Parameters, oracle: &T) -> Result<Self, Error> {
        let min_modulus: u64 = params.min_modulus()?;
        let q: u64 = ModulusFinder::new(params.max_candidates).find(params.n, min_modulus, oracle)?;
        let table: TwiddleTable = TwiddleTable::build(params.n, q, params.scheme, oracle)?;
        Ok(Self::from_table(Arc::new(table), params.input_bound))
    }

    /// Uses an existing table, e.g. one rebuilt from a test vector.
    pub fn from_table(table: Arc<TwiddleTable>, input_bound: u64) -> Self {
        Self { table, input_bound }
    }

    pub fn table(&self) -> &Arc<TwiddleTable> {
        &self.table
    }

    pub fn input_bound(&self) -> u64 {
        self.input_bound
    }

    /// Returns n uniform values in [0, input_bound].
    pub fn sample_input(&self, source: &mut Source) -> Vec<u64> {
        let mut a: Vec<u64> = vec![0; self.table.n()];
        source.fill_uniform(self.input_bound, &mut a);
        a
    }

    /// Runs forward then inverse on a copy of `input`, checks the result
    /// against `input` and returns the forward transform.
    pub fn run(&self, input: &[u64]) -> Result<Vec<u64>, Error> {
        let q: u64 = self.table.q();
        let expected: Vec<u64> = input.iter().map(|x| x % q).collect();

        let mut a: Vec<u64> = input.to_vec();
        self.table.forward_inplace(&mut a)?;
        let forward: Vec<u64> = a.clone();
        debug!(n = a.len(), q, "forward transform done");

        self.table.backward_inplace(&mut a)?;
        debug!(n = a.len(), q, "inverse transform done");

        verify(&expected, &a)?;
        Ok(forward)
    }
}

/// Returns the first index where `found` differs from `expected`.
pub fn verify(expected: &[u64], found: &[u64]) -> Result<(), Error> {
    if expected.len() != found.len() {
        return Err(Error::DimensionMismatch {
            expected: expected.len(),
            found: found.len(),
        });
    }

    match izip!(expected, found).position(|(x, y)| x != y) {
        Some(index) => Err(Error::VerificationMismatch {
            index,
            expected: expected[index],
            found: found[index],
        }),
        None => Ok(()),
    }
}
