use std::sync::Arc;

use crate::dft::table::TwiddleTable;
use crate::dft::Scheme;
use crate::error::Error;
use crate::modulus::oracle::NumberTheory;
use crate::modulus::prime_generation::ModulusFinder;
use fnv::FnvHashMap;
use tracing::debug;

type Key = (usize, u64, Scheme);

/// Builds each twiddle table once per (n, min_modulus, scheme)
/// and hands out shared read-only copies afterwards.
pub struct TableCache<T: NumberTheory> {
    oracle: T,
    finder: ModulusFinder,
    tables: FnvHashMap<Key, Arc<TwiddleTable>>,
}

impl<T: NumberTheory> TableCache<T> {
    pub fn new(oracle: T, finder: ModulusFinder) -> Self {
        Self {
            oracle,
            finder,
            tables: FnvHashMap::default(),
        }
    }

    pub fn get(
        &mut self,
        n: usize,
        min_modulus: u64,
        scheme: Scheme,
    ) -> Result<Arc<TwiddleTable>, Error> {
        let key: Key = (n, min_modulus, scheme);
        if let Some(table) = self.tables.get(&key) {
            return Ok(Arc::clone(table));
        }

        let q: u64 = self.finder.find(n, min_modulus, &self.oracle)?;
        let table: Arc<TwiddleTable> =
            Arc::new(TwiddleTable::build(n, q, scheme, &self.oracle)?);

        debug!(n, min_modulus, ?scheme, q, "cached twiddle table");

        self.tables.insert(key, Arc::clone(&table));
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
