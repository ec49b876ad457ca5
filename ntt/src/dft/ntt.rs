use crate::dft::table::TwiddleTable;
use crate::dft::DFT;
use crate::error::Error;
use crate::modulus::barrett::Barrett;
use crate::modulus::ReduceOnce;
use crate::modulus::WordOps;
use crate::modulus::{BARRETT, ONCE};
use itertools::izip;

impl DFT<u64> for TwiddleTable {
    fn forward_inplace(&self, a: &mut [u64]) -> Result<(), Error> {
        self.check_input(a)?;
        self.forward_inplace_core(a);
        Ok(())
    }

    fn backward_inplace(&self, a: &mut [u64]) -> Result<(), Error> {
        self.check_input(a)?;
        self.backward_inplace_core(a);
        Ok(())
    }
}

impl TwiddleTable {
    /// Checks the length of a and maps its entries into [0, q).
    fn check_input(&self, a: &mut [u64]) -> Result<(), Error> {
        if a.len() != self.n() {
            return Err(Error::DimensionMismatch {
                expected: self.n(),
                found: a.len(),
            });
        }
        let barrett = &self.prime().barrett;
        a.iter_mut()
            .for_each(|x| barrett.reduce_assign::<BARRETT>(x));
        Ok(())
    }

    /// Cooley-Tukey butterflies with stage widths n/2, n/4, ..., 1.
    /// Input and output are in natural order.
    fn forward_inplace_core(&self, a: &mut [u64]) {
        let log_n: u32 = a.len().log2();

        for layer in 0..log_n {
            let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
            izip!(a.chunks_exact_mut(size << 1), &self.psi_forward_rev[m..]).for_each(
                |(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a, b).for_each(|(a, b)| self.dit_inplace(a, b, *psi));
                },
            );
        }
    }

    #[inline(always)]
    fn dit_inplace(&self, a: &mut u64, b: &mut u64, psi: Barrett<u64>) {
        let q: u64 = self.q();
        debug_assert!(*a < q, "a:{} q:{}", a, q);
        debug_assert!(*b < q, "b:{} q:{}", b, q);
        let v: u64 = self.prime().barrett.mul_external::<ONCE>(psi, *b);
        *b = (*a + q - v).reduce_once(q);
        *a = (*a + v).reduce_once(q);
    }

    /// Gentleman-Sande butterflies with stage widths 1, 2, ..., n/2,
    /// followed by the multiplication with n^-1.
    fn backward_inplace_core(&self, a: &mut [u64]) {
        let log_n: u32 = a.len().log2();

        for layer in (0..log_n).rev() {
            let (h, size) = (1 << layer, 1 << (log_n - layer - 1));
            izip!(a.chunks_exact_mut(size << 1), &self.psi_backward_rev[h..]).for_each(
                |(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a, b).for_each(|(a, b)| self.dif_inplace(a, b, *psi));
                },
            );
        }

        let barrett = &self.prime().barrett;
        a.iter_mut()
            .for_each(|x| barrett.mul_external_assign::<ONCE>(self.n_inv, x));
    }

    #[inline(always)]
    fn dif_inplace(&self, a: &mut u64, b: &mut u64, psi: Barrett<u64>) {
        let q: u64 = self.q();
        debug_assert!(*a < q, "a:{} q:{}", a, q);
        debug_assert!(*b < q, "b:{} q:{}", b, q);
        let d: u64 = self
            .prime()
            .barrett
            .mul_external::<ONCE>(psi, *a + q - *b);
        *a = (*a + *b).reduce_once(q);
        *b = d;
    }
}
