pub mod cache;
pub mod convolution;
pub mod ntt;
pub mod table;

use crate::error::Error;

/// Twiddle-factor layout of a [table::TwiddleTable].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Powers of a primitive n-th root of unity omega.
    RootOfUnity,
    /// Square roots phi_i of omega^i, i.e. powers of a
    /// primitive 2n-th root of unity (negative wrap).
    NegativeWrapPhi,
}

pub trait DFT<O> {
    /// Forward transform (Cooley-Tukey, decimation in time), in place.
    fn forward_inplace(&self, a: &mut [O]) -> Result<(), Error>;

    /// Inverse transform (Gentleman-Sande, decimation in frequency), in place,
    /// including the final multiplication by n^-1.
    fn backward_inplace(&self, a: &mut [O]) -> Result<(), Error>;
}
