pub mod barrett;
pub mod operations;
pub mod oracle;
pub mod prime;
pub mod prime_generation;

pub type REDUCEMOD = u8;

pub const NONE: REDUCEMOD = 0;
pub const ONCE: REDUCEMOD = 1;
pub const BARRETT: REDUCEMOD = 2;

/// Moduli are kept below 2^62 so that 4q fits in a u64.
pub const MAX_MODULUS_BITS: u32 = 62;

/// Largest log2(n): 2n must divide q-1 < 2^MAX_MODULUS_BITS.
pub const MAX_LOG_N: u32 = MAX_MODULUS_BITS - 2;

pub trait WordOps<O> {
    fn log2(self) -> u32;
    /// Reverses self within an n-bit field, keeping the low word of the result.
    fn reverse_bits_msb(self, n: u32) -> O;
}

impl WordOps<u64> for u64 {
    #[inline(always)]
    fn log2(self) -> u32 {
        u64::BITS - self.saturating_sub(1).leading_zeros()
    }
    #[inline(always)]
    fn reverse_bits_msb(self, n: u32) -> u64 {
        match n.checked_sub(u64::BITS) {
            Some(excess) => self.reverse_bits().checked_shl(excess).unwrap_or(0),
            None => self.reverse_bits().checked_shr(u64::BITS - n).unwrap_or(0),
        }
    }
}

impl WordOps<usize> for usize {
    #[inline(always)]
    fn log2(self) -> u32 {
        usize::BITS - self.saturating_sub(1).leading_zeros()
    }
    #[inline(always)]
    fn reverse_bits_msb(self, n: u32) -> usize {
        match n.checked_sub(usize::BITS) {
            Some(excess) => self.reverse_bits().checked_shl(excess).unwrap_or(0),
            None => self.reverse_bits().checked_shr(usize::BITS - n).unwrap_or(0),
        }
    }
}

pub trait ReduceOnce<O> {
    /// Assigns self-q to self if self >= q.
    /// User must ensure that 2q fits in O.
    fn reduce_once_assign(&mut self, q: O);
    /// Returns self-q if self >= q else self.
    /// User must ensure that 2q fits in O.
    fn reduce_once(&self, q: O) -> O;
}

impl ReduceOnce<u64> for u64 {
    #[inline(always)]
    fn reduce_once_assign(&mut self, q: u64) {
        debug_assert!(q < 0x8000000000000000, "2q >= 2^64");
        *self = (*self).min(self.wrapping_sub(q))
    }

    #[inline(always)]
    fn reduce_once(&self, q: u64) -> u64 {
        debug_assert!(q < 0x8000000000000000, "2q >= 2^64");
        (*self).min(self.wrapping_sub(q))
    }
}
