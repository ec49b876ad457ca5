use crate::modulus::ReduceOnce;
use crate::modulus::{BARRETT, NONE, ONCE, REDUCEMOD};

/// A constant multiplicand together with its
/// precomputed quotient floor(value * 2^64 / q).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Barrett<O>(pub O, pub O);

impl<O> Barrett<O> {
    #[inline(always)]
    pub fn value(&self) -> &O {
        &self.0
    }

    #[inline(always)]
    pub fn quotient(&self) -> &O {
        &self.1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarrettPrecomp<O> {
    pub q: O,
    /// floor(2^64 / q).
    pub hi: O,
}

impl BarrettPrecomp<u64> {
    /// q must be odd and greater than one.
    pub fn new(q: u64) -> BarrettPrecomp<u64> {
        debug_assert!(q > 1 && q & 1 == 1, "invalid q: {} must be odd and > 1", q);
        // q odd implies q does not divide 2^64, hence (2^64-1)/q == 2^64/q.
        Self {
            q,
            hi: u64::MAX / q,
        }
    }

    #[inline(always)]
    pub fn reduce_assign<const REDUCE: REDUCEMOD>(&self, x: &mut u64) {
        match REDUCE {
            NONE => {}
            ONCE => x.reduce_once_assign(self.q),
            BARRETT => {
                let mhi: u64 = ((*x as u128 * self.hi as u128) >> u64::BITS) as u64;
                *x = x.wrapping_sub(mhi.wrapping_mul(self.q));
                x.reduce_once_assign(self.q);
            }
            _ => unreachable!("invalid REDUCE argument"),
        }
    }

    #[inline(always)]
    pub fn reduce<const REDUCE: REDUCEMOD>(&self, x: &u64) -> u64 {
        let mut r: u64 = *x;
        self.reduce_assign::<REDUCE>(&mut r);
        r
    }

    #[inline(always)]
    pub fn prepare(&self, v: u64) -> Barrett<u64> {
        debug_assert!(v < self.q, "invalid argument v: {} >= q = {}", v, self.q);
        let quotient: u64 = (((v as u128) << u64::BITS) / self.q as u128) as _;
        Barrett(v, quotient)
    }

    /// Returns lhs * rhs mod q, in [0, 2q) if REDUCE is NONE.
    #[inline(always)]
    pub fn mul_external<const REDUCE: REDUCEMOD>(&self, lhs: Barrett<u64>, rhs: u64) -> u64 {
        let mut r: u64 = rhs;
        self.mul_external_assign::<REDUCE>(lhs, &mut r);
        r
    }

    #[inline(always)]
    pub fn mul_external_assign<const REDUCE: REDUCEMOD>(&self, lhs: Barrett<u64>, rhs: &mut u64) {
        let t: u64 = ((*lhs.quotient() as u128 * *rhs as u128) >> u64::BITS) as _;
        *rhs = (rhs.wrapping_mul(*lhs.value())).wrapping_sub(self.q.wrapping_mul(t));
        self.reduce_assign::<REDUCE>(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q: u64 = 0x1fffffffffe00001;

    #[test]
    fn barrett_mul_matches_u128() {
        let precomp: BarrettPrecomp<u64> = BarrettPrecomp::new(Q);
        let values: [u64; 5] = [0, 1, 2, Q >> 1, Q - 1];
        for &w in values.iter() {
            let w_barrett: Barrett<u64> = precomp.prepare(w);
            for &x in values.iter().chain([u64::MAX, Q, 3 * Q].iter()) {
                let want: u64 = ((w as u128 * x as u128) % Q as u128) as u64;
                assert_eq!(precomp.mul_external::<ONCE>(w_barrett, x), want);
                let lazy: u64 = precomp.mul_external::<NONE>(w_barrett, x);
                assert!(lazy < 2 * Q);
                assert_eq!(lazy % Q, want);
            }
        }
    }

    #[test]
    fn barrett_reduce_full_range() {
        let precomp: BarrettPrecomp<u64> = BarrettPrecomp::new(Q);
        for x in [0, 1, Q - 1, Q, Q + 1, 2 * Q + 5, u64::MAX] {
            assert_eq!(precomp.reduce::<BARRETT>(&x), x % Q);
        }
    }

    #[test]
    fn barrett_quotient() {
        assert_eq!(BarrettPrecomp::new(5).hi, 3689348814741910323);
        let precomp: BarrettPrecomp<u64> = BarrettPrecomp::new(Q);
        assert_eq!(precomp.hi as u128, (1u128 << 64) / Q as u128);
    }

    #[test]
    fn barrett_small_modulus() {
        let precomp: BarrettPrecomp<u64> = BarrettPrecomp::new(5);
        assert_eq!(precomp.reduce::<BARRETT>(&u64::MAX), u64::MAX % 5);
        let two: Barrett<u64> = precomp.prepare(2);
        assert_eq!(precomp.mul_external::<ONCE>(two, 4), 3);
    }
}
