use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_core::RngCore;

/// Seedable randomness source for test inputs.
pub struct Source {
    source: ChaCha8Rng,
}

/// Returns a fresh seed drawn from the thread-local generator.
pub fn new_seed() -> [u8; 32] {
    let mut seed: [u8; 32] = [0u8; 32];
    rand::rng().fill_bytes(&mut seed);
    seed
}

/// Expands a u64 into a 32-byte seed.
pub fn seed_from_u64(seed: u64) -> [u8; 32] {
    let mut bytes: [u8; 32] = [0u8; 32];
    bytes[..8].copy_from_slice(&seed.to_le_bytes());
    bytes
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    pub fn from_u64(seed: u64) -> Source {
        Source::new(seed_from_u64(seed))
    }

    pub fn new_seed(&mut self) -> [u8; 32] {
        let mut seed: [u8; 32] = [0u8; 32];
        self.source.fill_bytes(&mut seed);
        seed
    }

    /// Returns an independent source seeded from this one.
    pub fn branch(&mut self) -> Self {
        Source::new(self.new_seed())
    }

    /// Returns a uniform value in [0, max) by rejection sampling
    /// on next_u64() & mask. mask must cover max-1.
    #[inline(always)]
    pub fn next_u64n(&mut self, max: u64, mask: u64) -> u64 {
        debug_assert!(max > 0 && mask >= max - 1, "invalid mask {} for max {}", mask, max);
        let mut x: u64 = self.next_u64() & mask;
        while x >= max {
            x = self.next_u64() & mask;
        }
        x
    }

    /// Returns a uniform value in [0, bound].
    #[inline(always)]
    pub fn next_u64_inclusive(&mut self, bound: u64) -> u64 {
        if bound == u64::MAX {
            return self.next_u64();
        }
        let max: u64 = bound + 1;
        let mask: u64 = max
            .checked_next_power_of_two()
            .map_or(u64::MAX, |p| p - 1);
        self.next_u64n(max, mask)
    }

    /// Fills a with uniform values in [0, bound].
    pub fn fill_uniform(&mut self, bound: u64, a: &mut [u64]) {
        a.iter_mut()
            .for_each(|x| *x = self.next_u64_inclusive(bound));
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_from_seed() {
        let mut a: Source = Source::from_u64(42);
        let mut b: Source = Source::from_u64(42);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
        let mut c: Source = Source::from_u64(43);
        assert_ne!(Source::from_u64(42).next_u64(), c.next_u64());
    }

    #[test]
    fn uniform_within_bound() {
        let mut source: Source = Source::from_u64(7);
        let mut a: Vec<u64> = vec![0; 4096];
        source.fill_uniform(1000, &mut a);
        assert!(a.iter().all(|&x| x <= 1000));
        assert!(a.iter().any(|&x| x > 900));

        source.fill_uniform(0, &mut a);
        assert!(a.iter().all(|&x| x == 0));
    }

    #[test]
    fn full_range_bound() {
        let mut source: Source = Source::from_u64(1);
        let _ = source.next_u64_inclusive(u64::MAX);
        for bound in [1 << 63, (1 << 63) + 1, u64::MAX - 1] {
            for _ in 0..16 {
                assert!(source.next_u64_inclusive(bound) <= bound);
            }
        }
    }

    #[test]
    fn branches_diverge() {
        let mut root: Source = Source::from_u64(5);
        let mut left: Source = root.branch();
        let mut right: Source = root.branch();
        assert_ne!(left.next_u64(), right.next_u64());
    }
}
