#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("no prime q = 2*{n}*k + 1 >= {min_modulus} found within {max_candidates} candidates")]
    ModulusNotFound {
        n: usize,
        min_modulus: u64,
        max_candidates: u64,
    },
    #[error("minimum modulus {min_modulus} must be greater than n = {n}")]
    MinModulusTooSmall { min_modulus: u64, n: usize },
    #[error("invalid {order}-th root of unity {root} mod {q}: {reason}")]
    InvalidRoot {
        root: u64,
        order: usize,
        q: u64,
        reason: &'static str,
    },
    #[error("{a} is not invertible mod {q}")]
    NotInvertible { a: u64, q: u64 },
    #[error("{x} is not a quadratic residue mod {q}")]
    NonResidue { x: u64, q: u64 },
    #[error("sequence length {found} does not match table length {expected}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("length {n} must be a power of two greater than one")]
    PowerOfTwoLengthRequired { n: usize },
    #[error("length {n} exceeds 2^{max_log_n}")]
    LengthTooLarge { n: usize, max_log_n: u32 },
    #[error("q = {q} is not congruent to 1 mod {modulus}")]
    ModulusPrecondition { q: u64, modulus: u64 },
    #[error("round trip mismatch at index {index}: expected {expected}, found {found}")]
    VerificationMismatch {
        index: usize,
        expected: u64,
        found: u64,
    },
    #[error("q = {q} is not prime")]
    NotPrime { q: u64 },
    #[error("q = {q} exceeds the {max_bits}-bit modulus bound")]
    ModulusTooLarge { q: u64, max_bits: u32 },
    #[error("no primitive root found for q = {q}")]
    PrimitiveRootNotFound { q: u64 },
    #[error("operation requires the {expected:?} scheme")]
    UnsupportedScheme { expected: crate::dft::Scheme },
}
