pub mod bit_reversal;
pub mod dft;
pub mod error;
pub mod modulus;
pub mod validator;
pub mod vectors;

pub use error::Error;
