pub mod hash;
pub mod nonce;

pub use hash::{HashAlgorithm, HashGenerator};
pub use nonce::{NonceGenerator, RequestNonce};
