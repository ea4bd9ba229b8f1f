use crate::constants::{HASH_PREFIX_SHA256, HASH_PREFIX_SHA384, HASH_PREFIX_SHA512};
use crate::core::source::Source;
use crate::error::SecureHeadersError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use ring::constant_time::verify_slices_are_equal;
use ring::digest::{self, Context, SHA256, SHA384, SHA512};
use std::{fmt, str::FromStr};

const CHUNK_SIZE: usize = 16384;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    #[inline(always)]
    pub fn digest_algorithm(&self) -> &'static digest::Algorithm {
        match self {
            HashAlgorithm::Sha256 => &SHA256,
            HashAlgorithm::Sha384 => &SHA384,
            HashAlgorithm::Sha512 => &SHA512,
        }
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Opening of the quoted source expression, e.g. `'sha256-`.
    #[inline(always)]
    pub const fn prefix(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => HASH_PREFIX_SHA256,
            HashAlgorithm::Sha384 => HASH_PREFIX_SHA384,
            HashAlgorithm::Sha512 => HASH_PREFIX_SHA512,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = SecureHeadersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Err(SecureHeadersError::InvalidHashAlgorithm(s.to_owned())),
        }
    }
}

/// Computes CSP hash sources for inline scripts and styles.
#[derive(Debug)]
pub struct HashGenerator;

impl HashGenerator {
    /// Base64 digest of `data`, without the algorithm prefix or quotes.
    #[inline]
    pub fn generate(algorithm: HashAlgorithm, data: &[u8]) -> String {
        if data.len() <= CHUNK_SIZE {
            let digest = digest::digest(algorithm.digest_algorithm(), data);
            return BASE64.encode(digest.as_ref());
        }

        let mut context = Context::new(algorithm.digest_algorithm());
        for chunk in data.chunks(CHUNK_SIZE) {
            context.update(chunk);
        }
        BASE64.encode(context.finish().as_ref())
    }

    #[inline]
    pub fn generate_source(algorithm: HashAlgorithm, data: &[u8]) -> Source {
        Source::Hash {
            algorithm,
            value: Self::generate(algorithm, data).into(),
        }
    }

    /// Quoted directive token such as `'sha256-…'`.
    #[inline]
    pub fn generate_token(algorithm: HashAlgorithm, data: &[u8]) -> String {
        Self::generate_source(algorithm, data).to_string()
    }

    #[inline]
    pub fn verify_hash(algorithm: HashAlgorithm, data: &[u8], hash: &str) -> bool {
        let calculated = Self::generate(algorithm, data);
        verify_slices_are_equal(calculated.as_bytes(), hash.as_bytes()).is_ok()
    }
}
