use crate::constants::{DEFAULT_NONCE_LENGTH, NONCE_BUFFER_POOL_SIZE};
use crate::error::SecureHeadersError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64, Engine};
use getrandom::getrandom;
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::{
    ops::Deref,
    sync::atomic::{AtomicUsize, Ordering},
};

/// Produces per-request nonces from the OS random source.
///
/// Random byte buffers are pooled between calls; the encoded nonce is always
/// a fresh `String` owned by the request.
#[derive(Debug)]
pub struct NonceGenerator {
    length: usize,
    buffer_pool: Mutex<SmallVec<[Vec<u8>; NONCE_BUFFER_POOL_SIZE]>>,
    generated: AtomicUsize,
}

impl NonceGenerator {
    /// `length` is the number of random bytes before base64 encoding.
    #[inline]
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
            buffer_pool: Mutex::new(SmallVec::new()),
            generated: AtomicUsize::new(0),
        }
    }

    pub fn generate(&self) -> Result<String, SecureHeadersError> {
        let mut buffer = self
            .buffer_pool
            .lock()
            .pop()
            .unwrap_or_else(|| Vec::with_capacity(self.length));
        buffer.clear();
        buffer.resize(self.length, 0);

        let result = getrandom(&mut buffer);
        let encoded = result.map(|()| BASE64.encode(&buffer));

        {
            let mut pool = self.buffer_pool.lock();
            if pool.len() < NONCE_BUFFER_POOL_SIZE {
                pool.push(buffer);
            }
        }

        let encoded = encoded.map_err(SecureHeadersError::NonceGeneration)?;
        self.generated.fetch_add(1, Ordering::Relaxed);
        Ok(encoded)
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn generated_count(&self) -> usize {
        self.generated.load(Ordering::Relaxed)
    }
}

impl Default for NonceGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_NONCE_LENGTH)
    }
}

/// The nonce generated for the current request, stored in its extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestNonce(pub String);

impl RequestNonce {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for RequestNonce {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn nonces_are_url_safe_and_sized() {
        let generator = NonceGenerator::default();
        let nonce = generator.generate().unwrap();
        // 16 bytes without padding
        assert_eq!(nonce.len(), 22);
        assert!(nonce
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn nonces_do_not_repeat() {
        let generator = NonceGenerator::new(24);
        let nonces: FxHashSet<String> = (0..200).map(|_| generator.generate().unwrap()).collect();
        assert_eq!(nonces.len(), 200);
        assert_eq!(generator.generated_count(), 200);
    }

    #[test]
    fn zero_length_is_clamped() {
        let generator = NonceGenerator::new(0);
        assert_eq!(generator.length(), 1);
        assert!(!generator.generate().unwrap().is_empty());
    }
}
