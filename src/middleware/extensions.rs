use crate::constants::{NONCE_PREFIX, SUFFIX_QUOTE};
use crate::core::source::Source;
use crate::security::hash::{HashAlgorithm, HashGenerator};
use crate::security::nonce::RequestNonce;
use actix_web::HttpMessage;

/// Handler-side access to the per-request CSP material.
pub trait CspExtensions {
    /// The raw nonce generated for this request, for use in
    /// `<script nonce="...">` attributes.
    fn get_nonce(&self) -> Option<String>;
    /// The nonce as a directive token, `'nonce-<value>'`.
    fn nonce_source(&self) -> Option<String>;
    fn generate_hash(&self, algorithm: HashAlgorithm, data: &[u8]) -> String;
    fn generate_hash_source(&self, algorithm: HashAlgorithm, data: &[u8]) -> Source;
}

impl<T> CspExtensions for T
where
    T: HttpMessage,
{
    fn get_nonce(&self) -> Option<String> {
        self.extensions()
            .get::<RequestNonce>()
            .map(|nonce| nonce.0.clone())
    }

    fn nonce_source(&self) -> Option<String> {
        self.extensions()
            .get::<RequestNonce>()
            .map(|nonce| format!("{}{}{}", NONCE_PREFIX, nonce.as_str(), SUFFIX_QUOTE))
    }

    fn generate_hash(&self, algorithm: HashAlgorithm, data: &[u8]) -> String {
        HashGenerator::generate(algorithm, data)
    }

    fn generate_hash_source(&self, algorithm: HashAlgorithm, data: &[u8]) -> Source {
        HashGenerator::generate_source(algorithm, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn nonce_accessors() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(req.get_nonce(), None);
        assert_eq!(req.nonce_source(), None);

        req.extensions_mut().insert(RequestNonce("abc123".to_owned()));
        assert_eq!(req.get_nonce().as_deref(), Some("abc123"));
        assert_eq!(req.nonce_source().as_deref(), Some("'nonce-abc123'"));
    }

    #[test]
    fn hash_source_matches_generator() {
        let req = TestRequest::default().to_http_request();
        let source = req.generate_hash_source(HashAlgorithm::Sha256, b"x");
        assert!(source.contains_hash());
        assert_eq!(
            source.to_string(),
            HashGenerator::generate_token(HashAlgorithm::Sha256, b"x")
        );
    }
}
