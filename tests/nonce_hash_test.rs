use actix_web::{web, App, HttpRequest, HttpResponse};
use actix_web_secure_headers::{
    content_security_policy, ContentSecurityPolicyBuilder, CspExtensions, DirectiveValue,
    HashAlgorithm, HashGenerator, NonceGenerator,
};
use std::{collections::HashSet, sync::Arc};

const INLINE_SCRIPT: &str = "alert('Hello, world.');";

async fn hashed_script(req: HttpRequest) -> HttpResponse {
    let source = req.generate_hash_source(HashAlgorithm::Sha256, INLINE_SCRIPT.as_bytes());
    HttpResponse::Ok().body(source.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::{call_service, init_service, read_body, TestRequest};

    #[tokio::test]
    async fn test_concurrent_nonces_are_unique() {
        let generator = Arc::new(NonceGenerator::new(16));
        let mut handles = Vec::new();

        for _ in 0..8 {
            let generator = Arc::clone(&generator);
            handles.push(tokio::spawn(async move {
                (0..50)
                    .map(|_| generator.generate().unwrap())
                    .collect::<Vec<_>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for nonce in handle.await.unwrap() {
                assert_eq!(nonce.len(), 22);
                assert!(seen.insert(nonce));
            }
        }
        assert_eq!(seen.len(), 400);
        assert_eq!(generator.generated_count(), 400);
    }

    #[test]
    fn test_hash_token_is_quoted() {
        assert_eq!(
            HashGenerator::generate_token(HashAlgorithm::Sha256, INLINE_SCRIPT.as_bytes()),
            "'sha256-qznLcsROx4GACP2dm0UCKCzCG+HiZ1guq6ZZDob/Tng='"
        );
    }

    #[actix_rt::test]
    async fn test_hash_source_in_policy_matches_handler() {
        let token = HashGenerator::generate_token(HashAlgorithm::Sha256, INLINE_SCRIPT.as_bytes());
        let builder = ContentSecurityPolicyBuilder::new()
            .directive("script-src", DirectiveValue::list(["'self'".to_owned(), token.clone()]));
        let middleware = content_security_policy(builder).unwrap().with_nonce_generator(16);
        let stats = middleware.stats().clone();
        let app = init_service(
            App::new()
                .wrap(middleware)
                .route("/", web::get().to(hashed_script)),
        )
        .await;

        let resp = call_service(&app, TestRequest::get().uri("/").to_request()).await;
        let policy = resp
            .headers()
            .get("content-security-policy")
            .unwrap()
            .to_str()
            .unwrap()
            .to_owned();
        let body = read_body(resp).await;

        assert_eq!(body, token.as_bytes());
        assert!(policy.contains(&format!("script-src 'self' {}", token)));
        assert_eq!(stats.nonce_generation_count(), 1);
    }
}
