use actix_web::{test::TestRequest, HttpMessage};
use actix_web_secure_headers::{
    ContentSecurityPolicyBuilder, DirectiveToken, DirectiveValue, HashAlgorithm, HashGenerator,
    NonceGenerator, PermissionsPolicy, RequestNonce, SecureHeadersConfig, Source,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn complex_builder() -> ContentSecurityPolicyBuilder {
    ContentSecurityPolicyBuilder::new()
        .directive("defaultSrc", [Source::Self_])
        .directive(
            "scriptSrc",
            [
                Source::Self_,
                Source::Host("cdn.example.com".into()),
                Source::Host("*.googleapis.com".into()),
            ],
        )
        .directive(
            "styleSrc",
            [
                Source::Self_,
                Source::UnsafeInline,
                Source::Host("fonts.googleapis.com".into()),
            ],
        )
        .directive(
            "imgSrc",
            [
                Source::Self_,
                Source::Scheme("data".into()),
                Source::Host("*.example.com".into()),
            ],
        )
        .directive("connectSrc", [Source::Self_, Source::Host("api.example.com".into())])
        .directive("fontSrc", [Source::Self_, Source::Host("fonts.gstatic.com".into())])
        .directive("objectSrc", [Source::None])
        .directive("frameSrc", [Source::None])
}

fn benchmark_policy_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy_compilation");

    group.bench_function("default_policy", |b| {
        b.iter(|| black_box(ContentSecurityPolicyBuilder::new().build().unwrap()))
    });

    group.bench_function("complex_policy", |b| {
        b.iter(|| black_box(complex_builder().build().unwrap()))
    });

    group.bench_function("permissions_policy", |b| {
        b.iter(|| {
            black_box(
                PermissionsPolicy::builder()
                    .feature("camera", false)
                    .feature("geolocation", vec!["self", "https://maps.example.com"])
                    .feature("interestCohort", false)
                    .build()
                    .unwrap(),
            )
        })
    });

    group.bench_function("aggregate_config", |b| {
        let config = SecureHeadersConfig::default();
        b.iter(|| black_box(config.to_policies().unwrap()))
    });

    group.finish();
}

fn benchmark_header_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("header_rendering");

    let req = TestRequest::default().to_http_request();
    req.extensions_mut()
        .insert(RequestNonce("abc123def456ghi789".to_owned()));

    let default_policy = ContentSecurityPolicyBuilder::new().build().unwrap();
    let complex_policy = complex_builder().build().unwrap();
    let nonce_policy = ContentSecurityPolicyBuilder::new()
        .directive(
            "scriptSrc",
            DirectiveValue::list([DirectiveToken::literal("'self'"), DirectiveToken::request_nonce()]),
        )
        .build()
        .unwrap();

    group.bench_function("default_header", |b| {
        b.iter(|| black_box(default_policy.render(black_box(&req)).unwrap()))
    });

    group.bench_function("complex_header", |b| {
        b.iter(|| black_box(complex_policy.render(black_box(&req)).unwrap()))
    });

    group.bench_function("nonce_header", |b| {
        b.iter(|| black_box(nonce_policy.render(black_box(&req)).unwrap()))
    });

    group.finish();
}

fn benchmark_nonce_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("nonce_generation");

    let generator = NonceGenerator::new(16);
    let generator_32 = NonceGenerator::new(32);

    group.bench_function("nonce_16", |b| b.iter(|| black_box(generator.generate())));

    group.bench_function("nonce_32", |b| {
        b.iter(|| black_box(generator_32.generate()))
    });

    group.finish();
}

fn benchmark_hash_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_generation");

    let script_content = b"console.log('Hello, World!');";
    let large_script = vec![b'x'; 20000];

    group.bench_function("sha256_small", |b| {
        b.iter(|| {
            black_box(HashGenerator::generate(
                HashAlgorithm::Sha256,
                black_box(script_content),
            ))
        })
    });

    group.bench_function("sha512_small", |b| {
        b.iter(|| {
            black_box(HashGenerator::generate(
                HashAlgorithm::Sha512,
                black_box(script_content),
            ))
        })
    });

    group.bench_function("sha256_large", |b| {
        b.iter(|| {
            black_box(HashGenerator::generate(
                HashAlgorithm::Sha256,
                black_box(&large_script),
            ))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_policy_compilation,
    benchmark_header_rendering,
    benchmark_nonce_generation,
    benchmark_hash_generation
);

criterion_main!(benches);
