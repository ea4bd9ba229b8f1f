use actix_web::test::TestRequest;
use actix_web_secure_headers::{
    ContentSecurityPolicyBuilder, DirectiveValue, PermissionsPolicy, SecureHeadersConfig,
    SecureHeadersError, Source,
};

fn main() -> Result<(), SecureHeadersError> {
    println!("Actix Web Secure Headers Example");

    let policy = ContentSecurityPolicyBuilder::new()
        .directive("defaultSrc", [Source::Self_])
        .directive("scriptSrc", [Source::Self_, Source::StrictDynamic])
        .directive("imgSrc", ["'self'", "data:"])
        .directive("upgradeInsecureRequests", DirectiveValue::empty())
        .build()?;

    let req = TestRequest::default().to_http_request();
    println!("{}: {}", policy.header_name(), policy.render(&req)?);

    let permissions = PermissionsPolicy::builder()
        .feature("camera", false)
        .feature("geolocation", vec!["self", "https://maps.example.com"])
        .build()?;
    println!("permissions-policy: {}", permissions.as_str());

    let config = SecureHeadersConfig::from_json_str(
        r#"{"hsts": {"maxAge": 86400}, "frameguard": {"action": "deny"}}"#,
    )?;
    println!("Configured {} header policies", config.to_policies()?.len());

    Ok(())
}
