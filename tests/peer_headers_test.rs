use actix_web::{web, App, HttpResponse};
use actix_web_secure_headers::{
    cross_origin_embedder_policy, cross_origin_opener_policy, cross_origin_resource_policy,
    origin_agent_cluster, referrer_policy, strict_transport_security, x_content_type_options,
    x_dns_prefetch_control, x_download_options, x_frame_options, x_permitted_cross_domain_policies,
    x_powered_by, x_xss_protection, CrossOriginEmbedderPolicy, CrossOriginOpenerPolicy,
    CrossOriginResourcePolicy, ReferrerPolicy, ReferrerPolicyToken, SecureHeadersMiddleware,
    StrictTransportSecurity, StrictTransportSecurityOptions, XDnsPrefetchControl, XFrameOptions,
    XPermittedCrossDomainPolicies,
};

async fn index() -> HttpResponse {
    HttpResponse::Ok().body("Test response")
}

async fn powered_by() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(("x-powered-by", "Actix"))
        .body("Test response")
}

async fn own_frame_options() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(("x-frame-options", "DENY"))
        .body("Test response")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::{call_service, init_service, TestRequest};
    use test_case::test_case;

    async fn header_for(middleware: SecureHeadersMiddleware, name: &str) -> Option<String> {
        let app = init_service(App::new().wrap(middleware).route("/", web::get().to(index))).await;
        let resp = call_service(&app, TestRequest::get().uri("/").to_request()).await;
        assert!(resp.status().is_success());
        resp.headers()
            .get(name)
            .map(|value| value.to_str().unwrap().to_owned())
    }

    #[actix_web::test]
    async fn test_cross_origin_headers() {
        let coep = cross_origin_embedder_policy(CrossOriginEmbedderPolicy::default()).unwrap();
        assert_eq!(
            header_for(coep, "cross-origin-embedder-policy").await.as_deref(),
            Some("require-corp")
        );

        let coop = cross_origin_opener_policy(CrossOriginOpenerPolicy::SameOriginAllowPopups).unwrap();
        assert_eq!(
            header_for(coop, "cross-origin-opener-policy").await.as_deref(),
            Some("same-origin-allow-popups")
        );

        let corp = cross_origin_resource_policy(CrossOriginResourcePolicy::CrossOrigin).unwrap();
        assert_eq!(
            header_for(corp, "cross-origin-resource-policy").await.as_deref(),
            Some("cross-origin")
        );
    }

    #[actix_web::test]
    async fn test_option_less_headers() {
        assert_eq!(
            header_for(origin_agent_cluster().unwrap(), "origin-agent-cluster").await.as_deref(),
            Some("?1")
        );
        assert_eq!(
            header_for(x_content_type_options().unwrap(), "x-content-type-options").await.as_deref(),
            Some("nosniff")
        );
        assert_eq!(
            header_for(x_download_options().unwrap(), "x-download-options").await.as_deref(),
            Some("noopen")
        );
        assert_eq!(
            header_for(x_xss_protection().unwrap(), "x-xss-protection").await.as_deref(),
            Some("0")
        );
    }

    #[actix_web::test]
    async fn test_referrer_policy_list() {
        let policy = ReferrerPolicy::new([
            ReferrerPolicyToken::NoReferrer,
            ReferrerPolicyToken::StrictOriginWhenCrossOrigin,
        ])
        .unwrap();
        assert_eq!(
            header_for(referrer_policy(policy).unwrap(), "referrer-policy").await.as_deref(),
            Some("no-referrer,strict-origin-when-cross-origin")
        );
    }

    #[test_case(86400.9, true, false, "max-age=86400; includeSubDomains" ; "fraction is floored")]
    #[test_case(0.0, false, false, "max-age=0" ; "zero without subdomains")]
    #[test_case(63072000.0, true, true, "max-age=63072000; includeSubDomains; preload" ; "preload")]
    fn test_strict_transport_security_value(max_age: f64, sub_domains: bool, preload: bool, expected: &str) {
        let options = StrictTransportSecurityOptions::default()
            .with_max_age(max_age)
            .include_sub_domains(sub_domains)
            .preload(preload);
        assert_eq!(StrictTransportSecurity::new(options).unwrap().as_str(), expected);
    }

    #[actix_web::test]
    async fn test_strict_transport_security_header() {
        let options = StrictTransportSecurityOptions::default().with_max_age(86400.9);
        let middleware = strict_transport_security(options).unwrap();
        assert_eq!(
            header_for(middleware, "strict-transport-security").await.as_deref(),
            Some("max-age=86400; includeSubDomains")
        );
    }

    #[test]
    fn test_strict_transport_security_rejects_negative_max_age() {
        let options = StrictTransportSecurityOptions::default().with_max_age(-1.0);
        let err = strict_transport_security(options).err().unwrap();
        assert_eq!(
            err.to_string(),
            "Strict-Transport-Security: -1 is not a valid value for maxAge. Please choose a positive integer."
        );
    }

    #[actix_web::test]
    async fn test_dns_prefetch_and_permitted_policies() {
        assert_eq!(
            header_for(x_dns_prefetch_control(XDnsPrefetchControl::default()).unwrap(), "x-dns-prefetch-control")
                .await
                .as_deref(),
            Some("off")
        );
        assert_eq!(
            header_for(x_dns_prefetch_control(XDnsPrefetchControl::allow(true)).unwrap(), "x-dns-prefetch-control")
                .await
                .as_deref(),
            Some("on")
        );
        assert_eq!(
            header_for(
                x_permitted_cross_domain_policies(XPermittedCrossDomainPolicies::ByContentType).unwrap(),
                "x-permitted-cross-domain-policies"
            )
            .await
            .as_deref(),
            Some("by-content-type")
        );
    }

    #[actix_web::test]
    async fn test_frame_options() {
        let options: XFrameOptions = "same-origin".parse().unwrap();
        assert_eq!(
            header_for(x_frame_options(options).unwrap(), "x-frame-options").await.as_deref(),
            Some("SAMEORIGIN")
        );

        let err = "ALLOW-FROM https://example.com".parse::<XFrameOptions>().unwrap_err();
        assert!(err.to_string().contains("ALLOW-FROM https://example.com"));
    }

    #[actix_web::test]
    async fn test_static_headers_keep_handler_value() {
        let app = init_service(
            App::new()
                .wrap(x_frame_options(XFrameOptions::SameOrigin).unwrap())
                .route("/", web::get().to(own_frame_options)),
        )
        .await;

        let resp = call_service(&app, TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.headers().get("x-frame-options").unwrap(), "DENY");
    }

    #[actix_web::test]
    async fn test_powered_by_is_removed() {
        let app = init_service(
            App::new()
                .wrap(x_powered_by())
                .route("/", web::get().to(powered_by)),
        )
        .await;

        let resp = call_service(&app, TestRequest::get().uri("/").to_request()).await;
        assert!(resp.status().is_success());
        assert!(resp.headers().get("x-powered-by").is_none());
    }
}
