pub mod constants;
pub mod core;
pub mod error;
pub mod middleware;
pub mod monitoring;
pub mod policies;
pub mod prelude;
pub mod security;

// Re-export commonly used types for convenience
pub use crate::core::{
    default_directives, ContentSecurityPolicy, ContentSecurityPolicyBuilder, DirectiveToken,
    DirectiveValue, PermissionValue, PermissionsPolicy, PermissionsPolicyBuilder, PolicySetting,
    RequestValueProvider, SecureHeadersConfig, Source,
};
pub use error::SecureHeadersError;
pub use middleware::{
    content_security_policy, cross_origin_embedder_policy, cross_origin_opener_policy,
    cross_origin_resource_policy, origin_agent_cluster, permissions_policy, referrer_policy,
    secure_headers, strict_transport_security, x_content_type_options, x_dns_prefetch_control,
    x_download_options, x_frame_options, x_permitted_cross_domain_policies, x_powered_by,
    x_xss_protection, CspExtensions, HeaderPolicy, SecureHeadersMiddleware,
};
pub use monitoring::HeaderStats;
pub use policies::{
    CrossOriginEmbedderPolicy, CrossOriginOpenerPolicy, CrossOriginResourcePolicy, ReferrerPolicy,
    ReferrerPolicyToken, StrictTransportSecurity, StrictTransportSecurityOptions,
    XDnsPrefetchControl, XFrameOptions, XPermittedCrossDomainPolicies,
};
pub use security::{HashAlgorithm, HashGenerator, NonceGenerator, RequestNonce};
