pub mod extensions;
pub mod secure_headers;

pub use extensions::CspExtensions;
pub use secure_headers::{SecureHeadersMiddleware, SecureHeadersMiddlewareService};

pub use secure_headers::{
    content_security_policy, cross_origin_embedder_policy, cross_origin_opener_policy,
    cross_origin_resource_policy, origin_agent_cluster, permissions_policy, referrer_policy,
    secure_headers, strict_transport_security, x_content_type_options, x_dns_prefetch_control,
    x_download_options, x_frame_options, x_permitted_cross_domain_policies, x_powered_by,
    x_xss_protection,
};

use crate::error::SecureHeadersError;
use actix_web::http::header::HeaderMap;
use actix_web::HttpRequest;

/// One response-header rule applied by [`SecureHeadersMiddleware`].
///
/// Policies run after the wrapped service has produced its response and may
/// inspect the originating request.
pub trait HeaderPolicy: Send + Sync {
    fn apply(&self, req: &HttpRequest, headers: &mut HeaderMap) -> Result<(), SecureHeadersError>;
}
