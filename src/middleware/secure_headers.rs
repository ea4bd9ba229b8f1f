use crate::core::config::SecureHeadersConfig;
use crate::core::permissions::PermissionsPolicy;
use crate::core::policy::ContentSecurityPolicyBuilder;
use crate::error::SecureHeadersError;
use crate::middleware::HeaderPolicy;
use crate::monitoring::stats::HeaderStats;
use crate::policies::{
    CrossOriginEmbedderPolicy, CrossOriginOpenerPolicy, CrossOriginResourcePolicy,
    FixedHeaderPolicy, OriginAgentCluster, ReferrerPolicy, RemoveHeader, StaticHeader,
    StrictTransportSecurity, StrictTransportSecurityOptions, XContentTypeOptions,
    XDnsPrefetchControl, XDownloadOptions, XFrameOptions, XPermittedCrossDomainPolicies,
    XXssProtection,
};
use crate::security::nonce::{NonceGenerator, RequestNonce};
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::{rc::Rc, sync::Arc};

/// Applies an ordered list of [`HeaderPolicy`] values to every response.
///
/// A policy that fails to render turns that single response into a
/// `500 Internal Server Error`; other requests are unaffected.
#[derive(Clone)]
pub struct SecureHeadersMiddleware {
    policies: Arc<[Arc<dyn HeaderPolicy>]>,
    nonce_generator: Option<Arc<NonceGenerator>>,
    stats: Arc<HeaderStats>,
}

impl SecureHeadersMiddleware {
    #[inline]
    pub fn new(policies: Vec<Arc<dyn HeaderPolicy>>) -> Self {
        log::debug!("secure headers middleware assembled with {} policies", policies.len());
        Self {
            policies: policies.into(),
            nonce_generator: None,
            stats: Arc::new(HeaderStats::new()),
        }
    }

    pub fn from_config(config: &SecureHeadersConfig) -> Result<Self, SecureHeadersError> {
        Ok(Self::new(config.to_policies()?))
    }

    pub fn from_fixed<P: FixedHeaderPolicy>(policy: &P) -> Result<Self, SecureHeadersError> {
        let header: Arc<dyn HeaderPolicy> = Arc::new(StaticHeader::from_policy(policy)?);
        Ok(Self::new(vec![header]))
    }

    /// Generates a [`RequestNonce`] of `length` random bytes for every request
    /// before the handler runs.
    #[inline]
    pub fn with_nonce_generator(mut self, length: usize) -> Self {
        self.nonce_generator = Some(Arc::new(NonceGenerator::new(length)));
        self
    }

    #[inline]
    pub fn with_stats(mut self, stats: Arc<HeaderStats>) -> Self {
        self.stats = stats;
        self
    }

    #[inline]
    pub fn stats(&self) -> &Arc<HeaderStats> {
        &self.stats
    }

    #[inline]
    pub fn policy_count(&self) -> usize {
        self.policies.len()
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecureHeadersMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SecureHeadersMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecureHeadersMiddlewareService {
            service: Rc::new(service),
            policies: self.policies.clone(),
            nonce_generator: self.nonce_generator.clone(),
            stats: self.stats.clone(),
        }))
    }
}

pub struct SecureHeadersMiddlewareService<S> {
    service: Rc<S>,
    policies: Arc<[Arc<dyn HeaderPolicy>]>,
    nonce_generator: Option<Arc<NonceGenerator>>,
    stats: Arc<HeaderStats>,
}

impl<S, B> Service<ServiceRequest> for SecureHeadersMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let policies = self.policies.clone();
        let nonce_generator = self.nonce_generator.clone();
        let stats = self.stats.clone();

        Box::pin(async move {
            stats.increment_request_count();

            if let Some(generator) = nonce_generator {
                match generator.generate() {
                    Ok(nonce) => {
                        req.extensions_mut().insert(RequestNonce(nonce));
                        stats.increment_nonce_generation_count();
                    }
                    Err(err) => {
                        log::error!("Failed to generate request nonce: {}", err);
                        stats.increment_render_failure_count();
                        return Ok(req.error_response(err).map_into_right_body());
                    }
                }
            }

            let mut res = service.call(req).await?;

            let request = res.request().clone();
            for policy in policies.iter() {
                if let Err(err) = policy.apply(&request, res.headers_mut()) {
                    log::error!("Failed to apply security header for {}: {}", request.path(), err);
                    stats.increment_render_failure_count();
                    return Ok(res.error_response(err).map_into_right_body());
                }
            }

            Ok(res.map_into_left_body())
        })
    }
}

/// Every configured header, in the documented order.
pub fn secure_headers(config: &SecureHeadersConfig) -> Result<SecureHeadersMiddleware, SecureHeadersError> {
    SecureHeadersMiddleware::from_config(config)
}

#[inline]
pub fn content_security_policy(
    builder: ContentSecurityPolicyBuilder,
) -> Result<SecureHeadersMiddleware, SecureHeadersError> {
    let policy: Arc<dyn HeaderPolicy> = Arc::new(builder.build()?);
    Ok(SecureHeadersMiddleware::new(vec![policy]))
}

#[inline]
pub fn permissions_policy(policy: &PermissionsPolicy) -> Result<SecureHeadersMiddleware, SecureHeadersError> {
    SecureHeadersMiddleware::from_fixed(policy)
}

#[inline]
pub fn cross_origin_embedder_policy(
    policy: CrossOriginEmbedderPolicy,
) -> Result<SecureHeadersMiddleware, SecureHeadersError> {
    SecureHeadersMiddleware::from_fixed(&policy)
}

#[inline]
pub fn cross_origin_opener_policy(
    policy: CrossOriginOpenerPolicy,
) -> Result<SecureHeadersMiddleware, SecureHeadersError> {
    SecureHeadersMiddleware::from_fixed(&policy)
}

#[inline]
pub fn cross_origin_resource_policy(
    policy: CrossOriginResourcePolicy,
) -> Result<SecureHeadersMiddleware, SecureHeadersError> {
    SecureHeadersMiddleware::from_fixed(&policy)
}

#[inline]
pub fn origin_agent_cluster() -> Result<SecureHeadersMiddleware, SecureHeadersError> {
    SecureHeadersMiddleware::from_fixed(&OriginAgentCluster)
}

#[inline]
pub fn referrer_policy(policy: ReferrerPolicy) -> Result<SecureHeadersMiddleware, SecureHeadersError> {
    SecureHeadersMiddleware::from_fixed(&policy)
}

#[inline]
pub fn strict_transport_security(
    options: StrictTransportSecurityOptions,
) -> Result<SecureHeadersMiddleware, SecureHeadersError> {
    SecureHeadersMiddleware::from_fixed(&StrictTransportSecurity::new(options)?)
}

#[inline]
pub fn x_content_type_options() -> Result<SecureHeadersMiddleware, SecureHeadersError> {
    SecureHeadersMiddleware::from_fixed(&XContentTypeOptions)
}

#[inline]
pub fn x_dns_prefetch_control(
    control: XDnsPrefetchControl,
) -> Result<SecureHeadersMiddleware, SecureHeadersError> {
    SecureHeadersMiddleware::from_fixed(&control)
}

#[inline]
pub fn x_download_options() -> Result<SecureHeadersMiddleware, SecureHeadersError> {
    SecureHeadersMiddleware::from_fixed(&XDownloadOptions)
}

#[inline]
pub fn x_frame_options(options: XFrameOptions) -> Result<SecureHeadersMiddleware, SecureHeadersError> {
    SecureHeadersMiddleware::from_fixed(&options)
}

#[inline]
pub fn x_permitted_cross_domain_policies(
    policy: XPermittedCrossDomainPolicies,
) -> Result<SecureHeadersMiddleware, SecureHeadersError> {
    SecureHeadersMiddleware::from_fixed(&policy)
}

/// Removes `X-Powered-By` from every response.
#[inline]
pub fn x_powered_by() -> SecureHeadersMiddleware {
    let policy: Arc<dyn HeaderPolicy> = Arc::new(RemoveHeader::powered_by());
    SecureHeadersMiddleware::new(vec![policy])
}

#[inline]
pub fn x_xss_protection() -> Result<SecureHeadersMiddleware, SecureHeadersError> {
    SecureHeadersMiddleware::from_fixed(&XXssProtection)
}
