//! Single-value security headers.
//!
//! Each policy validates its option once and produces a fixed header value;
//! [`StaticHeader`] then writes that value on every response.

pub mod cross_origin;
pub mod dns_prefetch_control;
pub mod fixed;
pub mod frame_options;
pub mod hsts;
pub mod permitted_cross_domain_policies;
pub mod referrer_policy;

pub use cross_origin::{CrossOriginEmbedderPolicy, CrossOriginOpenerPolicy, CrossOriginResourcePolicy};
pub use dns_prefetch_control::XDnsPrefetchControl;
pub use fixed::{OriginAgentCluster, XContentTypeOptions, XDownloadOptions, XXssProtection};
pub use frame_options::XFrameOptions;
pub use hsts::{StrictTransportSecurity, StrictTransportSecurityOptions};
pub use permitted_cross_domain_policies::XPermittedCrossDomainPolicies;
pub use referrer_policy::{ReferrerPolicy, ReferrerPolicyToken};

use crate::error::SecureHeadersError;
use crate::middleware::HeaderPolicy;
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use actix_web::HttpRequest;
use std::borrow::Cow;

/// A policy whose header value does not depend on the request.
pub trait FixedHeaderPolicy {
    /// Lowercase header name.
    const HEADER_NAME: &'static str;

    fn header_value(&self) -> Cow<'static, str>;
}

/// Writes a precomputed header unless the handler already set it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticHeader {
    name: HeaderName,
    value: HeaderValue,
}

impl StaticHeader {
    pub fn from_policy<P: FixedHeaderPolicy>(policy: &P) -> Result<Self, SecureHeadersError> {
        let value = match policy.header_value() {
            Cow::Borrowed(value) => HeaderValue::from_static(value),
            Cow::Owned(value) => HeaderValue::try_from(value)?,
        };
        Ok(Self {
            name: HeaderName::from_static(P::HEADER_NAME),
            value,
        })
    }

    #[inline]
    pub fn name(&self) -> &HeaderName {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &HeaderValue {
        &self.value
    }
}

impl HeaderPolicy for StaticHeader {
    fn apply(&self, _req: &HttpRequest, headers: &mut HeaderMap) -> Result<(), SecureHeadersError> {
        if !headers.contains_key(&self.name) {
            headers.insert(self.name.clone(), self.value.clone());
        }
        Ok(())
    }
}

/// Strips a header from every response (used for `X-Powered-By`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveHeader {
    name: HeaderName,
}

impl RemoveHeader {
    #[inline]
    pub fn new(name: HeaderName) -> Self {
        Self { name }
    }

    #[inline]
    pub fn powered_by() -> Self {
        Self::new(HeaderName::from_static(crate::constants::HEADER_POWERED_BY))
    }
}

impl HeaderPolicy for RemoveHeader {
    fn apply(&self, _req: &HttpRequest, headers: &mut HeaderMap) -> Result<(), SecureHeadersError> {
        headers.remove(&self.name);
        Ok(())
    }
}
