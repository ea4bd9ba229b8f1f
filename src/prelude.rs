pub use crate::core::{
    ContentSecurityPolicyBuilder, DirectiveToken, DirectiveValue, PermissionsPolicy, PolicySetting,
    SecureHeadersConfig, Source,
};
pub use crate::error::SecureHeadersError;
pub use crate::middleware::{content_security_policy, secure_headers, CspExtensions, SecureHeadersMiddleware};
pub use crate::policies::{ReferrerPolicy, StrictTransportSecurityOptions, XFrameOptions};
pub use crate::security::{HashAlgorithm, HashGenerator};
