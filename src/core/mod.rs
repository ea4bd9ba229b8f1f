pub mod config;
pub mod directives;
pub mod permissions;
pub mod policy;
pub mod source;

pub use config::{PolicySetting, SecureHeadersConfig};
pub use directives::*;
pub use permissions::{PermissionValue, PermissionsPolicy, PermissionsPolicyBuilder};
pub use policy::{default_directives, ContentSecurityPolicy, ContentSecurityPolicyBuilder};
pub use source::Source;
