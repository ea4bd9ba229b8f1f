pub(crate) const HEADER_CSP: &str = "content-security-policy";
pub(crate) const HEADER_CSP_REPORT_ONLY: &str = "content-security-policy-report-only";
pub(crate) const HEADER_PERMISSIONS_POLICY: &str = "permissions-policy";
pub(crate) const HEADER_COEP: &str = "cross-origin-embedder-policy";
pub(crate) const HEADER_COOP: &str = "cross-origin-opener-policy";
pub(crate) const HEADER_CORP: &str = "cross-origin-resource-policy";
pub(crate) const HEADER_ORIGIN_AGENT_CLUSTER: &str = "origin-agent-cluster";
pub(crate) const HEADER_REFERRER_POLICY: &str = "referrer-policy";
pub(crate) const HEADER_HSTS: &str = "strict-transport-security";
pub(crate) const HEADER_CONTENT_TYPE_OPTIONS: &str = "x-content-type-options";
pub(crate) const HEADER_DNS_PREFETCH_CONTROL: &str = "x-dns-prefetch-control";
pub(crate) const HEADER_DOWNLOAD_OPTIONS: &str = "x-download-options";
pub(crate) const HEADER_FRAME_OPTIONS: &str = "x-frame-options";
pub(crate) const HEADER_PERMITTED_CROSS_DOMAIN_POLICIES: &str = "x-permitted-cross-domain-policies";
pub(crate) const HEADER_POWERED_BY: &str = "x-powered-by";
pub(crate) const HEADER_XSS_PROTECTION: &str = "x-xss-protection";

pub(crate) const CSP_POLICY_NAME: &str = "Content-Security-Policy";
pub(crate) const PERMISSIONS_POLICY_NAME: &str = "Permissions-Policy";

pub(crate) const DEFAULT_SRC: &str = "default-src";
pub(crate) const BASE_URI: &str = "base-uri";
pub(crate) const FONT_SRC: &str = "font-src";
pub(crate) const FORM_ACTION: &str = "form-action";
pub(crate) const FRAME_ANCESTORS: &str = "frame-ancestors";
pub(crate) const IMG_SRC: &str = "img-src";
pub(crate) const OBJECT_SRC: &str = "object-src";
pub(crate) const SCRIPT_SRC: &str = "script-src";
pub(crate) const SCRIPT_SRC_ATTR: &str = "script-src-attr";
pub(crate) const STYLE_SRC: &str = "style-src";
pub(crate) const UPGRADE_INSECURE_REQUESTS: &str = "upgrade-insecure-requests";

pub(crate) const NONE_SOURCE: &str = "'none'";
pub(crate) const SELF_SOURCE: &str = "'self'";
pub(crate) const UNSAFE_INLINE_SOURCE: &str = "'unsafe-inline'";
pub(crate) const HTTPS_SCHEME: &str = "https:";
pub(crate) const DATA_SCHEME: &str = "data:";

/// Keywords that are only meaningful to a browser when single-quoted.
pub(crate) const QUOTED_KEYWORDS: [&str; 9] = [
    "none",
    "self",
    "strict-dynamic",
    "report-sample",
    "inline-speculation-rules",
    "unsafe-inline",
    "unsafe-eval",
    "unsafe-hashes",
    "wasm-unsafe-eval",
];
pub(crate) const QUOTED_PREFIXES: [&str; 4] = ["nonce-", "sha256-", "sha384-", "sha512-"];

pub(crate) const NONCE_PREFIX: &str = "'nonce-";
pub(crate) const HASH_PREFIX_SHA256: &str = "'sha256-";
pub(crate) const HASH_PREFIX_SHA384: &str = "'sha384-";
pub(crate) const HASH_PREFIX_SHA512: &str = "'sha512-";
pub(crate) const SUFFIX_QUOTE: &str = "'";

pub(crate) const DIRECTIVE_SEPARATOR: &str = "; ";
pub(crate) const PERMISSIONS_SEPARATOR: &str = ", ";

pub(crate) const DEFAULT_HSTS_MAX_AGE: f64 = 365.0 * 24.0 * 60.0 * 60.0;

pub(crate) const DEFAULT_NONCE_LENGTH: usize = 16;
pub(crate) const NONCE_BUFFER_POOL_SIZE: usize = 32;
pub(crate) const DEFAULT_BUFFER_CAPACITY: usize = 256;

pub(crate) const DISABLE_DEFAULT_SRC_KEY: &str = "dangerouslyDisableDefaultSrc";
