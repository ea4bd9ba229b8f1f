//! Headers that take no options at all.

use crate::constants::{
    HEADER_CONTENT_TYPE_OPTIONS, HEADER_DOWNLOAD_OPTIONS, HEADER_ORIGIN_AGENT_CLUSTER,
    HEADER_XSS_PROTECTION,
};
use crate::policies::FixedHeaderPolicy;
use std::borrow::Cow;

/// `Origin-Agent-Cluster: ?1`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OriginAgentCluster;

impl FixedHeaderPolicy for OriginAgentCluster {
    const HEADER_NAME: &'static str = HEADER_ORIGIN_AGENT_CLUSTER;

    fn header_value(&self) -> Cow<'static, str> {
        Cow::Borrowed("?1")
    }
}

/// `X-Content-Type-Options: nosniff`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XContentTypeOptions;

impl FixedHeaderPolicy for XContentTypeOptions {
    const HEADER_NAME: &'static str = HEADER_CONTENT_TYPE_OPTIONS;

    fn header_value(&self) -> Cow<'static, str> {
        Cow::Borrowed("nosniff")
    }
}

/// `X-Download-Options: noopen`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XDownloadOptions;

impl FixedHeaderPolicy for XDownloadOptions {
    const HEADER_NAME: &'static str = HEADER_DOWNLOAD_OPTIONS;

    fn header_value(&self) -> Cow<'static, str> {
        Cow::Borrowed("noopen")
    }
}

/// `X-XSS-Protection: 0`. The legacy auditor is switched off; it
/// introduced more vulnerabilities than it prevented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XXssProtection;

impl FixedHeaderPolicy for XXssProtection {
    const HEADER_NAME: &'static str = HEADER_XSS_PROTECTION;

    fn header_value(&self) -> Cow<'static, str> {
        Cow::Borrowed("0")
    }
}
