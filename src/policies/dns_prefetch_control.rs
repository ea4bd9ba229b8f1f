use crate::constants::HEADER_DNS_PREFETCH_CONTROL;
use crate::policies::FixedHeaderPolicy;
use serde::Deserialize;
use std::borrow::Cow;

/// `X-DNS-Prefetch-Control`: `off` unless prefetching is explicitly allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct XDnsPrefetchControl {
    pub allow: bool,
}

impl XDnsPrefetchControl {
    #[inline]
    pub const fn allow(allow: bool) -> Self {
        Self { allow }
    }
}

impl FixedHeaderPolicy for XDnsPrefetchControl {
    const HEADER_NAME: &'static str = HEADER_DNS_PREFETCH_CONTROL;

    fn header_value(&self) -> Cow<'static, str> {
        Cow::Borrowed(if self.allow { "on" } else { "off" })
    }
}
