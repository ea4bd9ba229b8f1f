use crate::constants::HEADER_PERMITTED_CROSS_DOMAIN_POLICIES;
use crate::error::SecureHeadersError;
use crate::policies::FixedHeaderPolicy;
use serde::Deserialize;
use std::{borrow::Cow, str::FromStr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum XPermittedCrossDomainPolicies {
    #[default]
    None,
    MasterOnly,
    ByContentType,
    All,
}

impl XPermittedCrossDomainPolicies {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::MasterOnly => "master-only",
            Self::ByContentType => "by-content-type",
            Self::All => "all",
        }
    }
}

impl FromStr for XPermittedCrossDomainPolicies {
    type Err = SecureHeadersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "master-only" => Ok(Self::MasterOnly),
            "by-content-type" => Ok(Self::ByContentType),
            "all" => Ok(Self::All),
            _ => Err(SecureHeadersError::UnsupportedValue {
                header: "X-Permitted-Cross-Domain-Policies",
                value: s.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for XPermittedCrossDomainPolicies {
    type Error = SecureHeadersError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FixedHeaderPolicy for XPermittedCrossDomainPolicies {
    const HEADER_NAME: &'static str = HEADER_PERMITTED_CROSS_DOMAIN_POLICIES;

    fn header_value(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.as_str())
    }
}
