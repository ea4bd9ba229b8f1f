use crate::constants::{HEADER_COEP, HEADER_COOP, HEADER_CORP};
use crate::error::SecureHeadersError;
use crate::policies::FixedHeaderPolicy;
use serde::Deserialize;
use std::{borrow::Cow, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum CrossOriginEmbedderPolicy {
    #[default]
    RequireCorp,
    Credentialless,
    UnsafeNone,
}

impl CrossOriginEmbedderPolicy {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RequireCorp => "require-corp",
            Self::Credentialless => "credentialless",
            Self::UnsafeNone => "unsafe-none",
        }
    }
}

impl FromStr for CrossOriginEmbedderPolicy {
    type Err = SecureHeadersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "require-corp" => Ok(Self::RequireCorp),
            "credentialless" => Ok(Self::Credentialless),
            "unsafe-none" => Ok(Self::UnsafeNone),
            _ => Err(SecureHeadersError::UnsupportedValue {
                header: "Cross-Origin-Embedder-Policy",
                value: s.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for CrossOriginEmbedderPolicy {
    type Error = SecureHeadersError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for CrossOriginEmbedderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FixedHeaderPolicy for CrossOriginEmbedderPolicy {
    const HEADER_NAME: &'static str = HEADER_COEP;

    fn header_value(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum CrossOriginOpenerPolicy {
    #[default]
    SameOrigin,
    SameOriginAllowPopups,
    UnsafeNone,
}

impl CrossOriginOpenerPolicy {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SameOrigin => "same-origin",
            Self::SameOriginAllowPopups => "same-origin-allow-popups",
            Self::UnsafeNone => "unsafe-none",
        }
    }
}

impl FromStr for CrossOriginOpenerPolicy {
    type Err = SecureHeadersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "same-origin" => Ok(Self::SameOrigin),
            "same-origin-allow-popups" => Ok(Self::SameOriginAllowPopups),
            "unsafe-none" => Ok(Self::UnsafeNone),
            _ => Err(SecureHeadersError::UnsupportedValue {
                header: "Cross-Origin-Opener-Policy",
                value: s.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for CrossOriginOpenerPolicy {
    type Error = SecureHeadersError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for CrossOriginOpenerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FixedHeaderPolicy for CrossOriginOpenerPolicy {
    const HEADER_NAME: &'static str = HEADER_COOP;

    fn header_value(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum CrossOriginResourcePolicy {
    #[default]
    SameOrigin,
    SameSite,
    CrossOrigin,
}

impl CrossOriginResourcePolicy {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SameOrigin => "same-origin",
            Self::SameSite => "same-site",
            Self::CrossOrigin => "cross-origin",
        }
    }
}

impl FromStr for CrossOriginResourcePolicy {
    type Err = SecureHeadersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "same-origin" => Ok(Self::SameOrigin),
            "same-site" => Ok(Self::SameSite),
            "cross-origin" => Ok(Self::CrossOrigin),
            _ => Err(SecureHeadersError::UnsupportedValue {
                header: "Cross-Origin-Resource-Policy",
                value: s.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for CrossOriginResourcePolicy {
    type Error = SecureHeadersError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for CrossOriginResourcePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FixedHeaderPolicy for CrossOriginResourcePolicy {
    const HEADER_NAME: &'static str = HEADER_CORP;

    fn header_value(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn defaults() {
        assert_eq!(CrossOriginEmbedderPolicy::default().as_str(), "require-corp");
        assert_eq!(CrossOriginOpenerPolicy::default().as_str(), "same-origin");
        assert_eq!(CrossOriginResourcePolicy::default().as_str(), "same-origin");
    }

    #[test_case("require-corp")]
    #[test_case("credentialless")]
    #[test_case("unsafe-none")]
    fn embedder_values_parse(value: &str) {
        let policy: CrossOriginEmbedderPolicy = value.parse().unwrap();
        assert_eq!(policy.header_value(), value);
    }

    #[test]
    fn unsupported_values_name_the_value() {
        let err = "same-site".parse::<CrossOriginOpenerPolicy>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cross-Origin-Opener-Policy does not support the \"same-site\" value"
        );
        assert!("SAME-ORIGIN".parse::<CrossOriginResourcePolicy>().is_err());
    }

    #[test]
    fn deserializes_through_validation() {
        let policy: CrossOriginResourcePolicy = serde_json::from_str("\"cross-origin\"").unwrap();
        assert_eq!(policy, CrossOriginResourcePolicy::CrossOrigin);
        assert!(serde_json::from_str::<CrossOriginResourcePolicy>("\"foo\"").is_err());
    }
}
