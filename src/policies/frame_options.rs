use crate::constants::HEADER_FRAME_OPTIONS;
use crate::error::SecureHeadersError;
use crate::policies::FixedHeaderPolicy;
use serde::Deserialize;
use std::{borrow::Cow, str::FromStr};

/// `X-Frame-Options` action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum XFrameOptions {
    Deny,
    #[default]
    SameOrigin,
}

impl XFrameOptions {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deny => "DENY",
            Self::SameOrigin => "SAMEORIGIN",
        }
    }
}

/// Case-insensitive; `same-origin` is accepted as a spelling of `SAMEORIGIN`.
impl FromStr for XFrameOptions {
    type Err = SecureHeadersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DENY" => Ok(Self::Deny),
            "SAMEORIGIN" | "SAME-ORIGIN" => Ok(Self::SameOrigin),
            _ => Err(SecureHeadersError::UnsupportedValue {
                header: "X-Frame-Options",
                value: s.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for XFrameOptions {
    type Error = SecureHeadersError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FixedHeaderPolicy for XFrameOptions {
    const HEADER_NAME: &'static str = HEADER_FRAME_OPTIONS;

    fn header_value(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("deny", "DENY" ; "lowercase deny")]
    #[test_case("DENY", "DENY" ; "uppercase deny")]
    #[test_case("sameorigin", "SAMEORIGIN" ; "lowercase sameorigin")]
    #[test_case("same-origin", "SAMEORIGIN" ; "hyphenated same origin")]
    #[test_case("SameOrigin", "SAMEORIGIN" ; "mixed case sameorigin")]
    fn actions_normalize(action: &str, expected: &str) {
        let options: XFrameOptions = action.parse().unwrap();
        assert_eq!(options.header_value(), expected);
    }

    #[test]
    fn invalid_action_is_named_in_error() {
        let err = "invalid".parse::<XFrameOptions>().unwrap_err();
        assert!(err.to_string().contains("\"invalid\""));
        assert!("allow-from".parse::<XFrameOptions>().is_err());
    }
}
