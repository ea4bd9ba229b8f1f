use crate::constants::{DEFAULT_HSTS_MAX_AGE, HEADER_HSTS};
use crate::error::SecureHeadersError;
use crate::policies::FixedHeaderPolicy;
use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;

const HEADER: &str = "Strict-Transport-Security";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StrictTransportSecurityOptions {
    /// Seconds; fractional values are floored.
    pub max_age: f64,
    pub include_sub_domains: bool,
    pub preload: bool,
}

impl Default for StrictTransportSecurityOptions {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_HSTS_MAX_AGE,
            include_sub_domains: true,
            preload: false,
        }
    }
}

impl StrictTransportSecurityOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_max_age(mut self, max_age: f64) -> Self {
        self.max_age = max_age;
        self
    }

    #[inline]
    pub fn include_sub_domains(mut self, include: bool) -> Self {
        self.include_sub_domains = include;
        self
    }

    #[inline]
    pub fn preload(mut self, preload: bool) -> Self {
        self.preload = preload;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrictTransportSecurity {
    header_value: String,
}

impl StrictTransportSecurity {
    pub fn new(options: StrictTransportSecurityOptions) -> Result<Self, SecureHeadersError> {
        let max_age = parse_max_age(options.max_age)?;

        let mut parts = Vec::with_capacity(3);
        parts.push(format!("max-age={max_age}"));
        if options.include_sub_domains {
            parts.push("includeSubDomains".to_owned());
        }
        if options.preload {
            parts.push("preload".to_owned());
        }

        Ok(Self {
            header_value: parts.join("; "),
        })
    }

    /// Reads `{"maxAge": .., "includeSubDomains": .., "preload": ..}`.
    pub fn from_json(value: &Value) -> Result<Self, SecureHeadersError> {
        if let Some(object) = value.as_object() {
            if object.contains_key("maxage") {
                return Err(SecureHeadersError::MisspelledOption {
                    header: HEADER,
                    found: "maxage",
                    expected: "maxAge",
                });
            }
            if object.contains_key("includeSubdomains") {
                return Err(SecureHeadersError::MisspelledOption {
                    header: HEADER,
                    found: "includeSubdomains",
                    expected: "includeSubDomains",
                });
            }
        }
        let options = StrictTransportSecurityOptions::deserialize(value)?;
        Self::new(options)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.header_value
    }
}

impl Default for StrictTransportSecurity {
    fn default() -> Self {
        Self {
            header_value: format!("max-age={}; includeSubDomains", DEFAULT_HSTS_MAX_AGE as u64),
        }
    }
}

impl FixedHeaderPolicy for StrictTransportSecurity {
    const HEADER_NAME: &'static str = HEADER_HSTS;

    fn header_value(&self) -> Cow<'static, str> {
        Cow::Owned(self.header_value.clone())
    }
}

fn parse_max_age(value: f64) -> Result<u64, SecureHeadersError> {
    // `u64::MAX as f64` rounds up to 2^64, the first value that no longer fits.
    if value.is_finite() && value >= 0.0 && value < u64::MAX as f64 {
        Ok(value.floor() as u64)
    } else {
        Err(SecureHeadersError::InvalidMaxAge(value.to_string()))
    }
}
