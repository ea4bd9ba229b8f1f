use crate::constants::HEADER_REFERRER_POLICY;
use crate::error::SecureHeadersError;
use crate::policies::FixedHeaderPolicy;
use rustc_hash::FxHashSet;
use serde_json::Value;
use smallvec::SmallVec;
use std::{borrow::Cow, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferrerPolicyToken {
    NoReferrer,
    NoReferrerWhenDowngrade,
    SameOrigin,
    Origin,
    StrictOrigin,
    OriginWhenCrossOrigin,
    StrictOriginWhenCrossOrigin,
    UnsafeUrl,
    /// The empty token, which defers to the browser default.
    Empty,
}

impl ReferrerPolicyToken {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoReferrer => "no-referrer",
            Self::NoReferrerWhenDowngrade => "no-referrer-when-downgrade",
            Self::SameOrigin => "same-origin",
            Self::Origin => "origin",
            Self::StrictOrigin => "strict-origin",
            Self::OriginWhenCrossOrigin => "origin-when-cross-origin",
            Self::StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
            Self::UnsafeUrl => "unsafe-url",
            Self::Empty => "",
        }
    }
}

impl FromStr for ReferrerPolicyToken {
    type Err = SecureHeadersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "no-referrer" => Self::NoReferrer,
            "no-referrer-when-downgrade" => Self::NoReferrerWhenDowngrade,
            "same-origin" => Self::SameOrigin,
            "origin" => Self::Origin,
            "strict-origin" => Self::StrictOrigin,
            "origin-when-cross-origin" => Self::OriginWhenCrossOrigin,
            "strict-origin-when-cross-origin" => Self::StrictOriginWhenCrossOrigin,
            "unsafe-url" => Self::UnsafeUrl,
            "" => Self::Empty,
            _ => return Err(SecureHeadersError::UnexpectedReferrerToken(format!("{s:?}"))),
        })
    }
}

/// `Referrer-Policy`: one token or a fallback list, joined with `,`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferrerPolicy {
    tokens: SmallVec<[ReferrerPolicyToken; 2]>,
}

impl Default for ReferrerPolicy {
    fn default() -> Self {
        Self::single(ReferrerPolicyToken::NoReferrer)
    }
}

impl ReferrerPolicy {
    #[inline]
    pub fn single(token: ReferrerPolicyToken) -> Self {
        let mut tokens = SmallVec::new();
        tokens.push(token);
        Self { tokens }
    }

    pub fn new<I>(tokens: I) -> Result<Self, SecureHeadersError>
    where
        I: IntoIterator<Item = ReferrerPolicyToken>,
    {
        let tokens: SmallVec<[ReferrerPolicyToken; 2]> = tokens.into_iter().collect();
        if tokens.is_empty() {
            return Err(SecureHeadersError::EmptyReferrerPolicy);
        }

        let mut seen = FxHashSet::default();
        for token in &tokens {
            if !seen.insert(*token) {
                return Err(SecureHeadersError::DuplicateReferrerToken(token.as_str().to_owned()));
            }
        }

        Ok(Self { tokens })
    }

    pub fn parse<I, S>(tokens: I) -> Result<Self, SecureHeadersError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = tokens
            .into_iter()
            .map(|token| token.as_ref().parse())
            .collect::<Result<SmallVec<[ReferrerPolicyToken; 2]>, _>>()?;
        Self::new(parsed)
    }

    /// Reads `{"policy": "origin"}` or `{"policy": ["no-referrer", "origin"]}`.
    /// A missing `policy` key yields the default.
    pub fn from_json(value: &Value) -> Result<Self, SecureHeadersError> {
        let policy = match value.get("policy") {
            None => return Ok(Self::default()),
            Some(policy) => policy,
        };

        match policy {
            Value::String(token) => Ok(Self::single(token.parse()?)),
            Value::Array(items) => {
                let tokens = items
                    .iter()
                    .map(|item| match item {
                        Value::String(token) => token.parse(),
                        other => Err(SecureHeadersError::UnexpectedReferrerToken(other.to_string())),
                    })
                    .collect::<Result<SmallVec<[ReferrerPolicyToken; 2]>, _>>()?;
                Self::new(tokens)
            }
            other => Err(SecureHeadersError::UnexpectedReferrerToken(other.to_string())),
        }
    }

    #[inline]
    pub fn tokens(&self) -> &[ReferrerPolicyToken] {
        &self.tokens
    }
}

impl FixedHeaderPolicy for ReferrerPolicy {
    const HEADER_NAME: &'static str = HEADER_REFERRER_POLICY;

    fn header_value(&self) -> Cow<'static, str> {
        if let [token] = self.tokens.as_slice() {
            return Cow::Borrowed(token.as_str());
        }
        Cow::Owned(
            self.tokens
                .iter()
                .map(ReferrerPolicyToken::as_str)
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}
