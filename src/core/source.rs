use crate::constants::{
    NONCE_PREFIX, NONE_SOURCE, QUOTED_KEYWORDS, QUOTED_PREFIXES, SELF_SOURCE, SUFFIX_QUOTE,
    UNSAFE_INLINE_SOURCE,
};
use crate::error::SecureHeadersError;
use crate::security::hash::HashAlgorithm;
use std::{borrow::Cow, fmt};

/// Typed shorthand for common CSP source expressions.
///
/// Keyword, nonce and hash variants always render quoted. `Host` and `Scheme`
/// are written as given and still go through [`validate_token`] when the
/// policy is built, so `Host("self")` is rejected there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    None,
    Self_,
    UnsafeInline,
    UnsafeEval,
    StrictDynamic,
    ReportSample,
    WasmUnsafeEval,
    UnsafeHashes,
    Host(Cow<'static, str>),
    Scheme(Cow<'static, str>),
    Nonce(Cow<'static, str>),
    Hash {
        algorithm: HashAlgorithm,
        value: Cow<'static, str>,
    },
}

impl Source {
    #[inline]
    pub const fn as_static_str(&self) -> Option<&'static str> {
        match self {
            Source::None => Some(NONE_SOURCE),
            Source::Self_ => Some(SELF_SOURCE),
            Source::UnsafeInline => Some(UNSAFE_INLINE_SOURCE),
            Source::UnsafeEval => Some("'unsafe-eval'"),
            Source::StrictDynamic => Some("'strict-dynamic'"),
            Source::ReportSample => Some("'report-sample'"),
            Source::WasmUnsafeEval => Some("'wasm-unsafe-eval'"),
            Source::UnsafeHashes => Some("'unsafe-hashes'"),
            _ => None,
        }
    }

    #[inline]
    pub fn contains_nonce(&self) -> bool {
        matches!(self, Source::Nonce(_))
    }

    #[inline]
    pub fn contains_hash(&self) -> bool {
        matches!(self, Source::Hash { .. })
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(keyword) = self.as_static_str() {
            return f.write_str(keyword);
        }
        match self {
            Source::Host(host) => f.write_str(host),
            Source::Scheme(scheme) => write!(f, "{}:", scheme.trim_end_matches(':')),
            Source::Nonce(nonce) => write!(f, "{}{}{}", NONCE_PREFIX, nonce, SUFFIX_QUOTE),
            Source::Hash { algorithm, value } => {
                write!(f, "{}{}{}", algorithm.prefix(), value, SUFFIX_QUOTE)
            }
            _ => Ok(()),
        }
    }
}

/// Returns `true` when `value` is a CSP keyword or nonce/hash expression
/// written without its mandatory single quotes.
#[inline]
pub fn needs_quotes(value: &str) -> bool {
    QUOTED_KEYWORDS.contains(&value) || QUOTED_PREFIXES.iter().any(|p| value.starts_with(p))
}

/// Rejects `;` and `,`, which would split the header into extra directives
/// or extra policies, and bytes a header value cannot carry.
#[inline]
pub(crate) fn check_delimiters(directive: &str, value: &str) -> Result<(), SecureHeadersError> {
    if value.contains([';', ',']) || value.bytes().any(is_control_byte) {
        return Err(SecureHeadersError::InvalidDirectiveValue {
            directive: directive.to_owned(),
            value: format!("{:?}", value),
        });
    }
    Ok(())
}

#[inline]
fn is_control_byte(b: u8) -> bool {
    (b < 0x20 && b != b'\t') || b == 0x7f
}

/// Validates one directive token against the CSP value grammar.
pub fn validate_token(directive: &str, value: &str) -> Result<(), SecureHeadersError> {
    check_delimiters(directive, value)?;
    if needs_quotes(value) {
        return Err(SecureHeadersError::UnquotedDirectiveValue {
            directive: directive.to_owned(),
            value: value.to_owned(),
        });
    }
    Ok(())
}
