use crate::constants::{CSP_POLICY_NAME, DISABLE_DEFAULT_SRC_KEY, NONCE_PREFIX, SUFFIX_QUOTE};
use crate::core::source::Source;
use crate::error::SecureHeadersError;
use crate::security::nonce::RequestNonce;
use actix_web::{HttpMessage, HttpRequest};
use serde_json::Value;
use smallvec::SmallVec;
use std::{borrow::Cow, fmt, sync::Arc};

pub type DirectiveTokens = SmallVec<[DirectiveToken; 4]>;

/// Computes a directive token from the request being answered.
///
/// Providers run synchronously while the response headers are written, so
/// they should stay cheap (reading a request extension, formatting a nonce).
pub trait RequestValueProvider: Send + Sync {
    fn provide(&self, req: &HttpRequest) -> Result<String, SecureHeadersError>;
}

impl<F> RequestValueProvider for F
where
    F: Fn(&HttpRequest) -> String + Send + Sync,
{
    fn provide(&self, req: &HttpRequest) -> Result<String, SecureHeadersError> {
        Ok(self(req))
    }
}

/// Renders the [`RequestNonce`] stored in the request extensions as
/// `'nonce-<value>'`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonceProvider;

impl RequestValueProvider for NonceProvider {
    fn provide(&self, req: &HttpRequest) -> Result<String, SecureHeadersError> {
        req.extensions()
            .get::<RequestNonce>()
            .map(|nonce| format!("{}{}{}", NONCE_PREFIX, nonce.as_str(), SUFFIX_QUOTE))
            .ok_or_else(|| SecureHeadersError::MissingNonce {
                directive: String::new(),
            })
    }
}

#[derive(Clone)]
pub enum DirectiveToken {
    Literal(Cow<'static, str>),
    Deferred(Arc<dyn RequestValueProvider>),
}

impl DirectiveToken {
    #[inline]
    pub fn literal(value: impl Into<Cow<'static, str>>) -> Self {
        DirectiveToken::Literal(value.into())
    }

    pub fn deferred<P>(provider: P) -> Self
    where
        P: RequestValueProvider + 'static,
    {
        DirectiveToken::Deferred(Arc::new(provider))
    }

    /// A token resolved to the nonce generated for the current request.
    #[inline]
    pub fn request_nonce() -> Self {
        Self::deferred(NonceProvider)
    }

    #[inline]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            DirectiveToken::Literal(value) => Some(value),
            DirectiveToken::Deferred(_) => None,
        }
    }

    #[inline]
    pub fn is_deferred(&self) -> bool {
        matches!(self, DirectiveToken::Deferred(_))
    }
}

impl fmt::Debug for DirectiveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveToken::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            DirectiveToken::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<&'static str> for DirectiveToken {
    fn from(value: &'static str) -> Self {
        DirectiveToken::Literal(Cow::Borrowed(value))
    }
}

impl From<String> for DirectiveToken {
    fn from(value: String) -> Self {
        DirectiveToken::Literal(Cow::Owned(value))
    }
}

impl From<Source> for DirectiveToken {
    fn from(source: Source) -> Self {
        match source.as_static_str() {
            Some(keyword) => DirectiveToken::Literal(Cow::Borrowed(keyword)),
            None => DirectiveToken::Literal(Cow::Owned(source.to_string())),
        }
    }
}

/// Raw value of a directive as supplied by the caller.
#[derive(Debug, Clone)]
pub enum DirectiveValue {
    /// Removes the directive, including the matching default.
    Disabled,
    /// Only valid for `default-src`: intentionally ship a policy without it.
    DangerouslyDisableDefaultSrc,
    Literal(Cow<'static, str>),
    List(DirectiveTokens),
}

impl DirectiveValue {
    pub fn list<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<DirectiveToken>,
    {
        DirectiveValue::List(tokens.into_iter().map(Into::into).collect())
    }

    #[inline]
    pub fn empty() -> Self {
        DirectiveValue::List(SmallVec::new())
    }

    /// Reads a directive value from its JSON form: `null`, a string, an array
    /// of strings, or `{"dangerouslyDisableDefaultSrc": true}`.
    pub fn from_json(directive: &str, value: &Value) -> Result<Self, SecureHeadersError> {
        let invalid = || SecureHeadersError::InvalidDirectiveValue {
            directive: directive.to_owned(),
            value: value.to_string(),
        };

        match value {
            Value::Null => Ok(DirectiveValue::Disabled),
            Value::String(s) => Ok(DirectiveValue::Literal(Cow::Owned(s.clone()))),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(|s| DirectiveToken::from(s.to_owned()))
                        .ok_or_else(invalid)
                })
                .collect::<Result<DirectiveTokens, _>>()
                .map(DirectiveValue::List),
            Value::Object(map)
                if map.len() == 1 && map.get(DISABLE_DEFAULT_SRC_KEY) == Some(&Value::Bool(true)) =>
            {
                Ok(DirectiveValue::DangerouslyDisableDefaultSrc)
            }
            _ => Err(invalid()),
        }
    }
}

impl From<&'static str> for DirectiveValue {
    fn from(value: &'static str) -> Self {
        DirectiveValue::Literal(Cow::Borrowed(value))
    }
}

impl From<String> for DirectiveValue {
    fn from(value: String) -> Self {
        DirectiveValue::Literal(Cow::Owned(value))
    }
}

impl<T: Into<DirectiveToken>> From<Vec<T>> for DirectiveValue {
    fn from(tokens: Vec<T>) -> Self {
        DirectiveValue::list(tokens)
    }
}

impl<T: Into<DirectiveToken>, const N: usize> From<[T; N]> for DirectiveValue {
    fn from(tokens: [T; N]) -> Self {
        DirectiveValue::list(tokens)
    }
}

impl<T: Into<DirectiveValue>> From<Option<T>> for DirectiveValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DirectiveValue::Disabled, Into::into)
    }
}

/// Inserts `-` before every uppercase ASCII letter and lowercases the result,
/// so `scriptSrc` becomes `script-src`.
pub fn dashify(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

pub(crate) fn validate_directive_name(raw: &str) -> Result<(), SecureHeadersError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        return Err(SecureHeadersError::InvalidDirectiveName {
            policy: CSP_POLICY_NAME,
            name: raw.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dashify_converts_camel_case() {
        assert_eq!(dashify("scriptSrcAttr"), "script-src-attr");
        assert_eq!(dashify("default-src"), "default-src");
        assert_eq!(dashify("DefaultSrc"), "-default-src");
    }

    #[test]
    fn directive_names_are_restricted() {
        assert!(validate_directive_name("script-src").is_ok());
        assert!(validate_directive_name("scriptSrc2").is_ok());
        assert!(validate_directive_name("").is_err());
        assert!(validate_directive_name("invalid@name").is_err());
        assert!(validate_directive_name("script src").is_err());
    }

    #[test]
    fn json_values_map_to_variants() {
        assert!(matches!(
            DirectiveValue::from_json("object-src", &Value::Null).unwrap(),
            DirectiveValue::Disabled
        ));
        assert!(matches!(
            DirectiveValue::from_json("default-src", &json!({ "dangerouslyDisableDefaultSrc": true }))
                .unwrap(),
            DirectiveValue::DangerouslyDisableDefaultSrc
        ));
        match DirectiveValue::from_json("img-src", &json!(["'self'", "data:"])).unwrap() {
            DirectiveValue::List(tokens) => assert_eq!(tokens.len(), 2),
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn json_rejects_falsy_and_objects() {
        let err = DirectiveValue::from_json("default-src", &json!(false)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Content-Security-Policy received an invalid directive value for \"default-src\": false"
        );
        assert!(DirectiveValue::from_json("default-src", &json!({ "a": 1 })).is_err());
        assert!(DirectiveValue::from_json("default-src", &json!(["'self'", 3])).is_err());
    }
}
