use crate::constants::{
    BASE_URI, CSP_POLICY_NAME, DATA_SCHEME, DEFAULT_BUFFER_CAPACITY, DEFAULT_SRC,
    DIRECTIVE_SEPARATOR, FONT_SRC, FORM_ACTION, FRAME_ANCESTORS, HEADER_CSP,
    HEADER_CSP_REPORT_ONLY, HTTPS_SCHEME, IMG_SRC, NONE_SOURCE, OBJECT_SRC, SCRIPT_SRC,
    SCRIPT_SRC_ATTR, SELF_SOURCE, STYLE_SRC, UNSAFE_INLINE_SOURCE, UPGRADE_INSECURE_REQUESTS,
};
use crate::core::directives::{
    dashify, validate_directive_name, DirectiveToken, DirectiveTokens, DirectiveValue,
};
use crate::core::source::validate_token;
use crate::error::SecureHeadersError;
use crate::middleware::HeaderPolicy;
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use actix_web::HttpRequest;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde_json::Value;
use smallvec::SmallVec;
use std::borrow::Cow;

/// Returns the built-in directive set.
///
/// A new map is built on every call; mutating the result never affects other
/// callers or policies built afterwards.
pub fn default_directives() -> IndexMap<String, Vec<String>> {
    let entries: [(&str, &[&str]); 11] = [
        (DEFAULT_SRC, &[SELF_SOURCE]),
        (BASE_URI, &[SELF_SOURCE]),
        (FONT_SRC, &[SELF_SOURCE, HTTPS_SCHEME, DATA_SCHEME]),
        (FORM_ACTION, &[SELF_SOURCE]),
        (FRAME_ANCESTORS, &[SELF_SOURCE]),
        (IMG_SRC, &[SELF_SOURCE, DATA_SCHEME]),
        (OBJECT_SRC, &[NONE_SOURCE]),
        (SCRIPT_SRC, &[SELF_SOURCE]),
        (SCRIPT_SRC_ATTR, &[NONE_SOURCE]),
        (STYLE_SRC, &[SELF_SOURCE, HTTPS_SCHEME, UNSAFE_INLINE_SOURCE]),
        (UPGRADE_INSECURE_REQUESTS, &[]),
    ];

    entries
        .into_iter()
        .map(|(name, tokens)| {
            (
                name.to_owned(),
                tokens.iter().map(|t| (*t).to_owned()).collect(),
            )
        })
        .collect()
}

fn default_directive_tokens() -> impl Iterator<Item = (String, DirectiveTokens)> {
    default_directives().into_iter().map(|(name, tokens)| {
        let tokens = tokens.into_iter().map(DirectiveToken::from).collect();
        (name, tokens)
    })
}

/// A validated Content-Security-Policy, ready to be rendered per request.
#[derive(Debug, Clone)]
pub struct ContentSecurityPolicy {
    directives: IndexMap<Cow<'static, str>, DirectiveTokens>,
    report_only: bool,
}

impl ContentSecurityPolicy {
    #[inline]
    pub fn builder() -> ContentSecurityPolicyBuilder {
        ContentSecurityPolicyBuilder::new()
    }

    #[inline]
    pub fn header_name(&self) -> HeaderName {
        if self.report_only {
            HeaderName::from_static(HEADER_CSP_REPORT_ONLY)
        } else {
            HeaderName::from_static(HEADER_CSP)
        }
    }

    #[inline]
    pub fn is_report_only(&self) -> bool {
        self.report_only
    }

    #[inline]
    pub fn get_directive(&self, name: &str) -> Option<&[DirectiveToken]> {
        self.directives.get(name).map(|tokens| tokens.as_slice())
    }

    #[inline]
    pub fn directive_names(&self) -> impl Iterator<Item = &str> {
        self.directives.keys().map(|name| name.as_ref())
    }

    #[inline]
    pub fn has_deferred_tokens(&self) -> bool {
        self.directives
            .values()
            .any(|tokens| tokens.iter().any(DirectiveToken::is_deferred))
    }

    /// Serializes the policy for `req`, resolving deferred tokens.
    pub fn render(&self, req: &HttpRequest) -> Result<String, SecureHeadersError> {
        let mut out = String::with_capacity(DEFAULT_BUFFER_CAPACITY);

        for (index, (name, tokens)) in self.directives.iter().enumerate() {
            if index > 0 {
                out.push_str(DIRECTIVE_SEPARATOR);
            }
            out.push_str(name);

            for token in tokens {
                out.push(' ');
                match token {
                    DirectiveToken::Literal(value) => out.push_str(value),
                    DirectiveToken::Deferred(provider) => {
                        let value = provider.provide(req).map_err(|err| match err {
                            SecureHeadersError::MissingNonce { .. } => {
                                SecureHeadersError::MissingNonce {
                                    directive: name.to_string(),
                                }
                            }
                            other => other,
                        })?;
                        validate_token(name, &value)?;
                        out.push_str(&value);
                    }
                }
            }
        }

        Ok(out)
    }

    pub fn header_value(&self, req: &HttpRequest) -> Result<HeaderValue, SecureHeadersError> {
        Ok(HeaderValue::try_from(self.render(req)?)?)
    }
}

impl HeaderPolicy for ContentSecurityPolicy {
    fn apply(&self, req: &HttpRequest, headers: &mut HeaderMap) -> Result<(), SecureHeadersError> {
        let value = self.header_value(req)?;
        headers.insert(self.header_name(), value);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ContentSecurityPolicyBuilder {
    use_defaults: bool,
    directives: Option<Vec<(Cow<'static, str>, DirectiveValue)>>,
    report_only: bool,
}

impl Default for ContentSecurityPolicyBuilder {
    fn default() -> Self {
        Self {
            use_defaults: true,
            directives: None,
            report_only: false,
        }
    }
}

impl ContentSecurityPolicyBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn use_defaults(mut self, enabled: bool) -> Self {
        self.use_defaults = enabled;
        self
    }

    #[inline]
    pub fn report_only(mut self, enabled: bool) -> Self {
        self.report_only = enabled;
        self
    }

    /// Appends a directive. Names may be kebab-case or camelCase.
    pub fn directive(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<DirectiveValue>,
    ) -> Self {
        self.directives
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    /// Replaces the configured directives. An empty iterator yields an
    /// explicitly empty set, unlike never configuring directives at all.
    pub fn directives<I, N, V>(mut self, directives: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<Cow<'static, str>>,
        V: Into<DirectiveValue>,
    {
        self.directives = Some(
            directives
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        );
        self
    }

    #[inline]
    pub fn disable_default_src(self) -> Self {
        self.directive(DEFAULT_SRC, DirectiveValue::DangerouslyDisableDefaultSrc)
    }

    /// Reads `{"useDefaults": .., "directives": {..}, "reportOnly": ..}`.
    pub fn from_json(value: &Value) -> Result<Self, SecureHeadersError> {
        let mut builder = Self::new();
        let Some(options) = value.as_object() else {
            return Ok(builder);
        };

        if let Some(use_defaults) = options.get("useDefaults").and_then(Value::as_bool) {
            builder = builder.use_defaults(use_defaults);
        }
        if let Some(report_only) = options.get("reportOnly").and_then(Value::as_bool) {
            builder = builder.report_only(report_only);
        }
        if let Some(directives) = options.get("directives").and_then(Value::as_object) {
            let parsed = directives
                .iter()
                .map(|(name, raw)| {
                    DirectiveValue::from_json(&dashify(name), raw)
                        .map(|value| (Cow::Owned(name.clone()), value))
                })
                .collect::<Result<Vec<_>, _>>()?;
            builder.directives = Some(parsed);
        }

        Ok(builder)
    }

    pub fn build(self) -> Result<ContentSecurityPolicy, SecureHeadersError> {
        let has_custom_directives = self.directives.is_some();
        let raw_directives = match self.directives {
            Some(directives) => directives,
            None => default_directive_tokens()
                .map(|(name, tokens)| (Cow::Owned(name), DirectiveValue::List(tokens)))
                .collect(),
        };

        let mut result: IndexMap<Cow<'static, str>, DirectiveTokens> = IndexMap::new();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut disabled: FxHashSet<String> = FxHashSet::default();

        for (raw_name, raw_value) in raw_directives {
            validate_directive_name(&raw_name)?;
            let name = dashify(&raw_name);

            if !seen.insert(name.clone()) {
                return Err(SecureHeadersError::DuplicateDirective {
                    policy: CSP_POLICY_NAME,
                    name,
                });
            }

            let tokens: DirectiveTokens = match raw_value {
                DirectiveValue::Disabled => {
                    if name == DEFAULT_SRC {
                        return Err(SecureHeadersError::NullDefaultSrc);
                    }
                    disabled.insert(name);
                    continue;
                }
                DirectiveValue::DangerouslyDisableDefaultSrc => {
                    if name == DEFAULT_SRC {
                        disabled.insert(name);
                        continue;
                    }
                    return Err(SecureHeadersError::MisplacedDisableDefaultSrc(name));
                }
                DirectiveValue::Literal(value) => {
                    let mut tokens = SmallVec::new();
                    tokens.push(DirectiveToken::Literal(value));
                    tokens
                }
                DirectiveValue::List(tokens) => tokens,
            };

            for literal in tokens.iter().filter_map(DirectiveToken::as_literal) {
                validate_token(&name, literal)?;
            }

            result.insert(Cow::Owned(name), tokens);
        }

        if self.use_defaults {
            for (name, tokens) in default_directive_tokens() {
                if !result.contains_key(name.as_str()) && !disabled.contains(&name) {
                    result.insert(Cow::Owned(name), tokens);
                }
            }
        }

        if result.is_empty() {
            return Err(SecureHeadersError::NoDirectives(CSP_POLICY_NAME));
        }

        if !result.contains_key(DEFAULT_SRC) && !disabled.contains(DEFAULT_SRC) {
            return Err(SecureHeadersError::MissingDefaultSrc);
        }

        log::debug!(
            "built {} with {} directives (custom directives: {}, report-only: {})",
            CSP_POLICY_NAME,
            result.len(),
            has_custom_directives,
            self.report_only
        );

        Ok(ContentSecurityPolicy {
            directives: result,
            report_only: self.report_only,
        })
    }
}
