use crate::constants::{HEADER_PERMISSIONS_POLICY, PERMISSIONS_POLICY_NAME, PERMISSIONS_SEPARATOR};
use crate::error::SecureHeadersError;
use crate::policies::FixedHeaderPolicy;
use rustc_hash::FxHashSet;
use serde_json::Value;
use std::borrow::Cow;

const UNQUOTED_ALLOWLIST_TOKENS: [&str; 4] = ["*", "none", "self", "src"];

/// Allow-list for one Permissions-Policy feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionValue {
    /// `true` allows every origin, `false` none.
    Allow(bool),
    List(Vec<String>),
}

impl PermissionValue {
    pub fn list<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PermissionValue::List(origins.into_iter().map(Into::into).collect())
    }

    fn serialize(&self) -> String {
        match self {
            PermissionValue::Allow(true) => "(*)".to_owned(),
            PermissionValue::Allow(false) => "()".to_owned(),
            PermissionValue::List(items) => match items.as_slice() {
                [] => "()".to_owned(),
                [only] if only == "*" || only == "none" => format!("({})", only),
                items => {
                    let allow_list = items
                        .iter()
                        .map(|item| {
                            if UNQUOTED_ALLOWLIST_TOKENS.contains(&item.as_str()) {
                                item.clone()
                            } else {
                                format!("\"{}\"", item)
                            }
                        })
                        .collect::<Vec<_>>();
                    format!("({})", allow_list.join(" "))
                }
            },
        }
    }

    fn from_json(directive: &str, value: &Value) -> Result<Self, SecureHeadersError> {
        let invalid = || SecureHeadersError::InvalidPermissionValue {
            directive: directive.to_owned(),
            value: value.to_string(),
        };

        match value {
            Value::Bool(allow) => Ok(PermissionValue::Allow(*allow)),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned).ok_or_else(invalid))
                .collect::<Result<Vec<_>, _>>()
                .map(PermissionValue::List),
            _ => Err(invalid()),
        }
    }
}

impl From<bool> for PermissionValue {
    fn from(allow: bool) -> Self {
        PermissionValue::Allow(allow)
    }
}

impl<S: Into<String>> From<Vec<S>> for PermissionValue {
    fn from(origins: Vec<S>) -> Self {
        PermissionValue::list(origins)
    }
}

/// Inserts `-` between a lowercase letter or digit and the following
/// uppercase letter, then lowercases: `chUaWow64` becomes `ch-ua-wow64`.
fn dashify_feature(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut previous: Option<char> = None;
    for c in name.chars() {
        if c.is_ascii_uppercase()
            && previous.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            out.push('-');
        }
        out.push(c.to_ascii_lowercase());
        previous = Some(c);
    }
    out
}

/// A compiled `Permissions-Policy` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionsPolicy {
    header_value: String,
}

impl PermissionsPolicy {
    #[inline]
    pub fn builder() -> PermissionsPolicyBuilder {
        PermissionsPolicyBuilder::default()
    }

    /// Reads a flat `{"camera": true, "geolocation": ["self"]}` object.
    pub fn from_json(value: &Value) -> Result<Self, SecureHeadersError> {
        let mut builder = Self::builder();
        if let Some(features) = value.as_object() {
            for (name, raw) in features {
                let value = PermissionValue::from_json(&dashify_feature(name), raw)?;
                builder = builder.feature(name.clone(), value);
            }
        }
        builder.build()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.header_value
    }
}

impl FixedHeaderPolicy for PermissionsPolicy {
    const HEADER_NAME: &'static str = HEADER_PERMISSIONS_POLICY;

    fn header_value(&self) -> Cow<'static, str> {
        Cow::Owned(self.header_value.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PermissionsPolicyBuilder {
    features: Vec<(String, PermissionValue)>,
}

impl PermissionsPolicyBuilder {
    pub fn feature(mut self, name: impl Into<String>, value: impl Into<PermissionValue>) -> Self {
        self.features.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<PermissionsPolicy, SecureHeadersError> {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut entries = Vec::with_capacity(self.features.len());

        for (raw_name, value) in self.features {
            let name = dashify_feature(&raw_name);
            if !seen.insert(name.clone()) {
                return Err(SecureHeadersError::DuplicateDirective {
                    policy: PERMISSIONS_POLICY_NAME,
                    name,
                });
            }
            entries.push(format!("{}={}", name, value.serialize()));
        }

        if entries.is_empty() {
            return Err(SecureHeadersError::NoDirectives(PERMISSIONS_POLICY_NAME));
        }

        Ok(PermissionsPolicy {
            header_value: entries.join(PERMISSIONS_SEPARATOR),
        })
    }
}
