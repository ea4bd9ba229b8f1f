use crate::core::permissions::PermissionsPolicy;
use crate::core::policy::ContentSecurityPolicyBuilder;
use crate::error::SecureHeadersError;
use crate::middleware::HeaderPolicy;
use crate::policies::{
    CrossOriginEmbedderPolicy, CrossOriginOpenerPolicy, CrossOriginResourcePolicy,
    FixedHeaderPolicy, OriginAgentCluster, ReferrerPolicy, RemoveHeader, StaticHeader,
    StrictTransportSecurity, XContentTypeOptions, XDnsPrefetchControl, XDownloadOptions,
    XFrameOptions, XPermittedCrossDomainPolicies, XXssProtection,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// How one header is configured inside [`SecureHeadersConfig`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PolicySetting<T> {
    /// Not mentioned; the header's own default applies.
    #[default]
    Unset,
    Enabled,
    Disabled,
    Custom(T),
}

impl<T: Default + Clone> PolicySetting<T> {
    /// The options to build from, or `None` when the header is off.
    pub fn resolve(&self, enabled_by_default: bool) -> Option<T> {
        match self {
            PolicySetting::Unset if enabled_by_default => Some(T::default()),
            PolicySetting::Unset | PolicySetting::Disabled => None,
            PolicySetting::Enabled => Some(T::default()),
            PolicySetting::Custom(options) => Some(options.clone()),
        }
    }
}

impl<T> From<bool> for PolicySetting<T> {
    fn from(enabled: bool) -> Self {
        if enabled {
            PolicySetting::Enabled
        } else {
            PolicySetting::Disabled
        }
    }
}

/// Options for every header the aggregate middleware can emit.
///
/// Everything is on by default except `Cross-Origin-Embedder-Policy` and
/// `Permissions-Policy`. Option-less headers are plain toggles where `None`
/// means enabled.
#[derive(Debug, Clone, Default)]
pub struct SecureHeadersConfig {
    pub content_security_policy: PolicySetting<ContentSecurityPolicyBuilder>,
    pub cross_origin_embedder_policy: PolicySetting<CrossOriginEmbedderPolicy>,
    pub cross_origin_opener_policy: PolicySetting<CrossOriginOpenerPolicy>,
    pub cross_origin_resource_policy: PolicySetting<CrossOriginResourcePolicy>,
    pub origin_agent_cluster: Option<bool>,
    pub referrer_policy: PolicySetting<ReferrerPolicy>,
    pub strict_transport_security: PolicySetting<StrictTransportSecurity>,
    pub x_content_type_options: Option<bool>,
    pub x_dns_prefetch_control: PolicySetting<XDnsPrefetchControl>,
    pub x_download_options: Option<bool>,
    pub x_frame_options: PolicySetting<XFrameOptions>,
    pub x_permitted_cross_domain_policies: PolicySetting<XPermittedCrossDomainPolicies>,
    /// `true` (the default) strips `X-Powered-By` from responses.
    pub x_powered_by: Option<bool>,
    pub x_xss_protection: Option<bool>,
    pub permissions_policy: Option<PermissionsPolicy>,
}

#[derive(Deserialize)]
struct CrossOriginOptions<T> {
    #[serde(default)]
    policy: Option<T>,
}

#[derive(Deserialize)]
struct FrameOptions {
    #[serde(default)]
    action: Option<XFrameOptions>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PermittedPoliciesOptions {
    #[serde(default)]
    permitted_policies: Option<XPermittedCrossDomainPolicies>,
}

const KNOWN_KEYS: [&str; 24] = [
    "contentSecurityPolicy",
    "crossOriginEmbedderPolicy",
    "crossOriginOpenerPolicy",
    "crossOriginResourcePolicy",
    "originAgentCluster",
    "referrerPolicy",
    "strictTransportSecurity",
    "hsts",
    "xContentTypeOptions",
    "noSniff",
    "xDnsPrefetchControl",
    "dnsPrefetchControl",
    "xDownloadOptions",
    "ieNoOpen",
    "xFrameOptions",
    "frameguard",
    "xPermittedCrossDomainPolicies",
    "permittedCrossDomainPolicies",
    "xPoweredBy",
    "hidePoweredBy",
    "xXssProtection",
    "xssFilter",
    "permissionsPolicy",
    "permissionPolicy",
];

impl SecureHeadersConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, SecureHeadersError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(&value)
    }

    /// Reads the camelCase options document, including the legacy aliases
    /// (`hsts`, `noSniff`, `frameguard`, ...).
    pub fn from_json(value: &Value) -> Result<Self, SecureHeadersError> {
        let object = match value {
            Value::Object(object) => object,
            Value::Null => return Ok(Self::default()),
            _ => return Err(SecureHeadersError::InvalidOption("secureHeaders".to_owned())),
        };

        for key in object.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                log::warn!("Ignoring unknown secure headers option `{}`", key);
            }
        }

        let mut config = Self::new();

        config.content_security_policy = setting(
            object.get("contentSecurityPolicy"),
            "contentSecurityPolicy",
            ContentSecurityPolicyBuilder::from_json,
        )?;
        config.cross_origin_embedder_policy = setting(
            object.get("crossOriginEmbedderPolicy"),
            "crossOriginEmbedderPolicy",
            cross_origin_policy::<CrossOriginEmbedderPolicy>,
        )?;
        config.cross_origin_opener_policy = setting(
            object.get("crossOriginOpenerPolicy"),
            "crossOriginOpenerPolicy",
            cross_origin_policy::<CrossOriginOpenerPolicy>,
        )?;
        config.cross_origin_resource_policy = setting(
            object.get("crossOriginResourcePolicy"),
            "crossOriginResourcePolicy",
            cross_origin_policy::<CrossOriginResourcePolicy>,
        )?;
        config.origin_agent_cluster =
            toggle(object.get("originAgentCluster"), "Origin-Agent-Cluster");
        config.referrer_policy = setting(
            object.get("referrerPolicy"),
            "referrerPolicy",
            ReferrerPolicy::from_json,
        )?;

        let hsts = lookup(object, "Strict-Transport-Security", "strictTransportSecurity", "hsts")?;
        config.strict_transport_security =
            setting(hsts, "strictTransportSecurity", StrictTransportSecurity::from_json)?;

        let no_sniff = lookup(object, "X-Content-Type-Options", "xContentTypeOptions", "noSniff")?;
        config.x_content_type_options = toggle(no_sniff, "X-Content-Type-Options");

        let dns = lookup(object, "X-DNS-Prefetch-Control", "xDnsPrefetchControl", "dnsPrefetchControl")?;
        config.x_dns_prefetch_control = setting(dns, "xDnsPrefetchControl", |value| {
            Ok(XDnsPrefetchControl::deserialize(value)?)
        })?;

        let ie_no_open = lookup(object, "X-Download-Options", "xDownloadOptions", "ieNoOpen")?;
        config.x_download_options = toggle(ie_no_open, "X-Download-Options");

        let frameguard = lookup(object, "X-Frame-Options", "xFrameOptions", "frameguard")?;
        config.x_frame_options = setting(frameguard, "xFrameOptions", |value| {
            Ok(FrameOptions::deserialize(value)?.action.unwrap_or_default())
        })?;

        let permitted = lookup(
            object,
            "X-Permitted-Cross-Domain-Policies",
            "xPermittedCrossDomainPolicies",
            "permittedCrossDomainPolicies",
        )?;
        config.x_permitted_cross_domain_policies =
            setting(permitted, "xPermittedCrossDomainPolicies", |value| {
                Ok(PermittedPoliciesOptions::deserialize(value)?
                    .permitted_policies
                    .unwrap_or_default())
            })?;

        let powered_by = lookup(object, "X-Powered-By", "xPoweredBy", "hidePoweredBy")?;
        config.x_powered_by = toggle(powered_by, "X-Powered-By");

        let xss_filter = lookup(object, "X-XSS-Protection", "xXssProtection", "xssFilter")?;
        config.x_xss_protection = toggle(xss_filter, "X-XSS-Protection");

        let permissions = lookup(object, "Permissions-Policy", "permissionsPolicy", "permissionPolicy")?;
        if let Some(features @ Value::Object(_)) = permissions {
            config.permissions_policy = Some(PermissionsPolicy::from_json(features)?);
        }

        Ok(config)
    }

    /// Builds every enabled policy in application order.
    pub fn to_policies(&self) -> Result<Vec<Arc<dyn HeaderPolicy>>, SecureHeadersError> {
        let mut policies: Vec<Arc<dyn HeaderPolicy>> = Vec::with_capacity(15);

        if let Some(builder) = self.content_security_policy.resolve(true) {
            policies.push(Arc::new(builder.build()?));
        }
        if let Some(policy) = self.cross_origin_embedder_policy.resolve(false) {
            policies.push(fixed(&policy)?);
        }
        if let Some(policy) = self.cross_origin_opener_policy.resolve(true) {
            policies.push(fixed(&policy)?);
        }
        if let Some(policy) = self.cross_origin_resource_policy.resolve(true) {
            policies.push(fixed(&policy)?);
        }
        if self.origin_agent_cluster.unwrap_or(true) {
            policies.push(fixed(&OriginAgentCluster)?);
        }
        if let Some(policy) = self.referrer_policy.resolve(true) {
            policies.push(fixed(&policy)?);
        }
        if let Some(policy) = self.strict_transport_security.resolve(true) {
            policies.push(fixed(&policy)?);
        }
        if self.x_content_type_options.unwrap_or(true) {
            policies.push(fixed(&XContentTypeOptions)?);
        }
        if let Some(control) = self.x_dns_prefetch_control.resolve(true) {
            policies.push(fixed(&control)?);
        }
        if self.x_download_options.unwrap_or(true) {
            policies.push(fixed(&XDownloadOptions)?);
        }
        if let Some(options) = self.x_frame_options.resolve(true) {
            policies.push(fixed(&options)?);
        }
        if let Some(policy) = self.x_permitted_cross_domain_policies.resolve(true) {
            policies.push(fixed(&policy)?);
        }
        if self.x_powered_by.unwrap_or(true) {
            policies.push(Arc::new(RemoveHeader::powered_by()));
        }
        if self.x_xss_protection.unwrap_or(true) {
            policies.push(fixed(&XXssProtection)?);
        }
        if let Some(policy) = &self.permissions_policy {
            policies.push(fixed(policy)?);
        }

        Ok(policies)
    }
}

fn fixed<P: FixedHeaderPolicy>(policy: &P) -> Result<Arc<dyn HeaderPolicy>, SecureHeadersError> {
    Ok(Arc::new(StaticHeader::from_policy(policy)?))
}

fn cross_origin_policy<T>(value: &Value) -> Result<T, SecureHeadersError>
where
    T: DeserializeOwned + Default,
{
    Ok(CrossOriginOptions::<T>::deserialize(value)?
        .policy
        .unwrap_or_default())
}

/// Resolves a canonical key and its legacy alias; supplying both is an error.
fn lookup<'a>(
    object: &'a Map<String, Value>,
    header: &'static str,
    key: &'static str,
    alias: &'static str,
) -> Result<Option<&'a Value>, SecureHeadersError> {
    match (object.get(key), object.get(alias)) {
        (Some(_), Some(_)) => Err(SecureHeadersError::DuplicateOption { header, alias }),
        (Some(value), None) | (None, Some(value)) => Ok(Some(value)),
        (None, None) => Ok(None),
    }
}

fn setting<T, F>(value: Option<&Value>, key: &str, parse: F) -> Result<PolicySetting<T>, SecureHeadersError>
where
    F: FnOnce(&Value) -> Result<T, SecureHeadersError>,
{
    match value {
        None | Some(Value::Null) => Ok(PolicySetting::Unset),
        Some(Value::Bool(enabled)) => Ok(PolicySetting::from(*enabled)),
        Some(options @ Value::Object(_)) => Ok(PolicySetting::Custom(parse(options)?)),
        Some(_) => Err(SecureHeadersError::InvalidOption(key.to_owned())),
    }
}

fn toggle(value: Option<&Value>, header: &str) -> Option<bool> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::Bool(enabled)) => Some(*enabled),
        Some(_) => {
            log::warn!(
                "{} does not take options. Remove the property to silence this warning.",
                header
            );
            Some(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_config_policy_count() {
        // CSP, COOP, CORP, OAC, Referrer, HSTS, XCTO, DNS, XDO, XFO, XPCDP,
        // X-Powered-By removal and XXSS; COEP and Permissions-Policy are off.
        let policies = SecureHeadersConfig::default().to_policies().unwrap();
        assert_eq!(policies.len(), 13);
    }

    #[test]
    fn setting_resolution() {
        let unset: PolicySetting<XFrameOptions> = PolicySetting::Unset;
        assert_eq!(unset.resolve(true), Some(XFrameOptions::SameOrigin));
        assert_eq!(unset.resolve(false), None);
        assert_eq!(PolicySetting::<XFrameOptions>::from(false).resolve(true), None);
        assert_eq!(
            PolicySetting::Custom(XFrameOptions::Deny).resolve(false),
            Some(XFrameOptions::Deny)
        );
    }

    #[test]
    fn json_booleans_and_objects() {
        let config = SecureHeadersConfig::from_json(&json!({
            "crossOriginEmbedderPolicy": true,
            "xFrameOptions": { "action": "deny" },
            "referrerPolicy": false,
            "xPoweredBy": false,
        }))
        .unwrap();

        assert_eq!(config.cross_origin_embedder_policy, PolicySetting::Enabled);
        assert_eq!(config.x_frame_options, PolicySetting::Custom(XFrameOptions::Deny));
        assert_eq!(config.referrer_policy, PolicySetting::Disabled);
        assert_eq!(config.x_powered_by, Some(false));
        assert_eq!(config.strict_transport_security, PolicySetting::Unset);
    }

    #[test]
    fn aliases_fill_canonical_entries() {
        let config = SecureHeadersConfig::from_json(&json!({
            "hsts": { "maxAge": 300 },
            "frameguard": false,
            "noSniff": false,
            "permittedCrossDomainPolicies": { "permittedPolicies": "all" },
        }))
        .unwrap();

        let hsts = StrictTransportSecurity::from_json(&json!({ "maxAge": 300 })).unwrap();
        assert_eq!(config.strict_transport_security, PolicySetting::Custom(hsts));
        assert_eq!(config.x_frame_options, PolicySetting::Disabled);
        assert_eq!(config.x_content_type_options, Some(false));
        assert_eq!(
            config.x_permitted_cross_domain_policies,
            PolicySetting::Custom(XPermittedCrossDomainPolicies::All)
        );
    }

    #[test]
    fn alias_collision_names_the_alias() {
        let err = SecureHeadersConfig::from_json(&json!({
            "strictTransportSecurity": true,
            "hsts": true,
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Strict-Transport-Security option was specified twice. Remove the `hsts` option to fix this error."
        );
    }

    #[test]
    fn option_less_headers_accept_objects() {
        let config = SecureHeadersConfig::from_json(&json!({ "xXssProtection": { "mode": "block" } })).unwrap();
        assert_eq!(config.x_xss_protection, Some(true));
    }

    #[test]
    fn invalid_peer_values_surface_the_value() {
        let err = SecureHeadersConfig::from_json(&json!({
            "crossOriginOpenerPolicy": { "policy": "bogus" }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("\"bogus\""));

        let err = SecureHeadersConfig::from_json(&json!({ "xFrameOptions": "deny" })).unwrap_err();
        assert!(matches!(err, SecureHeadersError::InvalidOption(key) if key == "xFrameOptions"));
    }

    #[test]
    fn permissions_policy_alias_collision() {
        let err = SecureHeadersConfig::from_json(&json!({
            "permissionsPolicy": { "camera": false },
            "permissionPolicy": { "camera": true }
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Permissions-Policy option was specified twice. Remove the `permissionPolicy` option to fix this error."
        );
    }

    #[test]
    fn permissions_policy_only_from_objects() {
        let config = SecureHeadersConfig::from_json(&json!({ "permissionsPolicy": true })).unwrap();
        assert!(config.permissions_policy.is_none());

        let config = SecureHeadersConfig::from_json_str(r#"{"permissionPolicy": {"camera": false}}"#).unwrap();
        assert_eq!(
            config.permissions_policy.map(|policy| policy.as_str().to_owned()),
            Some("camera=()".to_owned())
        );
    }
}
