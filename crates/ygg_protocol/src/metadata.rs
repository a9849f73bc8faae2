//! API metadata served at `GET /`.

use serde::{Deserialize, Serialize};

/// Links advertised to launchers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// Home page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Registration page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register: Option<String>,
}

/// Feature switches understood by authlib-injector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureFlag {
    /// Login with credentials other than email, e.g. profile name.
    NonEmailLogin,
    /// Legacy skin API.
    LegacySkinApi,
    /// Disable the `@mojang` namespace.
    NoMojangNamespace,
    /// Keep Minecraft's anti-features enabled.
    EnableMojangAntiFeatures,
    /// Message signing key pairs.
    EnableProfileKey,
    /// Username validation.
    UsernameCheck,
}

impl FeatureFlag {
    /// Metadata key for this flag.
    pub fn key(self) -> &'static str {
        match self {
            FeatureFlag::NonEmailLogin => "feature.non_email_login",
            FeatureFlag::LegacySkinApi => "feature.legacy_skin_api",
            FeatureFlag::NoMojangNamespace => "feature.no_mojang_namespace",
            FeatureFlag::EnableMojangAntiFeatures => "feature.enable_mojang_anti_features",
            FeatureFlag::EnableProfileKey => "feature.enable_profile_key",
            FeatureFlag::UsernameCheck => "feature.username_check",
        }
    }
}

/// Server metadata, passed through to clients as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMetadata {
    /// Server name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    /// Implementation name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_name: Option<String>,
    /// Implementation version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_version: Option<String>,
    /// Links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    /// Feature flags and any other custom metadata.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ApiMetadata {
    /// Metadata naming this implementation.
    pub fn for_implementation(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            implementation_name: Some(name.into()),
            implementation_version: Some(version.into()),
            ..Self::default()
        }
    }

    /// Sets the server name.
    pub fn with_server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = Some(name.into());
        self
    }

    /// Sets the links.
    pub fn with_links(mut self, links: Links) -> Self {
        self.links = Some(links);
        self
    }

    /// Sets a feature flag.
    pub fn with_feature(mut self, flag: FeatureFlag, enabled: bool) -> Self {
        self.extra
            .insert(flag.key().to_string(), serde_json::Value::Bool(enabled));
        self
    }

    /// Returns whether a feature flag is set to `true`.
    pub fn feature(&self, flag: FeatureFlag) -> bool {
        self.extra
            .get(flag.key())
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResponse {
    /// Server metadata.
    pub meta: ApiMetadata,
    /// Texture domain allowlist.
    pub skin_domains: Vec<String>,
    /// PEM public key that verifies property signatures.
    pub signature_publickey: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn feature_flags_flatten_into_meta() {
        let meta = ApiMetadata::default()
            .with_server_name("Test")
            .with_feature(FeatureFlag::NonEmailLogin, true);

        assert!(meta.feature(FeatureFlag::NonEmailLogin));
        assert!(!meta.feature(FeatureFlag::UsernameCheck));
        assert_eq!(
            serde_json::to_value(&meta).unwrap(),
            json!({"serverName": "Test", "feature.non_email_login": true})
        );
    }

    #[test]
    fn metadata_response_key_names() {
        let response = MetadataResponse {
            meta: ApiMetadata::default(),
            skin_domains: vec!["example.com".into()],
            signature_publickey: "pem".into(),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"meta": {}, "skinDomains": ["example.com"], "signaturePublickey": "pem"})
        );
    }
}
