//! Persisted configuration shapes.
//!
//! Two on-disk layouts exist:
//!
//! - the current `v1` layout ([`SkycliConfig`]), where clusters, users and
//!   contexts are lists of `{name, <payload>}` entries;
//! - the legacy layout ([`LegacyConfig`]), with no `api_version` and
//!   name-keyed maps instead of lists.
//!
//! [`RawConfig`] is the union of both and is what a freshly parsed file
//! becomes before [`crate::migrate`] turns it into a [`SkycliConfig`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

/// The `api_version` written by this build.
pub const API_VERSION: &str = "v1";

/// Fields a file carries that this build does not model.
///
/// Kept verbatim so that a load/save cycle never drops them.
pub type Extra = Map<String, Value>;

/// Connection details for one controller endpoint.
///
/// Missing fields decode as empty; commands that need an endpoint say so when
/// they run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Controller API endpoint.
    #[serde(default)]
    pub endpoint: String,
    /// API key sent with every controller request.
    #[serde(default)]
    pub api_key: String,
    /// Environment tag reported by the controller, if known.
    #[serde(default)]
    pub env: Option<String>,
    /// Unmodeled fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Credentials and identity stored for one logged-in user.
///
/// `user` and `identity` are opaque to skycli; they are kept exactly as the
/// authentication service returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    /// User record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    /// Identity the user logged in with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Value>,
    /// Access token.
    #[serde(default)]
    pub access_token: String,
    /// Refresh token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Session id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Extra options forwarded when the session is refreshed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_session_info_options: Option<Map<String, Value>>,
    /// Bearer token issued after MFA.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfa_bearer_token: Option<String>,
    /// Unmodeled fields.
    #[serde(flatten)]
    pub extra: Extra,
}

impl UserConfig {
    /// Returns the login id recorded on the identity, if any.
    pub fn login_id(&self) -> Option<&str> {
        self.identity
            .as_ref()
            .and_then(|identity| identity.get("login_id"))
            .and_then(Value::as_str)
    }

    /// Returns the user id recorded on the user record, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|user| user.get("id"))
            .and_then(Value::as_str)
    }
}

/// A named pairing of a cluster and a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigContext {
    /// Name of the cluster entry.
    #[serde(default)]
    pub cluster: String,
    /// Name of the user entry; absent until someone logs in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Unmodeled fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// `{name, cluster}` list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterEntry {
    /// Unique entry name.
    pub name: String,
    /// Cluster payload.
    pub cluster: ClusterConfig,
}

/// `{name, user}` list entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEntry {
    /// Unique entry name.
    pub name: String,
    /// User payload.
    pub user: UserConfig,
}

/// `{name, context}` list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntry {
    /// Unique entry name.
    pub name: String,
    /// Context payload.
    pub context: ConfigContext,
}

/// The current (`v1`) configuration layout.
///
/// A list that is `None` was never written; readers treat it as empty, but it
/// stays absent when the config is saved again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkycliConfig {
    /// Schema version, always [`API_VERSION`] for values built by this crate.
    pub api_version: String,
    /// Known clusters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clusters: Option<Vec<ClusterEntry>>,
    /// Stored credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserEntry>>,
    /// Cluster/user pairings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contexts: Option<Vec<ContextEntry>>,
    /// Name of the active context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_context: Option<String>,
    /// Unmodeled top-level fields.
    #[serde(flatten)]
    pub extra: Extra,
}

impl SkycliConfig {
    /// Creates an empty `v1` config with no lists.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            clusters: None,
            users: None,
            contexts: None,
            current_context: None,
            extra: Extra::new(),
        }
    }

    /// Clusters, empty when none are configured.
    pub fn clusters(&self) -> &[ClusterEntry] {
        self.clusters.as_deref().unwrap_or_default()
    }

    /// Users, empty when none are configured.
    pub fn users(&self) -> &[UserEntry] {
        self.users.as_deref().unwrap_or_default()
    }

    /// Contexts, empty when none are configured.
    pub fn contexts(&self) -> &[ContextEntry] {
        self.contexts.as_deref().unwrap_or_default()
    }
}

impl Default for SkycliConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The pre-`v1` layout: no `api_version`, name-keyed maps.
///
/// Read-only. Map order is preserved so that migrated lists come out in the
/// order the user wrote them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LegacyConfig {
    /// Clusters keyed by name.
    #[serde(default)]
    pub cluster: Option<IndexMap<String, ClusterConfig>>,
    /// Users keyed by name.
    #[serde(default)]
    pub user: Option<IndexMap<String, UserConfig>>,
    /// Contexts keyed by name.
    #[serde(default)]
    pub context: Option<IndexMap<String, ConfigContext>>,
    /// Name of the active context.
    #[serde(default)]
    pub current_context: Option<String>,
    /// Unmodeled top-level fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// A parsed config document of either layout.
#[derive(Debug, Clone, PartialEq)]
pub enum RawConfig {
    /// No `api_version`: the legacy map-keyed layout.
    Legacy(LegacyConfig),
    /// `api_version: v1`.
    Current(SkycliConfig),
}

impl RawConfig {
    /// Classifies a parsed YAML/JSON document.
    ///
    /// `null` and `{}` are an empty legacy config. A top-level value that is
    /// not a mapping is rejected, as is any `api_version` other than `v1`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Malformed`] or [`ConfigError::UnsupportedVersion`].
    pub fn from_yaml_value(value: serde_yaml::Value) -> Result<Self> {
        let mapping = match value {
            serde_yaml::Value::Null => return Ok(Self::Legacy(LegacyConfig::default())),
            serde_yaml::Value::Mapping(mapping) => mapping,
            other => {
                return Err(ConfigError::Malformed {
                    reason: format!("expected a mapping at the top level, found {}", kind_of(&other)),
                })
            }
        };

        let version = match mapping.get("api_version") {
            None | Some(serde_yaml::Value::Null) => None,
            Some(serde_yaml::Value::String(version)) => Some(version.clone()),
            Some(other) => {
                return Err(ConfigError::Malformed {
                    reason: format!("api_version must be a string, found {}", kind_of(other)),
                })
            }
        };

        let document = serde_yaml::Value::Mapping(mapping);
        match version.as_deref() {
            None => serde_yaml::from_value(document)
                .map(Self::Legacy)
                .map_err(malformed),
            Some(API_VERSION) => serde_yaml::from_value(document)
                .map(Self::Current)
                .map_err(malformed),
            Some(other) => Err(ConfigError::UnsupportedVersion {
                version: other.to_string(),
            }),
        }
    }

    /// The declared `api_version`, `None` for legacy documents.
    pub fn api_version(&self) -> Option<&str> {
        match self {
            Self::Legacy(_) => None,
            Self::Current(config) => Some(&config.api_version),
        }
    }

    /// Whether [`crate::migrate`] would have to rewrite this document.
    pub const fn needs_migration(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }
}

fn malformed(err: serde_yaml::Error) -> ConfigError {
    ConfigError::Malformed {
        reason: err.to_string(),
    }
}

const fn kind_of(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn parse(text: &str) -> Result<RawConfig> {
        let value: serde_yaml::Value = serde_yaml::from_str(text).expect("valid yaml");
        RawConfig::from_yaml_value(value)
    }

    #[test_case("~" ; "null document")]
    #[test_case("{}" ; "empty mapping")]
    #[test_case("current_context: default" ; "flat legacy")]
    #[test_case("api_version: null" ; "null version")]
    fn legacy_documents_are_detected(text: &str) {
        let raw = parse(text).expect("legacy");
        assert!(raw.needs_migration());
        assert_eq!(raw.api_version(), None);
    }

    #[test]
    fn current_document_is_detected() {
        let raw = parse("api_version: v1\ncurrent_context: a\n").expect("current");
        assert!(!raw.needs_migration());
        assert_eq!(raw.api_version(), Some("v1"));
        match raw {
            RawConfig::Current(config) => {
                assert_eq!(config.current_context.as_deref(), Some("a"));
                assert!(config.clusters.is_none());
            }
            RawConfig::Legacy(_) => panic!("expected current config"),
        }
    }

    #[test]
    fn json_documents_are_accepted() {
        let raw = parse(r#"{"api_version": "v1", "users": [{"name": "u", "user": {"access_token": "t"}}]}"#)
            .expect("json");
        match raw {
            RawConfig::Current(config) => assert_eq!(config.users()[0].user.access_token, "t"),
            RawConfig::Legacy(_) => panic!("expected current config"),
        }
    }

    #[test_case("- a\n- b" ; "sequence")]
    #[test_case("42" ; "number")]
    #[test_case("api_version: 1" ; "numeric version")]
    #[test_case("api_version: v1\nclusters: nope" ; "clusters not a list")]
    fn malformed_documents_are_rejected(text: &str) {
        let err = parse(text).expect_err("malformed");
        assert!(matches!(err, ConfigError::Malformed { .. }), "{err}");
    }

    #[test]
    fn unknown_versions_are_rejected() {
        let err = parse("api_version: v2").expect_err("unsupported");
        assert!(matches!(err, ConfigError::UnsupportedVersion { ref version } if version == "v2"));
    }

    #[test]
    fn legacy_maps_keep_key_order() {
        let raw = parse(
            "cluster:\n  zeta: {endpoint: z, api_key: k}\n  alpha: {endpoint: a, api_key: k}\n",
        )
        .expect("legacy");
        let RawConfig::Legacy(legacy) = raw else {
            panic!("expected legacy config");
        };
        let names: Vec<&str> = legacy
            .cluster
            .as_ref()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn cluster_env_serializes_as_null_when_unknown() {
        let cluster = ClusterConfig {
            endpoint: "http://e".into(),
            api_key: "k".into(),
            env: None,
            ..ClusterConfig::default()
        };
        let json = serde_json::to_value(&cluster).expect("serialize");
        assert_eq!(json["env"], Value::Null);
    }

    #[test]
    fn empty_config_serializes_without_lists() {
        let json = serde_json::to_value(SkycliConfig::new()).expect("serialize");
        assert_eq!(json, serde_json::json!({ "api_version": "v1" }));
    }

    #[test]
    fn unmodeled_fields_are_kept() {
        let raw = parse(
            "api_version: v1\n\
             telemetry: disabled\n\
             clusters:\n  - name: a\n    cluster: {endpoint: e, api_key: k, region: eu}\n\
             users:\n  - name: u\n    user: {access_token: t, expires_at: 1700000000}\n\
             contexts:\n  - name: c\n    context: {cluster: a, namespace: dev}\n",
        )
        .expect("current");
        let RawConfig::Current(config) = raw else {
            panic!("expected current config");
        };
        assert_eq!(config.extra["telemetry"], Value::from("disabled"));
        assert_eq!(config.clusters()[0].cluster.extra["region"], Value::from("eu"));
        assert_eq!(config.users()[0].user.extra["expires_at"], Value::from(1_700_000_000));
        assert_eq!(config.contexts()[0].context.extra["namespace"], Value::from("dev"));

        let json = serde_json::to_value(&config).expect("serialize");
        assert_eq!(json["telemetry"], "disabled");
        assert_eq!(json["users"][0]["user"]["expires_at"], 1_700_000_000);
        assert_eq!(json["contexts"][0]["context"]["namespace"], "dev");
    }

    #[test]
    fn incomplete_entries_decode_with_empty_fields() {
        let raw = parse(
            "api_version: v1\n\
             clusters:\n  - name: a\n    cluster: {endpoint: 'http://x'}\n\
             contexts:\n  - name: c\n    context: {user: u}\n",
        )
        .expect("incomplete entries are readable");
        let RawConfig::Current(config) = raw else {
            panic!("expected current config");
        };
        assert_eq!(config.clusters()[0].cluster.endpoint, "http://x");
        assert_eq!(config.clusters()[0].cluster.api_key, "");
        assert_eq!(config.contexts()[0].context.cluster, "");
        assert_eq!(config.contexts()[0].context.user.as_deref(), Some("u"));
    }

    #[test]
    fn user_identity_helpers() {
        let user = UserConfig {
            user: Some(serde_json::json!({ "id": "user_id" })),
            identity: Some(serde_json::json!({ "login_id": "user@example.com" })),
            access_token: "t".into(),
            ..UserConfig::default()
        };
        assert_eq!(user.user_id(), Some("user_id"));
        assert_eq!(user.login_id(), Some("user@example.com"));
        assert_eq!(UserConfig::default().login_id(), None);
    }
}
