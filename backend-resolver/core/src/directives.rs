use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the routing resource that declared a set of directives.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct RouteSource {
    #[serde(default = "RouteSource::default_kind")]
    pub kind: String,
    pub namespace: String,
    pub name: String,
}

/// The typed directives declared for one route.
///
/// Produced by the annotation parser with defaults already applied. An empty string means the
/// directive was not declared.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DirectiveSet {
    pub affinity: String,
    pub session_cookie_name: String,
    pub session_cookie_strategy: String,
    pub session_cookie_dynamic: bool,

    pub auth_type: String,
    pub auth_secret: String,
    pub auth_realm: String,

    pub blue_green_balance: String,
    /// Legacy spelling of `blue_green_balance`.
    pub blue_green_deploy: String,
    pub blue_green_mode: String,

    pub cors_enable: bool,
    pub cors_allow_origin: String,
    pub cors_allow_headers: String,
    pub cors_allow_methods: String,
    pub cors_allow_credentials: bool,
    pub cors_max_age: i64,
    pub cors_expose_headers: String,

    pub oauth: String,
    pub oauth_uri_prefix: String,
    pub oauth_headers: String,

    pub rewrite_target: String,
    pub waf: String,
    pub whitelist_source_range: String,
}

// === impl RouteSource ===

impl RouteSource {
    pub fn ingress(namespace: impl ToString, name: impl ToString) -> Self {
        Self {
            kind: Self::default_kind(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    fn default_kind() -> String {
        "ingress".to_string()
    }
}

impl fmt::Display for RouteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}/{}'", self.kind, self.namespace, self.name)
    }
}
