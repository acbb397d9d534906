use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, net::IpAddr};

/// The largest weight the load balancer accepts for a single endpoint.
pub const MAX_WEIGHT: u32 = 256;

/// The resolved configuration of a single routed backend.
///
/// Built once per reconciliation pass: the endpoints are provided by the caller and every other
/// field starts unset, to be filled in by the resolvers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfig {
    pub endpoints: Vec<Endpoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie: Option<Cookie>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub userlist: Option<UserlistRef>,

    pub cors: Cors,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth: Option<OAuthConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewrite_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub waf: Option<Waf>,

    /// Source networks allowed to reach the backend, in declared order.
    ///
    /// Entries are rendered in canonical form (`2001:DB8::/32` becomes `2001:db8::/32`); host
    /// bits are kept as declared.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub whitelist: Vec<IpNet>,
}

/// One backing target of a backend.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub ip: IpAddr,
    pub port: u16,

    /// The endpoint's share of traffic, in `0..=MAX_WEIGHT`. A zero weight drains the endpoint
    /// without removing it from the backend.
    #[serde(default = "Endpoint::default_weight")]
    pub weight: u32,

    /// Identifies the pod backing this endpoint, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_ref: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cookie {
    pub name: String,
    pub strategy: CookieStrategy,
    pub dynamic: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CookieStrategy {
    #[default]
    Insert,
    Rewrite,
    Prefix,
}

/// References a registered userlist from a backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserlistRef {
    pub name: String,
    pub realm: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cors {
    pub enabled: bool,
    pub allow_origin: String,
    pub allow_headers: String,
    pub allow_methods: String,
    pub allow_credentials: bool,
    pub max_age: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expose_headers: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthConfig {
    pub implementation: String,
    pub backend_name: String,
    pub uri_prefix: String,

    /// Maps request header names to the auth response attribute that fills them.
    pub headers: BTreeMap<String, String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Waf {
    ModSecurity,
}

// === impl Endpoint ===

impl Endpoint {
    fn default_weight() -> u32 {
        1
    }
}

/// Renders the endpoint as a socket address, so IPv6 addresses are bracketed (`[fd00::1]:8080`).
impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        std::net::SocketAddr::new(self.ip, self.port).fmt(f)
    }
}

// === impl CookieStrategy ===

impl CookieStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Rewrite => "rewrite",
            Self::Prefix => "prefix",
        }
    }
}

impl std::str::FromStr for CookieStrategy {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insert" => Ok(Self::Insert),
            "rewrite" => Ok(Self::Rewrite),
            "prefix" => Ok(Self::Prefix),
            s => Err(InvalidValue(s.to_string())),
        }
    }
}

impl fmt::Display for CookieStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

// === impl Waf ===

impl std::str::FromStr for Waf {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modsecurity" => Ok(Self::ModSecurity),
            s => Err(InvalidValue(s.to_string())),
        }
    }
}

impl fmt::Display for Waf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModSecurity => "modsecurity".fmt(f),
        }
    }
}

/// A directive value outside of its enumerated domain.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid value: {0:?}")]
pub struct InvalidValue(pub String);
