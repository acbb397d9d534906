//! Core types shared by the backend directive resolvers.
//!
//! A route's directives are parsed (elsewhere) into a [`DirectiveSet`]. The resolvers read that
//! set and write a [`BackendConfig`], consulting two collaborators along the way:
//!
//! - a [`ClusterCache`] that serves pod labels and secret content from a local snapshot; and
//! - a registry of already-resolved state, exposed through the narrow [`UserlistStore`] and
//!   [`RouteTable`] traits.
//!
//! ```text
//! [ DirectiveSet ] -> ( resolvers ) -> [ BackendConfig ]
//!                      |         |
//!            [ ClusterCache ]  [ UserlistStore + RouteTable ]
//! ```

#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod backend;
mod cache;
pub mod directives;
mod labels;
pub mod registry;

pub use self::{
    backend::{
        BackendConfig, Cookie, CookieStrategy, Cors, Endpoint, OAuthConfig, UserlistRef, Waf,
    },
    cache::{CacheError, ClusterCache},
    directives::{DirectiveSet, RouteSource},
    labels::Labels,
    registry::{BackendRef, Host, HostPath, Registry, RouteTable, User, Userlist, UserlistStore},
};
pub use ipnet::IpNet;
