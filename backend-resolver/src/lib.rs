//! Backend directive resolvers.
//!
//! Converts the typed directives declared on a route into the backend configuration consumed by
//! the load balancer's config renderer. Each directive is handled by its own resolver:
//!
//! - `affinity`: session cookie policy;
//! - `auth_http`: HTTP basic authentication userlists, read from secrets;
//! - `blue_green`: traffic weights across labeled deployment groups;
//! - `cors`: cross-origin policy;
//! - `oauth`: delegated authentication through an already routed backend;
//! - `rewrite`, `waf` and `whitelist`: single-field checks.
//!
//! Resolvers never fail a route as a whole. A fatal problem with a directive is reported as an
//! error and leaves that directive unapplied; a problem with a single item of a directive is
//! reported as a warning and the item is dropped or replaced with a default.

#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod affinity;
mod args;
mod auth_http;
mod blue_green;
mod cors;
mod diagnostics;
pub mod fixture;
mod oauth;
mod rewrite;
mod updater;
mod waf;
mod weights;
mod whitelist;


pub use self::{
    args::Args,
    diagnostics::{Diagnostics, TracingDiagnostics},
    updater::Updater,
};
pub use ingress_backend_resolver_core as core;
pub use ingress_backend_resolver_k8s_index as index;
