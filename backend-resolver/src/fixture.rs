//! Offline inputs for a single reconciliation pass.
//!
//! A fixture captures the routes to resolve together with the cluster objects and hosts they
//! refer to, so directives can be checked without a running cluster.

use crate::{Diagnostics, Updater};
use anyhow::{Context, Result};
use ingress_backend_resolver_core::{
    BackendConfig, DirectiveSet, Endpoint, Host, Registry, RouteSource, Userlist,
};
use ingress_backend_resolver_k8s_index::Index;
use k8s_openapi::api::core::v1::{Pod, Secret};
use kubert::index::IndexNamespacedResource;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub routes: Vec<Route>,
    pub pods: Vec<Pod>,
    pub secrets: Vec<Secret>,

    /// Hosts already routed in this pass; the oauth resolver looks its proxy up here.
    pub hosts: Vec<Host>,
}

#[derive(Debug, Deserialize)]
pub struct Route {
    pub source: RouteSource,
    #[serde(default)]
    pub directives: DirectiveSet,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

/// The backends produced by a pass, in route order, and the userlists they registered.
#[derive(Debug, Serialize)]
pub struct Resolution {
    pub backends: Vec<ResolvedBackend>,
    pub userlists: Vec<Userlist>,
}

#[derive(Debug, Serialize)]
pub struct ResolvedBackend {
    pub source: RouteSource,
    pub backend: BackendConfig,
}

// === impl Fixture ===

impl Fixture {
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture {}", path.display()))?;
        Self::from_yaml(&yaml).with_context(|| format!("invalid fixture {}", path.display()))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("failed to parse fixture")
    }

    /// Resolves every route against a snapshot of the fixture's pods and secrets.
    pub fn resolve(self, diagnostics: &dyn Diagnostics) -> Resolution {
        let Self {
            routes,
            pods,
            secrets,
            hosts,
        } = self;

        let index = Index::shared();
        {
            let mut index = index.write();
            for pod in pods {
                index.apply(pod);
            }
            for secret in secrets {
                index.apply(secret);
            }
        }

        let mut registry = Registry::default();
        for host in hosts {
            registry.add_host(host);
        }

        let snapshot = index.read();
        let mut updater = Updater::new(&*snapshot, &mut registry, diagnostics);
        let backends = routes
            .into_iter()
            .map(|route| {
                let mut backend = BackendConfig {
                    endpoints: route.endpoints,
                    ..Default::default()
                };
                updater.update_backend(&route.source, &route.directives, &mut backend);
                ResolvedBackend {
                    source: route.source,
                    backend,
                }
            })
            .collect::<Vec<_>>();
        tracing::debug!(backends = backends.len(), "Resolved routes");

        Resolution {
            backends,
            userlists: registry.userlists().to_vec(),
        }
    }
}
