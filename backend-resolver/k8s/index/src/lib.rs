//! Cluster state snapshot for the backend directive resolvers.
//!
//! The index is fed by a watch loop through [`kubert::index::IndexNamespacedResource`] and serves
//! the resolvers' [`ClusterCache`] lookups from memory:
//!
//! - each `Pod` is reduced to its labels, keyed by `<namespace>/<name>` (the form endpoints use
//!   for their target references); and
//! - each `Secret` is reduced to its data entries, keyed by `<namespace>/<name>`.
//!
//! A reconciliation pass holds a read guard on the [`SharedIndex`] for its duration, so watch
//! updates are only observed between passes.

#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]


use ahash::AHashMap as HashMap;
use ingress_backend_resolver_core::{CacheError, ClusterCache, Labels};
use k8s_openapi::api::core::v1::{Pod, Secret};
use kube::ResourceExt;
use parking_lot::RwLock;
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, info_span};

pub type SharedIndex = Arc<RwLock<Index>>;

/// Holds the pod labels and secret data observed in the cluster.
#[derive(Debug, Default)]
pub struct Index {
    pods: HashMap<String, Labels>,
    secrets: HashMap<String, SecretData>,
}

type SecretData = BTreeMap<String, Vec<u8>>;

// === impl Index ===

impl Index {
    pub fn shared() -> SharedIndex {
        Arc::new(RwLock::new(Self::default()))
    }

    fn key(namespace: &str, name: &str) -> String {
        format!("{namespace}/{name}")
    }

    fn secret_data(secret: Secret) -> SecretData {
        let mut data = secret
            .data
            .into_iter()
            .flatten()
            .map(|(k, v)| (k, v.0))
            .collect::<SecretData>();

        // Entries written as `stringData` take precedence, as they do on the API server.
        data.extend(
            secret
                .string_data
                .into_iter()
                .flatten()
                .map(|(k, v)| (k, v.into_bytes())),
        );
        data
    }
}

impl ClusterCache for Index {
    fn secret_content(&self, name: &str, key: &str) -> Result<Vec<u8>, CacheError> {
        let data = self
            .secrets
            .get(name)
            .ok_or_else(|| CacheError::SecretNotFound(name.to_string()))?;
        data.get(key)
            .cloned()
            .ok_or_else(|| CacheError::MissingSecretKey {
                secret: name.to_string(),
                key: key.to_string(),
            })
    }

    fn pod_labels(&self, target_ref: &str) -> Result<Labels, CacheError> {
        self.pods
            .get(target_ref)
            .cloned()
            .ok_or_else(|| CacheError::PodNotFound(target_ref.to_string()))
    }
}

impl kubert::index::IndexNamespacedResource<Pod> for Index {
    fn apply(&mut self, pod: Pod) {
        let Some(ns) = pod.namespace() else {
            tracing::warn!(name = %pod.name_any(), "Pod has no namespace");
            return;
        };
        let name = pod.name_unchecked();
        let _span = info_span!("apply", %ns, %name).entered();

        let labels = Labels::from(pod.metadata.labels);
        debug!(?labels, "Indexing pod");
        self.pods.insert(Self::key(&ns, &name), labels);
    }

    fn delete(&mut self, ns: String, name: String) {
        let _span = info_span!("delete", %ns, %name).entered();
        if self.pods.remove(&Self::key(&ns, &name)).is_some() {
            debug!("Removed pod");
        }
    }
}

impl kubert::index::IndexNamespacedResource<Secret> for Index {
    fn apply(&mut self, secret: Secret) {
        let Some(ns) = secret.namespace() else {
            tracing::warn!(name = %secret.name_any(), "Secret has no namespace");
            return;
        };
        let name = secret.name_unchecked();
        let _span = info_span!("apply", %ns, %name).entered();

        let data = Self::secret_data(secret);
        debug!(keys = data.len(), "Indexing secret");
        self.secrets.insert(Self::key(&ns, &name), data);
    }

    fn delete(&mut self, ns: String, name: String) {
        let _span = info_span!("delete", %ns, %name).entered();
        if self.secrets.remove(&Self::key(&ns, &name)).is_some() {
            debug!("Removed secret");
        }
    }
}
