use crate::Labels;

/// Read-only access to a local snapshot of cluster state.
///
/// Lookups are served from memory, so implementations carry no timeout or retry policy.
pub trait ClusterCache {
    /// Reads `key` from the secret named `<namespace>/<name>`.
    fn secret_content(&self, name: &str, key: &str) -> Result<Vec<u8>, CacheError>;

    /// Returns the labels of the pod identified by an endpoint's target reference.
    fn pod_labels(&self, target_ref: &str) -> Result<Labels, CacheError>;
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    #[error("secret not found: '{0}'")]
    SecretNotFound(String),

    #[error("secret '{secret}' does not have file/key '{key}'")]
    MissingSecretKey { secret: String, key: String },

    #[error("pod not found: '{0}'")]
    PodNotFound(String),
}
