mod kubeconfig;

pub use self::kubeconfig::KubeFactory;

use std::sync::Arc;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::kubernetes_objects::CronJobClient;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to infer cluster configuration.\n{0}")]
    Infer(#[from] kube::config::InferConfigError),

    #[error("Failed to load kubeconfig.\n{0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    #[error("Failed to initialize kubernetes client.\n{0}")]
    Client(#[source] kube::Error),

    #[error("namespace must not be empty")]
    EmptyNamespace,
}

/// Source of the connection and namespace a command runs against.
///
/// Nothing is resolved until a command asks for it.
pub trait Factory: Send + Sync {
    fn to_client(&self) -> BoxFuture<'_, Result<Arc<dyn CronJobClient>, ConfigError>>;

    fn namespace(&self) -> BoxFuture<'_, Result<String, ConfigError>>;
}
