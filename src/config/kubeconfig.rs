use std::sync::Arc;

use futures::future::BoxFuture;
use kube::Config;
use kube::config::{KubeConfigOptions, Kubeconfig};
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

use super::{ConfigError, Factory};
use crate::cli::ConnectionFlags;
use crate::kubernetes_objects::CronJobClient;

/// [`Factory`] backed by a kubeconfig file or the in-cluster environment.
#[derive(Debug)]
pub struct KubeFactory {
    flags: ConnectionFlags,
    config: OnceCell<Config>,
}

impl KubeFactory {
    pub fn new(flags: ConnectionFlags) -> Self {
        KubeFactory {
            flags,
            config: OnceCell::new(),
        }
    }

    async fn config(&self) -> Result<&Config, ConfigError> {
        self.config
            .get_or_try_init(|| load_config(&self.flags))
            .await
    }

    async fn client(&self) -> Result<Arc<dyn CronJobClient>, ConfigError> {
        let config = self.config().await?.clone();
        let client = kube::Client::try_from(config).map_err(ConfigError::Client)?;
        Ok(Arc::new(client))
    }

    /// `--namespace` wins over the kubeconfig context namespace.
    async fn resolve_namespace(&self) -> Result<String, ConfigError> {
        match self.flags.namespace.as_deref() {
            Some("") => Err(ConfigError::EmptyNamespace),
            Some(namespace) => Ok(namespace.to_string()),
            None => Ok(self.config().await?.default_namespace.clone()),
        }
    }
}

#[instrument("load_kube_config", level = "debug", skip(flags), fields(kubeconfig = ?flags.kubeconfig))]
async fn load_config(flags: &ConnectionFlags) -> Result<Config, ConfigError> {
    let options = KubeConfigOptions {
        context: flags.context.clone(),
        cluster: flags.cluster.clone(),
        user: flags.user.clone(),
    };

    let config = match &flags.kubeconfig {
        Some(path) => {
            let kubeconfig = Kubeconfig::read_from(path)?;
            Config::from_custom_kubeconfig(kubeconfig, &options).await?
        }
        None if options.context.is_some()
            || options.cluster.is_some()
            || options.user.is_some() =>
        {
            Config::from_kubeconfig(&options).await?
        }
        None => Config::infer().await?,
    };

    debug!(
        "Kubernetes config resolved (cluster: {}, namespace: {}).",
        config.cluster_url, config.default_namespace
    );
    Ok(config)
}

impl Factory for KubeFactory {
    fn to_client(&self) -> BoxFuture<'_, Result<Arc<dyn CronJobClient>, ConfigError>> {
        Box::pin(self.client())
    }

    fn namespace(&self) -> BoxFuture<'_, Result<String, ConfigError>> {
        Box::pin(self.resolve_namespace())
    }
}
