pub mod cronjob;

use futures::future::BoxFuture;
use k8s_openapi::api::batch::v1::CronJob;

use crate::error::BoxError;

/// Field manager recorded on every object this tool creates.
pub const FIELD_MANAGER: &str = "kubectl-create";

/// Namespace-scoped create access to the CronJob collection.
pub trait CronJobClient: Send + Sync {
    /// Submits `cronjob` into `namespace` and returns the object as stored by the server.
    fn create<'a>(
        &'a self,
        namespace: &'a str,
        cronjob: &'a CronJob,
    ) -> BoxFuture<'a, Result<CronJob, BoxError>>;
}
