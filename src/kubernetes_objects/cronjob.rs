use futures::future::BoxFuture;
use k8s_openapi::api::batch::v1::{CronJob, CronJobSpec, JobSpec, JobTemplateSpec};
use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::PostParams;
use kube::{Api, Client};
use tracing::{Instrument, trace_span};

use super::{CronJobClient, FIELD_MANAGER};
use crate::error::BoxError;

pub const DEFAULT_RESTART_POLICY: &str = "OnFailure";

/// Finalized input of a CronJob descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronJobParams {
    pub name: String,
    pub image: String,
    pub schedule: String,
    /// Container command line. Empty leaves the image entrypoint in place.
    pub command: Vec<String>,
    /// Copied into the pod spec as given; the API server rejects unknown values.
    pub restart_policy: String,
}

/// Builds the CronJob for `params`.
///
/// The CronJob, its job template and its single container all carry `params.name`.
pub fn build_cronjob(params: &CronJobParams) -> CronJob {
    let container = Container {
        name: params.name.clone(),
        image: Some(params.image.clone()),
        command: (!params.command.is_empty()).then(|| params.command.clone()),
        ..Default::default()
    };

    CronJob {
        metadata: ObjectMeta {
            name: Some(params.name.clone()),
            ..Default::default()
        },
        spec: Some(CronJobSpec {
            schedule: params.schedule.clone(),
            job_template: JobTemplateSpec {
                metadata: Some(ObjectMeta {
                    name: Some(params.name.clone()),
                    ..Default::default()
                }),
                spec: Some(JobSpec {
                    template: PodTemplateSpec {
                        metadata: None,
                        spec: Some(PodSpec {
                            containers: vec![container],
                            restart_policy: Some(params.restart_policy.clone()),
                            ..Default::default()
                        }),
                    },
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        status: None,
    }
}

impl CronJobClient for Client {
    fn create<'a>(
        &'a self,
        namespace: &'a str,
        cronjob: &'a CronJob,
    ) -> BoxFuture<'a, Result<CronJob, BoxError>> {
        let span = trace_span!(
            "create_cronjob",
            kubernetes_namespace = %namespace,
            cronjob_name = cronjob.metadata.name.as_deref().unwrap_or_default()
        );

        Box::pin(
            async move {
                let api: Api<CronJob> = Api::namespaced(self.clone(), namespace);
                let post_params = PostParams {
                    field_manager: Some(FIELD_MANAGER.to_string()),
                    ..Default::default()
                };
                api.create(&post_params, cronjob)
                    .await
                    .map_err(BoxError::from)
            }
            .instrument(span),
        )
    }
}
