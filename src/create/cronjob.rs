use std::fmt;
use std::sync::Arc;

use k8s_openapi::api::batch::v1::CronJob;
use tracing::{debug, info};

use super::printer::{IoStreams, PrintError, Printer};
use super::{CreateCommand, CreateError, Phase, PhaseTracker, name_from_args};
use crate::cli::{CronJobFlags, PositionalArgs, PrintFlags};
use crate::config::Factory;
use crate::error::SpannedExt;
use crate::kubernetes_objects::CronJobClient;
use crate::kubernetes_objects::cronjob::{CronJobParams, DEFAULT_RESTART_POLICY, build_cronjob};

type PrintObj = Box<dyn FnMut(&CronJob) -> Result<(), PrintError> + Send>;

/// Collaborators bound during Complete.
struct Bound {
    client: Arc<dyn CronJobClient>,
    namespace: String,
    print_obj: PrintObj,
}

/// `create cronjob NAME --image=IMAGE --schedule=CRON [-- COMMAND...]`
///
/// Tracks its own phase, so Run refuses to build anything unless Validate passed.
pub struct CronJobOptions {
    params: CronJobParams,
    dry_run: bool,
    print_flags: PrintFlags,
    streams: Option<IoStreams>,
    bound: Option<Bound>,
    tracker: PhaseTracker,
}

impl fmt::Debug for CronJobOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CronJobOptions")
            .field("params", &self.params)
            .field("dry_run", &self.dry_run)
            .field("print_flags", &self.print_flags)
            .field("namespace", &self.bound.as_ref().map(|b| &b.namespace))
            .field("phase", &self.tracker.phase())
            .finish_non_exhaustive()
    }
}

impl CronJobOptions {
    pub fn new(flags: CronJobFlags, print_flags: PrintFlags, streams: IoStreams) -> Self {
        CronJobOptions {
            params: CronJobParams {
                name: String::new(),
                image: flags.image,
                schedule: flags.schedule,
                command: Vec::new(),
                restart_policy: flags.restart,
            },
            dry_run: false,
            print_flags,
            streams: Some(streams),
            bound: None,
            tracker: PhaseTracker::new(Self::NAME),
        }
    }

    #[cfg(test)]
    pub(crate) fn params(&self) -> &CronJobParams {
        &self.params
    }

    #[cfg(test)]
    pub(crate) fn dry_run(&self) -> bool {
        self.dry_run
    }

    #[cfg(test)]
    pub(crate) fn namespace(&self) -> Option<&str> {
        self.bound.as_ref().map(|b| b.namespace.as_str())
    }

    async fn bind(
        &mut self,
        factory: &dyn Factory,
        args: PositionalArgs,
    ) -> Result<(), CreateError> {
        self.params.name = name_from_args(Self::NAME, &args)?;
        self.params.command = args.command;
        if self.params.restart_policy.is_empty() {
            self.params.restart_policy = DEFAULT_RESTART_POLICY.to_string();
        }

        let client = factory.to_client().await?;
        let namespace = factory.namespace().await?;

        self.dry_run = self.print_flags.dry_run;
        let printer = Printer::new(&self.print_flags, "created");
        let Some(mut streams) = self.streams.take() else {
            return Err(CreateError::Lifecycle {
                command: Self::NAME,
                attempted: "complete",
                phase: self.tracker.phase(),
            });
        };
        let print_obj: PrintObj =
            Box::new(move |cronjob: &CronJob| printer.print_obj(cronjob, streams.out.as_mut()));

        debug!(
            "Cronjob '{}' bound to namespace '{}' (dry run: {}).",
            self.params.name, namespace, self.dry_run
        );
        self.bound = Some(Bound {
            client,
            namespace,
            print_obj,
        });
        Ok(())
    }

    fn check(&self) -> Result<(), CreateError> {
        if self.params.image.is_empty() {
            return Err(CreateError::Validation(
                "--image must be specified".to_string(),
            ));
        }
        if self.params.schedule.is_empty() {
            return Err(CreateError::Validation(
                "--schedule must be specified".to_string(),
            ));
        }
        Ok(())
    }

    async fn submit(&mut self) -> Result<(), CreateError> {
        let Some(bound) = self.bound.as_mut() else {
            return Err(CreateError::Lifecycle {
                command: Self::NAME,
                attempted: "run",
                phase: self.tracker.phase(),
            });
        };

        let mut cronjob = build_cronjob(&self.params);

        if self.dry_run {
            info!(
                "Dry run: cronjob '{}' was not sent to namespace '{}'.",
                self.params.name, bound.namespace
            );
        } else {
            cronjob = bound
                .client
                .create(&bound.namespace, &cronjob)
                .await
                .with_span_trace()
                .map_err(|cause| CreateError::Submission {
                    resource: Self::NAME,
                    cause,
                })?;
            info!(
                "Cronjob '{}' created in namespace '{}'.",
                self.params.name, bound.namespace
            );
        }

        (bound.print_obj)(&cronjob)?;
        Ok(())
    }
}

impl CreateCommand for CronJobOptions {
    const NAME: &'static str = "cronjob";

    async fn complete(
        &mut self,
        factory: &dyn Factory,
        args: PositionalArgs,
    ) -> Result<(), CreateError> {
        self.tracker.enter(Phase::Unconfigured, "complete")?;
        let result = self.bind(factory, args).await;
        self.tracker.leave(result, Phase::Completed)
    }

    fn validate(&mut self) -> Result<(), CreateError> {
        self.tracker.enter(Phase::Completed, "validate")?;
        let result = self.check();
        self.tracker.leave(result, Phase::Validated)
    }

    async fn run(&mut self) -> Result<(), CreateError> {
        self.tracker.enter(Phase::Validated, "run")?;
        let result = self.submit().await;
        self.tracker.leave(result, Phase::Executed)
    }
}
