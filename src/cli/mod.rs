use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::kubernetes_objects::cronjob::DEFAULT_RESTART_POLICY;

/// Create a resource in a Kubernetes cluster.
#[derive(Debug, Parser)]
#[command(name = "kube-create", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) resource: CreateResource,

    #[command(flatten)]
    pub(crate) connection: ConnectionFlags,
}

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum CreateResource {
    /// Create a cronjob with the specified name.
    #[command(
        visible_alias = "cj",
        override_usage = "kube-create cronjob NAME --image=IMAGE --schedule='0/5 * * * ?' -- [COMMAND] [args...]",
        after_help = CRONJOB_EXAMPLES
    )]
    Cronjob(CronJobArgs),
}

const CRONJOB_EXAMPLES: &str = "\
Examples:
  # Create a cronjob
  kube-create cronjob my-job --image=busybox --schedule=\"*/1 * * * *\"

  # Create a cronjob with command
  kube-create cronjob my-job --image=busybox --schedule=\"*/1 * * * *\" -- date";

/// Flags selecting the cluster, credentials and namespace.
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionFlags {
    /// Path to the kubeconfig file to use.
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// The name of the kubeconfig context to use.
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// The name of the kubeconfig cluster to use.
    #[arg(long, global = true)]
    pub cluster: Option<String>,

    /// The name of the kubeconfig user to use.
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Namespace scope for this request.
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,
}

/// Positional arguments of a create command: `NAME [-- COMMAND ARGS...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct PositionalArgs {
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
    Name,
}

#[derive(Debug, Clone, Default, Args)]
pub struct PrintFlags {
    /// Output format. One of: yaml, json, name.
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Only print the object that would be sent, without sending it.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CronJobFlags {
    /// Image name to run.
    #[arg(long, default_value = "")]
    pub image: String,

    /// A schedule in the Cron format the job should be run with.
    #[arg(long, default_value = "")]
    pub schedule: String,

    /// Job's restart policy. Supported values: OnFailure, Never.
    #[arg(long, default_value = DEFAULT_RESTART_POLICY)]
    pub restart: String,
}

#[derive(Debug, Clone, Args)]
pub struct CronJobArgs {
    #[command(flatten)]
    pub positional: PositionalArgs,

    #[command(flatten)]
    pub flags: CronJobFlags,

    #[command(flatten)]
    pub print: PrintFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("kube-create").chain(args.iter().copied())).unwrap()
    }

    fn cronjob_args(cli: Cli) -> CronJobArgs {
        match cli.resource {
            CreateResource::Cronjob(args) => args,
        }
    }

    #[test]
    fn test_parse_cronjob_with_command() {
        let args = cronjob_args(parse(&[
            "cronjob",
            "my-job",
            "--image=busybox",
            "--schedule",
            "*/1 * * * *",
            "--",
            "date",
            "-u",
        ]));

        assert_eq!(args.positional.names, vec!["my-job"]);
        assert_eq!(args.positional.command, vec!["date", "-u"]);
        assert_eq!(args.flags.image, "busybox");
        assert_eq!(args.flags.schedule, "*/1 * * * *");
        assert_eq!(args.flags.restart, "OnFailure");
        assert!(!args.print.dry_run);
        assert_eq!(args.print.output, None);
    }

    #[test]
    fn test_parse_alias_and_print_flags() {
        let args = cronjob_args(parse(&[
            "cj",
            "my-job",
            "--restart=Never",
            "--dry-run",
            "-o",
            "yaml",
        ]));

        assert_eq!(args.flags.image, "");
        assert_eq!(args.flags.schedule, "");
        assert_eq!(args.flags.restart, "Never");
        assert!(args.print.dry_run);
        assert_eq!(args.print.output, Some(OutputFormat::Yaml));
    }

    #[test]
    fn test_parse_global_connection_flags() {
        let cli = parse(&[
            "cronjob",
            "my-job",
            "-n",
            "jobs",
            "--context",
            "dev",
            "--kubeconfig",
            "/tmp/kubeconfig",
        ]);

        assert_eq!(cli.connection.namespace.as_deref(), Some("jobs"));
        assert_eq!(cli.connection.context.as_deref(), Some("dev"));
        assert_eq!(
            cli.connection.kubeconfig,
            Some(PathBuf::from("/tmp/kubeconfig"))
        );
    }

    #[test]
    fn test_parse_without_name_leaves_names_empty() {
        let args = cronjob_args(parse(&["cronjob", "--image=busybox"]));

        assert!(args.positional.names.is_empty());
        assert!(args.positional.command.is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_output_format() {
        let result = Cli::try_parse_from(["kube-create", "cronjob", "my-job", "-o", "wide"]);

        assert!(result.is_err());
    }
}
