use self::cli::{Cli, CreateResource};
use self::config::KubeFactory;
use self::create::cronjob::CronJobOptions;
use self::create::printer::IoStreams;
use self::create::{CreateError, Lifecycle};
use clap::Parser;
use thiserror::Error;
use tracing::info;
use tracing_error::ExtractSpanTrace;
use tracing_error::SpanTrace;

pub mod cli;
pub mod config;
pub mod create;
pub mod error;
pub mod kubernetes_objects;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Create(#[from] CreateError),
}

impl ExtractSpanTrace for AppError {
    fn span_trace(&self) -> Option<&SpanTrace> {
        match self {
            AppError::Create(e) => e.span_trace(),
        }
    }
}

pub async fn app() -> Result<(), AppError> {
    let cli = Cli::parse();
    let factory = KubeFactory::new(cli.connection);

    match cli.resource {
        CreateResource::Cronjob(args) => {
            let options = CronJobOptions::new(args.flags, args.print, IoStreams::stdout());
            Lifecycle::new(options)
                .execute(&factory, args.positional)
                .await?;
            info!("Create cronjob finished.");
        }
    }

    Ok(())
}
