use thiserror::Error;
use tracing_error::{ExtractSpanTrace, SpanTrace};

use super::Phase;
use super::printer::PrintError;
use crate::config::ConfigError;
use crate::error::{BoxError, SpannedErr};

#[derive(Error, Debug)]
pub enum CreateError {
    #[error("{message}\nSee 'kube-create {command} -h' for help and examples")]
    Usage {
        command: &'static str,
        message: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Validation(String),

    #[error("failed to create {resource}: {cause}")]
    Submission {
        resource: &'static str,
        cause: SpannedErr<BoxError>,
    },

    #[error(transparent)]
    Print(#[from] PrintError),

    #[error("cannot {attempted} {command} command in {phase:?} state")]
    Lifecycle {
        command: &'static str,
        attempted: &'static str,
        phase: Phase,
    },
}

impl ExtractSpanTrace for CreateError {
    fn span_trace(&self) -> Option<&SpanTrace> {
        match self {
            CreateError::Submission { cause, .. } => cause.span_trace(),
            _ => None,
        }
    }
}
