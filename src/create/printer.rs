use std::io::{self, Write};

use kube::Resource;
use serde::Serialize;
use thiserror::Error;

use crate::cli::{OutputFormat, PrintFlags};

#[derive(Error, Debug)]
pub enum PrintError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode object as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode object as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Output stream a command prints its result to.
pub struct IoStreams {
    pub out: Box<dyn Write + Send>,
}

impl IoStreams {
    pub fn stdout() -> Self {
        IoStreams {
            out: Box::new(io::stdout()),
        }
    }
}

/// Renders objects in the format selected by [`PrintFlags`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Printer {
    format: Option<OutputFormat>,
    operation: String,
}

impl Printer {
    /// `operation` is the past-tense verb reported next to the object, e.g. "created".
    pub fn new(flags: &PrintFlags, operation: &str) -> Self {
        let operation = if flags.dry_run {
            format!("{operation} (dry run)")
        } else {
            operation.to_string()
        };
        Printer {
            format: flags.output,
            operation,
        }
    }

    pub fn print_obj<K>(&self, obj: &K, out: &mut dyn Write) -> Result<(), PrintError>
    where
        K: Resource<DynamicType = ()> + Serialize,
    {
        match self.format {
            Some(OutputFormat::Yaml) => serde_yaml::to_writer(&mut *out, obj)?,
            Some(OutputFormat::Json) => {
                serde_json::to_writer_pretty(&mut *out, obj)?;
                writeln!(out)?;
            }
            Some(OutputFormat::Name) => writeln!(out, "{}", resource_name(obj))?,
            None => writeln!(out, "{} {}", resource_name(obj), self.operation)?,
        }
        out.flush()?;
        Ok(())
    }
}

/// `kind.group/name`, e.g. `cronjob.batch/my-job`.
fn resource_name<K: Resource<DynamicType = ()>>(obj: &K) -> String {
    let kind = K::kind(&()).to_lowercase();
    let group = K::group(&());
    let name = obj.meta().name.as_deref().unwrap_or_default();
    if group.is_empty() {
        format!("{kind}/{name}")
    } else {
        format!("{kind}.{group}/{name}")
    }
}
