//! The Complete → Validate → Run lifecycle shared by every create command.
//!
//! A command implements [`CreateCommand`]; [`Lifecycle`] drives the three
//! phases in order and refuses to re-enter a phase once it has run or failed.

pub mod cronjob;
pub mod error;
pub mod printer;
#[cfg(test)]
pub(crate) mod testing;

use tracing::{debug, instrument};

use crate::cli::PositionalArgs;
use crate::config::Factory;

pub use self::error::CreateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unconfigured,
    Completed,
    Validated,
    Executed,
    Aborted,
}

/// One "create X" command.
pub trait CreateCommand {
    /// Subcommand name, e.g. `cronjob`.
    const NAME: &'static str;

    /// Resolves derived fields, defaults and the connection. Must not touch the network.
    fn complete(
        &mut self,
        factory: &dyn Factory,
        args: PositionalArgs,
    ) -> impl Future<Output = Result<(), CreateError>>;

    /// Rejects missing or inconsistent input. No I/O.
    fn validate(&mut self) -> Result<(), CreateError>;

    /// Builds the object, submits it unless dry-running, and prints the result.
    fn run(&mut self) -> impl Future<Output = Result<(), CreateError>>;
}

/// Current phase of one command, refusing out-of-order transitions.
#[derive(Debug)]
pub(crate) struct PhaseTracker {
    command: &'static str,
    phase: Phase,
}

impl PhaseTracker {
    pub(crate) fn new(command: &'static str) -> Self {
        PhaseTracker {
            command,
            phase: Phase::Unconfigured,
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    /// Fails and aborts unless the command is in `expected`.
    pub(crate) fn enter(
        &mut self,
        expected: Phase,
        attempted: &'static str,
    ) -> Result<(), CreateError> {
        if self.phase == expected {
            return Ok(());
        }
        let phase = self.phase;
        self.phase = Phase::Aborted;
        Err(CreateError::Lifecycle {
            command: self.command,
            attempted,
            phase,
        })
    }

    /// Moves to `next` on success, to `Aborted` on failure.
    pub(crate) fn leave<T>(
        &mut self,
        result: Result<T, CreateError>,
        next: Phase,
    ) -> Result<T, CreateError> {
        match result {
            Ok(value) => {
                debug!("{} command entered {:?} state.", self.command, next);
                self.phase = next;
                Ok(value)
            }
            Err(e) => {
                self.phase = Phase::Aborted;
                Err(e)
            }
        }
    }
}

pub struct Lifecycle<C> {
    command: C,
    tracker: PhaseTracker,
}

impl<C: CreateCommand> Lifecycle<C> {
    pub fn new(command: C) -> Self {
        Lifecycle {
            command,
            tracker: PhaseTracker::new(C::NAME),
        }
    }

    pub fn phase(&self) -> Phase {
        self.tracker.phase()
    }

    /// Runs all three phases, stopping at the first failure.
    pub async fn execute(
        mut self,
        factory: &dyn Factory,
        args: PositionalArgs,
    ) -> Result<C, CreateError> {
        self.complete(factory, args).await?;
        self.validate()?;
        self.run().await?;
        Ok(self.command)
    }

    #[instrument("complete", skip_all, fields(command = C::NAME))]
    pub async fn complete(
        &mut self,
        factory: &dyn Factory,
        args: PositionalArgs,
    ) -> Result<(), CreateError> {
        self.tracker.enter(Phase::Unconfigured, "complete")?;
        let result = self.command.complete(factory, args).await;
        self.tracker.leave(result, Phase::Completed)
    }

    #[instrument("validate", skip_all, fields(command = C::NAME))]
    pub fn validate(&mut self) -> Result<(), CreateError> {
        self.tracker.enter(Phase::Completed, "validate")?;
        let result = self.command.validate();
        self.tracker.leave(result, Phase::Validated)
    }

    #[instrument("run", skip_all, fields(command = C::NAME))]
    pub async fn run(&mut self) -> Result<(), CreateError> {
        self.tracker.enter(Phase::Validated, "run")?;
        let result = self.command.run().await;
        self.tracker.leave(result, Phase::Executed)
    }
}

/// Takes the object name from the positional arguments.
///
/// Exactly one name must precede `--`, and it must be a DNS-1123 subdomain.
pub fn name_from_args(
    command: &'static str,
    args: &PositionalArgs,
) -> Result<String, CreateError> {
    let name = match args.names.as_slice() {
        [name] => name,
        names => {
            return Err(CreateError::Usage {
                command,
                message: format!("exactly one NAME is required, got {}", names.len()),
            });
        }
    };

    if !is_dns1123_subdomain(name) {
        return Err(CreateError::Usage {
            command,
            message: format!(
                "invalid NAME '{name}': must consist of lower case alphanumeric characters, '-' or '.', \
                 and must start and end with an alphanumeric character"
            ),
        });
    }

    Ok(name.clone())
}

fn is_dns1123_subdomain(name: &str) -> bool {
    const MAX_LEN: usize = 253;

    let alphanumeric = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    let is_label = |label: &str| {
        label.starts_with(alphanumeric)
            && label.ends_with(alphanumeric)
            && label.chars().all(|c| alphanumeric(c) || c == '-')
    };

    !name.is_empty() && name.len() <= MAX_LEN && name.split('.').all(is_label)
}
