use std::{fmt, io, path::PathBuf};

use thiserror::Error;

use crate::Step;

/// Boxed cause of a failed step.
pub type StepSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of a build operation.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A synthesis, compile or run step failed; nothing after it ran
    #[error("{step} failed")]
    Step {
        step: Step,
        #[source]
        source: StepSource,
    },

    #[error("failed to get current working directory")]
    CurrentDir(#[source] io::Error),

    #[error("modules '{first}' and '{second}' both provide crate '{krate}'")]
    DuplicateCrate {
        krate: String,
        first: String,
        second: String,
    },

    #[error("module '{module}' provides crate '{krate}', which the project already uses")]
    ReservedCrate { krate: String, module: String },

    #[error("workspace already synthesized at '{}'; dispose it first", .0.display())]
    WorkspaceInUse(PathBuf),

    #[error("failed to remove workspace '{}'", .path.display())]
    Dispose {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    /// The step that failed, if the failure came from a step.
    pub fn step(&self) -> Option<Step> {
        match self {
            BuildError::Step { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// Exit status of the toolchain process behind a failed step.
    pub fn exit_status(&self) -> Option<ExitStatus> {
        let BuildError::Step { source, .. } = self else {
            return None;
        };
        match source.downcast_ref::<ToolchainError>()? {
            ToolchainError::Failed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// This error and its sources, joined with `: `.
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

/// Failure of a single toolchain invocation.
#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("'{program}' not found on PATH")]
    NotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to spawn '{command}'")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("'{command}' exited with {status}")]
    Failed { command: String, status: ExitStatus },
}

/// Exit status of a toolchain process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Code(i32),
    /// Terminated by a signal
    Signal,
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStatus::Code(code) => write!(f, "status {}", code),
            ExitStatus::Signal => f.write_str("a signal"),
        }
    }
}

/// Attach the step name to a fallible result.
pub(crate) trait AtStep<T> {
    fn at_step(self, step: Step) -> Result<T, BuildError>;
}

impl<T, E: Into<StepSource>> AtStep<T> for Result<T, E> {
    fn at_step(self, step: Step) -> Result<T, BuildError> {
        self.map_err(|e| BuildError::Step {
            step,
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(step: Step, status: ExitStatus) -> BuildError {
        let result: Result<(), ToolchainError> = Err(ToolchainError::Failed {
            command: "cargo run --quiet --".to_string(),
            status,
        });
        result.at_step(step).unwrap_err()
    }

    #[test]
    fn test_chain_joins_sources() {
        let err = failed(Step::Run, ExitStatus::Code(3));
        assert_eq!(
            err.chain(),
            "run failed: 'cargo run --quiet --' exited with status 3"
        );
    }

    #[test]
    fn test_exit_status_of_failed_process() {
        assert_eq!(
            failed(Step::Run, ExitStatus::Code(3)).exit_status(),
            Some(ExitStatus::Code(3))
        );
        assert_eq!(
            failed(Step::Fetch, ExitStatus::Signal).exit_status(),
            Some(ExitStatus::Signal)
        );
    }

    #[test]
    fn test_exit_status_absent_for_other_failures() {
        let io: Result<(), io::Error> = Err(io::Error::other("disk full"));
        assert_eq!(io.at_step(Step::Collect).unwrap_err().exit_status(), None);
        assert_eq!(BuildError::WorkspaceInUse(PathBuf::from("/tmp")).exit_status(), None);
        assert_eq!(BuildError::WorkspaceInUse(PathBuf::from("/tmp")).step(), None);
    }
}
