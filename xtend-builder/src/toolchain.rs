//! Cargo invocations against a synthesized workspace.

use std::{
    fmt,
    path::PathBuf,
    process::{Command, Stdio},
};

use crate::{BuildError, ExitStatus, Output, ToolchainError, error::AtStep};

/// A named step of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Create the temporary project directory
    CreateWorkspace,
    /// `cargo init`
    Init,
    /// Write runtime, module and patch entries into `Cargo.toml`
    Edit,
    /// Write `src/main.rs`
    Render,
    /// `cargo generate-lockfile`
    Tidy,
    /// `cargo add <host>@=<version>`
    PinHost,
    /// `cargo fetch`
    Fetch,
    /// `cargo build`
    Compile,
    /// Copy the compiled binary out of the workspace
    Collect,
    /// `cargo run`
    Run,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::CreateWorkspace => "create-workspace",
            Step::Init => "init",
            Step::Edit => "edit",
            Step::Render => "render",
            Step::Tidy => "tidy",
            Step::PinHost => "pin-host",
            Step::Fetch => "fetch",
            Step::Compile => "compile",
            Step::Collect => "collect",
            Step::Run => "run",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One cargo subcommand run inside a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub step: Step,
    pub dir: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(step: Step, dir: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            step,
            dir: dir.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The cargo subcommand (`init`, `add`, ...).
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cargo")?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Executes cargo subcommands.
///
/// Implementations run the invocation to completion; there are no
/// retries, callers re-run the whole synthesis instead.
pub trait Toolchain {
    fn invoke(&self, invocation: &Invocation) -> Result<(), ToolchainError>;
}

impl<T: Toolchain + ?Sized> Toolchain for &T {
    fn invoke(&self, invocation: &Invocation) -> Result<(), ToolchainError> {
        (**self).invoke(invocation)
    }
}

/// Announce and run one invocation, failing with its step.
pub(crate) fn drive(
    toolchain: &dyn Toolchain,
    out: &mut dyn Output,
    invocation: Invocation,
) -> Result<(), BuildError> {
    out.command(&invocation);
    toolchain.invoke(&invocation).at_step(invocation.step)
}

/// The cargo executable, run as a child process with inherited stdio.
#[derive(Debug, Clone)]
pub struct Cargo {
    program: PathBuf,
}

impl Cargo {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Find cargo on `PATH`.
    pub fn locate() -> Result<Self, ToolchainError> {
        which::which("cargo")
            .map(Self::new)
            .map_err(|source| ToolchainError::NotFound {
                program: "cargo".to_string(),
                source,
            })
    }
}

impl Toolchain for Cargo {
    fn invoke(&self, invocation: &Invocation) -> Result<(), ToolchainError> {
        let status = Command::new(&self.program)
            .args(&invocation.args)
            .current_dir(&invocation.dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ToolchainError::Spawn {
                command: invocation.to_string(),
                source,
            })?;

        if status.success() {
            return Ok(());
        }

        Err(ToolchainError::Failed {
            command: invocation.to_string(),
            status: status.code().map_or(ExitStatus::Signal, ExitStatus::Code),
        })
    }
}
