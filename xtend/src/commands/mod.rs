mod build;
mod run;

use std::path::{Path, PathBuf};

use build::BuildCommand;
use clap::{Args, Parser, Subcommand};
use eyre::{Result, WrapErr};
use run::RunCommand;
use xtend_builder::{BuildError, Cargo, ExitStatus, Orchestrator};
use xtend_manifest::{Config, ModuleReference};

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for xtend_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "xtend")]
#[command(version)]
#[command(about = "Build a host application with plugin modules compiled in")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Build(cmd) => cmd.run(),
            Commands::Run(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the host with the given modules into a binary
    Build(BuildCommand),

    /// Build the host with the given modules and run it
    Run(RunCommand),
}

/// What to build: shared by every subcommand.
#[derive(Args)]
pub(crate) struct TargetArgs {
    /// Host version to pin, e.g. v0.22.0 or latest
    pub host_version: String,

    /// Module to compile in: module[@version][=replacement]
    #[arg(long = "with", value_name = "MODULE")]
    pub with: Vec<String>,

    /// Path to xtend.toml (defaults to ./xtend.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Keep the build workspace after a successful build
    #[arg(long)]
    pub keep: bool,
}

impl TargetArgs {
    pub fn load_config(&self) -> Config {
        Config::load(self.config.as_deref()).unwrap_or_exit()
    }

    pub fn modules(&self) -> Vec<ModuleReference> {
        self.with
            .iter()
            .map(|spec| ModuleReference::parse(spec).unwrap_or_exit())
            .collect()
    }

    /// Locate cargo and set up an orchestrator in the current directory.
    pub fn orchestrator(&self, config: Config) -> Result<Orchestrator<Cargo>> {
        let modules = self.modules();
        let cargo = Cargo::locate().wrap_err("cargo is required to build the host")?;
        Orchestrator::new(cargo, config, self.host_version.as_str(), modules)
            .wrap_err("Failed to prepare the build")
    }

    /// Dispose of the workspace unless asked to keep it.
    ///
    /// Returns the kept workspace directory.
    pub fn finish(&self, orchestrator: &mut Orchestrator<Cargo>) -> Result<Option<PathBuf>> {
        if self.keep {
            return Ok(orchestrator.workspace_dir().map(Path::to_path_buf));
        }
        orchestrator
            .dispose()
            .wrap_err("Failed to remove the build workspace")?;
        Ok(None)
    }
}

/// Exit with the status of the failed process, or 1.
///
/// The failure has already been reported through the output.
pub(crate) fn exit_with(err: &BuildError) -> ! {
    std::process::exit(exit_code(err));
}

fn exit_code(err: &BuildError) -> i32 {
    match err.exit_status() {
        Some(ExitStatus::Code(code)) if code != 0 => code,
        _ => 1,
    }
}
