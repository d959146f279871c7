use clap::Args;
use eyre::Result;

use super::{TargetArgs, exit_with};
use crate::reports::{BuildReport, Report, TerminalOutput};

#[derive(Args)]
pub struct BuildCommand {
    #[command(flatten)]
    pub target: TargetArgs,

    /// File name of the binary (defaults to the host crate name)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Extra arguments for `cargo build`
    #[arg(last = true)]
    pub cargo_args: Vec<String>,
}

impl BuildCommand {
    pub fn run(&self) -> Result<()> {
        let mut config = self.target.load_config();
        if let Some(output) = &self.output {
            config.project.output = Some(output.clone());
        }

        let mut out = TerminalOutput::new();
        let mut orchestrator = self.target.orchestrator(config)?;

        let artifact = match orchestrator.compile(&self.cargo_args, &mut out) {
            Ok(artifact) => artifact,
            Err(err) => {
                orchestrator.report_failure(&err, &mut out);
                exit_with(&err);
            }
        };

        let report = BuildReport {
            host: orchestrator.config().host.krate.clone(),
            host_version: self.target.host_version.clone(),
            modules: orchestrator.modules().iter().map(ToString::to_string).collect(),
            artifact: Some(artifact),
            kept_workspace: self.target.finish(&mut orchestrator)?,
        };
        report.render(&mut out);

        Ok(())
    }
}
