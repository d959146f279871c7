use clap::Args;
use eyre::Result;

use super::{TargetArgs, exit_with};
use crate::reports::{BuildReport, Report, TerminalOutput};

#[derive(Args)]
pub struct RunCommand {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Arguments to pass to the host
    #[arg(last = true)]
    pub args: Vec<String>,
}

impl RunCommand {
    pub fn run(&self) -> Result<()> {
        let config = self.target.load_config();

        let mut out = TerminalOutput::new();
        let mut orchestrator = self.target.orchestrator(config)?;

        // Failures are reported and acknowledged by the orchestrator
        if let Err(err) = orchestrator.run(&self.args, &mut out) {
            exit_with(&err);
        }

        let report = BuildReport {
            host: orchestrator.config().host.krate.clone(),
            host_version: self.target.host_version.clone(),
            modules: orchestrator.modules().iter().map(ToString::to_string).collect(),
            artifact: None,
            kept_workspace: self.target.finish(&mut orchestrator)?,
        };
        report.render(&mut out);

        Ok(())
    }
}
