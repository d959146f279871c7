//! Project synthesis: turn a host version and module list into a
//! buildable cargo project.

use std::path::{Path, PathBuf};

use xtend_core::GeneratedFile;
use xtend_manifest::{Config, LATEST, ModuleReference};

use crate::{
    BuildError, BuildWorkspace, Invocation, Output, Step, Toolchain,
    error::AtStep,
    files::{CargoToml, MainRs},
    toolchain::drive,
};

/// Assembles a workspace step by step.
///
/// Steps run in order and the first failure aborts the synthesis. The
/// partially built directory is left for inspection.
pub struct Synthesizer<'a> {
    toolchain: &'a dyn Toolchain,
    config: &'a Config,
    cwd: &'a Path,
}

impl<'a> Synthesizer<'a> {
    /// `cwd` is the invoking directory; replacement paths resolve against it.
    pub fn new(toolchain: &'a dyn Toolchain, config: &'a Config, cwd: &'a Path) -> Self {
        Self {
            toolchain,
            config,
            cwd,
        }
    }

    /// Create the workspace directory and assemble the project in it.
    ///
    /// Returns the project root.
    pub fn synthesize(
        &self,
        workspace: &mut BuildWorkspace,
        out: &mut dyn Output,
    ) -> Result<PathBuf, BuildError> {
        let root = workspace.create()?;
        out.info(&format!("Project directory: {}", root.display()));

        let init = [
            "init",
            "--bin",
            "--vcs",
            "none",
            "--name",
            self.config.project.name.as_str(),
        ];
        drive(self.toolchain, out, Invocation::new(Step::Init, &root, init))?;

        self.edit_manifest(&root, workspace.modules(), out)
            .at_step(Step::Edit)?;

        MainRs::new(&self.config.host, workspace.modules())
            .write(&root)
            .at_step(Step::Render)?;

        drive(
            self.toolchain,
            out,
            Invocation::new(Step::Tidy, &root, ["generate-lockfile"]),
        )?;

        let host = host_requirement(&self.config.host.krate, workspace.host_version());
        drive(
            self.toolchain,
            out,
            Invocation::new(Step::PinHost, &root, ["add".to_string(), host]),
        )?;

        drive(
            self.toolchain,
            out,
            Invocation::new(Step::Fetch, &root, ["fetch"]),
        )?;

        Ok(root)
    }

    /// Add the runtime glue, every module, and a patch per replacement.
    fn edit_manifest(
        &self,
        root: &Path,
        modules: &[ModuleReference],
        out: &mut dyn Output,
    ) -> eyre::Result<()> {
        let mut manifest = CargoToml::open(root)?;
        manifest.add_runtime(self.config.runtime.path.as_deref())?;

        for module in modules {
            out.info(&format!("Plugin: {}", module));
            manifest.add_module(module)?;

            if let Some(path) = module.resolve_replacement(self.cwd) {
                out.info(&format!(
                    "Replace: {} => {}",
                    module.module_string(),
                    path.display()
                ));
                manifest.add_replacement(module, &path)?;
            }
        }

        manifest.save()
    }
}

/// `cargo add` argument pinning the host to exactly `version`.
///
/// A leading `v` is dropped since cargo versions carry none; `latest`
/// leaves the choice to cargo.
fn host_requirement(krate: &str, version: &str) -> String {
    if version == LATEST {
        return krate.to_string();
    }
    let version = version.strip_prefix('v').unwrap_or(version);
    format!("{}@={}", krate, version)
}
