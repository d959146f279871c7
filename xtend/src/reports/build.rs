//! Build and run command report data structures.

use std::path::PathBuf;

use xtend_builder::Output;

use super::output::Report;

/// What a successful build produced.
#[derive(Debug)]
pub struct BuildReport {
    /// Host crate name.
    pub host: String,
    /// Requested host version.
    pub host_version: String,
    /// Compiled-in modules, as `module@version`.
    pub modules: Vec<String>,
    /// The copied binary, for compiled builds.
    pub artifact: Option<PathBuf>,
    /// Workspace left on disk at the user's request.
    pub kept_workspace: Option<PathBuf>,
}

impl Report for BuildReport {
    fn render(&self, out: &mut dyn Output) {
        let plugins = match self.modules.len() {
            1 => "1 plugin".to_string(),
            n => format!("{} plugins", n),
        };

        if let Some(artifact) = &self.artifact {
            out.info(&format!(
                "Built {} {} with {}: {}",
                self.host,
                self.host_version,
                plugins,
                artifact.display()
            ));
            for module in &self.modules {
                out.info(&format!("  - {}", module));
            }
        }

        match &self.kept_workspace {
            Some(dir) => out.info(&format!("Workspace kept at {}", dir.display())),
            None => out.info("Workspace removed"),
        }
    }
}
