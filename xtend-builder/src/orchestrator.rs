//! The build facade: synthesize, then compile or run.

use std::{
    collections::HashMap,
    env::consts::EXE_SUFFIX,
    fs,
    path::{Path, PathBuf},
};

use xtend_manifest::{Config, ModuleReference};

use crate::{
    BuildError, BuildWorkspace, Invocation, Output, Step, Synthesizer, Toolchain,
    error::AtStep,
    files::RUNTIME_CRATE,
    toolchain::drive,
};

/// Prompt shown before returning a failed build to the caller.
pub const ACKNOWLEDGE_PROMPT: &str = "Press enter to continue";

/// Owns one build workspace and drives it through a toolchain.
///
/// Each orchestrator builds once. The workspace stays on disk after
/// [`compile`](Self::compile) or [`run`](Self::run), successful or not,
/// until [`dispose`](Self::dispose) is called.
pub struct Orchestrator<T: Toolchain> {
    toolchain: T,
    config: Config,
    cwd: PathBuf,
    workspace: BuildWorkspace,
}

impl<T: Toolchain> Orchestrator<T> {
    /// Create an orchestrator anchored at the process working directory.
    ///
    /// # Errors
    ///
    /// Fails when the working directory is unavailable or when two
    /// modules, or a module and the project itself, share a crate name.
    pub fn new(
        toolchain: T,
        config: Config,
        host_version: impl Into<String>,
        modules: Vec<ModuleReference>,
    ) -> Result<Self, BuildError> {
        let cwd = std::env::current_dir().map_err(BuildError::CurrentDir)?;
        Self::in_dir(toolchain, config, host_version, modules, cwd)
    }

    /// Like [`new`](Self::new), with an explicit working directory.
    ///
    /// Replacement paths resolve against `cwd` and the compiled binary is
    /// copied into it.
    pub fn in_dir(
        toolchain: T,
        config: Config,
        host_version: impl Into<String>,
        modules: Vec<ModuleReference>,
        cwd: impl Into<PathBuf>,
    ) -> Result<Self, BuildError> {
        check_crate_names(&config, &modules)?;

        Ok(Self {
            toolchain,
            config,
            cwd: cwd.into(),
            workspace: BuildWorkspace::new(host_version, modules),
        })
    }

    /// Synthesize the project and build a release binary into the working
    /// directory.
    ///
    /// `extra_args` go to `cargo build` as given. A `--profile` or
    /// `--release` among them replaces the default release profile, and
    /// `--target` moves the binary under the target triple.
    ///
    /// Returns the path of the copied binary.
    pub fn compile(
        &mut self,
        extra_args: &[String],
        out: &mut dyn Output,
    ) -> Result<PathBuf, BuildError> {
        let root = self.synthesize(out)?;

        // An inherited CARGO_TARGET_DIR would move the binary elsewhere.
        let target = root.join("target");
        let layout = BuildLayout::from_args(extra_args);
        let mut args = vec!["build".to_string()];
        if !layout.profile_given {
            args.push("--release".to_string());
        }
        args.push("--target-dir".to_string());
        args.push(target.to_string_lossy().into_owned());
        args.extend(extra_args.iter().cloned());
        drive(&self.toolchain, out, Invocation::new(Step::Compile, &root, args))?;

        let binary = layout
            .output_dir(&target)
            .join(format!("{}{}", self.config.project.name, EXE_SUFFIX));
        let artifact = self
            .cwd
            .join(format!("{}{}", self.config.output_name(), EXE_SUFFIX));
        fs::copy(&binary, &artifact).at_step(Step::Collect)?;

        out.info(&format!("Binary: {}", artifact.display()));
        Ok(artifact)
    }

    /// Synthesize the project and run it with `args`.
    ///
    /// On failure the error is reported and the user acknowledges it before
    /// the error is returned.
    pub fn run(&mut self, args: &[String], out: &mut dyn Output) -> Result<(), BuildError> {
        let result = self.synthesize_and_run(args, out);
        if let Err(err) = &result {
            self.report_failure(err, out);
        }
        result
    }

    /// Print `err` with its causes and where the workspace was kept, then
    /// wait for the user.
    pub fn report_failure(&self, err: &BuildError, out: &mut dyn Output) {
        out.error(&err.chain());
        if let Some(dir) = self.workspace_dir() {
            out.info(&format!("Workspace kept at {}", dir.display()));
        }
        out.acknowledge(ACKNOWLEDGE_PROMPT);
    }

    /// Remove the workspace. Idempotent.
    pub fn dispose(&mut self) -> Result<(), BuildError> {
        self.workspace.dispose()
    }

    /// The workspace directory, once synthesis has created it.
    pub fn workspace_dir(&self) -> Option<&Path> {
        self.workspace.root()
    }

    pub fn modules(&self) -> &[ModuleReference] {
        self.workspace.modules()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn synthesize(&mut self, out: &mut dyn Output) -> Result<PathBuf, BuildError> {
        out.info(&format!(
            "Host: {} {}",
            self.config.host.krate,
            self.workspace.host_version()
        ));
        Synthesizer::new(&self.toolchain, &self.config, &self.cwd)
            .synthesize(&mut self.workspace, out)
    }

    fn synthesize_and_run(&mut self, args: &[String], out: &mut dyn Output) -> Result<(), BuildError> {
        let root = self.synthesize(out)?;

        let mut run_args = vec!["run".to_string(), "--quiet".to_string(), "--".to_string()];
        run_args.extend(args.iter().cloned());
        drive(&self.toolchain, out, Invocation::new(Step::Run, &root, run_args))
    }
}

/// Where `cargo build` puts the binary for a set of build arguments.
#[derive(Debug, PartialEq, Eq)]
struct BuildLayout {
    triple: Option<String>,
    profile: String,
    /// The arguments already pick a profile
    profile_given: bool,
}

impl BuildLayout {
    fn from_args(args: &[String]) -> Self {
        let mut layout = Self {
            triple: None,
            profile: "release".to_string(),
            profile_given: false,
        };

        let mut args = args.iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--release" | "-r" => {
                    layout.profile = "release".to_string();
                    layout.profile_given = true;
                }
                "--profile" => {
                    if let Some(profile) = args.next() {
                        layout.profile = profile.clone();
                        layout.profile_given = true;
                    }
                }
                "--target" => {
                    let triple = args.next();
                    if layout.triple.is_none() {
                        layout.triple = triple.cloned();
                    }
                }
                other => {
                    if let Some(profile) = other.strip_prefix("--profile=") {
                        layout.profile = profile.to_string();
                        layout.profile_given = true;
                    } else if let Some(triple) = other.strip_prefix("--target=") {
                        layout.triple.get_or_insert_with(|| triple.to_string());
                    }
                }
            }
        }
        layout
    }

    /// Output directory below `target`; cargo keeps `dev` and `test`
    /// builds in `debug`, and `bench` builds in `release`.
    fn output_dir(&self, target: &Path) -> PathBuf {
        let dir = match self.profile.as_str() {
            "dev" | "test" => "debug",
            "bench" => "release",
            other => other,
        };
        match &self.triple {
            Some(triple) => target.join(triple).join(dir),
            None => target.join(dir),
        }
    }
}

/// Every module must bring its own crate name, distinct from the names the
/// project already uses.
fn check_crate_names(config: &Config, modules: &[ModuleReference]) -> Result<(), BuildError> {
    let reserved = [
        config.project.name.as_str(),
        config.host.krate.as_str(),
        RUNTIME_CRATE,
    ];
    let mut seen: HashMap<String, &ModuleReference> = HashMap::new();

    for module in modules {
        // Cargo treats `-` and `_` in package names as the same crate.
        let key = module.crate_ident();
        if reserved
            .iter()
            .any(|name| name.replace('-', "_") == key.trim_start_matches("r#"))
        {
            return Err(BuildError::ReservedCrate {
                krate: module.crate_name().to_string(),
                module: module.import_path().to_string(),
            });
        }

        if let Some(first) = seen.insert(key, module) {
            return Err(BuildError::DuplicateCrate {
                krate: module.crate_name().to_string(),
                first: first.import_path().to_string(),
                second: module.import_path().to_string(),
            });
        }
    }
    Ok(())
}
