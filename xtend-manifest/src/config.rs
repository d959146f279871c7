//! `xtend.toml`: how to reach the host and how to name the build.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "xtend.toml";

/// Root of `xtend.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The host application being extended
    pub host: HostConfig,

    /// The synthesized project
    pub project: ProjectConfig,

    /// Where the generated entrypoint gets its runtime glue
    pub runtime: RuntimeConfig,
}

/// The host application crate and how the entrypoint drives it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Registry name of the host crate, pinned to the requested version
    #[serde(rename = "crate")]
    pub krate: String,

    /// Expression building the host, relative to the host crate root
    pub constructor: String,

    /// Call that starts the constructed host; must return a `Result`
    pub start: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            krate: "pocketbase".to_string(),
            constructor: "PocketBase::new()".to_string(),
            start: "start()".to_string(),
        }
    }
}

impl HostConfig {
    /// Identifier the generated entrypoint uses for the host crate.
    pub fn crate_ident(&self) -> String {
        xtend_core::to_crate_ident(&self.krate)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Package name of the synthesized project
    pub name: String,

    /// File name of the compiled artifact (defaults to the host crate name)
    pub output: Option<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "xtend-app".to_string(),
            output: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Local checkout of `xtend-plugin` to build against instead of the
    /// published release matching this binary
    pub path: Option<PathBuf>,
}

impl Config {
    /// Open and parse a config file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let mut config = Self::from_str_with_filename(&content, &filename)?;

        if config.runtime.path.is_some() {
            let cwd = std::env::current_dir().map_err(|e| {
                Box::new(Error::Io {
                    path: path.to_path_buf(),
                    source: e,
                })
            })?;
            config.anchor_runtime(path, &cwd);
        }

        Ok(config)
    }

    /// Make a relative runtime path absolute, relative to the directory of
    /// the config file at `path`. A relative `path` is taken from `cwd`.
    fn anchor_runtime(&mut self, path: &Path, cwd: &Path) {
        if let Some(runtime) = self.runtime.path.take() {
            let file = xtend_core::absolutize(cwd, path);
            let dir = file.parent().unwrap_or(cwd);
            self.runtime.path = Some(xtend_core::absolutize(dir, &runtime));
        }
    }

    /// Load the config at `path`, or the defaults when `path` is the
    /// implicit [`CONFIG_FILE`] and does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::open(path),
            None if Path::new(CONFIG_FILE).exists() => Self::open(CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Parse config content, using `filename` in diagnostics.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        config.validate(content, filename)?;
        Ok(config)
    }

    /// Name of the artifact `compile` produces.
    pub fn output_name(&self) -> &str {
        self.project.output.as_deref().unwrap_or(&self.host.krate)
    }

    fn validate(&self, content: &str, filename: &str) -> Result<()> {
        let required = [
            ("host.crate", &self.host.krate),
            ("host.constructor", &self.host.constructor),
            ("host.start", &self.host.start),
            ("project.name", &self.project.name),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(Error::validation(
                    format!("'{}' must not be empty", key),
                    content,
                    filename,
                ));
            }
        }

        if self.project.name == self.host.krate {
            return Err(Error::validation(
                format!(
                    "project.name '{}' collides with the host crate; pick another package name",
                    self.project.name
                ),
                content,
                filename,
            ));
        }

        Ok(())
    }
}
