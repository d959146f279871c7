//! Module references: `module[@version][=replacement]`.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use xtend_core::{absolutize, to_crate_ident};

use crate::{Error, Result};

/// Version sentinel used when a reference names no version.
pub const LATEST: &str = "latest";

/// Segments of an import path that make up the repository root.
const ROOT_SEGMENTS: usize = 3;

/// A requested extension module.
///
/// The import path names a git repository and, optionally, a crate
/// inside it: `github.com/org/repo` or `github.com/org/repo/crates/name`.
/// The crate is the last path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReference {
    import_path: String,
    version: String,
    replacement: Option<PathBuf>,
}

/// Git revision a module dependency is pinned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitRef {
    /// Follow the default branch
    DefaultBranch,
    Tag(String),
    Branch(String),
}

impl ModuleReference {
    /// Parse `module[@version][=replacement]`.
    ///
    /// `module` runs up to the first `@` or `=`, `version` up to the
    /// following `=`, and `replacement` to the end of the input.
    ///
    /// # Examples
    ///
    /// ```
    /// use xtend_manifest::ModuleReference;
    ///
    /// let module = ModuleReference::parse("example.com/org/pkg@v1.2.0=../local").unwrap();
    /// assert_eq!(module.import_path(), "example.com/org/pkg");
    /// assert_eq!(module.version(), "v1.2.0");
    /// assert_eq!(module.replacement().unwrap().to_str(), Some("../local"));
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let module_end = input.find(['@', '=']).unwrap_or(input.len());
        let (import_path, rest) = input.split_at(module_end);

        if import_path.is_empty() {
            return Err(Error::invalid_module(input, "the module path is empty"));
        }
        if import_path.split('/').any(str::is_empty) {
            return Err(Error::invalid_module(
                input,
                "the module path has an empty segment",
            ));
        }

        let (version, replacement) = match rest.chars().next() {
            None => (None, None),
            Some('@') => match rest[1..].split_once('=') {
                Some((version, replacement)) => (Some(version), Some(replacement)),
                None => (Some(&rest[1..]), None),
            },
            _ => (None, Some(&rest[1..])),
        };

        if version.is_some_and(str::is_empty) {
            return Err(Error::invalid_module(input, "the version after '@' is empty"));
        }
        if replacement.is_some_and(str::is_empty) {
            return Err(Error::invalid_module(
                input,
                "the replacement after '=' is empty",
            ));
        }

        Ok(Self {
            import_path: import_path.to_string(),
            version: version.unwrap_or(LATEST).to_string(),
            replacement: replacement.map(PathBuf::from),
        })
    }

    pub fn import_path(&self) -> &str {
        &self.import_path
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The local replacement path, as given.
    pub fn replacement(&self) -> Option<&Path> {
        self.replacement.as_deref()
    }

    pub fn is_latest(&self) -> bool {
        self.version == LATEST
    }

    /// The repository part of the import path: its first three segments.
    ///
    /// Shorter import paths are their own root.
    pub fn root_coordinate(&self) -> String {
        self.import_path
            .split('/')
            .take(ROOT_SEGMENTS)
            .collect::<Vec<_>>()
            .join("/")
    }

    /// `<root coordinate>@<version>`, the coordinate a replace directive targets.
    pub fn module_string(&self) -> String {
        format!("{}@{}", self.root_coordinate(), self.version)
    }

    /// Git URL of the repository holding the module.
    pub fn source_url(&self) -> String {
        format!("https://{}", self.root_coordinate())
    }

    /// Package name of the module (last import path segment).
    pub fn crate_name(&self) -> &str {
        self.import_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.import_path)
    }

    /// Identifier the generated entrypoint uses to reach the crate.
    pub fn crate_ident(&self) -> String {
        to_crate_ident(self.crate_name())
    }

    /// Git revision implied by the version.
    ///
    /// Versions starting with a digit, or `v` and a digit, are tags;
    /// anything else names a branch.
    pub fn git_ref(&self) -> GitRef {
        if self.is_latest() {
            return GitRef::DefaultBranch;
        }

        let digits = self.version.strip_prefix('v').unwrap_or(&self.version);
        if digits.starts_with(|c: char| c.is_ascii_digit()) {
            GitRef::Tag(self.version.clone())
        } else {
            GitRef::Branch(self.version.clone())
        }
    }

    /// Absolute replacement path anchored at `cwd`, the invoking
    /// process's working directory.
    pub fn resolve_replacement(&self, cwd: &Path) -> Option<PathBuf> {
        self.replacement
            .as_deref()
            .map(|replacement| absolutize(cwd, replacement))
    }
}

impl FromStr for ModuleReference {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ModuleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.import_path, self.version)
    }
}
