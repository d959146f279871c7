//! The disposable on-disk project a build runs in.

use std::{
    io,
    path::{Path, PathBuf},
};

use xtend_manifest::ModuleReference;

use crate::{BuildError, Step, error::AtStep};

const DIR_PREFIX: &str = "xtend-";

/// A single-use build workspace.
///
/// The directory is created on the first synthesis and stays on disk,
/// whether the build succeeds or not, until [`dispose`](Self::dispose)
/// removes it. Once created, the project's `Cargo.toml` is the only record
/// of its dependency state.
#[derive(Debug)]
pub struct BuildWorkspace {
    root: Option<PathBuf>,
    host_version: String,
    modules: Vec<ModuleReference>,
}

impl BuildWorkspace {
    pub fn new(host_version: impl Into<String>, modules: Vec<ModuleReference>) -> Self {
        Self {
            root: None,
            host_version: host_version.into(),
            modules,
        }
    }

    /// Root directory, once created.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn host_version(&self) -> &str {
        &self.host_version
    }

    pub fn modules(&self) -> &[ModuleReference] {
        &self.modules
    }

    /// Create a fresh, uniquely named temporary directory.
    ///
    /// # Errors
    ///
    /// Fails with [`BuildError::WorkspaceInUse`] if a directory was already
    /// created; workspaces are never reused across builds.
    pub(crate) fn create(&mut self) -> Result<PathBuf, BuildError> {
        if let Some(root) = &self.root {
            return Err(BuildError::WorkspaceInUse(root.clone()));
        }

        let root = tempfile::Builder::new()
            .prefix(DIR_PREFIX)
            .tempdir()
            .at_step(Step::CreateWorkspace)?
            .keep();
        self.root = Some(root.clone());
        Ok(root)
    }

    /// Recursively remove the directory.
    ///
    /// Safe to call repeatedly, and a no-op when nothing was created.
    pub fn dispose(&mut self) -> Result<(), BuildError> {
        let Some(root) = self.root.take() else {
            return Ok(());
        };

        match std::fs::remove_dir_all(&root) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => {
                let path = root.clone();
                self.root = Some(root);
                Err(BuildError::Dispose { path, source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace() -> BuildWorkspace {
        BuildWorkspace::new("v0.22.0", Vec::new())
    }

    #[test]
    fn test_dispose_without_create_is_noop() {
        let mut ws = workspace();
        assert!(ws.dispose().is_ok());
        assert!(ws.root().is_none());
    }

    #[test]
    fn test_create_then_dispose_twice() {
        let mut ws = workspace();
        let root = ws.create().unwrap();
        assert!(root.is_dir());
        assert!(
            root.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(DIR_PREFIX)
        );

        ws.dispose().unwrap();
        assert!(!root.exists());
        ws.dispose().unwrap();
        assert!(ws.root().is_none());
    }

    #[test]
    fn test_create_is_single_use() {
        let mut ws = workspace();
        let root = ws.create().unwrap();

        let err = ws.create().unwrap_err();
        assert!(matches!(err, BuildError::WorkspaceInUse(ref p) if *p == root));

        ws.dispose().unwrap();
    }

    #[test]
    fn test_dispose_tolerates_externally_removed_dir() {
        let mut ws = workspace();
        let root = ws.create().unwrap();
        std::fs::remove_dir_all(&root).unwrap();

        assert!(ws.dispose().is_ok());
    }

    #[test]
    fn test_each_workspace_gets_its_own_dir() {
        let mut a = workspace();
        let mut b = workspace();
        let root_a = a.create().unwrap();
        let root_b = b.create().unwrap();

        assert_ne!(root_a, root_b);

        a.dispose().unwrap();
        b.dispose().unwrap();
    }
}
