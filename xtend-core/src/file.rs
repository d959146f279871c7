use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

/// A file rendered into a synthesized project.
///
/// Generated files always replace whatever the toolchain scaffolded at
/// the same path.
pub trait GeneratedFile {
    /// Path of the file relative to the project root
    fn relative_path(&self) -> PathBuf;

    /// Get the rules for writing this file
    fn rules(&self) -> FileRules {
        FileRules::default()
    }

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file below `root`, prefixed with its header
    fn write(&self, root: &Path) -> Result<()> {
        let path = root.join(self.relative_path());

        let mut content = String::new();
        if let Some(header) = self.rules().header {
            content.push_str(header);
            content.push('\n');
        }
        content.push_str(&self.render());

        write_file(&path, &content).wrap_err_with(|| format!("failed to write {}", path.display()))
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    /// Line prepended to the rendered content
    pub header: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    struct Fixed {
        content: &'static str,
        rules: FileRules,
    }

    impl GeneratedFile for Fixed {
        fn relative_path(&self) -> PathBuf {
            PathBuf::from("src").join("main.rs")
        }

        fn rules(&self) -> FileRules {
            self.rules.clone()
        }

        fn render(&self) -> String {
            self.content.to_string()
        }
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let file = Fixed {
            content: "fn main() {}\n",
            rules: FileRules::default(),
        };

        file.write(temp.path()).unwrap();
        let written = fs::read_to_string(temp.path().join("src/main.rs")).unwrap();
        assert_eq!(written, "fn main() {}\n");
    }

    #[test]
    fn test_write_replaces_scaffold() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/main.rs"), "scaffold").unwrap();

        let file = Fixed {
            content: "generated",
            rules: FileRules {
                header: Some("// @generated"),
            },
        };
        file.write(temp.path()).unwrap();

        let written = fs::read_to_string(temp.path().join("src/main.rs")).unwrap();
        assert_eq!(written, "// @generated\ngenerated");
    }

    #[test]
    fn test_write_into_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("root");
        fs::write(&blocker, "not a directory").unwrap();

        let file = Fixed {
            content: "generated",
            rules: FileRules::default(),
        };
        let err = file.write(&blocker).unwrap_err();
        assert!(err.to_string().starts_with("failed to write "));
    }
}
