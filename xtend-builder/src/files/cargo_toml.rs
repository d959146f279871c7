use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr, eyre};
use toml::{Table, Value};
use xtend_manifest::{GitRef, ModuleReference};

/// Package name of the runtime glue every generated entrypoint links.
pub const RUNTIME_CRATE: &str = "xtend-plugin";

/// Version of the runtime glue matching this builder.
pub const RUNTIME_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The workspace `Cargo.toml`, opened for editing.
///
/// `cargo init` creates the file; this type only adds entries to it.
pub struct CargoToml {
    path: PathBuf,
    table: Table,
}

impl CargoToml {
    /// Open the manifest at `<root>/Cargo.toml`.
    pub fn open(root: &Path) -> Result<Self> {
        let path = root.join("Cargo.toml");
        let content = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let table: Table = toml::from_str(&content)
            .wrap_err_with(|| format!("failed to parse {}", path.display()))?;
        Ok(Self { path, table })
    }

    /// Depend on the runtime glue, from a local checkout when given.
    pub fn add_runtime(&mut self, local: Option<&Path>) -> Result<()> {
        let value = match local {
            Some(path) => path_entry(path),
            None => Value::String(format!("={}", RUNTIME_VERSION)),
        };
        self.insert(&["dependencies"], RUNTIME_CRATE, value)
    }

    /// Depend on a module's crate from its git repository.
    pub fn add_module(&mut self, module: &ModuleReference) -> Result<()> {
        let mut entry = Table::new();
        entry.insert("git".to_string(), Value::String(module.source_url()));
        match module.git_ref() {
            GitRef::DefaultBranch => {}
            GitRef::Tag(tag) => {
                entry.insert("tag".to_string(), Value::String(tag));
            }
            GitRef::Branch(branch) => {
                entry.insert("branch".to_string(), Value::String(branch));
            }
        }
        self.insert(&["dependencies"], module.crate_name(), Value::Table(entry))
    }

    /// Replace a module's repository with a local checkout.
    ///
    /// Writes `[patch."<source url>"] <crate> = { path = "<path>" }`.
    pub fn add_replacement(&mut self, module: &ModuleReference, path: &Path) -> Result<()> {
        let source = module.source_url();
        self.insert(&["patch", source.as_str()], module.crate_name(), path_entry(path))
    }

    /// Write the edited manifest back.
    pub fn save(&self) -> Result<()> {
        let content = toml::to_string(&self.table).wrap_err("failed to serialize Cargo.toml")?;
        std::fs::write(&self.path, content)
            .wrap_err_with(|| format!("failed to write {}", self.path.display()))
    }

    /// Walk (creating as needed) the nested tables at `keys` and set `name`.
    fn insert(&mut self, keys: &[&str], name: &str, value: Value) -> Result<()> {
        let mut table = &mut self.table;
        for key in keys {
            table = table
                .entry(key.to_string())
                .or_insert(Value::Table(Table::new()))
                .as_table_mut()
                .ok_or_else(|| eyre!("'{}' in Cargo.toml is not a table", key))?;
        }
        table.insert(name.to_string(), value);
        Ok(())
    }
}

fn path_entry(path: &Path) -> Value {
    let mut entry = Table::new();
    entry.insert(
        "path".to_string(),
        Value::String(path.to_string_lossy().into_owned()),
    );
    Value::Table(entry)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    const SCAFFOLD: &str = r#"[package]
name = "xtend-app"
version = "0.1.0"
edition = "2024"

[dependencies]
"#;

    fn scaffold() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("Cargo.toml"), SCAFFOLD).unwrap();
        temp
    }

    fn reload(root: &Path) -> Table {
        toml::from_str(&std::fs::read_to_string(root.join("Cargo.toml")).unwrap()).unwrap()
    }

    #[test]
    fn test_module_dependency_uses_git_ref() {
        let temp = scaffold();
        let mut manifest = CargoToml::open(temp.path()).unwrap();
        manifest
            .add_module(&ModuleReference::parse("github.com/org/repo/crates/static@v0.2.0").unwrap())
            .unwrap();
        manifest
            .add_module(&ModuleReference::parse("a.example/x").unwrap())
            .unwrap();
        manifest.save().unwrap();

        let table = reload(temp.path());
        let deps = table["dependencies"].as_table().unwrap();
        assert_eq!(deps["static"]["git"].as_str(), Some("https://github.com/org/repo"));
        assert_eq!(deps["static"]["tag"].as_str(), Some("v0.2.0"));
        assert_eq!(deps["x"]["git"].as_str(), Some("https://a.example/x"));
        assert!(deps["x"].get("tag").is_none());
        assert_eq!(table["package"]["name"].as_str(), Some("xtend-app"));
    }

    #[test]
    fn test_replacement_writes_patch_for_root() {
        let temp = scaffold();
        let module = ModuleReference::parse("github.com/org/repo/crates/static=../static").unwrap();
        let mut manifest = CargoToml::open(temp.path()).unwrap();
        manifest
            .add_replacement(&module, Path::new("/work/static"))
            .unwrap();
        manifest.save().unwrap();

        let table = reload(temp.path());
        let patch = table["patch"]["https://github.com/org/repo"].as_table().unwrap();
        assert_eq!(patch.len(), 1);
        assert_eq!(patch["static"]["path"].as_str(), Some("/work/static"));
    }

    #[test]
    fn test_runtime_dependency() {
        let temp = scaffold();
        let mut manifest = CargoToml::open(temp.path()).unwrap();
        manifest.add_runtime(None).unwrap();
        manifest.save().unwrap();

        let table = reload(temp.path());
        let expected = format!("={}", RUNTIME_VERSION);
        assert_eq!(
            table["dependencies"][RUNTIME_CRATE].as_str(),
            Some(expected.as_str())
        );
    }

    #[test]
    fn test_non_table_section_is_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("Cargo.toml"), "dependencies = 1\n").unwrap();

        let mut manifest = CargoToml::open(temp.path()).unwrap();
        assert!(manifest.add_runtime(None).is_err());
    }

    #[test]
    fn test_open_missing_manifest_fails() {
        let temp = TempDir::new().unwrap();
        assert!(CargoToml::open(temp.path()).is_err());
    }
}
