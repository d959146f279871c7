//! Snapshot tests for the generated entrypoint.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use tempfile::TempDir;
use xtend_builder::files::{GENERATED_HEADER, MainRs};
use xtend_core::GeneratedFile;
use xtend_manifest::{HostConfig, ModuleReference};

fn modules(specs: &[&str]) -> Vec<ModuleReference> {
    specs
        .iter()
        .map(|spec| ModuleReference::parse(spec).expect("Failed to parse module"))
        .collect()
}

/// Write the entrypoint into a scratch project and read it back.
fn render_to_disk(host: &HostConfig, modules: &[ModuleReference]) -> String {
    let temp = TempDir::new().unwrap();
    MainRs::new(host, modules).write(temp.path()).unwrap();
    std::fs::read_to_string(temp.path().join("src").join("main.rs")).unwrap()
}

#[test]
fn test_entrypoint_with_modules() {
    let main_rs = render_to_disk(
        &HostConfig::default(),
        &modules(&[
            "github.com/org/plugins/static-files@v0.3.1",
            "a.example/y=../local-y",
        ]),
    );
    insta::assert_snapshot!("entrypoint_with_modules", main_rs);
}

#[test]
fn test_entrypoint_without_modules() {
    let main_rs = render_to_disk(&HostConfig::default(), &[]);
    insta::assert_snapshot!("entrypoint_without_modules", main_rs);
}

#[test]
fn test_entrypoint_replaces_scaffold() {
    let temp = TempDir::new().unwrap();
    let main = temp.path().join("src").join("main.rs");
    std::fs::create_dir_all(main.parent().unwrap()).unwrap();
    std::fs::write(&main, "fn main() {}\n").unwrap();

    let host = HostConfig::default();
    MainRs::new(&host, &[]).write(temp.path()).unwrap();

    let content = std::fs::read_to_string(&main).unwrap();
    assert!(content.starts_with(GENERATED_HEADER));
    assert!(content.contains("PluginRegistry::new()"));
}

#[test]
fn test_keyword_crate_is_raw_identifier() {
    let host = HostConfig::default();
    let rendered = MainRs::new(&host, &modules(&["github.com/org/plugins/async"])).render();
    assert!(rendered.contains("    r#async::register(&mut registry);\n"));
}
