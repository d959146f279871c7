use std::path::PathBuf;

use xtend_core::{FileRules, GeneratedFile};
use xtend_manifest::{HostConfig, ModuleReference};

/// Marker at the top of every generated entrypoint.
pub const GENERATED_HEADER: &str = "// @generated by xtend. Changes are lost on the next build.";

/// The generated `src/main.rs`.
///
/// Registers every requested module, then drives the lifecycle:
/// preload, construct the host, load, print plugins, start.
pub struct MainRs<'a> {
    host: &'a HostConfig,
    modules: &'a [ModuleReference],
}

impl<'a> MainRs<'a> {
    pub fn new(host: &'a HostConfig, modules: &'a [ModuleReference]) -> Self {
        Self { host, modules }
    }

    fn registrations(&self) -> String {
        self.modules
            .iter()
            .map(|module| {
                format!(
                    "    // {}\n    {}::register(&mut registry);\n",
                    module.import_path(),
                    module.crate_ident()
                )
            })
            .collect()
    }
}

impl GeneratedFile for MainRs<'_> {
    fn relative_path(&self) -> PathBuf {
        PathBuf::from("src").join("main.rs")
    }

    fn rules(&self) -> FileRules {
        FileRules {
            header: Some(GENERATED_HEADER),
        }
    }

    fn render(&self) -> String {
        format!(
            r#"
use std::process::ExitCode;

use xtend_plugin::PluginRegistry;

fn main() -> ExitCode {{
    let mut registry = PluginRegistry::new();
{registrations}
    if let Err(err) = registry.fire_preload() {{
        eprintln!("{{err}}");
        return ExitCode::FAILURE;
    }}

    let mut app = {host}::{constructor};

    if let Err(err) = registry.fire_load(&mut app) {{
        eprintln!("{{err}}");
        return ExitCode::FAILURE;
    }}

    if let Err(err) = registry.print_plugins() {{
        eprintln!("{{err}}");
        return ExitCode::FAILURE;
    }}

    if let Err(err) = app.{start} {{
        eprintln!("{{err}}");
        return ExitCode::FAILURE;
    }}

    ExitCode::SUCCESS
}}
"#,
            registrations = self.registrations(),
            host = self.host.crate_ident(),
            constructor = self.host.constructor,
            start = self.host.start,
        )
    }
}
