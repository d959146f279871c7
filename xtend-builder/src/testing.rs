//! Test doubles for build operations.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{cell::RefCell, env::consts::EXE_SUFFIX, fs, io, path::Path};

use crate::{ExitStatus, Invocation, Output, Step, Toolchain, ToolchainError};

/// A toolchain that records invocations instead of running cargo.
///
/// `init` scaffolds a minimal package and `build` drops an empty binary
/// where cargo would (honouring `--target-dir`, `--target`, `--release`
/// and `--profile`), so the surrounding steps have real files to work on.
#[derive(Default)]
pub struct FakeToolchain {
    calls: RefCell<Vec<Invocation>>,
    fail_at: Option<Step>,
}

impl FakeToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every invocation belonging to `step` with exit status 101.
    pub fn failing_at(step: Step) -> Self {
        Self {
            calls: RefCell::default(),
            fail_at: Some(step),
        }
    }

    /// Recorded invocations, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Steps of the recorded invocations, in order.
    pub fn steps(&self) -> Vec<Step> {
        self.calls.borrow().iter().map(|call| call.step).collect()
    }

    fn scaffold(invocation: &Invocation) -> io::Result<()> {
        let name = flag_value(&invocation.args, "--name").unwrap_or("app");
        fs::create_dir_all(invocation.dir.join("src"))?;
        fs::write(
            invocation.dir.join("Cargo.toml"),
            format!(
                "[package]\nname = \"{}\"\nversion = \"0.1.0\"\nedition = \"2024\"\n\n[dependencies]\n",
                name
            ),
        )?;
        fs::write(
            invocation.dir.join("src").join("main.rs"),
            "fn main() {\n    println!(\"Hello, world!\");\n}\n",
        )
    }

    fn build(invocation: &Invocation) -> io::Result<()> {
        let content = fs::read_to_string(invocation.dir.join("Cargo.toml"))?;
        let manifest: toml::Table = toml::from_str(&content).map_err(io::Error::other)?;
        let name = manifest
            .get("package")
            .and_then(|package| package.get("name"))
            .and_then(|name| name.as_str())
            .unwrap_or("app");

        let target = flag_value(&invocation.args, "--target-dir")
            .map(Path::new)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| invocation.dir.join("target"));
        let target = match flag_value(&invocation.args, "--target") {
            Some(triple) => target.join(triple),
            None => target,
        };
        let profile = match flag_value(&invocation.args, "--profile") {
            Some("dev") => "debug",
            Some(profile) => profile,
            None if invocation.args.iter().any(|arg| arg == "--release") => "release",
            None => "debug",
        };
        let dir = target.join(profile);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{}{}", name, EXE_SUFFIX)), b"")
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

impl Toolchain for FakeToolchain {
    fn invoke(&self, invocation: &Invocation) -> Result<(), ToolchainError> {
        self.calls.borrow_mut().push(invocation.clone());

        if self.fail_at == Some(invocation.step) {
            return Err(ToolchainError::Failed {
                command: invocation.to_string(),
                status: ExitStatus::Code(101),
            });
        }

        let result = match invocation.subcommand() {
            Some("init") => Self::scaffold(invocation),
            Some("build") => Self::build(invocation),
            _ => Ok(()),
        };
        result.map_err(|source| ToolchainError::Spawn {
            command: invocation.to_string(),
            source,
        })
    }
}

/// Output that captures every line instead of printing.
#[derive(Debug, Default)]
pub struct RecordingOutput {
    pub lines: Vec<String>,
    pub acknowledgments: Vec<String>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any captured line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl Output for RecordingOutput {
    fn info(&mut self, msg: &str) {
        self.lines.push(format!("[INFO] {}", msg));
    }

    fn error(&mut self, msg: &str) {
        self.lines.push(format!("[ERROR] {}", msg));
    }

    fn acknowledge(&mut self, prompt: &str) {
        self.acknowledgments.push(prompt.to_string());
    }
}
