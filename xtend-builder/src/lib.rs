//! Builds a host application extended with plugin modules.
//!
//! A build synthesizes a throwaway cargo project that depends on the host
//! crate at a pinned version and on every requested module, renders an
//! entrypoint that registers the modules with a
//! [`PluginRegistry`](https://docs.rs/xtend-plugin), and then compiles or
//! runs it through a [`Toolchain`].
//!
//! ```no_run
//! use xtend_builder::{Cargo, Orchestrator, Output};
//! use xtend_manifest::{Config, ModuleReference};
//!
//! struct Stdout;
//!
//! impl Output for Stdout {
//!     fn info(&mut self, msg: &str) { println!("[INFO] {msg}"); }
//!     fn error(&mut self, msg: &str) { eprintln!("[ERROR] {msg}"); }
//!     fn acknowledge(&mut self, _prompt: &str) {}
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let modules = vec![ModuleReference::parse("github.com/org/plugins/static-files@v0.3.1")?];
//! let mut orchestrator = Orchestrator::new(Cargo::locate()?, Config::default(), "v0.22.0", modules)?;
//!
//! let binary = orchestrator.compile(&[], &mut Stdout)?;
//! println!("built {}", binary.display());
//! orchestrator.dispose()?;
//! # Ok(())
//! # }
//! ```

mod error;
pub mod files;
mod orchestrator;
mod output;
mod synthesize;
mod toolchain;
mod workspace;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{BuildError, ExitStatus, StepSource, ToolchainError};
pub use orchestrator::{ACKNOWLEDGE_PROMPT, Orchestrator};
pub use output::Output;
pub use synthesize::Synthesizer;
pub use toolchain::{Cargo, Invocation, Step, Toolchain};
pub use workspace::BuildWorkspace;
