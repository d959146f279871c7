// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Inputs of an xtend build: module references given on the command line
//! and the optional `xtend.toml` describing the host.

mod config;
mod error;
mod module;

pub use config::{CONFIG_FILE, Config, HostConfig, ProjectConfig, RuntimeConfig};
pub use error::{Error, Result};
pub use module::{GitRef, LATEST, ModuleReference};
