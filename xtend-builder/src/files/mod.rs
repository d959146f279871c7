//! Files written into the synthesized project.

mod cargo_toml;
mod main_rs;

pub use cargo_toml::{CargoToml, RUNTIME_CRATE, RUNTIME_VERSION};
pub use main_rs::{GENERATED_HEADER, MainRs};
