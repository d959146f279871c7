//! Core utilities and types for the xtend host builder.
//!
//! This crate provides file generation and path helpers shared by
//! the manifest and builder crates.

mod file;
mod paths;
mod utils;

// File operations
pub use file::{FileRules, GeneratedFile};
// Path helpers
pub use paths::{absolutize, normalize};
// String utilities
pub use utils::{is_rust_keyword, to_crate_ident};
