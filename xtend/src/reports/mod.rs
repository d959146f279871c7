//! Report data structures for commands.
//!
//! Commands collect what a build produced into a report, then render it
//! to an [`Output`](xtend_builder::Output) target.

mod build;
mod output;

pub use build::BuildReport;
pub use output::{Report, TerminalOutput};
