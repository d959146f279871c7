//! Terminal rendering of build progress and reports.

use std::io::{self, IsTerminal};

use dialoguer::{Input, theme::ColorfulTheme};
use xtend_builder::Output;

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

/// Terminal output: `[INFO]` lines on stdout, `[ERROR]` lines on stderr.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn info(&mut self, msg: &str) {
        println!("[INFO] {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("[ERROR] {}", msg);
    }

    fn acknowledge(&mut self, prompt: &str) {
        if !io::stdin().is_terminal() {
            return;
        }
        // A failed prompt leaves nobody to wait for.
        let _ = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text();
    }
}
