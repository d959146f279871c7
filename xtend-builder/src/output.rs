//! Progress output for build operations.

use crate::Invocation;

/// Where build operations report progress.
///
/// Operations describe *what* happened; implementations decide how it is
/// shown (labelled terminal lines, captured for tests, ...).
pub trait Output {
    /// Render an informational line.
    fn info(&mut self, msg: &str);

    /// Render an error line.
    fn error(&mut self, msg: &str);

    /// Announce a toolchain invocation before it runs.
    fn command(&mut self, invocation: &Invocation) {
        self.info(&format!("RUN: {}", invocation));
    }

    /// Block until the user acknowledges `prompt`.
    fn acknowledge(&mut self, prompt: &str);
}
