//! Plugin capability trait.

use eyre::Result;

/// Display metadata for a plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl PluginInfo {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
        }
    }
}

/// An extension that hooks into the host lifecycle.
///
/// `H` is the host application type the generated entrypoint constructs.
/// Extension crates implement this trait and expose a
/// `pub fn register(registry: &mut PluginRegistry<H>)` function that the
/// entrypoint calls before any phase fires.
pub trait Plugin<H> {
    /// Display information (name, version, description).
    fn info(&self) -> PluginInfo;

    /// Called before the host is constructed.
    ///
    /// A good place to load configuration.
    ///
    /// # Errors
    ///
    /// Failures are collected; sibling plugins still run.
    fn on_preload(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called once the host exists, before it starts.
    ///
    /// A good place to register routes, commands and hooks.
    ///
    /// # Errors
    ///
    /// Failures are collected; sibling plugins still run.
    #[allow(unused_variables)]
    fn on_load(&mut self, app: &mut H) -> Result<()> {
        Ok(())
    }
}
