//! Plugin lifecycle registry for hosts assembled by xtend.
//!
//! The entrypoint generated by `xtend build` creates a [`PluginRegistry`],
//! lets every requested extension crate register itself, and then drives
//! the two lifecycle phases around the host application:
//!
//! 1. [`PluginRegistry::fire_preload`] - before the host exists (configuration)
//! 2. host construction
//! 3. [`PluginRegistry::fire_load`] - with the live host (routes, commands, hooks)
//! 4. host start
//!
//! Both phases attempt every plugin and report all failures together.
//!
//! # Example
//!
//! ```
//! use xtend_plugin::{Plugin, PluginInfo, PluginRegistry};
//!
//! struct Server {
//!     routes: Vec<String>,
//! }
//!
//! struct Health;
//!
//! impl Plugin<Server> for Health {
//!     fn info(&self) -> PluginInfo {
//!         PluginInfo::new("health", "0.1.0", "Adds a /health route")
//!     }
//!
//!     fn on_load(&mut self, app: &mut Server) -> eyre::Result<()> {
//!         app.routes.push("/health".to_string());
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = PluginRegistry::new();
//! registry.register(Health);
//!
//! registry.fire_preload().unwrap();
//! let mut app = Server { routes: Vec::new() };
//! registry.fire_load(&mut app).unwrap();
//!
//! assert_eq!(app.routes, ["/health"]);
//! ```

mod display;
mod error;
mod plugin;
mod registry;

pub use display::write_plugins;
pub use error::{LifecycleError, Phase, PluginFailure};
pub use plugin::{Plugin, PluginInfo};
pub use registry::PluginRegistry;
