//! Ordered plugin registry.

use std::io;

use crate::{LifecycleError, Phase, Plugin, PluginFailure, PluginInfo, display};

/// Registered plugins, in registration order.
///
/// Registration order is the firing order of both lifecycle phases.
/// Plugins can only be appended; the registry lives as long as the host.
pub struct PluginRegistry<H> {
    plugins: Vec<Box<dyn Plugin<H>>>,
}

impl<H> PluginRegistry<H> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Append a plugin.
    ///
    /// Registering the same plugin twice fires it twice.
    pub fn register(&mut self, plugin: impl Plugin<H> + 'static) -> &mut Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run every plugin's preload hook.
    ///
    /// # Errors
    ///
    /// Returns all failures joined into one [`LifecycleError`]; a failing
    /// plugin never prevents the remaining plugins from running.
    pub fn fire_preload(&mut self) -> Result<(), LifecycleError> {
        let mut failures = Vec::new();
        for plugin in &mut self.plugins {
            if let Err(error) = plugin.on_preload() {
                failures.push(PluginFailure {
                    plugin: plugin.info().name,
                    error,
                });
            }
        }

        LifecycleError::join(Phase::Preload, failures)
    }

    /// Run every plugin's load hook against the constructed host.
    ///
    /// # Errors
    ///
    /// Same joined semantics as [`fire_preload`](Self::fire_preload).
    pub fn fire_load(&mut self, app: &mut H) -> Result<(), LifecycleError> {
        let mut failures = Vec::new();
        for plugin in &mut self.plugins {
            if let Err(error) = plugin.on_load(app) {
                failures.push(PluginFailure {
                    plugin: plugin.info().name,
                    error,
                });
            }
        }

        LifecycleError::join(Phase::Load, failures)
    }

    /// Registered plugins, for display.
    pub fn list(&self) -> &[Box<dyn Plugin<H>>] {
        &self.plugins
    }

    /// Info of every registered plugin.
    pub fn infos(&self) -> Vec<PluginInfo> {
        self.plugins.iter().map(|plugin| plugin.info()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Print the plugin banner to stdout. Prints nothing when empty.
    pub fn print_plugins(&self) -> io::Result<()> {
        display::write_plugins(&mut io::stdout().lock(), &self.infos())
    }
}

impl<H> Default for PluginRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use eyre::{Result, bail};

    use super::*;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recording {
        name: &'static str,
        log: Log,
        fail_preload: bool,
        fail_load: bool,
    }

    impl Recording {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: log.clone(),
                fail_preload: false,
                fail_load: false,
            }
        }

        fn failing(name: &'static str, log: &Log) -> Self {
            Self {
                fail_preload: true,
                fail_load: true,
                ..Self::new(name, log)
            }
        }
    }

    impl Plugin<Vec<String>> for Recording {
        fn info(&self) -> PluginInfo {
            PluginInfo::new(self.name, "latest", "records hook calls")
        }

        fn on_preload(&mut self) -> Result<()> {
            self.log.borrow_mut().push(format!("preload:{}", self.name));
            if self.fail_preload {
                bail!("{} preload failed", self.name);
            }
            Ok(())
        }

        fn on_load(&mut self, app: &mut Vec<String>) -> Result<()> {
            self.log.borrow_mut().push(format!("load:{}", self.name));
            app.push(self.name.to_string());
            if self.fail_load {
                bail!("{} load failed", self.name);
            }
            Ok(())
        }
    }

    #[test]
    fn test_fires_in_registration_order() {
        let log = Log::default();
        let mut registry: PluginRegistry<Vec<String>> = PluginRegistry::new();
        registry
            .register(Recording::new("b", &log))
            .register(Recording::new("a", &log));

        registry.fire_preload().unwrap();
        let mut app = Vec::new();
        registry.fire_load(&mut app).unwrap();

        assert_eq!(
            *log.borrow(),
            ["preload:b", "preload:a", "load:b", "load:a"]
        );
        assert_eq!(app, ["b", "a"]);
    }

    #[test]
    fn test_preload_collects_all_failures() {
        let log = Log::default();
        let mut registry: PluginRegistry<Vec<String>> = PluginRegistry::new();
        registry
            .register(Recording::failing("a", &log))
            .register(Recording::new("ok", &log))
            .register(Recording::failing("b", &log));

        let err = registry.fire_preload().unwrap_err();

        assert_eq!(err.phase(), Phase::Preload);
        let names: Vec<_> = err.failures().iter().map(|f| f.plugin.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn test_load_continues_after_failure() {
        let log = Log::default();
        let mut registry: PluginRegistry<Vec<String>> = PluginRegistry::new();
        registry
            .register(Recording::failing("a", &log))
            .register(Recording::failing("b", &log));

        let mut app = Vec::new();
        let err = registry.fire_load(&mut app).unwrap_err();

        assert_eq!(err.phase(), Phase::Load);
        assert_eq!(err.failures().len(), 2);
        assert_eq!(app, ["a", "b"]);
        assert!(err.to_string().contains("a: a load failed"));
        assert!(err.to_string().contains("b: b load failed"));
    }

    #[test]
    fn test_duplicate_registration_fires_twice() {
        let log = Log::default();
        let mut registry: PluginRegistry<Vec<String>> = PluginRegistry::new();
        registry
            .register(Recording::new("twice", &log))
            .register(Recording::new("twice", &log));

        registry.fire_preload().unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(*log.borrow(), ["preload:twice", "preload:twice"]);
    }

    #[test]
    fn test_empty_registry_fires_ok() {
        let mut registry: PluginRegistry<Vec<String>> = PluginRegistry::default();

        assert!(registry.is_empty());
        assert!(registry.fire_preload().is_ok());
        assert!(registry.fire_load(&mut Vec::new()).is_ok());
    }

    #[test]
    fn test_list_and_infos_snapshot() {
        let log = Log::default();
        let mut registry: PluginRegistry<Vec<String>> = PluginRegistry::new();
        registry
            .register(Recording::new("static", &log))
            .register(Recording::new("timeouts", &log));

        let names: Vec<_> = registry.infos().into_iter().map(|i| i.name).collect();
        assert_eq!(names, ["static", "timeouts"]);
        assert_eq!(registry.list().len(), 2);
        assert!(log.borrow().is_empty());
    }
}
