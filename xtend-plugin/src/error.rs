use std::fmt;

use thiserror::Error;

/// A lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Preload,
    Load,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Preload => f.write_str("preload"),
            Phase::Load => f.write_str("load"),
        }
    }
}

/// One plugin's hook failure.
#[derive(Debug)]
pub struct PluginFailure {
    /// Plugin name, from its info.
    pub plugin: String,
    pub error: eyre::Report,
}

impl fmt::Display for PluginFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#}", self.plugin, self.error)
    }
}

/// Every failure from one lifecycle phase, in registration order.
#[derive(Debug, Error)]
#[error("{phase} failed for {} plugin(s){}", .failures.len(), list(.failures))]
pub struct LifecycleError {
    phase: Phase,
    failures: Vec<PluginFailure>,
}

fn list(failures: &[PluginFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("\n  - {}", failure))
        .collect()
}

impl LifecycleError {
    /// Join the failures of a phase; `Ok` when there are none.
    pub fn join(phase: Phase, failures: Vec<PluginFailure>) -> Result<(), Self> {
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Self { phase, failures })
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn failures(&self) -> &[PluginFailure] {
        &self.failures
    }
}
