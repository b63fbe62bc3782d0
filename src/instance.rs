//! Single-instance enforcement
//!
//! Two daemons would fight over the same hotkeys, so startup asks an
//! `InstanceGuard` for exclusivity first. The production guard is a named
//! system-wide lock from the `single-instance` crate: a mutex on Windows,
//! an abstract socket on Linux, a file lock on macOS.

use single_instance::SingleInstance;

/// Exclusive-run guard queried once at startup.
pub trait InstanceGuard {
    /// Returns true if this process is now the only instance.
    fn acquire_exclusive(&mut self) -> bool;
}

/// Guard backed by a named OS lock, held until drop.
pub struct NamedInstanceGuard {
    name: String,
    held: Option<SingleInstance>,
}

impl NamedInstanceGuard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            held: None,
        }
    }

    /// Guard named after the running executable, like `hotkeyd-hotkeyd`.
    pub fn for_current_exe() -> Self {
        let exe_name = std::env::current_exe()
            .ok()
            .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

        Self::new(format!("hotkeyd-{}", exe_name))
    }
}

impl InstanceGuard for NamedInstanceGuard {
    fn acquire_exclusive(&mut self) -> bool {
        if self.held.is_some() {
            return true;
        }

        match SingleInstance::new(&self.name) {
            Ok(instance) if instance.is_single() => {
                tracing::debug!(name = %self.name, "acquired instance lock");
                self.held = Some(instance);
                true
            }
            Ok(_) => false,
            Err(e) => {
                // Unknown state counts as taken
                tracing::warn!(name = %self.name, "instance lock unavailable: {}", e);
                false
            }
        }
    }
}
