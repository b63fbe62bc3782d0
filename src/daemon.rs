//! Daemon lifecycle
//!
//! Startup runs strictly in order and stops at the first failure:
//!
//! 1. Ask the `InstanceGuard` for exclusivity
//! 2. Load the configuration (no OS call has happened yet)
//! 3. Refuse an empty binding list
//! 4. Create the hotkey backend
//! 5. Register every binding and bind its id in the `DispatchTable`
//!
//! A registration failure unregisters whatever was already registered
//! before the error is returned, so nothing outlives a failed startup.
//!
//! `start()` then moves the finished, immutable table into a `Dispatcher`
//! on its own thread. Activations pressed before `start()` wait in the
//! channel and are handled once the table is complete.
//!
//! `shutdown()` stops accepting activations, releases every hotkey (newest
//! first), drops the backend so the channel closes, and joins the worker.
//!
//! The daemon owns its `InstanceGuard`, so the instance lock is held for as
//! long as the daemon lives and released only after shutdown completes.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use thiserror::Error;

use crate::config::{self, ConfigError};
use crate::core::{ConflictDetector, KeyCombination, RegistrationId};
use crate::dispatch::{DispatchError, DispatchTable, Dispatcher};
use crate::exec::CommandExecutor;
use crate::hotkey::{ActivationReceiver, BackendError, HotkeyBackend, HotkeyRegistry, RegistrationError};
use crate::instance::InstanceGuard;
use crate::report::{ErrorMessage, Reporter, STARTUP_CAPTION};

/// Name of the activation worker thread.
pub const DISPATCH_THREAD: &str = "hotkeyd-dispatch";

/// Fatal errors before the run phase.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Only one instance of hotkeyd is allowed")]
    AlreadyRunning,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No command is defined in \"{}\"", .0.display())]
    NoBindings(PathBuf),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("Failed to start the dispatcher thread: {0}")]
    Worker(#[source] io::Error),

    /// The platform event loop that delivers hotkey events is unavailable
    #[error("Can't start the system event loop: {0}")]
    EventPump(String),
}

impl StartupError {
    /// The message shown to the user before the process exits.
    pub fn to_message(&self) -> ErrorMessage {
        ErrorMessage::new(STARTUP_CAPTION, self.to_string())
    }
}

/// A fully registered daemon.
pub struct Daemon<B: HotkeyBackend> {
    registry: HotkeyRegistry<B>,
    pending: Option<(Dispatcher, ActivationReceiver)>,
    worker: Option<JoinHandle<usize>>,
    accepting: Arc<AtomicBool>,
    /// Dropped last
    guard: Box<dyn InstanceGuard>,
}

impl<B: HotkeyBackend> Daemon<B> {
    /// Runs the startup sequence against the config at `config_path`.
    ///
    /// `make_backend` is only called once the configuration has loaded
    /// and is non-empty.
    ///
    /// # Errors
    ///
    /// Any `StartupError`; nothing stays registered when one is returned.
    pub fn initialize(
        config_path: &Path,
        mut guard: Box<dyn InstanceGuard>,
        make_backend: impl FnOnce() -> Result<B, BackendError>,
        executor: CommandExecutor,
        reporter: Box<dyn Reporter>,
    ) -> Result<Self, StartupError> {
        if !guard.acquire_exclusive() {
            return Err(StartupError::AlreadyRunning);
        }

        let bindings = config::load_bindings(config_path)?;
        if bindings.is_empty() {
            return Err(StartupError::NoBindings(config_path.to_path_buf()));
        }

        for conflict in ConflictDetector::from_bindings(&bindings).find_conflicts() {
            let lines: Vec<usize> = conflict.conflicting_bindings.iter().map(|b| b.line).collect();
            tracing::warn!(
                combination = %conflict.combination,
                ?lines,
                "combination is bound more than once; only the first can register"
            );
        }

        let (mut registry, activations) = HotkeyRegistry::new(make_backend()?);
        let mut table = DispatchTable::new();

        for binding in bindings {
            let bound = registry
                .register(binding.combination)
                .map_err(StartupError::from)
                .and_then(|id| table.bind(id, binding).map_err(StartupError::from));

            if let Err(e) = bound {
                let released = registry.unregister_all();
                tracing::debug!(released, "rolled back partial registration");
                return Err(e);
            }
        }

        tracing::info!(count = table.len(), "all hotkeys registered");

        Ok(Self {
            registry,
            pending: Some((Dispatcher::new(table, executor, reporter), activations)),
            worker: None,
            accepting: Arc::new(AtomicBool::new(true)),
            guard,
        })
    }

    /// Spawns the dispatcher thread. Calling it again does nothing.
    pub fn start(&mut self) -> Result<(), StartupError> {
        let Some((dispatcher, activations)) = self.pending.take() else {
            return Ok(());
        };
        let accepting = Arc::clone(&self.accepting);

        let worker = thread::Builder::new()
            .name(DISPATCH_THREAD.to_string())
            .spawn(move || dispatcher.run(activations, &accepting))
            .map_err(StartupError::Worker)?;

        self.worker = Some(worker);
        Ok(())
    }

    /// Tears everything down and returns how many hotkeys were released.
    pub fn shutdown(mut self) -> usize {
        self.accepting.store(false, Ordering::SeqCst);
        let released = self.registry.unregister_all();

        // Dropping the registry drops the backend and with it the sink,
        // which closes the channel and ends the worker loop.
        let Self { registry, pending, worker, guard, .. } = self;
        drop(registry);
        drop(pending);

        if let Some(worker) = worker {
            match worker.join() {
                Ok(handled) => tracing::debug!(handled, "dispatcher stopped"),
                Err(_) => tracing::error!("dispatcher thread panicked"),
            }
        }

        drop(guard);
        tracing::info!(released, "hotkeyd stopped");
        released
    }

    pub fn registry(&self) -> &HotkeyRegistry<B> {
        &self.registry
    }

    /// Registered combinations in registration order.
    pub fn registrations(&self) -> &[(RegistrationId, KeyCombination)] {
        self.registry.registrations()
    }

    /// Whether the dispatcher thread has been started.
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }
}
