//! In-memory stand-ins for the OS-facing seams, shared by unit tests.

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex};

use crate::core::{KeyCombination, RegistrationId};
use crate::exec::Launcher;
use crate::hotkey::{ActivationSink, BackendError, HotkeyBackend};
use crate::instance::InstanceGuard;
use crate::report::{ErrorMessage, Reporter};

/// A call observed by `FakeBackend`.
#[derive(Clone, Debug, PartialEq)]
pub enum BackendCall {
    Register(KeyCombination, RegistrationId),
    Unregister(RegistrationId),
}

/// Shared call log, readable after the backend has moved into a registry.
pub type CallLog = Arc<Mutex<Vec<BackendCall>>>;

/// Backend that records calls and can simulate key presses.
///
/// Like the OS, it refuses a combination that is already held.
pub struct FakeBackend {
    calls: CallLog,
    rejected: HashSet<KeyCombination>,
    active: Mutex<HashMap<RegistrationId, KeyCombination>>,
    sink: Option<ActivationSink>,
}

impl FakeBackend {
    pub fn new() -> (Self, CallLog) {
        let calls = CallLog::default();
        let backend = Self {
            calls: Arc::clone(&calls),
            rejected: HashSet::new(),
            active: Mutex::default(),
            sink: None,
        };
        (backend, calls)
    }

    /// Makes the OS refuse `combo` (as if another app owned it).
    pub fn rejecting(mut self, combo: &str) -> Self {
        self.rejected.insert(combo.parse().unwrap());
        self
    }

    /// Simulates the user pressing the hotkey registered as `id`.
    pub fn press(&self, id: RegistrationId) -> bool {
        self.sink.as_ref().map(|sink| sink.emit(id)).unwrap_or(false)
    }

    /// Simulates another party releasing `id` behind our back.
    pub fn forget(&self, id: RegistrationId) {
        self.active.lock().unwrap().remove(&id);
    }
}

impl HotkeyBackend for FakeBackend {
    fn subscribe(&mut self, sink: ActivationSink) {
        self.sink = Some(sink);
    }

    fn register(&mut self, combination: KeyCombination, id: RegistrationId) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(BackendCall::Register(combination, id));

        let mut active = self.active.lock().unwrap();
        let taken = active.contains_key(&id) || active.values().any(|held| *held == combination);
        if self.rejected.contains(&combination) || taken {
            return Err(BackendError::AlreadyRegistered);
        }
        active.insert(id, combination);
        Ok(())
    }

    fn unregister(&mut self, id: RegistrationId) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(BackendCall::Unregister(id));

        if self.active.lock().unwrap().remove(&id).is_some() {
            Ok(())
        } else {
            Err(BackendError::NotRegistered(id))
        }
    }
}

/// Extracts the ids passed to `unregister`, in call order.
pub fn unregistered_ids(calls: &CallLog) -> Vec<u32> {
    calls
        .lock()
        .unwrap()
        .iter()
        .filter_map(|call| match call {
            BackendCall::Unregister(id) => Some(id.get()),
            _ => None,
        })
        .collect()
}

/// Launch recorded by `RecordingLauncher`.
pub type Launches = Arc<Mutex<Vec<(String, Option<String>)>>>;

/// Launcher that records instead of spawning; can be told to fail.
#[derive(Clone, Default)]
pub struct RecordingLauncher {
    pub launches: Launches,
    pub fail: bool,
}

impl RecordingLauncher {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn launches(&self) -> Vec<(String, Option<String>)> {
        self.launches.lock().unwrap().clone()
    }
}

impl Launcher for RecordingLauncher {
    fn start(&self, program: &str, arguments: Option<&str>) -> io::Result<()> {
        self.launches
            .lock()
            .unwrap()
            .push((program.to_string(), arguments.map(str::to_string)));

        if self.fail {
            Err(io::Error::new(io::ErrorKind::NotFound, "program not found"))
        } else {
            Ok(())
        }
    }
}

/// Reporter that keeps every message.
#[derive(Clone, Default)]
pub struct RecordingReporter {
    pub messages: Arc<Mutex<Vec<ErrorMessage>>>,
}

impl RecordingReporter {
    pub fn messages(&self) -> Vec<ErrorMessage> {
        self.messages.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, message: &ErrorMessage) {
        self.messages.lock().unwrap().push(message.clone());
    }
}

/// Instance guard with a fixed answer.
pub struct FixedGuard(pub bool);

impl InstanceGuard for FixedGuard {
    fn acquire_exclusive(&mut self) -> bool {
        self.0
    }
}
