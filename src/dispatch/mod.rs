// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Activation dispatch
//!
//! `DispatchTable` maps a `RegistrationId` back to its binding with O(1)
//! HashMap lookup. It is filled during startup and then moved, whole and
//! immutable, into the `Dispatcher` that runs on its own thread. There is
//! no shared mutable state after initialisation, so no lock is needed on
//! the lookup path.
//!
//! `Dispatcher::run` is the run-phase wait loop: it blocks on the
//! activation channel and handles one activation per wakeup, in delivery
//! order. Errors are isolated per activation; none of them ends the loop.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

use crate::core::{Binding, RegistrationId};
use crate::exec::{CommandExecutor, ExecError};
use crate::hotkey::ActivationReceiver;
use crate::report::{ErrorMessage, Reporter, RUNTIME_CAPTION};

/// Dispatch errors
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Id never bound, or already removed
    #[error("No binding for hotkey {0}")]
    UnknownRegistration(RegistrationId),

    /// Id bound twice
    #[error("Hotkey {0} is already bound")]
    AlreadyBound(RegistrationId),

    /// The bound command could not be launched
    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Registration id → binding.
#[derive(Debug, Default)]
pub struct DispatchTable {
    entries: HashMap<RegistrationId, Binding>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `id` launches `binding`'s command.
    ///
    /// Time complexity: O(1) average case
    pub fn bind(&mut self, id: RegistrationId, binding: Binding) -> Result<(), DispatchError> {
        if self.entries.contains_key(&id) {
            return Err(DispatchError::AlreadyBound(id));
        }
        self.entries.insert(id, binding);
        Ok(())
    }

    /// Looks up the binding for `id`.
    ///
    /// Time complexity: O(1) average case
    pub fn resolve(&self, id: RegistrationId) -> Result<&Binding, DispatchError> {
        self.entries
            .get(&id)
            .ok_or(DispatchError::UnknownRegistration(id))
    }

    /// Removes and returns the binding for `id`.
    pub fn unbind(&mut self, id: RegistrationId) -> Option<Binding> {
        self.entries.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves activations and launches their commands.
pub struct Dispatcher {
    table: DispatchTable,
    executor: CommandExecutor,
    reporter: Box<dyn Reporter>,
}

impl Dispatcher {
    pub fn new(table: DispatchTable, executor: CommandExecutor, reporter: Box<dyn Reporter>) -> Self {
        Self {
            table,
            executor,
            reporter,
        }
    }

    /// Launches the command bound to `id`.
    pub fn dispatch(&self, id: RegistrationId) -> Result<(), DispatchError> {
        let binding = self.table.resolve(id)?;
        tracing::debug!(%id, combination = %binding.combination, "dispatching activation");

        self.executor.execute(&binding.command)?;
        Ok(())
    }

    /// Dispatches `id`, logging and reporting any failure instead of
    /// returning it.
    pub fn handle(&self, id: RegistrationId) {
        match self.dispatch(id) {
            Ok(()) => {}
            Err(DispatchError::Exec(e)) => {
                tracing::error!(%id, "{}", e);
                self.reporter.report(&ErrorMessage::new(RUNTIME_CAPTION, e.to_string()));
            }
            Err(e) => tracing::warn!(%id, "ignoring activation: {}", e),
        }
    }

    /// Blocks on `activations` until the channel closes.
    ///
    /// Activations arriving while `accepting` is false are drained and
    /// dropped. Returns the number handled.
    pub fn run(&self, activations: ActivationReceiver, accepting: &AtomicBool) -> usize {
        let mut handled = 0;

        for id in activations.iter() {
            if !accepting.load(Ordering::SeqCst) {
                tracing::debug!(%id, "dropping activation during shutdown");
                continue;
            }
            self.handle(id);
            handled += 1;
        }

        tracing::debug!(handled, "activation channel closed");
        handled
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }
}

#[cfg(test)]
mod tests;
