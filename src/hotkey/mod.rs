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

//! System-wide hotkey registration
//!
//! # Layers
//!
//! - **`HotkeyBackend`**: the OS capability. Registers one combination
//!   under a caller-chosen id, releases it again, and pushes activations
//!   into an `ActivationSink`.
//! - **`HotkeyRegistry`**: owns a backend, hands out `RegistrationId`s
//!   from 1 upwards and releases everything (newest first) on
//!   `unregister_all()` or drop.
//!
//! The registry knows nothing about commands. Activations leave it as
//! bare ids on a channel; mapping them to commands is `dispatch`'s job.
//!
//! # Example
//! ```no_run
//! use hotkeyd::hotkey::{GlobalHotkeyBackend, HotkeyRegistry};
//!
//! let backend = GlobalHotkeyBackend::new()?;
//! let (mut registry, activations) = HotkeyRegistry::new(backend);
//!
//! let id = registry.register("ctrl+alt+t".parse()?)?;
//! assert_eq!(activations.recv()?, id); // blocks until the user presses it
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod backend;

pub use backend::GlobalHotkeyBackend;

use std::sync::mpsc::{self, Receiver, Sender};
use thiserror::Error;

use crate::core::{KeyCode, KeyCombination, RegistrationId};

/// Errors reported by a `HotkeyBackend`.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The OS notification endpoint could not be created
    #[error("Failed to initialise hotkey manager: {0}")]
    Init(String),

    /// Another application (or binding) already owns the combination
    #[error("combination is already registered by another application")]
    AlreadyRegistered,

    /// The OS refused the combination for another reason
    #[error("system rejected the combination: {0}")]
    Rejected(String),

    /// The key exists in the key table but not on this platform
    #[error("key {0} is not supported on this platform")]
    UnsupportedKey(KeyCode),

    /// Unregistering an id the backend does not hold
    #[error("no active registration {0}")]
    NotRegistered(RegistrationId),
}

/// Errors from `HotkeyRegistry::register`.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The OS refused this combination
    #[error("Couldn't register hotkey {combination}: {source}")]
    Failed {
        combination: KeyCombination,
        #[source]
        source: BackendError,
    },

    /// Every `u32` id has been used
    #[error("Registration ids exhausted")]
    IdsExhausted,
}

/// Receiving end of the activation channel.
pub type ActivationReceiver = Receiver<RegistrationId>;

/// Sending end of the activation channel, owned by the backend.
#[derive(Clone, Debug)]
pub struct ActivationSink {
    tx: Sender<RegistrationId>,
}

impl ActivationSink {
    /// Reports that the hotkey registered as `id` was pressed.
    ///
    /// Returns false once the receiver is gone (during teardown).
    pub fn emit(&self, id: RegistrationId) -> bool {
        match self.tx.send(id) {
            Ok(()) => true,
            Err(_) => {
                tracing::debug!(%id, "activation dropped: dispatcher stopped");
                false
            }
        }
    }
}

/// Creates a connected sink/receiver pair.
pub fn activation_channel() -> (ActivationSink, ActivationReceiver) {
    let (tx, rx) = mpsc::channel();
    (ActivationSink { tx }, rx)
}

/// OS hotkey capability
///
/// One implementation per platform binding; tests use an in-memory fake.
pub trait HotkeyBackend {
    /// Installs the sink activations are pushed into. Called once, before
    /// any registration.
    fn subscribe(&mut self, sink: ActivationSink);

    /// Asks the OS for `combination`, to be reported as `id` when pressed.
    fn register(&mut self, combination: KeyCombination, id: RegistrationId) -> Result<(), BackendError>;

    /// Releases the registration made under `id`.
    fn unregister(&mut self, id: RegistrationId) -> Result<(), BackendError>;
}

/// Owns a backend and the ids handed out through it.
///
/// Ids start at 1, grow by one per successful registration and are never
/// reset or reused. Dropping the registry releases every held
/// registration and, with the backend, the OS notification endpoint.
pub struct HotkeyRegistry<B: HotkeyBackend> {
    backend: B,
    next_id: Option<RegistrationId>,
    /// Held registrations in registration order
    held: Vec<(RegistrationId, KeyCombination)>,
}

impl<B: HotkeyBackend> HotkeyRegistry<B> {
    /// Wraps `backend` and connects it to a fresh activation channel.
    pub fn new(mut backend: B) -> (Self, ActivationReceiver) {
        let (sink, activations) = activation_channel();
        backend.subscribe(sink);

        let registry = Self {
            backend,
            next_id: Some(RegistrationId::FIRST),
            held: Vec::new(),
        };
        (registry, activations)
    }

    /// Registers `combination` with the OS exactly once.
    ///
    /// # Errors
    ///
    /// `RegistrationError::Failed` if the OS refuses; nothing is retried and
    /// no id is consumed.
    pub fn register(&mut self, combination: KeyCombination) -> Result<RegistrationId, RegistrationError> {
        let id = self.next_id.ok_or(RegistrationError::IdsExhausted)?;

        self.backend
            .register(combination, id)
            .map_err(|source| RegistrationError::Failed { combination, source })?;

        self.next_id = id.next();
        self.held.push((id, combination));
        tracing::info!(%id, %combination, "registered hotkey");

        Ok(id)
    }

    /// Releases every held registration, newest first.
    ///
    /// Best effort: a failure is logged and the rest are still released.
    /// Safe to call repeatedly. Returns how many releases the OS confirmed.
    pub fn unregister_all(&mut self) -> usize {
        let mut released = 0;

        while let Some((id, combination)) = self.held.pop() {
            match self.backend.unregister(id) {
                Ok(()) => {
                    released += 1;
                    tracing::debug!(%id, %combination, "unregistered hotkey");
                }
                Err(e) => {
                    tracing::warn!(%id, %combination, "failed to unregister hotkey: {}", e);
                }
            }
        }

        released
    }

    /// Number of registrations currently held.
    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Held registrations in registration order.
    pub fn registrations(&self) -> &[(RegistrationId, KeyCombination)] {
        &self.held
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: HotkeyBackend> Drop for HotkeyRegistry<B> {
    fn drop(&mut self) {
        self.unregister_all();
    }
}

#[cfg(test)]
mod tests;
