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

//! Hotkey registry tests
//!
//! All tests run against `FakeBackend`; none touch the real OS.

use crate::{
    core::{KeyCombination, RegistrationId},
    hotkey::{HotkeyRegistry, RegistrationError, BackendError},
    testing::{unregistered_ids, BackendCall, FakeBackend},
};

fn combo(s: &str) -> KeyCombination {
    s.parse().unwrap()
}

#[test]
fn test_ids_start_at_one_and_increase() {
    let (backend, _calls) = FakeBackend::new();
    let (mut registry, _activations) = HotkeyRegistry::new(backend);

    let ids: Vec<u32> = ["ctrl+a", "ctrl+b", "ctrl+c"]
        .iter()
        .map(|c| registry.register(combo(c)).unwrap().get())
        .collect();

    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_register_calls_backend_exactly_once() {
    let (backend, calls) = FakeBackend::new();
    let (mut registry, _activations) = HotkeyRegistry::new(backend);

    let id = registry.register(combo("ctrl+alt+t")).unwrap();

    assert_eq!(
        *calls.lock().unwrap(),
        vec![BackendCall::Register(combo("ctrl+alt+t"), id)]
    );
}

#[test]
fn test_rejected_registration_fails_without_retry() {
    let (backend, calls) = FakeBackend::new();
    let backend = backend.rejecting("win+l");
    let (mut registry, _activations) = HotkeyRegistry::new(backend);

    match registry.register(combo("win+l")).unwrap_err() {
        RegistrationError::Failed { combination, source } => {
            assert_eq!(combination, combo("win+l"));
            assert!(matches!(source, BackendError::AlreadyRegistered));
        }
        other => panic!("Expected Failed, got {:?}", other),
    }

    assert_eq!(calls.lock().unwrap().len(), 1, "must not retry");
    assert!(registry.is_empty());

    // The failed attempt does not consume an id
    assert_eq!(registry.register(combo("win+k")).unwrap(), RegistrationId::FIRST);
}

#[test]
fn test_unregister_all_releases_in_reverse_order() {
    let (backend, calls) = FakeBackend::new();
    let (mut registry, _activations) = HotkeyRegistry::new(backend);

    for c in ["ctrl+a", "ctrl+b", "ctrl+c", "ctrl+d"] {
        registry.register(combo(c)).unwrap();
    }

    assert_eq!(registry.unregister_all(), 4);
    assert_eq!(unregistered_ids(&calls), vec![4, 3, 2, 1]);
    assert!(registry.is_empty());
}

#[test]
fn test_unregister_all_is_idempotent() {
    let (backend, calls) = FakeBackend::new();
    let (mut registry, _activations) = HotkeyRegistry::new(backend);

    registry.register(combo("ctrl+a")).unwrap();
    registry.register(combo("ctrl+b")).unwrap();

    assert_eq!(registry.unregister_all(), 2);
    assert_eq!(registry.unregister_all(), 0);
    assert_eq!(unregistered_ids(&calls), vec![2, 1]);
}

#[test]
fn test_ids_not_reused_after_unregister() {
    let (backend, _calls) = FakeBackend::new();
    let (mut registry, _activations) = HotkeyRegistry::new(backend);

    registry.register(combo("ctrl+a")).unwrap();
    registry.unregister_all();

    assert_eq!(registry.register(combo("ctrl+a")).unwrap().get(), 2);
}

#[test]
fn test_unregister_continues_past_external_release() {
    let (backend, calls) = FakeBackend::new();
    let (mut registry, _activations) = HotkeyRegistry::new(backend);

    registry.register(combo("ctrl+a")).unwrap();
    let second = registry.register(combo("ctrl+b")).unwrap();
    registry.register(combo("ctrl+c")).unwrap();

    registry.backend().forget(second);

    // #2 fails to release but #1 is still attempted
    assert_eq!(registry.unregister_all(), 2);
    assert_eq!(unregistered_ids(&calls), vec![3, 2, 1]);
    assert!(registry.is_empty());
}

#[test]
fn test_drop_releases_everything() {
    let (backend, calls) = FakeBackend::new();
    {
        let (mut registry, _activations) = HotkeyRegistry::new(backend);
        registry.register(combo("ctrl+a")).unwrap();
        registry.register(combo("ctrl+b")).unwrap();
    }

    assert_eq!(unregistered_ids(&calls), vec![2, 1]);
}

#[test]
fn test_activation_reaches_receiver() {
    let (backend, _calls) = FakeBackend::new();
    let (mut registry, activations) = HotkeyRegistry::new(backend);

    let id = registry.register(combo("ctrl+alt+t")).unwrap();
    assert!(registry.backend().press(id));

    assert_eq!(activations.try_recv(), Ok(id));
}

#[test]
fn test_activation_after_receiver_dropped_is_ignored() {
    let (backend, _calls) = FakeBackend::new();
    let (mut registry, activations) = HotkeyRegistry::new(backend);

    let id = registry.register(combo("ctrl+alt+t")).unwrap();
    drop(activations);

    assert!(!registry.backend().press(id));
}
