//! `global-hotkey` adapter
//!
//! The `global-hotkey` crate owns the real OS endpoint: a hidden message
//! window on Windows, a Carbon event handler on macOS and an X11 grab
//! thread on Linux. On Windows and macOS its events are only delivered
//! while the creating thread runs an event loop, so the backend must be
//! created on the main thread and that thread must keep pumping events
//! (see `main.rs`).
//!
//! The crate identifies hotkeys by a hash of the combination. This adapter
//! keeps the mapping from that hash to our `RegistrationId` and forwards
//! key-press events only; releases are ignored.

use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use super::{ActivationSink, BackendError, HotkeyBackend};
use crate::core::{KeyCombination, Modifier, RegistrationId};

/// Platform hotkey id → our id, shared with the event handler.
type Routes = Arc<RwLock<HashMap<u32, RegistrationId>>>;

/// `HotkeyBackend` over `global_hotkey::GlobalHotKeyManager`.
pub struct GlobalHotkeyBackend {
    manager: GlobalHotKeyManager,
    hotkeys: HashMap<RegistrationId, HotKey>,
    routes: Routes,
}

impl GlobalHotkeyBackend {
    /// Creates the OS endpoint. Call on the main thread.
    pub fn new() -> Result<Self, BackendError> {
        let manager = GlobalHotKeyManager::new().map_err(|e| BackendError::Init(e.to_string()))?;

        Ok(Self {
            manager,
            hotkeys: HashMap::new(),
            routes: Arc::default(),
        })
    }
}

/// Translates a combination into the crate's `HotKey`.
fn to_hotkey(combination: KeyCombination) -> Result<HotKey, BackendError> {
    let code = Code::from_str(combination.key.code_name())
        .map_err(|_| BackendError::UnsupportedKey(combination.key))?;

    let modifiers = combination
        .modifiers
        .modifiers()
        .fold(Modifiers::empty(), |mods, modifier| {
            mods | match modifier {
                Modifier::Control => Modifiers::CONTROL,
                Modifier::Alt => Modifiers::ALT,
                Modifier::Shift => Modifiers::SHIFT,
                Modifier::Meta => Modifiers::SUPER,
            }
        });

    Ok(HotKey::new(Some(modifiers), code))
}

impl HotkeyBackend for GlobalHotkeyBackend {
    fn subscribe(&mut self, sink: ActivationSink) {
        let routes = Arc::clone(&self.routes);

        GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
            if event.state != HotKeyState::Pressed {
                return;
            }

            let id = routes
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&event.id)
                .copied();

            match id {
                Some(id) => {
                    tracing::debug!(%id, "hotkey pressed");
                    sink.emit(id);
                }
                // Released while the event was in flight
                None => tracing::debug!(platform_id = event.id, "ignoring unrouted hotkey event"),
            }
        }));
    }

    fn register(&mut self, combination: KeyCombination, id: RegistrationId) -> Result<(), BackendError> {
        let hotkey = to_hotkey(combination)?;

        self.manager.register(hotkey).map_err(|e| match e {
            global_hotkey::Error::AlreadyRegistered(_) => BackendError::AlreadyRegistered,
            other => BackendError::Rejected(other.to_string()),
        })?;

        self.routes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(hotkey.id(), id);
        self.hotkeys.insert(id, hotkey);

        Ok(())
    }

    fn unregister(&mut self, id: RegistrationId) -> Result<(), BackendError> {
        let hotkey = self.hotkeys.remove(&id).ok_or(BackendError::NotRegistered(id))?;

        self.routes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&hotkey.id());

        self.manager
            .unregister(hotkey)
            .map_err(|e| BackendError::Rejected(e.to_string()))
    }
}

impl Drop for GlobalHotkeyBackend {
    fn drop(&mut self) {
        // Drops the handler and with it the sink, closing the channel
        GlobalHotKeyEvent::set_event_handler(None::<fn(GlobalHotKeyEvent)>);
    }
}
