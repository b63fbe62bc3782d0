// Copyright 2025 bakri (tidynest@proton.me)
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

//! hotkeyd
//!
//! A small daemon that binds system-wide key combinations to commands. It
//! reads a plain-text list of `combination : command` lines, registers
//! every combination with the OS and launches the matching command each
//! time one is pressed.
//!
//! # Features
//!
//! - **Strict startup:** every binding registers or none does
//! - **Fire-and-forget launching:** a failing command never stops the daemon
//! - **Duplicate detection:** `hotkeyd check` lists combinations bound twice
//! - **Single instance:** a second daemon refuses to start
//!
//! # Architecture
//!
//! - **`core`:** Data model, key-name table, combination parser, duplicates
//! - **`config`:** Configuration file loading and path resolution
//! - **`hotkey`:** OS registration behind the `HotkeyBackend` trait
//! - **`dispatch`:** Registration id → command, and the activation loop
//! - **`exec`:** Command splitting and process launching
//! - **`daemon`:** Startup sequence, run phase and shutdown
//!
//! # Configuration format
//!
//! ```text
//! # comments start with '#'
//! ctrl+alt+t : wt.exe
//! win+shift+l : lock.exe --immediate
//! ```
//!
//! # Examples
//!
//! ## Parsing a combination
//!
//! ```
//! use hotkeyd::core::{KeyCode, KeyCombination, ModifierSet};
//!
//! let combo: KeyCombination = "Ctrl+Alt+t".parse()?;
//! assert_eq!(combo.modifiers, ModifierSet::CONTROL | ModifierSet::ALT);
//! assert_eq!(combo.key, KeyCode::T);
//! assert_eq!(combo.to_string(), "ctrl+alt+T");
//! # Ok::<(), hotkeyd::core::ParseError>(())
//! ```
//!
//! ## Loading a config file
//!
//! ```no_run
//! use hotkeyd::config::load_bindings;
//! use std::path::Path;
//!
//! let bindings = load_bindings(Path::new("hotkeyd.conf"))?;
//! println!("Found {} bindings", bindings.len());
//! # Ok::<(), hotkeyd::config::ConfigError>(())
//! ```

pub mod config;
pub mod core;
pub mod daemon;
pub mod dispatch;
pub mod exec;
pub mod hotkey;
pub mod instance;
pub mod logging;
pub mod report;

#[cfg(test)]
mod testing;

// Re-export commonly used types for convenience
pub use core::{Binding, KeyCode, KeyCombination, Modifier, ModifierSet, RegistrationId};
pub use daemon::{Daemon, StartupError};
