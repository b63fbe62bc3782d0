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

//! src/core/mod.rs
//!
//! Core data model
//!
//! This module contains the fundamental data structures and pure
//! algorithms of the daemon:
//! - Type definitions for bindings, key combinations and registration ids
//! - The static key-name table
//! - Key combination and config line parsing
//! - Duplicate combination detection using HashMap-based O(1) lookup
//!
//! Nothing here touches the OS, so all of it is unit tested without a
//! display server.

pub mod conflict;
pub mod keys;
pub mod parser;
pub mod types;

pub use conflict::{Conflict, ConflictDetector};
pub use keys::KeyCode;
pub use parser::ParseError;
pub use types::*;

#[cfg(test)]
mod tests;
