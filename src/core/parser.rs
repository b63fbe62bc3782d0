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

//! src/core/parser.rs
//!
//! Hotkey config line parser
//!
//! This module parses the two halves of a config line:
//! - `parse_binding_line`: splits `COMBINATION : COMMAND` on the first colon
//! - `parse_key_combination`: turns `ctrl + alt + K` into a `KeyCombination`
//!
//! Both are pure functions. Reading files, skipping comments and attaching
//! line numbers is the loader's job (see `config`).
//!
//! # Combination grammar
//! Tokens are separated by `+`, trimmed and compared case-insensitively.
//! `alt`, `ctrl`, `shift` and `win` are modifiers; repeating one is harmless.
//! Exactly one other token must name a key from the key table. A
//! combination needs at least one modifier.

use nom::{
    bytes::complete::take_until,
    character::complete::char,
    IResult, Parser,
};
use thiserror::Error;

use crate::core::keys::KeyCode;
use crate::core::types::{KeyCombination, Modifier, ModifierSet};

/// Key combination parse errors
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("no modifier given (use alt, ctrl, shift or win)")]
    NoModifier,

    #[error("no key given")]
    NoKey,

    #[error("unknown key name '{0}'")]
    UnknownKey(String),

    #[error("more than one key given ('{first}' and '{second}')")]
    MultipleKeys { first: String, second: String },

    #[error("empty key name between '+' separators")]
    EmptyToken,
}

/// Parse a key combination such as `"Ctrl + Alt + K"`
///
/// # Returns
/// The normalised combination, or the first problem found.
///
/// # Example
/// ```
/// use hotkeyd::core::{parser::parse_key_combination, KeyCode, ModifierSet};
///
/// let combo = parse_key_combination("Ctrl + Alt + K").unwrap();
/// assert_eq!(combo.modifiers, ModifierSet::CONTROL | ModifierSet::ALT);
/// assert_eq!(combo.key, KeyCode::K);
/// ```
pub fn parse_key_combination(input: &str) -> Result<KeyCombination, ParseError> {
    let mut modifiers = ModifierSet::empty();
    let mut key: Option<(KeyCode, &str)> = None;

    for token in input.split('+').map(str::trim) {
        if token.is_empty() {
            return Err(ParseError::EmptyToken);
        }

        if let Some(modifier) = Modifier::from_token(token) {
            modifiers |= modifier.flag();
            continue;
        }

        let code = KeyCode::from_name(token)
            .ok_or_else(|| ParseError::UnknownKey(token.to_string()))?;

        if let Some((_, first)) = key {
            return Err(ParseError::MultipleKeys {
                first: first.to_string(),
                second: token.to_string(),
            });
        }
        key = Some((code, token));
    }

    if modifiers.is_empty() {
        return Err(ParseError::NoModifier);
    }

    let (key, _) = key.ok_or(ParseError::NoKey)?;
    Ok(KeyCombination::new(modifiers, key))
}

/// Parse a single binding line
///
/// Format: COMBINATION : COMMAND
/// Example: ctrl+alt+t : notepad.exe
///
/// Splits on the first `:` only, so commands may contain colons
/// (`C:\tools\app.exe`). Both halves are returned trimmed.
pub fn parse_binding_line(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, combination) = take_until(":")(input)?;
    let (command, _) = char(':').parse(input)?;

    Ok(("", (combination.trim(), command.trim())))
}
