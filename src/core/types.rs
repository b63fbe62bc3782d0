//! src/core/types.rs
//!
//! Core type definitions for hotkey bindings
//!
//! This module defines the fundamental types used throughout the daemon:
//! - `Modifier` / `ModifierSet`: Modifier keys (ALT, CTRL, SHIFT, WIN)
//! - `KeyCombination`: A non-empty modifier set plus one key
//! - `Binding`: A key combination bound to a command line
//! - `RegistrationId`: Process-local handle of one OS registration
//!
//! Everything here is immutable once built. Bindings are created by the
//! configuration loader and never change for the life of the process.

use bitflags::bitflags;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::core::keys::KeyCode;
use crate::core::parser::{parse_key_combination, ParseError};

bitflags! {
    /// Set of modifier flags required alongside the primary key.
    ///
    /// Bit values match the platform hotkey API (`MOD_ALT`, `MOD_CONTROL`,
    /// `MOD_SHIFT`, `MOD_WIN`), so `bits()` can be handed to it directly.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct ModifierSet: u32 {
        const ALT = 0x0001;
        const CONTROL = 0x0002;
        const SHIFT = 0x0004;
        const META = 0x0008;
    }
}

/// A single modifier key
///
/// The config file spells these `alt`, `ctrl`, `shift` and `win`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Modifier {
    /// Control key
    Control,
    /// Alt key
    Alt,
    /// Shift key
    Shift,
    /// Windows/Super/Command key
    Meta,
}

impl Modifier {
    /// All modifiers in canonical display order.
    pub const ALL: [Modifier; 4] = [
        Modifier::Control,
        Modifier::Alt,
        Modifier::Shift,
        Modifier::Meta,
    ];

    /// Looks up a modifier by its config token, ignoring case.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.token().eq_ignore_ascii_case(token))
    }

    /// Config-file spelling of this modifier.
    pub fn token(self) -> &'static str {
        match self {
            Modifier::Control => "ctrl",
            Modifier::Alt => "alt",
            Modifier::Shift => "shift",
            Modifier::Meta => "win",
        }
    }

    /// Flag this modifier contributes to a `ModifierSet`.
    pub fn flag(self) -> ModifierSet {
        match self {
            Modifier::Control => ModifierSet::CONTROL,
            Modifier::Alt => ModifierSet::ALT,
            Modifier::Shift => ModifierSet::SHIFT,
            Modifier::Meta => ModifierSet::META,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl ModifierSet {
    /// Iterates the modifiers contained in this set, in display order.
    pub fn modifiers(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL
            .into_iter()
            .filter(move |m| self.contains(m.flag()))
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ModifierSet::empty(), |set, m| set | m.flag())
    }
}

/// A combination of modifier keys and a primary key
///
/// Represents a complete hotkey like `ctrl+alt+T`. Because modifiers are a
/// bit set, `ctrl+alt` and `alt+ctrl` are the same combination and hash
/// identically.
///
/// # Display
/// Modifiers are always written in the order `ctrl`, `alt`, `shift`, `win`,
/// followed by the key's canonical name. Parsing the displayed form yields
/// an equal value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct KeyCombination {
    /// Required modifiers (never empty for a parsed combination)
    pub modifiers: ModifierSet,

    /// Primary key
    pub key: KeyCode,
}

impl KeyCombination {
    pub fn new(modifiers: ModifierSet, key: KeyCode) -> Self {
        Self { modifiers, key }
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in self.modifiers.modifiers() {
            write!(f, "{}+", modifier)?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for KeyCombination {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key_combination(s)
    }
}

/// A complete hotkey binding
///
/// Ties a key combination to the command line launched when it is pressed.
///
/// # Example
/// ```ignore
/// let binding = Binding {
///     combination: "ctrl+alt+t".parse()?,
///     command: "notepad.exe".to_string(),
///     line: 3,
/// };
/// // Represents: ctrl+alt+t : notepad.exe
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Binding {
    /// The key combination that triggers this binding
    pub combination: KeyCombination,

    /// Command line to launch, program first (never empty)
    pub command: String,

    /// 1-based line in the config file this binding came from
    pub line: usize,
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.combination, self.command)
    }
}

/// Handle of one active OS hotkey registration
///
/// Assigned by the registry from 1 upwards and never reused within a run.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RegistrationId(NonZeroU32);

impl RegistrationId {
    /// The first id handed out by a fresh registry.
    pub const FIRST: RegistrationId = RegistrationId(NonZeroU32::MIN);

    /// Wraps a raw id; `None` for zero.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The id following this one, or `None` on overflow.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
