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

//! src/core/keys.rs
//!
//! Static key-name table
//!
//! Every key a binding may use is listed once below with:
//! - its virtual-key code (the value the Win32 hotkey API expects)
//! - its W3C `KeyboardEvent.code` name (what cross-platform backends use)
//! - a canonical name plus optional aliases accepted in config files
//!
//! Canonical names follow the Windows Forms `Keys` enumeration, so configs
//! written for that naming keep working (`D1`, `NumPad5`, `OemMinus`, ...).
//! Lookup is case-insensitive and goes through a `HashMap` built once on
//! first use.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

macro_rules! key_codes {
    ($( $variant:ident = $vk:literal, $code:literal => $name:literal $(| $alias:literal)* ; )*) => {
        /// A key that can be the primary key of a hotkey
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub enum KeyCode {
            $( $variant, )*
        }

        impl KeyCode {
            /// Every key in table order.
            pub const ALL: &'static [KeyCode] = &[ $( KeyCode::$variant, )* ];

            /// Windows virtual-key code. Never zero.
            pub fn virtual_key(self) -> u32 {
                match self {
                    $( KeyCode::$variant => $vk, )*
                }
            }

            /// W3C `KeyboardEvent.code` name of the physical key.
            pub fn code_name(self) -> &'static str {
                match self {
                    $( KeyCode::$variant => $code, )*
                }
            }

            /// Canonical config-file name.
            pub fn name(self) -> &'static str {
                match self {
                    $( KeyCode::$variant => $name, )*
                }
            }

            /// Canonical name followed by every accepted alias.
            pub fn names(self) -> &'static [&'static str] {
                match self {
                    $( KeyCode::$variant => &[$name $(, $alias)*], )*
                }
            }
        }
    };
}

key_codes! {
    A = 0x41, "KeyA" => "A";
    B = 0x42, "KeyB" => "B";
    C = 0x43, "KeyC" => "C";
    D = 0x44, "KeyD" => "D";
    E = 0x45, "KeyE" => "E";
    F = 0x46, "KeyF" => "F";
    G = 0x47, "KeyG" => "G";
    H = 0x48, "KeyH" => "H";
    I = 0x49, "KeyI" => "I";
    J = 0x4A, "KeyJ" => "J";
    K = 0x4B, "KeyK" => "K";
    L = 0x4C, "KeyL" => "L";
    M = 0x4D, "KeyM" => "M";
    N = 0x4E, "KeyN" => "N";
    O = 0x4F, "KeyO" => "O";
    P = 0x50, "KeyP" => "P";
    Q = 0x51, "KeyQ" => "Q";
    R = 0x52, "KeyR" => "R";
    S = 0x53, "KeyS" => "S";
    T = 0x54, "KeyT" => "T";
    U = 0x55, "KeyU" => "U";
    V = 0x56, "KeyV" => "V";
    W = 0x57, "KeyW" => "W";
    X = 0x58, "KeyX" => "X";
    Y = 0x59, "KeyY" => "Y";
    Z = 0x5A, "KeyZ" => "Z";

    D0 = 0x30, "Digit0" => "D0" | "0";
    D1 = 0x31, "Digit1" => "D1" | "1";
    D2 = 0x32, "Digit2" => "D2" | "2";
    D3 = 0x33, "Digit3" => "D3" | "3";
    D4 = 0x34, "Digit4" => "D4" | "4";
    D5 = 0x35, "Digit5" => "D5" | "5";
    D6 = 0x36, "Digit6" => "D6" | "6";
    D7 = 0x37, "Digit7" => "D7" | "7";
    D8 = 0x38, "Digit8" => "D8" | "8";
    D9 = 0x39, "Digit9" => "D9" | "9";

    F1 = 0x70, "F1" => "F1";
    F2 = 0x71, "F2" => "F2";
    F3 = 0x72, "F3" => "F3";
    F4 = 0x73, "F4" => "F4";
    F5 = 0x74, "F5" => "F5";
    F6 = 0x75, "F6" => "F6";
    F7 = 0x76, "F7" => "F7";
    F8 = 0x77, "F8" => "F8";
    F9 = 0x78, "F9" => "F9";
    F10 = 0x79, "F10" => "F10";
    F11 = 0x7A, "F11" => "F11";
    F12 = 0x7B, "F12" => "F12";
    F13 = 0x7C, "F13" => "F13";
    F14 = 0x7D, "F14" => "F14";
    F15 = 0x7E, "F15" => "F15";
    F16 = 0x7F, "F16" => "F16";
    F17 = 0x80, "F17" => "F17";
    F18 = 0x81, "F18" => "F18";
    F19 = 0x82, "F19" => "F19";
    F20 = 0x83, "F20" => "F20";
    F21 = 0x84, "F21" => "F21";
    F22 = 0x85, "F22" => "F22";
    F23 = 0x86, "F23" => "F23";
    F24 = 0x87, "F24" => "F24";

    NumPad0 = 0x60, "Numpad0" => "NumPad0";
    NumPad1 = 0x61, "Numpad1" => "NumPad1";
    NumPad2 = 0x62, "Numpad2" => "NumPad2";
    NumPad3 = 0x63, "Numpad3" => "NumPad3";
    NumPad4 = 0x64, "Numpad4" => "NumPad4";
    NumPad5 = 0x65, "Numpad5" => "NumPad5";
    NumPad6 = 0x66, "Numpad6" => "NumPad6";
    NumPad7 = 0x67, "Numpad7" => "NumPad7";
    NumPad8 = 0x68, "Numpad8" => "NumPad8";
    NumPad9 = 0x69, "Numpad9" => "NumPad9";
    Multiply = 0x6A, "NumpadMultiply" => "Multiply";
    Add = 0x6B, "NumpadAdd" => "Add";
    Subtract = 0x6D, "NumpadSubtract" => "Subtract";
    Decimal = 0x6E, "NumpadDecimal" => "Decimal";
    Divide = 0x6F, "NumpadDivide" => "Divide";

    Back = 0x08, "Backspace" => "Back" | "Backspace";
    Tab = 0x09, "Tab" => "Tab";
    Enter = 0x0D, "Enter" => "Enter" | "Return";
    Pause = 0x13, "Pause" => "Pause";
    CapsLock = 0x14, "CapsLock" => "CapsLock" | "Capital";
    Escape = 0x1B, "Escape" => "Escape" | "Esc";
    Space = 0x20, "Space" => "Space";
    PageUp = 0x21, "PageUp" => "PageUp" | "Prior";
    PageDown = 0x22, "PageDown" => "PageDown" | "Next";
    End = 0x23, "End" => "End";
    Home = 0x24, "Home" => "Home";
    Left = 0x25, "ArrowLeft" => "Left";
    Up = 0x26, "ArrowUp" => "Up";
    Right = 0x27, "ArrowRight" => "Right";
    Down = 0x28, "ArrowDown" => "Down";
    PrintScreen = 0x2C, "PrintScreen" => "PrintScreen" | "Snapshot";
    Insert = 0x2D, "Insert" => "Insert" | "Ins";
    Delete = 0x2E, "Delete" => "Delete" | "Del";
    NumLock = 0x90, "NumLock" => "NumLock";
    Scroll = 0x91, "ScrollLock" => "Scroll" | "ScrollLock";

    OemSemicolon = 0xBA, "Semicolon" => "OemSemicolon" | "Oem1";
    OemPlus = 0xBB, "Equal" => "Oemplus";
    OemComma = 0xBC, "Comma" => "Oemcomma";
    OemMinus = 0xBD, "Minus" => "OemMinus";
    OemPeriod = 0xBE, "Period" => "OemPeriod";
    OemQuestion = 0xBF, "Slash" => "OemQuestion" | "Oem2";
    OemTilde = 0xC0, "Backquote" => "Oemtilde" | "Oem3";
    OemOpenBrackets = 0xDB, "BracketLeft" => "OemOpenBrackets" | "Oem4";
    OemPipe = 0xDC, "Backslash" => "OemPipe" | "Oem5";
    OemCloseBrackets = 0xDD, "BracketRight" => "OemCloseBrackets" | "Oem6";
    OemQuotes = 0xDE, "Quote" => "OemQuotes" | "Oem7";

    VolumeMute = 0xAD, "AudioVolumeMute" => "VolumeMute";
    VolumeDown = 0xAE, "AudioVolumeDown" => "VolumeDown";
    VolumeUp = 0xAF, "AudioVolumeUp" => "VolumeUp";
    MediaNextTrack = 0xB0, "MediaTrackNext" => "MediaNextTrack";
    MediaPreviousTrack = 0xB1, "MediaTrackPrevious" => "MediaPreviousTrack";
    MediaStop = 0xB2, "MediaStop" => "MediaStop";
    MediaPlayPause = 0xB3, "MediaPlayPause" => "MediaPlayPause";
}

/// Lowercased name → key, built once from `KeyCode::ALL`.
static KEY_TABLE: LazyLock<HashMap<String, KeyCode>> = LazyLock::new(|| {
    KeyCode::ALL
        .iter()
        .flat_map(|&key| key.names().iter().map(move |name| (name.to_lowercase(), key)))
        .collect()
});

impl KeyCode {
    /// Looks up a key by canonical name or alias, ignoring case.
    ///
    /// # Example
    /// ```
    /// use hotkeyd::core::KeyCode;
    ///
    /// assert_eq!(KeyCode::from_name("numpad5"), Some(KeyCode::NumPad5));
    /// assert_eq!(KeyCode::from_name("Return"), Some(KeyCode::Enter));
    /// assert_eq!(KeyCode::from_name("zzz"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        KEY_TABLE.get(&name.to_lowercase()).copied()
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
