//! Configuration file loading.
//!
//! The config is a line-oriented text file:
//!
//! ```text
//! # comment lines start with '#'
//! ctrl+alt+t : notepad.exe
//! win+shift+L : lock.exe --immediate
//! ```
//!
//! Blank lines and comments are skipped. Every other line must be
//! `COMBINATION : COMMAND`. The first malformed line aborts the whole load;
//! there is no partial-load mode.
//!
//! An empty result is *not* an error here. Whether a config with no
//! bindings is acceptable is the caller's decision (the daemon rejects it).
//!
//! # Example
//!
//! ```no_run
//! use hotkeyd::config::load_bindings;
//! use std::path::Path;
//!
//! let bindings = load_bindings(Path::new("hotkeyd.conf"))?;
//! println!("Found {} bindings", bindings.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;

pub use error::{ConfigError, MalformedReason};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::core::parser::{parse_binding_line, parse_key_combination};
use crate::core::Binding;

/// File name looked up next to the executable when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "hotkeyd.conf";

/// Resolves the config path to load.
///
/// An explicit path has a leading `~` expanded. Without one, the default
/// is `hotkeyd.conf` in the directory holding the running executable.
///
/// # Errors
///
/// Returns `ConfigError::NoDefaultLocation` if no path was given and the
/// executable's location cannot be determined.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        return Ok(PathBuf::from(expanded));
    }

    let exe = std::env::current_exe()
        .map_err(|e| ConfigError::NoDefaultLocation(e.to_string()))?;
    let dir = exe.parent().ok_or_else(|| {
        ConfigError::NoDefaultLocation(format!("{} has no parent directory", exe.display()))
    })?;

    Ok(dir.join(DEFAULT_CONFIG_FILE))
}

/// Loads every binding from the config file at `path`.
///
/// The file handle is scoped to this call and released on every exit path.
///
/// # Errors
///
/// - `ConfigError::NotFound` if `path` does not exist
/// - `ConfigError::Unreadable` on any I/O failure (including invalid UTF-8)
/// - `ConfigError::Malformed` for the first line that is not a valid binding
pub fn load_bindings(path: &Path) -> Result<Vec<Binding>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let bindings = read_bindings(BufReader::new(file), path)?;
    tracing::debug!(path = %path.display(), count = bindings.len(), "loaded configuration");

    Ok(bindings)
}

/// Reads bindings from any buffered source.
///
/// `origin` only labels I/O errors.
pub fn read_bindings<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<Binding>, ConfigError> {
    let mut bindings = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| ConfigError::Unreadable {
            path: origin.to_path_buf(),
            source,
        })?;
        let line_number = index + 1; // Human-readable numbers start at 1

        // Editors on Windows like to prefix a byte order mark
        let content = if index == 0 {
            line.trim_start_matches('\u{feff}')
        } else {
            line.as_str()
        };

        if let Some(binding) = parse_line(content, line_number).map_err(|reason| {
            ConfigError::Malformed {
                line_number,
                line: line.clone(),
                reason,
            }
        })? {
            bindings.push(binding);
        }
    }

    Ok(bindings)
}

/// Parses one config line. `Ok(None)` for blank and comment lines.
fn parse_line(line: &str, line_number: usize) -> Result<Option<Binding>, MalformedReason> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (_, (combination, command)) =
        parse_binding_line(trimmed).map_err(|_| MalformedReason::MissingSeparator)?;

    let combination = parse_key_combination(combination)?;

    if command.is_empty() {
        return Err(MalformedReason::EmptyCommand);
    }

    Ok(Some(Binding {
        combination,
        command: command.to_string(),
        line: line_number,
    }))
}

#[cfg(test)]
mod tests;
