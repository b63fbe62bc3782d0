use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::ParseError;

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file does not exist.
    #[error("Configuration file \"{0}\" does not exist")]
    NotFound(PathBuf),
    /// Configuration file exists but could not be read.
    #[error("Can't read from configuration file \"{path}\": {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A significant line could not be turned into a binding.
    #[error("Malformed line {line_number}: \"{line}\" ({reason})")]
    Malformed {
        line_number: usize,
        line: String,
        reason: MalformedReason,
    },
    /// No explicit path was given and the executable's directory is unknown.
    #[error("Can't locate default configuration file: {0}")]
    NoDefaultLocation(String),
}

/// Why a config line was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum MalformedReason {
    #[error("missing ':' separator")]
    MissingSeparator,
    #[error("no command after ':'")]
    EmptyCommand,
    #[error("invalid key combination: {0}")]
    Combination(#[from] ParseError),
}
