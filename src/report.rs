//! User-facing error messages
//!
//! Failures that a person must see (startup errors, commands that would not
//! launch) are turned into an `ErrorMessage` of caption plus body and handed
//! to a `Reporter`. The daemon never assumes how they are shown.

use colored::Colorize;

/// Caption used for startup failures.
pub const STARTUP_CAPTION: &str = "Initialization error";

/// Caption used for failures while running.
pub const RUNTIME_CAPTION: &str = "hotkeyd";

/// A message for the presentation layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ErrorMessage {
    pub caption: String,
    pub body: String,
}

impl ErrorMessage {
    pub fn new(caption: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            body: body.into(),
        }
    }
}

/// Presentation-layer sink for error messages.
pub trait Reporter: Send {
    fn report(&self, message: &ErrorMessage);
}

/// Prints messages to stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, message: &ErrorMessage) {
        eprintln!("{} {}", "✗".red().bold(), message.caption.bold());
        eprintln!("  {}", message.body);
    }
}
