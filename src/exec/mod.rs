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

//! Command launching
//!
//! A bound command is a single line: program first, then an optional
//! argument string. `CommandExecutor` splits it and hands the parts to a
//! `Launcher`. Launching is fire-and-forget: nothing waits for the child,
//! no output is captured, and a failure only affects the one activation.
//!
//! # Splitting
//! - `prog.exe arg1 arg2` → program `prog.exe`, arguments `arg1 arg2`
//! - `prog.exe` → program `prog.exe`, no arguments
//! - `"C:\Program Files\app.exe" -x` → program `C:\Program Files\app.exe`,
//!   arguments `-x`
//!
//! # Example
//! ```
//! use hotkeyd::exec::split_command;
//!
//! let line = split_command("lock.exe --immediate")?;
//! assert_eq!(line.program, "lock.exe");
//! assert_eq!(line.arguments, Some("--immediate"));
//! # Ok::<(), hotkeyd::exec::ExecError>(())
//! ```

use std::io;
use std::process::{Command, Stdio};
use std::thread;
use thiserror::Error;

/// Executor errors. Never fatal to the daemon.
#[derive(Debug, Error)]
pub enum ExecError {
    /// Nothing to run
    #[error("Empty command")]
    EmptyCommand,

    /// The OS could not start the program
    #[error("Can't run command \"{command}\": {source}")]
    LaunchFailed {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// A command split into program and argument string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CommandLine<'a> {
    pub program: &'a str,
    pub arguments: Option<&'a str>,
}

/// Splits `command` on the first run of whitespace.
///
/// A program path wrapped in double quotes may contain spaces.
///
/// # Errors
///
/// `ExecError::EmptyCommand` if `command` is empty or only whitespace.
pub fn split_command(command: &str) -> Result<CommandLine<'_>, ExecError> {
    let command = command.trim();
    if command.is_empty() {
        return Err(ExecError::EmptyCommand);
    }

    let quoted = command
        .strip_prefix('"')
        .and_then(|rest| rest.split_once('"'))
        .filter(|(program, _)| !program.is_empty());

    let (program, rest) = match quoted {
        Some((program, rest)) => (program, rest),
        None => command
            .split_once(char::is_whitespace)
            .unwrap_or((command, "")),
    };

    let rest = rest.trim_start();
    Ok(CommandLine {
        program,
        arguments: (!rest.is_empty()).then_some(rest),
    })
}

/// Process-launch capability.
pub trait Launcher: Send {
    /// Starts `program` and returns as soon as the OS accepted it.
    fn start(&self, program: &str, arguments: Option<&str>) -> io::Result<()>;
}

/// `Launcher` backed by `std::process::Command`.
///
/// Children get null stdio and are reaped by a detached thread so none is
/// left as a zombie; the caller never waits.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn start(&self, program: &str, arguments: Option<&str>) -> io::Result<()> {
        let program = shellexpand::tilde(program);

        let mut command = Command::new(program.as_ref());
        if let Some(arguments) = arguments {
            add_arguments(&mut command, arguments);
        }

        let mut child = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        let pid = child.id();

        let reaper = thread::Builder::new()
            .name(format!("reap-{}", pid))
            .spawn(move || match child.wait() {
                Ok(status) => tracing::debug!(pid, %status, "child exited"),
                Err(e) => tracing::debug!(pid, "failed to wait for child: {}", e),
            });

        if let Err(e) = reaper {
            // The process is running regardless
            tracing::warn!(pid, "could not spawn reaper thread: {}", e);
        }

        Ok(())
    }
}

/// Windows programs parse their own command line, so pass it untouched.
#[cfg(windows)]
fn add_arguments(command: &mut Command, arguments: &str) {
    use std::os::windows::process::CommandExt;
    command.raw_arg(arguments);
}

#[cfg(not(windows))]
fn add_arguments(command: &mut Command, arguments: &str) {
    command.args(arguments.split_whitespace());
}

/// Splits commands and hands them to a `Launcher`.
pub struct CommandExecutor {
    launcher: Box<dyn Launcher>,
}

impl CommandExecutor {
    pub fn new(launcher: impl Launcher + 'static) -> Self {
        Self {
            launcher: Box::new(launcher),
        }
    }

    /// Launches `command` without waiting for it.
    ///
    /// # Errors
    ///
    /// - `ExecError::EmptyCommand` before any launch is attempted
    /// - `ExecError::LaunchFailed` if the launcher refused
    pub fn execute(&self, command: &str) -> Result<(), ExecError> {
        let line = split_command(command)?;

        self.launcher
            .start(line.program, line.arguments)
            .map_err(|source| ExecError::LaunchFailed {
                command: command.to_string(),
                source,
            })?;

        tracing::info!(program = line.program, arguments = line.arguments, "launched command");
        Ok(())
    }
}
