//! CLI entry point for hotkeyd
//!
//! Runs the daemon by default; `check` validates a config file and `keys`
//! lists every key name the parser accepts.
//!
//! The daemon keeps the main thread in a `winit` event loop. On Windows and
//! macOS global hotkey events are only delivered to a thread that pumps
//! system events, and that has to be the thread that created the hotkey
//! manager. Commands are launched from a separate dispatcher thread, so the
//! pump is never blocked by a slow spawn.

use clap::{Parser, Subcommand};
use colored::*;
use hotkeyd::config::{load_bindings, resolve_config_path};
use hotkeyd::core::{Binding, ConflictDetector, KeyCode};
use hotkeyd::daemon::{Daemon, StartupError};
use hotkeyd::exec::{CommandExecutor, ProcessLauncher};
use hotkeyd::hotkey::GlobalHotkeyBackend;
use hotkeyd::instance::NamedInstanceGuard;
use hotkeyd::report::{ConsoleReporter, Reporter};
use serde::Serialize;
use std::path::{Path, PathBuf};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

#[derive(Parser)]
#[command(name = "hotkeyd")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the config file (default: hotkeyd.conf next to the executable)
    config: Option<PathBuf>,

    /// Log every registration and activation
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a config file and report duplicate combinations
    Check {
        /// Path to the config file
        config: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all recognised key names
    Keys,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    hotkeyd::logging::init(cli.verbose);

    match cli.command {
        None => run_daemon(cli.config.as_deref())?,
        Some(Commands::Check { config, json }) => check_config(config.as_deref(), json)?,
        Some(Commands::Keys) => list_keys(),
    }

    Ok(())
}

/// Events posted to the main-thread pump.
#[derive(Debug)]
enum PumpEvent {
    Shutdown,
}

/// Keeps the main thread servicing system events; owns no window.
struct Pump;

impl ApplicationHandler<PumpEvent> for Pump {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, _event: WindowEvent) {}

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: PumpEvent) {
        match event {
            PumpEvent::Shutdown => {
                tracing::info!("shutdown requested");
                event_loop.exit();
            }
        }
    }
}

/// Registers every binding and blocks until Ctrl-C
fn run_daemon(config: Option<&Path>) -> anyhow::Result<()> {
    let event_loop = match build_event_loop() {
        Ok(event_loop) => event_loop,
        Err(e) => exit_with(e),
    };

    let mut daemon = match start_daemon(config) {
        Ok(daemon) => daemon,
        Err(e) => exit_with(e),
    };

    let proxy = event_loop.create_proxy();
    ctrlc::set_handler(move || {
        // Fails only once the loop has already exited
        let _ = proxy.send_event(PumpEvent::Shutdown);
    })?;

    if let Err(e) = daemon.start() {
        daemon.shutdown();
        exit_with(e);
    }

    println!(
        "{} hotkeyd running with {} hotkey{} (Ctrl-C to stop)",
        "✓".green(),
        daemon.registrations().len(),
        if daemon.registrations().len() == 1 { "" } else { "s" }
    );

    let pumped = event_loop.run_app(&mut Pump);
    let released = daemon.shutdown();
    pumped?;

    println!("{} Released {} hotkeys", "✓".green(), released);
    Ok(())
}

/// Reports a startup failure and exits with status 1.
fn exit_with(e: StartupError) -> ! {
    tracing::error!("{}", e);
    ConsoleReporter.report(&e.to_message());
    std::process::exit(1);
}

/// Creates the main-thread event loop the hotkey backend depends on.
fn build_event_loop() -> Result<EventLoop<PumpEvent>, StartupError> {
    let event_loop = EventLoop::<PumpEvent>::with_user_event()
        .build()
        .map_err(|e| StartupError::EventPump(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Wait);
    Ok(event_loop)
}

fn start_daemon(config: Option<&Path>) -> Result<Daemon<GlobalHotkeyBackend>, StartupError> {
    let path = resolve_config_path(config)?;
    tracing::info!(config = %path.display(), "starting hotkeyd");

    // Owned by the daemon so the lock lasts until shutdown
    Daemon::initialize(
        &path,
        Box::new(NamedInstanceGuard::for_current_exe()),
        GlobalHotkeyBackend::new,
        CommandExecutor::new(ProcessLauncher),
        Box::new(ConsoleReporter),
    )
}

/// Machine-readable result of `check --json`
#[derive(Serialize)]
struct CheckReport {
    config: PathBuf,
    bindings: Vec<BindingEntry>,
    conflicts: Vec<ConflictEntry>,
}

#[derive(Serialize)]
struct BindingEntry {
    line: usize,
    combination: String,
    command: String,
}

#[derive(Serialize)]
struct ConflictEntry {
    combination: String,
    lines: Vec<usize>,
}

impl From<&Binding> for BindingEntry {
    fn from(binding: &Binding) -> Self {
        Self {
            line: binding.line,
            combination: binding.combination.to_string(),
            command: binding.command.clone(),
        }
    }
}

/// Check config for malformed lines and duplicate combinations
fn check_config(config: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let path = resolve_config_path(config)?;
    let bindings = load_bindings(&path)?;
    let conflicts = ConflictDetector::from_bindings(&bindings).find_conflicts();

    if json {
        let report = CheckReport {
            config: path,
            bindings: bindings.iter().map(BindingEntry::from).collect(),
            conflicts: conflicts
                .iter()
                .map(|conflict| ConflictEntry {
                    combination: conflict.combination.to_string(),
                    lines: conflict.conflicting_bindings.iter().map(|b| b.line).collect(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);

        if !report.conflicts.is_empty() {
            std::process::exit(1);
        }
        return Ok(());
    }

    println!("{} Parsing config: {}", "→".cyan(), path.display());
    println!("{} Found {} bindings\n", "✓".green(), bindings.len());

    for binding in &bindings {
        println!(
            "  {} {} → {}",
            format!("{:>3}:", binding.line).dimmed(),
            format!("{}", binding.combination).cyan().bold(),
            binding.command.green(),
        );
    }
    println!();

    if bindings.is_empty() {
        println!("{}", "⚠ No bindings defined; the daemon will refuse to start".yellow());
        return Ok(());
    }

    if conflicts.is_empty() {
        println!("{} {}", "✓".green().bold(), "No duplicate combinations!".bold());
        return Ok(());
    }

    println!(
        "{} Found {} duplicate{}:\n",
        "✗".red().bold(),
        conflicts.len(),
        if conflicts.len() == 1 { "" } else { "s" }
    );

    for (i, conflict) in conflicts.iter().enumerate() {
        println!(
            "{} {}",
            format!("Conflict {}", i + 1).yellow().bold(),
            format!("{}", conflict.combination).cyan()
        );

        for binding in &conflict.conflicting_bindings {
            println!("  {} {}", format!("line {}:", binding.line).dimmed(), binding.command);
        }
        println!();
    }

    println!("{}", "⚠ Only the first binding of each combination can register!".yellow());
    std::process::exit(1);
}

/// List every key name with its aliases
fn list_keys() {
    for key in KeyCode::ALL {
        let name = key.name();
        let aliases = key.names().get(1..).unwrap_or_default();

        if aliases.is_empty() {
            println!("{}", name.cyan());
        } else {
            println!("{} {}", name.cyan(), format!("({})", aliases.join(", ")).dimmed());
        }
    }

    println!("\n{} {} keys", "✓".green(), KeyCode::ALL.len());
}
