//! Dispatch module tests
//!
//! Covers the table contract and the per-activation error isolation of
//! the dispatcher loop.

use std::sync::atomic::AtomicBool;
use std::sync::mpsc;

use crate::{
    core::{Binding, RegistrationId},
    dispatch::{DispatchError, DispatchTable, Dispatcher},
    exec::CommandExecutor,
    report::RUNTIME_CAPTION,
    testing::{RecordingLauncher, RecordingReporter},
};

/// Helper to create test bindings
fn test_binding(combo: &str, command: &str) -> Binding {
    Binding {
        combination: combo.parse().unwrap(),
        command: command.to_string(),
        line: 1,
    }
}

fn id(raw: u32) -> RegistrationId {
    RegistrationId::new(raw).unwrap()
}

fn dispatcher_with(
    table: DispatchTable,
    launcher: RecordingLauncher,
) -> (Dispatcher, RecordingReporter) {
    let reporter = RecordingReporter::default();
    let dispatcher = Dispatcher::new(
        table,
        CommandExecutor::new(launcher),
        Box::new(reporter.clone()),
    );
    (dispatcher, reporter)
}

#[test]
fn test_resolve_returns_bound_command() {
    let mut table = DispatchTable::new();
    table.bind(id(1), test_binding("ctrl+a", "a.exe")).unwrap();
    table.bind(id(2), test_binding("ctrl+b", "b.exe --flag")).unwrap();

    assert_eq!(table.resolve(id(1)).unwrap().command, "a.exe");
    assert_eq!(table.resolve(id(2)).unwrap().command, "b.exe --flag");
    assert_eq!(table.len(), 2);
}

#[test]
fn test_resolve_unknown_id_fails() {
    let table = DispatchTable::new();

    assert!(matches!(
        table.resolve(id(7)),
        Err(DispatchError::UnknownRegistration(unknown)) if unknown == id(7)
    ));
}

#[test]
fn test_resolve_after_unbind_fails() {
    let mut table = DispatchTable::new();
    table.bind(id(1), test_binding("ctrl+a", "a.exe")).unwrap();

    assert!(table.unbind(id(1)).is_some());
    assert!(matches!(
        table.resolve(id(1)),
        Err(DispatchError::UnknownRegistration(_))
    ));
    assert!(table.is_empty());
}

#[test]
fn test_double_bind_is_rejected() {
    let mut table = DispatchTable::new();
    table.bind(id(1), test_binding("ctrl+a", "a.exe")).unwrap();

    assert!(matches!(
        table.bind(id(1), test_binding("ctrl+b", "b.exe")),
        Err(DispatchError::AlreadyBound(_))
    ));
    assert_eq!(table.resolve(id(1)).unwrap().command, "a.exe");
}

#[test]
fn test_dispatch_launches_bound_command() {
    let mut table = DispatchTable::new();
    table.bind(id(1), test_binding("ctrl+alt+t", "app.exe")).unwrap();

    let launcher = RecordingLauncher::default();
    let (dispatcher, reporter) = dispatcher_with(table, launcher.clone());

    dispatcher.dispatch(id(1)).unwrap();

    assert_eq!(launcher.launches(), vec![("app.exe".to_string(), None)]);
    assert!(reporter.messages().is_empty());
}

#[test]
fn test_unknown_activation_is_logged_not_reported() {
    let launcher = RecordingLauncher::default();
    let (dispatcher, reporter) = dispatcher_with(DispatchTable::new(), launcher.clone());

    dispatcher.handle(id(42));

    assert!(launcher.launches().is_empty());
    assert!(reporter.messages().is_empty());
}

#[test]
fn test_launch_failure_is_reported_and_loop_continues() {
    let mut table = DispatchTable::new();
    table.bind(id(1), test_binding("ctrl+a", "missing.exe")).unwrap();
    table.bind(id(2), test_binding("ctrl+b", "other.exe")).unwrap();

    let launcher = RecordingLauncher::failing();
    let (dispatcher, reporter) = dispatcher_with(table, launcher.clone());

    let (tx, rx) = mpsc::channel();
    for raw in [1, 99, 2] {
        tx.send(id(raw)).unwrap();
    }
    drop(tx);

    let handled = dispatcher.run(rx, &AtomicBool::new(true));

    assert_eq!(handled, 3);
    assert_eq!(launcher.launches().len(), 2, "both known ids were attempted");

    let messages = reporter.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].caption, RUNTIME_CAPTION);
    assert!(messages[0].body.contains("missing.exe"));
}

#[test]
fn test_run_drops_activations_when_not_accepting() {
    let mut table = DispatchTable::new();
    table.bind(id(1), test_binding("ctrl+a", "a.exe")).unwrap();

    let launcher = RecordingLauncher::default();
    let (dispatcher, _reporter) = dispatcher_with(table, launcher.clone());

    let (tx, rx) = mpsc::channel();
    tx.send(id(1)).unwrap();
    drop(tx);

    assert_eq!(dispatcher.run(rx, &AtomicBool::new(false)), 0);
    assert!(launcher.launches().is_empty());
}
