use crate::core::{Binding, ConflictDetector, KeyCombination};

/// Helper to create test bindings
fn test_binding(combo: &str, command: &str, line: usize) -> Binding {
    Binding {
        combination: combo.parse().unwrap(),
        command: command.to_string(),
        line,
    }
}

#[test]
fn test_no_conflicts_when_empty() {
    let detector = ConflictDetector::new();
    assert_eq!(detector.find_conflicts().len(), 0);
    assert_eq!(detector.total_bindings(), 0);
}

#[test]
fn test_no_conflicts_with_unique_bindings() {
    let mut detector = ConflictDetector::new();

    detector.add_binding(test_binding("win+k", "firefox", 1));
    detector.add_binding(test_binding("win+j", "kitty", 2));
    detector.add_binding(test_binding("win+shift+k", "chrome", 3));

    assert_eq!(detector.find_conflicts().len(), 0);
    assert_eq!(detector.total_bindings(), 3);
}

#[test]
fn test_detects_simple_conflict() {
    let mut detector = ConflictDetector::new();

    // Same combination, different commands
    detector.add_binding(test_binding("win+k", "firefox", 1));
    detector.add_binding(test_binding("win+k", "chrome", 2));

    let conflicts = detector.find_conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].conflicting_bindings.len(), 2);

    let expected: KeyCombination = "win+k".parse().unwrap();
    assert_eq!(conflicts[0].combination, expected);
}

#[test]
fn test_modifier_order_independence() {
    let mut detector = ConflictDetector::new();

    detector.add_binding(test_binding("win+shift+k", "app1", 1));
    detector.add_binding(test_binding("SHIFT + WIN + K", "app2", 2));

    let combo: KeyCombination = "shift+win+k".parse().unwrap();
    assert!(detector.has_conflict(&combo));
}

#[test]
fn test_conflicts_sorted_by_first_line() {
    let detector = ConflictDetector::from_bindings(&[
        test_binding("ctrl+j", "a", 1),
        test_binding("ctrl+k", "b", 2),
        test_binding("ctrl+k", "c", 3),
        test_binding("ctrl+j", "d", 4),
        test_binding("ctrl+l", "e", 5),
    ]);

    let conflicts = detector.find_conflicts();
    assert_eq!(conflicts.len(), 2);
    assert_eq!(conflicts[0].combination.to_string(), "ctrl+J");
    assert_eq!(conflicts[1].combination.to_string(), "ctrl+K");
    assert_eq!(detector.total_bindings(), 5);
}
