//! Duplicate key combination detection
//!
//! Two bindings on the same combination can never both register: the OS
//! hands a combination to one owner only. This module finds such clashes
//! up front so `check` can report them and startup can warn before the OS
//! rejects the second registration.
//!
//! # Performance
//! - Add binding: O(1) average case
//! - Check conflict: O(1) average case
//! - List all conflicts: O(n) where n = number of unique combinations

use std::collections::HashMap;
use crate::core::types::{Binding, KeyCombination};

/// Detects duplicate combinations using HashMap-based indexing.
///
/// Keys are KeyCombinations and values are all bindings using that
/// combination. A conflict exists when any vector has length > 1.
pub struct ConflictDetector {
    bindings: HashMap<KeyCombination, Vec<Binding>>,
}

/// A combination claimed by more than one binding.
#[derive(Clone, Debug, PartialEq)]
pub struct Conflict {
    /// The combination that has conflicts
    pub combination: KeyCombination,

    /// All bindings using this combination, in config order (always 2 or more)
    pub conflicting_bindings: Vec<Binding>,
}

impl ConflictDetector {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Builds a detector holding every binding in `bindings`.
    pub fn from_bindings<'a>(bindings: impl IntoIterator<Item = &'a Binding>) -> Self {
        let mut detector = Self::new();
        for binding in bindings {
            detector.add_binding(binding.clone());
        }
        detector
    }

    /// Adds a binding to the detector.
    pub fn add_binding(&mut self, binding: Binding) {
        self.bindings
            .entry(binding.combination)
            .or_default()
            .push(binding);
    }

    /// Finds all conflicts, ordered by the config line of their first binding.
    pub fn find_conflicts(&self) -> Vec<Conflict> {
        let mut conflicts: Vec<Conflict> = self
            .bindings
            .iter()
            .filter(|(_, bindings)| bindings.len() > 1)
            .map(|(combination, bindings)| Conflict {
                combination: *combination,
                conflicting_bindings: bindings.clone(),
            })
            .collect();

        conflicts.sort_by_key(|c| c.conflicting_bindings.first().map(|b| b.line));
        conflicts
    }

    /// Returns true if this combination has 2 or more bindings.
    pub fn has_conflict(&self, combination: &KeyCombination) -> bool {
        self.bindings
            .get(combination)
            .map(|bindings| bindings.len() > 1)
            .unwrap_or(false)
    }

    /// Returns the total number of bindings tracked.
    pub fn total_bindings(&self) -> usize {
        self.bindings.values().map(|v| v.len()).sum()
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}
