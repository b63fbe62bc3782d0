//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Key combination and config line parsing tests
//! - Type tests (ModifierSet, KeyCombination, RegistrationId)
//! - Duplicate combination detection tests

#[cfg(test)]
mod conflict_tests;
