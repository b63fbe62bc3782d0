//! Config module tests
//!
//! Contains test suites for configuration loading:
//! - Loader tests (file discovery, comments, malformed lines)
//! - Path resolution tests
