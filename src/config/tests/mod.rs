//! Config module tests
//!
//! Contains test suites for the settings backends:
//! - In-memory backend behaviour
//! - File-backed persistence, atomic rewrites and backups
