//! UI model tests
//!
//! Contains test suites for the toolkit-free presentation layer:
//! - List model sorting, selection and bulk targets
//! - Controller flows, end to end against in-memory and file backends

#[cfg(test)]
mod list_model_tests;
