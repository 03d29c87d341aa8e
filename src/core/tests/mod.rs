//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Key scheme tests (building and splitting backend keys)
//! - Codec tests (password encoding round trips)
//! - Properties tests (reader/writer compatibility)
//! - Validation pipeline tests

#[cfg(test)]
mod codec_tests;
#[cfg(test)]
mod types_tests;
