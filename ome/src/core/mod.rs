//! Deterministic, pure logic shared by the reporting and removal paths.
//!
//! Core modules must be free of I/O side effects. They never read the clock:
//! the evaluation instant is always passed in, so outputs are reproducible
//! in tests.

pub mod activity;
pub mod histogram;
pub mod timestamp;
pub mod types;
