//! Find mailing lists that have gone quiet, then report or remove them.
//!
//! The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic classification. The evaluation instant
//!   is injected, so results depend only on the records passed in.
//! - **[`io`]**: Side-effecting collaborators (config file, list server REST
//!   API, JSON and PNG artifacts).
//!
//! [`report`] and [`remove`] coordinate the two to implement the CLI modes.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod remove;
pub mod report;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
