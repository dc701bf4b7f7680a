//! Stable exit codes for the `ome` CLI.

/// Report printed or removal pass finished.
pub const OK: i32 = 0;
/// Configuration, connectivity, or output failure.
pub const INVALID: i32 = 1;
/// Command line could not be parsed (clap's own exit status).
pub const USAGE: i32 = 2;
