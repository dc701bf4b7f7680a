//! I/O collaborators: configuration, the list server, and report artifacts.

pub mod config;
pub mod export;
pub mod mailman;
pub mod plot;
