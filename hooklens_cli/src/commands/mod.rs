//! Subcommand implementations

pub mod requests;
pub mod watch;
