//! CLI subcommand implementations.

pub mod check;
pub mod keys;
pub mod path;
pub mod show;
