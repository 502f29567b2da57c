//! Sleep recorder CLI library.
//!
//! This crate provides the `pe` command-line interface.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Settings;
