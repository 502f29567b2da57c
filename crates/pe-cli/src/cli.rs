//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};
use pe_core::DataKind;

/// Sleep recorder configuration tools.
///
/// Checks schedule/output config files and shows where each kind of data
/// would be written at a given time.
#[derive(Debug, Parser)]
#[command(name = "pe", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a settings file.
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a config file and report every problem found.
    Check {
        /// Config file (defaults to the `config_path` setting).
        file: Option<PathBuf>,
    },

    /// Print the parsed config in normalized form.
    Show {
        /// Config file (defaults to the `config_path` setting).
        file: Option<PathBuf>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Resolve the output path for one kind of data.
    Path {
        /// Data kind: raw, hypnogram, spectrogram or events.
        #[arg(long)]
        kind: DataKind,

        /// Moment to resolve for, as RFC 3339 (defaults to now).
        #[arg(long, value_parser = parse_rfc3339)]
        at: Option<DateTime<FixedOffset>>,

        /// Config file (defaults to the `config_path` setting).
        file: Option<PathBuf>,
    },

    /// Echo keystrokes through the background reader until `q` is typed.
    Keys,
}

fn parse_rfc3339(s: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s)
        .map_err(|e| format!("invalid time {s:?}: {e} (expected e.g. 2011-05-17T23:30:00+02:00)"))
}
