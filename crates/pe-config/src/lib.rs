//! Parser for the sleep recorder's configuration files.
//!
//! A config file is a sequence of sections:
//!
//! ```text
//! wake_after
//!   ...               # accepted, not interpreted yet
//! end
//!
//! timespan_names
//!   night = 22:00     # runs until the next span starts
//!   day   = 7:00      # the last span wraps back to the first
//! end
//!
//! output
//!   raw       = "%Y-%m-%d/raw.csv"
//!   hypnogram = "%NAME{day,night}_hypnogram.csv"
//! end
//! ```
//!
//! Parsing never stops at a bad line. Every problem becomes a
//! [`Diagnostic`] on the returned [`ConfigDocument`], and callers decide
//! whether a document with errors is usable.

mod diagnostics;
mod document;
mod error;
pub mod lexer;
mod output;
mod parser;
pub mod reader;
mod template;
mod timespan;

use std::path::Path;

pub use diagnostics::Diagnostic;
pub use document::{ConfigDocument, WakeSection};
pub use error::{LoadError, ResolveError, SpanError};
pub use output::{OutputEntry, OutputSection};
pub use template::{PathTemplate, second_of_day};
pub use timespan::{SECONDS_PER_DAY, Timespan, TimespanTable};

/// Parse config text. `file` names the source in diagnostics.
pub fn parse_str(source: &str, file: &str) -> ConfigDocument {
    parser::Parser::new(source, file).parse()
}

/// Read and parse a config file.
pub fn load(path: &Path) -> Result<ConfigDocument, LoadError> {
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_str(&source, &path.display().to_string()))
}
