//! Fatal error types.
//!
//! Problems in the config text itself never show up here; they are
//! collected as [`Diagnostic`](crate::Diagnostic)s while parsing.

use std::path::PathBuf;

use thiserror::Error;

/// A broken invariant inside the timespan resolver.
///
/// These point at a parser bug, not at bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
    #[error(
        "timespan from line {line} starting at second {start} has no end; the resolver should have closed it"
    )]
    Unresolved { line: usize, start: u32 },
}

/// Failure to turn an output template into a concrete path.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A `%NAME{...}` token lists a name with no timespan entry.
    #[error("span name {name} given in %NAME{{}} was not found in the timespan table")]
    NameNotFound { name: String },

    /// Every listed name exists, but none covers the requested second.
    #[error("no timespan among {{{names}}} contains second {second} of the day")]
    NoSpanForSecond { names: String, second: u32 },

    /// The template contains a calendar directive that cannot be rendered.
    #[error("invalid calendar directive in path {template:?}")]
    InvalidFormat { template: String },

    #[error("failed to make {path:?} absolute")]
    Absolute {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Span(#[from] SpanError),
}

/// Failure to read a config file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
