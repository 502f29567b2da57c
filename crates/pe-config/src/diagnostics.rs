//! Accumulated parse diagnostics.

use std::fmt;

use serde::Serialize;

/// A problem found in the config text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    /// 1-indexed line the problem was found on.
    pub line: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.message)
    }
}

/// Collects diagnostics for one parse run without ever aborting it.
#[derive(Debug)]
pub(crate) struct Reporter {
    file: String,
    diagnostics: Vec<Diagnostic>,
}

impl Reporter {
    pub(crate) fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn file(&self) -> &str {
        &self.file
    }

    pub(crate) fn error(&mut self, line: usize, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            file: self.file.clone(),
            line,
            message: message.into(),
        };
        tracing::warn!(
            file = %diagnostic.file,
            line = diagnostic.line,
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
