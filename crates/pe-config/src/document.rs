//! The parsed configuration.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone};
use pe_core::DataKind;
use serde::Serialize;

use crate::diagnostics::Diagnostic;
use crate::error::ResolveError;
use crate::output::OutputSection;
use crate::timespan::TimespanTable;

/// A `wake_after ... end` block.
///
/// The block's contents are accepted but not interpreted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WakeSection {
    /// Line of the `wake_after` keyword.
    pub line: usize,
}

/// Everything one parse of one config file produced.
///
/// The document is complete even when problems were found; check
/// [`is_valid`](Self::is_valid) before trusting it.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigDocument {
    file: String,
    wake_sections: Vec<WakeSection>,
    timespans: TimespanTable,
    outputs: Vec<OutputSection>,
    diagnostics: Vec<Diagnostic>,
}

impl ConfigDocument {
    pub(crate) const fn new(
        file: String,
        wake_sections: Vec<WakeSection>,
        timespans: TimespanTable,
        outputs: Vec<OutputSection>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            file,
            wake_sections,
            timespans,
            outputs,
            diagnostics,
        }
    }

    /// Name the config was parsed under, used in diagnostics.
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn wake_sections(&self) -> &[WakeSection] {
        &self.wake_sections
    }

    /// Timespans from every `timespan_names` section.
    pub fn timespans(&self) -> &TimespanTable {
        &self.timespans
    }

    pub fn output_sections(&self) -> &[OutputSection] {
        &self.outputs
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Concrete output path for `kind` at the moment `at`.
    ///
    /// Uses the first output section that configures `kind`, or the
    /// `<kind>.csv` default when none does.
    pub fn resolve_path<Tz>(&self, kind: DataKind, at: &DateTime<Tz>) -> Result<PathBuf, ResolveError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let section = self
            .outputs
            .iter()
            .find(|section| section.is_configured(kind));

        match section {
            Some(section) => section.resolve_path(kind, at, Some(&self.timespans)),
            None => OutputSection::default().resolve_path(kind, at, Some(&self.timespans)),
        }
    }
}

/// Renders the document back in config syntax.
impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in &self.wake_sections {
            writeln!(f, "wake_after")?;
            writeln!(f, "end")?;
        }

        if !self.timespans.is_empty() {
            writeln!(f, "timespan_names")?;
            for (name, spans) in self.timespans.iter() {
                for span in spans {
                    writeln!(f, "  {name} = {span}")?;
                }
            }
            writeln!(f, "end")?;
        }

        for section in &self.outputs {
            writeln!(f, "output")?;
            for (kind, entry) in section.entries() {
                writeln!(f, "  {kind} = \"{}\"", entry.template)?;
            }
            writeln!(f, "end")?;
        }

        Ok(())
    }
}
