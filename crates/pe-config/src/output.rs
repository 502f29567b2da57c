//! `output` sections: where each kind of data gets written.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone};
use pe_core::DataKind;
use serde::Serialize;

use crate::error::ResolveError;
use crate::template::PathTemplate;
use crate::timespan::TimespanTable;

/// One configured output path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputEntry {
    pub template: PathTemplate,
    /// Config line the entry was defined on.
    pub line: usize,
}

/// Output paths from a single `output ... end` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OutputSection {
    entries: BTreeMap<DataKind, OutputEntry>,
}

impl OutputSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the template for `kind`.
    ///
    /// Returns `false` and keeps the existing entry if `kind` is already set.
    pub fn insert(&mut self, kind: DataKind, entry: OutputEntry) -> bool {
        if self.entries.contains_key(&kind) {
            return false;
        }
        self.entries.insert(kind, entry);
        true
    }

    pub fn get(&self, kind: DataKind) -> Option<&OutputEntry> {
        self.entries.get(&kind)
    }

    pub fn is_configured(&self, kind: DataKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Configured entries in canonical kind order.
    pub fn entries(&self) -> impl Iterator<Item = (DataKind, &OutputEntry)> {
        self.entries.iter().map(|(kind, entry)| (*kind, entry))
    }

    /// Path for `kind` at the moment `at`.
    ///
    /// Unconfigured kinds fall back to `<kind>.csv`. Passing `None` for the
    /// table only checks the template's syntax.
    pub fn resolve_path<Tz>(
        &self,
        kind: DataKind,
        at: &DateTime<Tz>,
        table: Option<&TimespanTable>,
    ) -> Result<PathBuf, ResolveError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self.get(kind) {
            Some(entry) => entry.template.expand(at, table),
            None => PathTemplate::new(kind.default_file_name()).expand(at, table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    use crate::timespan::Timespan;

    fn entry(template: &str, line: usize) -> OutputEntry {
        OutputEntry {
            template: PathTemplate::new(template),
            line,
        }
    }

    #[test]
    fn first_entry_wins() {
        let mut section = OutputSection::new();
        assert!(section.insert(DataKind::Raw, entry("x.csv", 2)));
        assert!(!section.insert(DataKind::Raw, entry("y.csv", 3)));

        let kept = section.get(DataKind::Raw).unwrap();
        assert_eq!(kept.template.as_str(), "x.csv");
        assert_eq!(kept.line, 2);
    }

    #[test]
    fn entries_in_canonical_order() {
        let mut section = OutputSection::new();
        section.insert(DataKind::Events, entry("e.csv", 4));
        section.insert(DataKind::Raw, entry("r.csv", 5));
        section.insert(DataKind::Hypnogram, entry("h.csv", 6));

        let kinds: Vec<_> = section.entries().map(|(kind, _)| kind).collect();
        assert_eq!(
            kinds,
            [DataKind::Raw, DataKind::Hypnogram, DataKind::Events]
        );
    }

    #[test]
    fn unconfigured_kind_defaults_to_csv() {
        let at = Utc.with_ymd_and_hms(2011, 5, 17, 3, 0, 0).unwrap();
        let path = OutputSection::new()
            .resolve_path(DataKind::Spectrogram, &at, None)
            .unwrap();
        assert!(path.ends_with("spectrogram.csv"));
    }

    #[test]
    fn configured_kind_uses_template() {
        let mut table = TimespanTable::new();
        table.insert("night", Timespan::new(22 * 3600, 7 * 3600, 1));
        let mut section = OutputSection::new();
        section.insert(
            DataKind::Hypnogram,
            entry("%NAME{night}_hypnogram.csv", 8),
        );

        let at = Utc.with_ymd_and_hms(2011, 5, 17, 3, 0, 0).unwrap();
        let path = section
            .resolve_path(DataKind::Hypnogram, &at, Some(&table))
            .unwrap();
        assert!(path.ends_with("night_hypnogram.csv"));
    }
}
