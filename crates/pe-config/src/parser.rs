//! Section dispatcher.
//!
//! At the top level only bare section keywords are allowed. Each keyword
//! hands control to that section's parser, which consumes lines until a bare
//! `end` or the end of input. Problems are reported and skipped so one bad
//! line never hides the rest of the file.

use chrono::Local;
use pe_core::DataKind;

use crate::diagnostics::Reporter;
use crate::document::{ConfigDocument, WakeSection};
use crate::lexer::{self, Line};
use crate::output::{OutputEntry, OutputSection};
use crate::reader::LineReader;
use crate::template::PathTemplate;
use crate::timespan::{SpanChain, Timespan, TimespanTable};

/// Section keywords recognized at the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    WakeAfter,
    TimespanNames,
    Output,
}

impl Section {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "wake_after" => Some(Self::WakeAfter),
            "timespan_names" => Some(Self::TimespanNames),
            "output" => Some(Self::Output),
            _ => None,
        }
    }
}

/// Single-pass parser over one config file.
pub(crate) struct Parser<'a> {
    lines: LineReader<'a>,
    reporter: Reporter,
    wake_sections: Vec<WakeSection>,
    timespans: TimespanTable,
    outputs: Vec<OutputSection>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str, file: impl Into<String>) -> Self {
        Self {
            lines: LineReader::new(source),
            reporter: Reporter::new(file),
            wake_sections: Vec::new(),
            timespans: TimespanTable::new(),
            outputs: Vec::new(),
        }
    }

    pub(crate) fn parse(mut self) -> ConfigDocument {
        tracing::debug!(file = self.reporter.file(), "parsing config");

        while let Some((line_number, text)) = self.lines.next() {
            let Line::Keyword(keyword) = lexer::classify(text) else {
                self.reporter
                    .error(line_number, format!("unexpected line in config file: {text}"));
                continue;
            };

            match Section::from_keyword(keyword) {
                Some(Section::WakeAfter) => self.parse_wake_section(line_number),
                Some(Section::TimespanNames) => self.parse_timespan_section(),
                Some(Section::Output) => self.parse_output_section(),
                None => self
                    .reporter
                    .error(line_number, format!("invalid section type: {keyword}")),
            }
        }

        tracing::debug!(
            lines = self.lines.line_number(),
            wake_sections = self.wake_sections.len(),
            timespans = self.timespans.span_count(),
            output_sections = self.outputs.len(),
            "finished parsing config"
        );

        ConfigDocument::new(
            self.reporter.file().to_string(),
            self.wake_sections,
            self.timespans,
            self.outputs,
            self.reporter.into_diagnostics(),
        )
    }

    /// Next line of the current section, or `None` at `end` or end of input.
    fn next_in_section(&mut self) -> Option<(usize, &'a str)> {
        let (line_number, text) = self.lines.next()?;
        if lexer::classify(text).is_end() {
            None
        } else {
            Some((line_number, text))
        }
    }

    fn parse_wake_section(&mut self, line: usize) {
        tracing::debug!(line, "entering wake_after section");
        while self.next_in_section().is_some() {}
        self.wake_sections.push(WakeSection { line });
    }

    fn parse_timespan_section(&mut self) {
        tracing::debug!("entering timespan_names section");
        let mut chain = SpanChain::default();

        while let Some((line_number, text)) = self.next_in_section() {
            let Line::Assignment { lhs, rhs } = lexer::classify(text) else {
                self.reporter
                    .error(line_number, format!("unexpected line in config file: {text}"));
                continue;
            };

            if !lexer::is_identifier(lhs) {
                self.reporter.error(
                    line_number,
                    format!(
                        "not a valid timespan name: {lhs}. Timespan names must begin with a \
                         letter (a-z or A-Z) or an underscore. They may otherwise contain any \
                         combination of alphanumeric characters and underscores."
                    ),
                );
                continue;
            }

            let span = match lexer::parse_timespan_literal(lexer::strip_comment(rhs)) {
                Ok((start, Some(end))) => Timespan::new(start, end, line_number),
                Ok((start, None)) => Timespan::open(start, line_number),
                Err(err) => {
                    self.reporter.error(line_number, err.to_string());
                    continue;
                }
            };

            chain.push(&mut self.timespans, lhs.to_string(), span);
        }

        chain.finish(&mut self.timespans);
    }

    fn parse_output_section(&mut self) {
        tracing::debug!("entering output section");
        let mut section = OutputSection::new();

        while let Some((line_number, text)) = self.next_in_section() {
            let Line::Assignment { lhs, rhs } = lexer::classify(text) else {
                self.reporter
                    .error(line_number, format!("unexpected line in config file: {text}"));
                continue;
            };

            let path = match lexer::parse_quoted_path(rhs) {
                Ok(path) => path,
                Err(err) => {
                    self.reporter.error(line_number, err.to_string());
                    continue;
                }
            };

            let Ok(kind) = lhs.parse::<DataKind>() else {
                self.reporter
                    .error(line_number, format!("invalid entry in output section: {lhs}"));
                continue;
            };

            // Catch malformed templates now rather than when recording starts.
            let template = PathTemplate::new(path);
            if let Err(err) = template.expand(&Local::now(), None) {
                self.reporter.error(line_number, err.to_string());
                continue;
            }

            let entry = OutputEntry {
                template,
                line: line_number,
            };
            if !section.insert(kind, entry) {
                self.reporter
                    .error(line_number, format!("entry is defined more than once: {lhs}"));
            }
        }

        self.outputs.push(section);
    }
}
