//! Named timespans and their resolution into a day-tiling table.
//!
//! Inside one `timespan_names` section each assignment starts a span. A span
//! written without an end runs until the next span starts; the last one runs
//! until the first one in the section starts, so the section closes into a
//! cycle covering the whole day.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::SpanError;

/// Seconds in one day.
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Half-open interval of seconds since midnight, wrapping past midnight when
/// `end <= start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timespan {
    start: u32,
    end: Option<u32>,
    line: usize,
}

impl Timespan {
    /// A span with both ends known.
    pub const fn new(start: u32, end: u32, line: usize) -> Self {
        Self {
            start,
            end: Some(end),
            line,
        }
    }

    /// A span whose end is decided later by the resolver.
    pub const fn open(start: u32, line: usize) -> Self {
        Self {
            start,
            end: None,
            line,
        }
    }

    pub const fn start(&self) -> u32 {
        self.start
    }

    /// `None` until the resolver has closed the span.
    pub const fn end(&self) -> Option<u32> {
        self.end
    }

    /// Config line the span was defined on.
    pub const fn line(&self) -> usize {
        self.line
    }

    pub const fn is_resolved(&self) -> bool {
        self.end.is_some()
    }

    /// Set the end if it is still open.
    fn close_at(&mut self, second: u32) {
        if self.end.is_none() {
            self.end = Some(second);
        }
    }

    /// Whether `second_of_day` falls inside the span.
    ///
    /// Fails only for spans the resolver never closed.
    pub fn contains(&self, second_of_day: u32) -> Result<bool, SpanError> {
        let end = self.end.ok_or(SpanError::Unresolved {
            line: self.line,
            start: self.start,
        })?;

        let inside = if end <= self.start {
            second_of_day < end || self.start <= second_of_day
        } else {
            self.start <= second_of_day && second_of_day < end
        };
        Ok(inside)
    }
}

fn clock(second: u32) -> String {
    format!("{}:{:02}", second / 3600, (second / 60) % 60)
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{} - {}", clock(self.start), clock(end)),
            None => write!(f, "{} - ?", clock(self.start)),
        }
    }
}

/// Timespans by name. One name may own several pieces of the day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimespanTable {
    spans: BTreeMap<String, Vec<Timespan>>,
}

impl TimespanTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a span under `name`.
    pub fn insert(&mut self, name: impl Into<String>, span: Timespan) {
        self.spans.entry(name.into()).or_default().push(span);
    }

    pub fn get(&self, name: &str) -> Option<&[Timespan]> {
        self.spans.get(name).map(Vec::as_slice)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.spans.contains_key(name)
    }

    /// Whether any span owned by `name` covers `second_of_day`.
    ///
    /// `Ok(None)` when the name has no entry at all.
    pub fn covers(&self, name: &str, second_of_day: u32) -> Result<Option<bool>, SpanError> {
        let Some(spans) = self.spans.get(name) else {
            return Ok(None);
        };
        for span in spans {
            if span.contains(second_of_day)? {
                return Ok(Some(true));
            }
        }
        Ok(Some(false))
    }

    /// Names in sorted order with their spans in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Timespan])> {
        self.spans
            .iter()
            .map(|(name, spans)| (name.as_str(), spans.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Total number of spans across all names.
    pub fn span_count(&self) -> usize {
        self.spans.values().map(Vec::len).sum()
    }
}

/// Resolution state for one `timespan_names` section.
///
/// Holds back the most recent span until the next one reveals where it
/// ends, and remembers the first span so the last can close the cycle.
#[derive(Debug, Default)]
pub(crate) struct SpanChain {
    first: Option<(String, Timespan)>,
    pending: Option<(String, Timespan)>,
}

impl SpanChain {
    pub(crate) fn push(&mut self, table: &mut TimespanTable, name: String, span: Timespan) {
        if let Some((pending_name, mut pending)) = self.pending.take() {
            pending.close_at(span.start());
            table.insert(pending_name, pending);
        }

        if self.first.is_none() {
            self.first = Some((name.clone(), span));
        }
        self.pending = Some((name, span));
    }

    pub(crate) fn finish(self, table: &mut TimespanTable) {
        let (Some((first_name, first)), Some((name, mut last))) = (self.first, self.pending) else {
            return;
        };

        if !last.is_resolved() {
            tracing::debug!(
                name = %name,
                wraps_to = %first_name,
                "closing timespan cycle"
            );
        }
        last.close_at(first.start());
        table.insert(name, last);
    }
}
