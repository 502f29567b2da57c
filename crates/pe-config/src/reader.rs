//! Line reader that skips blank and comment-only lines.

use std::str::Lines;

use crate::lexer;

/// Yields `(line_number, text)` for every significant line.
///
/// Line numbers are 1-indexed and count skipped lines too.
#[derive(Debug)]
pub struct LineReader<'a> {
    lines: Lines<'a>,
    line_number: usize,
}

impl<'a> LineReader<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines(),
            line_number: 0,
        }
    }

    /// Number of the line most recently read, significant or not.
    pub const fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<'a> Iterator for LineReader<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            self.line_number += 1;
            if !lexer::is_blank(line) {
                tracing::trace!(line = self.line_number, text = line, "read line");
                return Some((self.line_number, line));
            }
        }
        None
    }
}
