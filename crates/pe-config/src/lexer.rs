//! Lexical primitives of the config grammar.
//!
//! Every construct is recognized on a single line. Patterns are compiled
//! once and shared.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::timespan::SECONDS_PER_DAY;

static BLANK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(?:#.*)?$").unwrap());

static KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([_a-zA-Z]+)\s*(?:#.*)?$").unwrap());

static ASSIGNMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^#=]*?)\s*=\s*(.*)$").unwrap());

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_a-zA-Z][_a-zA-Z0-9]*$").unwrap());

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:([0-9]{1,2})\s*:\s*)?([0-9]{1,2})$").unwrap());

static TIMESPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:[0-9]{1,2}\s*:\s*)?[0-9]{1,2})(?:\s*-\s*((?:[0-9]{1,2}\s*:\s*)?[0-9]{1,2}))?$")
        .unwrap()
});

static QUOTED_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"((?:[^"]|"")*)""#).unwrap());

/// `%NAME{a,b,...}`: selects the first listed timespan covering the time.
pub(crate) static NAME_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%NAME\{([_a-zA-Z][_a-zA-Z0-9]*(?:,[_a-zA-Z][_a-zA-Z0-9]*)*)\}").unwrap()
});

/// Shape of one significant line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// A bare word, optionally followed by a comment.
    Keyword(&'a str),
    /// `lhs = rhs`. `rhs` still carries any trailing comment.
    Assignment { lhs: &'a str, rhs: &'a str },
    Unrecognized,
}

impl Line<'_> {
    /// Whether this line closes the current section.
    pub fn is_end(&self) -> bool {
        matches!(self, Line::Keyword("end"))
    }
}

/// Problems with a time or timespan literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("not a valid time of day: {0}")]
    NotATime(String),

    #[error("invalid time of day has more minutes than there are in an hour: {0}")]
    MinutesOutOfRange(String),

    #[error("{0} is a time that doesn't exist in the 24 hour day")]
    PastEndOfDay(String),

    #[error("not a valid timespan: {0}")]
    NotATimespan(String),
}

/// Problems with a quoted path value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathSyntaxError {
    #[error("invalid path given: {0}")]
    NotQuoted(String),

    #[error("unexpected text after path: {0}")]
    TrailingText(String),
}

/// Whether a line holds nothing but whitespace and an optional comment.
pub fn is_blank(line: &str) -> bool {
    BLANK_RE.is_match(line)
}

/// Classify a significant line.
pub fn classify(line: &str) -> Line<'_> {
    if let Some(caps) = KEYWORD_RE.captures(line) {
        if let Some(word) = caps.get(1) {
            return Line::Keyword(word.as_str());
        }
    }

    let Some(caps) = ASSIGNMENT_RE.captures(line) else {
        return Line::Unrecognized;
    };
    match (caps.get(1), caps.get(2)) {
        (Some(lhs), Some(rhs)) => Line::Assignment {
            lhs: lhs.as_str(),
            rhs: rhs.as_str(),
        },
        _ => Line::Unrecognized,
    }
}

pub fn is_identifier(text: &str) -> bool {
    IDENTIFIER_RE.is_match(text)
}

/// Drop a trailing `#` comment and surrounding whitespace.
pub fn strip_comment(text: &str) -> &str {
    text.split('#').next().unwrap_or_default().trim()
}

/// Parse `MM` or `H:MM` into seconds since midnight.
///
/// `24:00` rolls over to midnight.
pub fn parse_time_literal(literal: &str) -> Result<u32, LiteralError> {
    let caps = TIME_RE
        .captures(literal)
        .ok_or_else(|| LiteralError::NotATime(literal.to_string()))?;

    let hours: u32 = match caps.get(1) {
        Some(h) => h
            .as_str()
            .parse()
            .map_err(|_| LiteralError::NotATime(literal.to_string()))?,
        None => 0,
    };
    let minutes: u32 = caps[2]
        .parse()
        .map_err(|_| LiteralError::NotATime(literal.to_string()))?;

    if minutes > 59 {
        return Err(LiteralError::MinutesOutOfRange(literal.to_string()));
    }

    let second = hours * 3600 + minutes * 60;
    match second.cmp(&SECONDS_PER_DAY) {
        std::cmp::Ordering::Equal => Ok(0),
        std::cmp::Ordering::Greater => Err(LiteralError::PastEndOfDay(literal.to_string())),
        std::cmp::Ordering::Less => Ok(second),
    }
}

/// Parse `T` or `T1-T2` into a start second and an optional end second.
pub fn parse_timespan_literal(text: &str) -> Result<(u32, Option<u32>), LiteralError> {
    let caps = TIMESPAN_RE
        .captures(text)
        .ok_or_else(|| LiteralError::NotATimespan(text.to_string()))?;

    let start = parse_time_literal(&caps[1])?;
    let end = caps
        .get(2)
        .map(|lit| parse_time_literal(lit.as_str()))
        .transpose()?;
    Ok((start, end))
}

/// Extract the contents of a `"..."` value, leaving `""` escapes intact.
///
/// Only whitespace or a comment may follow the closing quote.
pub fn parse_quoted_path(rhs: &str) -> Result<&str, PathSyntaxError> {
    let caps = QUOTED_PATH_RE
        .captures(rhs)
        .ok_or_else(|| PathSyntaxError::NotQuoted(rhs.to_string()))?;
    let (Some(whole), Some(path)) = (caps.get(0), caps.get(1)) else {
        return Err(PathSyntaxError::NotQuoted(rhs.to_string()));
    };

    let leftovers = &rhs[whole.end()..];
    if !is_blank(leftovers) {
        return Err(PathSyntaxError::TrailingText(leftovers.to_string()));
    }
    Ok(path.as_str())
}
