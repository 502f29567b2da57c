//! Output path templates.
//!
//! A template is the text between the quotes of an output entry. Expanding
//! it against a point in time happens in four steps:
//!
//! 1. Each `%NAME{a,b,...}` token becomes the first listed timespan name
//!    whose spans cover the second of day.
//! 2. Doubled quotes `""` collapse to `"`.
//! 3. Calendar directives (`%Y`, `%m`, `%d`, `%H`, ...) are rendered.
//! 4. The result is made absolute against the working directory.
//!
//! Without a timespan table each token becomes its first listed name, which
//! checks the rest of the template without needing any timespans defined.
//! An empty expansion names the working directory.

use std::fmt::{self, Write as _};
use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone, Timelike};
use serde::Serialize;

use crate::error::ResolveError;
use crate::lexer::NAME_TOKEN_RE;
use crate::timespan::TimespanTable;

/// Path template as written in the config, `""` escapes included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathTemplate {
    source: String,
}

impl PathTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Expand into a concrete path for the moment `at`.
    ///
    /// With `table` set to `None` only the syntax is checked: each `%NAME`
    /// token stands in as its first listed name, so the calendar pass sees
    /// the same shape of text it will see with a table.
    pub fn expand<Tz>(
        &self,
        at: &DateTime<Tz>,
        table: Option<&TimespanTable>,
    ) -> Result<PathBuf, ResolveError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let second = second_of_day(at);

        let mut expanded = String::with_capacity(self.source.len());
        let mut last = 0;
        for caps in NAME_TOKEN_RE.captures_iter(&self.source) {
            let Some(token) = caps.get(0) else {
                continue;
            };
            expanded.push_str(&self.source[last..token.start()]);
            match table {
                Some(table) => expanded.push_str(select_name(table, &caps[1], second)?),
                None => expanded.push_str(first_name(&caps[1])),
            }
            last = token.end();
        }
        expanded.push_str(&self.source[last..]);

        let unescaped = expanded.replace("\"\"", "\"");
        let formatted = format_calendar(&unescaped, at)?;

        let absolute = if formatted.is_empty() {
            std::env::current_dir()
        } else {
            std::path::absolute(&formatted)
        };
        absolute.map_err(|source| ResolveError::Absolute {
            path: formatted,
            source,
        })
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Seconds elapsed since local midnight of `at`.
pub fn second_of_day<Tz: TimeZone>(at: &DateTime<Tz>) -> u32 {
    at.hour() * 3600 + at.minute() * 60 + at.second()
}

fn first_name(names: &str) -> &str {
    names.split(',').next().unwrap_or(names)
}

/// First name in the comma-separated `names` whose spans cover `second`.
fn select_name<'a>(
    table: &TimespanTable,
    names: &'a str,
    second: u32,
) -> Result<&'a str, ResolveError> {
    for name in names.split(',') {
        match table.covers(name, second)? {
            Some(true) => return Ok(name),
            Some(false) => {}
            None => {
                return Err(ResolveError::NameNotFound {
                    name: name.to_string(),
                });
            }
        }
    }
    Err(ResolveError::NoSpanForSecond {
        names: names.to_string(),
        second,
    })
}

fn format_calendar<Tz>(pattern: &str, at: &DateTime<Tz>) -> Result<String, ResolveError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let invalid = || ResolveError::InvalidFormat {
        template: pattern.to_string(),
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let mut out = String::with_capacity(pattern.len());
    write!(out, "{}", at.format_with_items(items.iter())).map_err(|_| invalid())?;
    Ok(out)
}
