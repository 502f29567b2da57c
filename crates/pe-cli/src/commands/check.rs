//! Check command: parse a config file and report its problems.

use std::io::Write;
use std::path::Path;

use anyhow::{Result, bail};

/// Writes one `file:line: message` line per problem.
///
/// Fails when the config has any problem, so the exit status tells scripts
/// whether the file is usable.
pub fn run<W: Write>(writer: &mut W, path: &Path) -> Result<()> {
    let doc = pe_config::load(path)?;

    for diagnostic in doc.diagnostics() {
        writeln!(writer, "{diagnostic}")?;
    }

    if !doc.is_valid() {
        bail!("{} error(s) in {}", doc.error_count(), path.display());
    }

    writeln!(
        writer,
        "{}: ok ({} timespan(s), {} output section(s))",
        path.display(),
        doc.timespans().span_count(),
        doc.output_sections().len()
    )?;
    Ok(())
}
