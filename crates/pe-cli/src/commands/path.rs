//! Path command: resolve where a kind of data would be written.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, FixedOffset};
use pe_core::DataKind;

pub fn run<W: Write>(
    writer: &mut W,
    path: &Path,
    kind: DataKind,
    at: &DateTime<FixedOffset>,
) -> Result<()> {
    let doc = pe_config::load(path)?;
    if !doc.is_valid() {
        bail!(
            "{} has {} error(s); run `pe check` for details",
            path.display(),
            doc.error_count()
        );
    }

    let resolved = doc
        .resolve_path(kind, at)
        .with_context(|| format!("failed to resolve {kind} path for {at}"))?;
    tracing::debug!(%kind, %at, path = %resolved.display(), "resolved output path");

    writeln!(writer, "{}", resolved.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    const SOURCE: &str = "\
timespan_names
  day = 8:00
  night = 20:00
end
output
  hypnogram = \"%Y%m%d_%NAME{day,night}.csv\"
  events = \"%NAME{evening}.csv\"
end
";

    fn resolve(kind: DataKind, at: &str) -> Result<String> {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("sleep.cfg");
        fs::write(&path, SOURCE).unwrap();

        let at = DateTime::parse_from_rfc3339(at).unwrap();
        let mut output = Vec::new();
        run(&mut output, &path, kind, &at)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn resolves_by_time_of_day() {
        let noon = resolve(DataKind::Hypnogram, "2011-05-17T12:00:00+00:00").unwrap();
        assert!(noon.trim_end().ends_with("20110517_day.csv"), "{noon}");

        let late = resolve(DataKind::Hypnogram, "2011-05-17T23:00:00+00:00").unwrap();
        assert!(late.trim_end().ends_with("20110517_night.csv"), "{late}");
    }

    #[test]
    fn unknown_span_name_fails() {
        let err = resolve(DataKind::Events, "2011-05-17T12:00:00+00:00").unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("evening"), "{chain}");
    }

    #[test]
    fn invalid_config_is_refused() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("sleep.cfg");
        fs::write(&path, "bogus\n").unwrap();

        let at = DateTime::parse_from_rfc3339("2011-05-17T12:00:00+00:00").unwrap();
        let err = run(&mut Vec::new(), &path, DataKind::Raw, &at).unwrap_err();
        assert!(err.to_string().contains("1 error(s)"));
    }
}
