//! Show command: print the parsed config.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

pub fn run<W: Write>(writer: &mut W, path: &Path, json: bool) -> Result<()> {
    let doc = pe_config::load(path)?;
    if !doc.is_valid() {
        tracing::warn!(
            errors = doc.error_count(),
            "config has problems; run `pe check` for details"
        );
    }

    if json {
        let rendered =
            serde_json::to_string_pretty(&doc).context("failed to serialize config")?;
        writeln!(writer, "{rendered}")?;
    } else {
        write!(writer, "{doc}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use insta::assert_snapshot;

    const SOURCE: &str = "\
# bedroom recorder
timespan_names
  night = 22:00
  day = 7:00
end

output
  hypnogram = \"%NAME{day,night}_hypnogram.csv\"   # per period
  raw = \"raw.csv\"
end
";

    #[test]
    fn prints_normalized_config() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("sleep.cfg");
        fs::write(&path, SOURCE).unwrap();

        let mut output = Vec::new();
        run(&mut output, &path, false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r#"
timespan_names
  day = 7:00 - 22:00
  night = 22:00 - 7:00
end
output
  raw = "raw.csv"
  hypnogram = "%NAME{day,night}_hypnogram.csv"
end
"#);
    }

    #[test]
    fn prints_json() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("sleep.cfg");
        fs::write(&path, SOURCE).unwrap();

        let mut output = Vec::new();
        run(&mut output, &path, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["timespans"]["night"][0]["end"], 7 * 3600);
        assert_eq!(
            value["outputs"][0]["hypnogram"]["template"],
            "%NAME{day,night}_hypnogram.csv"
        );
        assert_eq!(value["outputs"][0]["hypnogram"]["line"], 8);
    }
}
