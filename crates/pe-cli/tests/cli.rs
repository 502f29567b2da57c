//! End-to-end tests for the `pe` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const CONFIG: &str = "\
wake_after
end

timespan_names
  night = 22:00
  day = 7:00
end

output
  hypnogram = \"%NAME{day,night}_hypnogram.csv\"
  raw = \"%Y-%m-%d/raw.csv\"   # one folder per day
end
";

fn pe_binary() -> String {
    env!("CARGO_BIN_EXE_pe").to_string()
}

/// `pe` isolated from the user's settings and environment.
fn pe(home: &Path) -> Command {
    let mut command = Command::new(pe_binary());
    command
        .current_dir(home)
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("PE_CONFIG_PATH")
        .env_remove("PE_POLL_INTERVAL_MS")
        .env_remove("RUST_LOG");
    command
}

fn write_config(temp: &TempDir, name: &str, contents: &str) -> String {
    let path = temp.path().join(name);
    fs::write(&path, contents).unwrap();
    path.display().to_string()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_check_accepts_valid_config() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, "sleep.cfg", CONFIG);

    let output = pe(temp.path()).args(["check", &config]).output().unwrap();
    assert!(output.status.success(), "check failed: {}", stderr(&output));
    assert!(
        stdout(&output).contains("ok (2 timespan(s), 1 output section(s))"),
        "{}",
        stdout(&output)
    );
}

#[test]
fn test_check_reports_errors_and_fails() {
    let temp = TempDir::new().unwrap();
    let config = write_config(
        &temp,
        "broken.cfg",
        "timespan_names\n  9night = 22:00\nend\noutput\n  video = \"v.csv\"\nend\n",
    );

    let output = pe(temp.path()).args(["check", &config]).output().unwrap();
    assert!(!output.status.success());

    let out = stdout(&output);
    assert!(out.contains("broken.cfg:2: not a valid timespan name: 9night"), "{out}");
    assert!(out.contains("broken.cfg:5: invalid entry in output section: video"), "{out}");
    assert!(stderr(&output).contains("2 error(s)"), "{}", stderr(&output));
}

#[test]
fn test_path_selects_span_by_time() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, "sleep.cfg", CONFIG);

    let output = pe(temp.path())
        .args(["path", "--kind", "hypnogram", "--at", "2011-05-17T12:00:00+02:00", &config])
        .output()
        .unwrap();
    assert!(output.status.success(), "path failed: {}", stderr(&output));
    assert!(
        stdout(&output).trim_end().ends_with("day_hypnogram.csv"),
        "{}",
        stdout(&output)
    );

    let output = pe(temp.path())
        .args(["path", "--kind", "raw", "--at", "2011-05-17T23:30:00+02:00", &config])
        .output()
        .unwrap();
    assert!(output.status.success(), "path failed: {}", stderr(&output));
    assert!(
        stdout(&output).trim_end().ends_with("2011-05-17/raw.csv"),
        "{}",
        stdout(&output)
    );
}

#[test]
fn test_path_falls_back_to_default_name() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, "sleep.cfg", CONFIG);

    let output = pe(temp.path())
        .args(["path", "--kind", "events", &config])
        .output()
        .unwrap();
    assert!(output.status.success(), "path failed: {}", stderr(&output));
    assert!(stdout(&output).trim_end().ends_with("events.csv"));
}

#[test]
fn test_path_rejects_unknown_kind() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, "sleep.cfg", CONFIG);

    let output = pe(temp.path())
        .args(["path", "--kind", "video", &config])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown data kind: video"), "{}", stderr(&output));
}

#[test]
fn test_show_json() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, "sleep.cfg", CONFIG);

    let output = pe(temp.path())
        .args(["show", "--json", &config])
        .output()
        .unwrap();
    assert!(output.status.success(), "show failed: {}", stderr(&output));

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["wake_sections"][0]["line"], 1);
    assert_eq!(doc["timespans"]["day"][0]["start"], 7 * 3600);
    assert_eq!(doc["outputs"][0]["raw"]["template"], "%Y-%m-%d/raw.csv");
}

#[test]
fn test_config_path_from_environment() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, "from-env.cfg", CONFIG);

    let output = pe(temp.path())
        .env("PE_CONFIG_PATH", &config)
        .arg("show")
        .output()
        .unwrap();
    assert!(output.status.success(), "show failed: {}", stderr(&output));
    assert!(stdout(&output).contains("night = 22:00 - 7:00"), "{}", stdout(&output));
}

#[test]
fn test_config_path_from_settings_file() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, "custom.cfg", CONFIG);
    let settings = write_config(
        &temp,
        "settings.toml",
        &format!("config_path = {config:?}\n"),
    );

    let output = pe(temp.path())
        .args(["--settings", &settings, "check"])
        .output()
        .unwrap();
    assert!(output.status.success(), "check failed: {}", stderr(&output));
    assert!(stdout(&output).contains("custom.cfg: ok"), "{}", stdout(&output));
}

#[test]
fn test_missing_default_config_fails() {
    let temp = TempDir::new().unwrap();

    let output = pe(temp.path()).arg("check").output().unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("config.cfg"), "{}", stderr(&output));
}
