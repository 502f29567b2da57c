//! Settings loading for the CLI itself.
//!
//! These are distinct from the sleep config files the commands parse.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Sleep config file used when a command is not given one.
    pub config_path: PathBuf,
    /// How long the key reader waits per poll, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("config.cfg"),
            poll_interval_ms: 50,
        }
    }
}

impl Settings {
    /// Loads settings, optionally from a specific file.
    ///
    /// Later sources win: defaults, the user settings file, `settings_path`,
    /// then `PE_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(settings_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("settings.toml")));
        }

        if let Some(path) = settings_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("PE_"));

        figment.extract()
    }

    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// The config file to use: `explicit` if given, else the setting.
    pub fn config_file(&self, explicit: Option<&Path>) -> PathBuf {
        explicit.map_or_else(|| self.config_path.clone(), Path::to_path_buf)
    }
}

/// Returns the platform-specific config directory for pe.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pe"))
}
