//! Data kinds as the single source of truth for output category names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Categories of data the recorder writes, one output file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataKind {
    Raw,
    Hypnogram,
    Spectrogram,
    Events,
}

impl DataKind {
    /// Every kind, in canonical order.
    pub const ALL: [Self; 4] = [Self::Raw, Self::Hypnogram, Self::Spectrogram, Self::Events];

    /// Canonical lowercase name, as written in config files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Hypnogram => "hypnogram",
            Self::Spectrogram => "spectrogram",
            Self::Events => "events",
        }
    }

    /// File name used when no output template is configured for this kind.
    pub fn default_file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataKind {
    type Err = UnknownDataKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(Self::Raw),
            "hypnogram" => Ok(Self::Hypnogram),
            "spectrogram" => Ok(Self::Spectrogram),
            "events" => Ok(Self::Events),
            _ => Err(UnknownDataKind(s.to_string())),
        }
    }
}

impl Serialize for DataKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DataKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error for names that are not one of the four data kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown data kind: {0}")]
pub struct UnknownDataKind(pub String);
