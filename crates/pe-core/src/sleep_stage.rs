//! Sleep stages reported by the headband.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A sleep stage as named by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SleepStage {
    Undefined,
    Deep,
    Light,
    Rem,
    Awake,
    /// The device sent no stage for this epoch.
    NotGiven,
}

impl SleepStage {
    pub const ALL: [Self; 6] = [
        Self::Undefined,
        Self::Deep,
        Self::Light,
        Self::Rem,
        Self::Awake,
        Self::NotGiven,
    ];

    /// Name exactly as the device sends it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "Undefined",
            Self::Deep => "Deep",
            Self::Light => "Light",
            Self::Rem => "REM",
            Self::Awake => "Awake",
            Self::NotGiven => "Not Given",
        }
    }

    /// Ordinal height used when plotting a hypnogram.
    ///
    /// Deeper sleep plots lower. A missing stage plots at the floor, like
    /// `Undefined`.
    #[must_use]
    pub const fn height(&self) -> u8 {
        match self {
            Self::Undefined | Self::NotGiven => 0,
            Self::Deep => 1,
            Self::Light => 2,
            Self::Rem => 3,
            Self::Awake => 4,
        }
    }
}

impl fmt::Display for SleepStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SleepStage {
    type Err = UnknownSleepStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| UnknownSleepStage(s.to_string()))
    }
}

impl Serialize for SleepStage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SleepStage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error for stage names the device is not known to send.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sleep stage: {0}")]
pub struct UnknownSleepStage(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_names_parse() {
        assert_eq!("REM".parse::<SleepStage>().unwrap(), SleepStage::Rem);
        assert_eq!(
            "Not Given".parse::<SleepStage>().unwrap(),
            SleepStage::NotGiven
        );
        for stage in SleepStage::ALL {
            assert_eq!(stage.as_str().parse::<SleepStage>().unwrap(), stage);
        }
    }

    #[test]
    fn heights_follow_depth() {
        let heights: Vec<_> = [
            SleepStage::Undefined,
            SleepStage::Deep,
            SleepStage::Light,
            SleepStage::Rem,
            SleepStage::Awake,
        ]
        .iter()
        .map(SleepStage::height)
        .collect();
        assert_eq!(heights, [0, 1, 2, 3, 4]);
        assert_eq!(SleepStage::NotGiven.height(), 0);
    }

    #[test]
    fn unknown_stage_errors() {
        let err = "rem".parse::<SleepStage>().unwrap_err();
        assert_eq!(err.to_string(), "unknown sleep stage: rem");
    }
}
