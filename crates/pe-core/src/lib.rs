//! Vocabulary shared between the config parser and the recorder.
//!
//! - Data kinds: the four categories of output file the recorder writes
//! - Sleep stages: stage names reported by the headband and their plot heights

pub mod data_kind;
pub mod sleep_stage;

pub use data_kind::{DataKind, UnknownDataKind};
pub use sleep_stage::{SleepStage, UnknownSleepStage};
