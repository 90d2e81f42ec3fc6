use std::path::PathBuf;
use thiserror::Error;

use crate::schedule::types::SlotCoordinate;

/// Failure raised at the Grid Store boundary. Day and period are kept as
/// received so request values that don't even fit a `u8` can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("slot ({day}, {period}) is outside the {days}x{periods} grid")]
    OutOfRange {
        day: i64,
        period: i64,
        days: u8,
        periods: u8,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("timetable needs at least one {0}")]
    Empty(&'static str),
    #[error("timetable supports at most 255 {0}")]
    TooMany(&'static str),
    #[error("period '{name}' must end after it starts")]
    InvertedPeriod { name: String },
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed: {0}")]
    Csv(#[from] csv::Error),
    #[error("seed row {row}: {source}")]
    OutOfRange {
        row: usize,
        #[source]
        source: GridError,
    },
    #[error("seed row {row}: slot {coord} is already assigned")]
    Duplicate { row: usize, coord: SlotCoordinate },
}
