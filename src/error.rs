//! Error types for the fallible edges of the crate.
//!
//! Generation itself never fails; only persisted state and configuration
//! coming from outside can be rejected.

use std::path::PathBuf;

use thiserror::Error;

/// Why a persisted session could not be restored.
#[derive(Error, Debug)]
pub enum SaveError {
    /// The record could not be encoded or decoded as JSON.
    #[error("save data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The record was written by an incompatible format version.
    #[error("unsupported save version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// The record has no seed to regenerate the world from.
    #[error("save has an empty seed")]
    EmptySeed,

    /// The observer position lies outside the addressable world.
    #[error("save position ({x}, {y}) is outside the world")]
    PositionOutOfRange { x: i32, y: i32 },
}

/// Why a configuration file was rejected.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
