//! The persisted session record.
//!
//! The transport encoding belongs to whoever stores the record; JSON helpers
//! are provided as a reference encoding.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{SAVE_FORMAT_VERSION, WORLD_COORD_LIMIT};
use crate::error::SaveError;
use crate::rng::Seed;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveState {
    pub version: u32,
    pub seed: Seed,
    pub x: i32,
    pub y: i32,
    pub fog_of_war: bool,
    /// Previously seen world tiles, capped at export time
    pub seen: Vec<(i32, i32)>,
}

impl SaveState {
    /// Structural checks beyond what decoding enforces.
    pub fn validate(&self) -> Result<(), SaveError> {
        if self.version != SAVE_FORMAT_VERSION {
            return Err(SaveError::UnsupportedVersion {
                found: self.version,
                expected: SAVE_FORMAT_VERSION,
            });
        }
        if self.seed.as_str().is_empty() {
            return Err(SaveError::EmptySeed);
        }
        if !in_world(self.x, self.y) {
            return Err(SaveError::PositionOutOfRange {
                x: self.x,
                y: self.y,
            });
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode and validate. Any failure is reported, never panicked on.
    pub fn from_json(text: &str) -> Result<Self, SaveError> {
        let state: Self = serde_json::from_str(text).map_err(|e| {
            warn!(error = %e, "rejected undecodable save");
            SaveError::from(e)
        })?;
        state.validate().map_err(|e| {
            warn!(error = %e, "rejected invalid save");
            e
        })?;
        Ok(state)
    }
}

/// True when a position lies within `WORLD_COORD_LIMIT` on both axes.
pub fn in_world(x: i32, y: i32) -> bool {
    let range = -WORLD_COORD_LIMIT..=WORLD_COORD_LIMIT;
    range.contains(&x) && range.contains(&y)
}
