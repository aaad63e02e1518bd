//! Runtime configuration for a session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{SEEN_EXPORT_CAP, VIEW_RADIUS};
use crate::error::ConfigError;

/// Largest accepted view radius. Bounds the per-tick visibility cost.
pub const MAX_VIEW_RADIUS: i32 = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Radius of the visibility disc, in tiles
    pub view_radius: i32,
    /// Starting fog-of-war mode for fresh sessions
    pub fog_of_war: bool,
    /// Most seen tiles written into an exported save
    pub seen_export_cap: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            view_radius: VIEW_RADIUS,
            fog_of_war: true,
            seen_export_cap: SEEN_EXPORT_CAP,
        }
    }
}

impl SessionConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_VIEW_RADIUS).contains(&self.view_radius) {
            return Err(ConfigError::Invalid(format!(
                "view_radius {} outside 0..={}",
                self.view_radius, MAX_VIEW_RADIUS
            )));
        }
        if self.seen_export_cap == 0 {
            return Err(ConfigError::Invalid("seen_export_cap must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.view_radius, VIEW_RADIUS);
        assert!(config.fog_of_war);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{ "view_radius": 4 }"#).unwrap();
        assert_eq!(config.view_radius, 4);
        assert_eq!(config.seen_export_cap, SEEN_EXPORT_CAP);
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = SessionConfig {
            view_radius: -1,
            ..SessionConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        let config = SessionConfig {
            seen_export_cap: 0,
            ..SessionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = SessionConfig::load(Path::new("/nonexistent/endless-dungeon.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
