//! Optional TOML configuration for `linecast raycast`.
//!
//! ```toml
//! [raycast]
//! near = 0.5
//! far = 1000.0
//! sort = true
//!
//! [displacement]
//! min = -2.0
//! max = 8.0
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use linecast_mesh::DisplacementRange;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub raycast: RaycastConfig,
    /// Fixed displacement range; derived from the scene when absent.
    pub displacement: Option<DisplacementConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RaycastConfig {
    pub near: Option<f64>,
    pub far: Option<f64>,
    pub sort: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplacementConfig {
    pub min: f64,
    pub max: f64,
}

impl From<DisplacementConfig> for DisplacementRange {
    fn from(c: DisplacementConfig) -> Self {
        DisplacementRange::new(c.min, c.max)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.raycast.near, None);
        assert_eq!(config.raycast.far, None);
        assert!(!config.raycast.sort);
        assert!(config.displacement.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            [raycast]
            near = 0.5
            far = 100.0
            sort = true

            [displacement]
            min = 4.0
            max = -1.0
            "#,
        )
        .unwrap();
        assert_eq!(config.raycast.near, Some(0.5));
        assert_eq!(config.raycast.far, Some(100.0));
        assert!(config.raycast.sort);
        let range: DisplacementRange = config.displacement.unwrap().into();
        assert_eq!(range, DisplacementRange::new(-1.0, 4.0));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml("[raycast]\nfar_plane = 3.0\n").is_err());
    }
}
