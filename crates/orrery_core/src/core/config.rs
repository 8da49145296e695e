//! # Unified Configuration System
//!
//! This module consolidates the configuration structures for the scene and
//! spatial subsystems into a single, coherent system.
//!
//! ## Design Goals
//!
//! - **Centralized**: All configuration types in one place for easy discovery
//! - **Serializable**: Support for multiple config file formats (TOML, RON)
//! - **Type Safe**: Strong typing with validation and defaults

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or saving configuration files
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the config file failed
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// RON parsing failed
    #[error("RON parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    /// RON serialization failed
    #[error("RON serialize error: {0}")]
    RonSerialize(#[from] ron::Error),
}

/// Configuration for scene management
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Maximum number of objects in the scene
    pub max_objects: usize,

    /// Whether to sweep garbage-flagged objects after each update
    pub auto_cleanup: bool,

    /// Fixed timestep length for the physics timeline, in seconds
    pub fixed_timestep: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            max_objects: 10_000,
            auto_cleanup: true,
            fixed_timestep: 1.0 / 50.0,
        }
    }
}

/// Configuration for octree behavior
///
/// The two scale thresholds bound recursion depth in both directions:
/// nodes at or below `smallest_scale` stop subdividing, and bulk
/// construction stops splitting once a node is smaller than `map_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OctreeConfig {
    /// World-space edge length of the root node cube
    pub map_size: f32,

    /// Edge length at which a node can no longer subdivide
    pub smallest_scale: f32,

    /// Updates an empty node survives before becoming prunable
    pub node_lifespan: i32,

    /// Internal update retries before the tree declares a logic error
    pub retry_limit: u32,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            map_size: 2048.0,
            smallest_scale: 2.0,
            node_lifespan: 10,
            retry_limit: 100,
        }
    }
}

/// Top-level engine-core configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Scene management settings
    pub scene: SceneConfig,

    /// Spatial partitioning settings
    pub octree: OctreeConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to a TOML file
    pub fn save_toml(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let contents = toml::to_string(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Load configuration from a RON file
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(ron::de::from_str(&contents)?)
    }

    /// Save configuration to a RON file
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let contents = ron::ser::to_string(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_octree_config() {
        let config = OctreeConfig::default();
        assert_eq!(config.map_size, 2048.0);
        assert_eq!(config.smallest_scale, 2.0);
        assert_eq!(config.node_lifespan, 10);
        assert_eq!(config.retry_limit, 100);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: EngineConfig = toml::from_str(&text).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = EngineConfig {
            scene: SceneConfig {
                max_objects: 64,
                auto_cleanup: false,
                fixed_timestep: 0.01,
            },
            octree: OctreeConfig::default(),
        };
        let text = ron::ser::to_string(&config).unwrap();
        let parsed: EngineConfig = ron::de::from_str(&text).unwrap();
        assert_eq!(config, parsed);
    }
}
