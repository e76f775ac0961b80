//! # Configuration
//!
//! Tunables for the player, the collision core and the generated world,
//! read from JSON. Every field has a default, so a config file only lists
//! what it changes:
//!
//! ```json
//! {
//!     "max_resolution_iterations": 16,
//!     "missing_chunks": "solid",
//!     "world": { "generation": { "method": "perlin", "seed": 7 }, "radius": 1 }
//! }
//! ```

use std::path::Path;

use cgmath::Point3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine_state::collision::{MissingChunkPolicy, MAX_RESOLUTION_ITERATIONS};
use crate::engine_state::math::AABB3;
use crate::engine_state::voxels::chunk::ChunkGenerationMethod;

/// Environment variable naming a config file for `run()`.
pub const CONFIG_PATH_ENV: &str = "VOXEL_COLLISION_CONFIG";

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// World generation settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// How chunks are filled.
    pub generation: ChunkGenerationMethod,
    /// Chunks generated around the spawn chunk, in every direction.
    pub radius: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            generation: ChunkGenerationMethod::default(),
            radius: 1,
        }
    }
}

/// Player and collision settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Minimum corner of the player box relative to the camera.
    pub player_box_origin: [f32; 3],
    /// Size of the player box.
    pub player_box_span: [f32; 3],
    /// Resolution iteration cap per movement.
    pub max_resolution_iterations: usize,
    /// Handling of unloaded chunks during movement.
    pub missing_chunks: MissingChunkPolicy,
    /// Look ray length for targeting.
    pub reach: f32,
    /// Movement speed in blocks per second.
    pub speed: f32,
    /// Look sensitivity.
    pub sensitivity: f32,
    /// Initial camera position.
    pub spawn_position: [f32; 3],
    /// World generation settings.
    pub world: WorldConfig,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            player_box_origin: [-0.25, -1.5, -0.25],
            player_box_span: [0.5, 1.75, 0.5],
            max_resolution_iterations: MAX_RESOLUTION_ITERATIONS,
            missing_chunks: MissingChunkPolicy::default(),
            reach: 8.0,
            speed: 4.0,
            sensitivity: 2.0,
            spawn_position: [8.5, 1.5, 8.5],
            world: WorldConfig::default(),
        }
    }
}

impl PhysicsConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: PhysicsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Loads the file named by `VOXEL_COLLISION_CONFIG`, or the defaults when
    /// it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => {
                log::info!("loading config from {:?}", path);
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = |values: &[f32]| values.iter().all(|v| v.is_finite());

        if !finite(&self.player_box_origin) || !finite(&self.spawn_position) {
            return Err(ConfigError::Invalid("positions must be finite".into()));
        }
        if !self.player_box_span.iter().all(|v| v.is_finite() && *v > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "player_box_span must be positive, got {:?}",
                self.player_box_span
            )));
        }
        if self.max_resolution_iterations == 0 {
            return Err(ConfigError::Invalid("max_resolution_iterations must be at least 1".into()));
        }
        if !(self.reach.is_finite() && self.reach > 0.0) {
            return Err(ConfigError::Invalid(format!("reach must be positive, got {}", self.reach)));
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) || !self.sensitivity.is_finite() {
            return Err(ConfigError::Invalid("speed and sensitivity must be finite, speed non-negative".into()));
        }
        if self.world.radius < 0 {
            return Err(ConfigError::Invalid(format!("world radius must not be negative, got {}", self.world.radius)));
        }
        Ok(())
    }

    /// Player box relative to the camera.
    pub fn player_box(&self) -> AABB3 {
        AABB3::new(self.player_box_origin.into(), self.player_box_span.into())
    }

    /// Initial camera position as a point.
    pub fn spawn(&self) -> Point3<f32> {
        self.spawn_position.into()
    }
}
