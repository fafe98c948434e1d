//! Level generation parameters and the seeds that reproduce a level.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_DUNGEON_SIDE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bsp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub width: usize,
    pub height: usize,
    pub algorithm: Algorithm,
    pub min_room_size: usize,
    pub max_room_size: usize,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            algorithm: Algorithm::Bsp,
            min_room_size: 4,
            max_room_size: 8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("dungeon must be at least {min}x{min} tiles, got {width}x{height}")]
    TooSmall { width: usize, height: usize, min: usize },
    #[error("min room size must be at least 1")]
    ZeroMinRoomSize,
    #[error("max room size {max} is smaller than min room size {min}")]
    InvertedRoomSizes { min: usize, max: usize },
}

impl DungeonConfig {
    /// Generation accepts any config; this reports the ones that would only yield a degenerate
    /// level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_DUNGEON_SIDE || self.height < MIN_DUNGEON_SIDE {
            return Err(ConfigError::TooSmall {
                width: self.width,
                height: self.height,
                min: MIN_DUNGEON_SIDE,
            });
        }
        if self.min_room_size == 0 {
            return Err(ConfigError::ZeroMinRoomSize);
        }
        if self.max_room_size < self.min_room_size {
            return Err(ConfigError::InvertedRoomSizes {
                min: self.min_room_size,
                max: self.max_room_size,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LevelSeeds {
    pub structure: u32,
    pub decoration: u32,
    pub spawn: u32,
}

/// Everything needed to rebuild a level exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelDescriptor {
    pub seeds: LevelSeeds,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub algorithm: Algorithm,
}

impl LevelDescriptor {
    pub fn new(seeds: LevelSeeds, config: &DungeonConfig) -> Self {
        Self { seeds, width: config.width, height: config.height, algorithm: config.algorithm }
    }

    /// Room size bounds are not part of the descriptor; they come from `base`.
    pub fn config(&self, base: &DungeonConfig) -> DungeonConfig {
        DungeonConfig { width: self.width, height: self.height, algorithm: self.algorithm, ..*base }
    }
}
