//! Procedural level generation split into partitioning, connection and decoration passes.

pub mod decoration;
pub mod model;

mod bsp;
mod connect;
mod generator;
mod grid;
mod neighbors;

pub use decoration::{Decoration, TileVariant};
pub use generator::DungeonGenerator;
pub use grid::{RoomMap, TileGrid};
pub(crate) use grid::manhattan;
pub use model::{DungeonLayout, GeneratedDungeon, Room};

use crate::config::{DungeonConfig, LevelSeeds};
use crate::spawning::SkillProfile;

pub fn generate_dungeon(
    config: &DungeonConfig,
    seeds: LevelSeeds,
    profile: &SkillProfile,
) -> GeneratedDungeon {
    DungeonGenerator::new(*config, seeds).generate(profile)
}
