pub mod ai;
pub mod config;
pub mod doors;
pub mod elo;
pub mod enemy;
pub mod mapgen;
pub mod movement;
pub mod pathfinding;
pub mod question;
pub mod rng;
pub mod session;
pub mod spawning;
pub mod types;
pub mod visibility;

#[cfg(test)]
mod test_support;

pub use config::{Algorithm, ConfigError, DungeonConfig, LevelDescriptor, LevelSeeds};
pub use doors::DoorStates;
pub use elo::{AnswerOutcome, progressive_elo};
pub use enemy::{AiState, Enemy};
pub use mapgen::{DungeonLayout, GeneratedDungeon, Room, generate_dungeon};
pub use pathfinding::{AStar, Pathfinder};
pub use session::{DungeonEvent, DungeonSession, FrameInput, FrameOutcome, SessionError};
pub use spawning::SkillProfile;
pub use types::*;
pub use visibility::FogFrame;
