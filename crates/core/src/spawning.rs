//! Enemy, player and treasure placement for a freshly generated layout.
//!
//! Everything here draws from the spawn stream only, so the structure of a
//! level never depends on who is playing it.

mod calculator;
mod distribution;
mod weighting;

pub use calculator::{EnemySpawn, SpawnPlan, calculate_enemy_spawns, place_treasures, spawn_level};
pub use distribution::{
    COMBAT_LEVEL_STD_DEV, combat_room_level, normal_room_level, random_normal,
};
pub use weighting::{DEFAULT_ELO, DEFAULT_SUBJECT, SkillProfile, SubjectWeights};
