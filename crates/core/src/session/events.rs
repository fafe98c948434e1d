use crate::config::LevelSeeds;
use crate::types::{EnemyId, Pos, RoomId};

/// Everything a session did that a collaborator may want to react to or replay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DungeonEvent {
    Generated { seeds: LevelSeeds, rooms: usize, enemies: usize },
    RoomRevealed { room: RoomId },
    DoorToggled { pos: Pos, open: bool },
    EnemyAggroed { enemy: EnemyId },
    EnemyLostInterest { enemy: EnemyId },
    CombatStarted { enemy: EnemyId },
    CombatEnded { enemy: EnemyId },
    EnemyDefeated { enemy: EnemyId },
    TreasureCollected { pos: Pos },
}
