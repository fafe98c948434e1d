use serde::{Deserialize, Serialize};

use super::distribution::{combat_room_level, normal_room_level};
use super::weighting::{SkillProfile, SubjectWeights};
use crate::mapgen::DungeonLayout;
use crate::rng::SeededRandom;
use crate::types::{Pos, RoomId, RoomKind};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub pos: Pos,
    pub room: RoomId,
    pub level: u8,
    pub subject: String,
    /// Player rating for `subject` at spawn time; drives the aggro radius.
    pub player_elo: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnPlan {
    /// `None` only when the level has no floor at all.
    pub player_spawn: Option<Pos>,
    pub enemies: Vec<EnemySpawn>,
    pub treasures: Vec<Pos>,
}

enum RoomStrategy {
    Empty,
    Combat { count: usize },
    Normal,
}

impl RoomStrategy {
    fn for_kind(kind: RoomKind, rng: &mut SeededRandom) -> Self {
        match kind {
            RoomKind::Treasure => RoomStrategy::Empty,
            RoomKind::Combat => RoomStrategy::Combat { count: rng.next_int(1, 4) as usize },
            RoomKind::Empty => RoomStrategy::Normal,
        }
    }

    fn count(&self) -> usize {
        match self {
            RoomStrategy::Empty => 0,
            RoomStrategy::Combat { count } => *count,
            RoomStrategy::Normal => 1,
        }
    }

    fn level(&self, index: usize, elo: f64, rng: &mut SeededRandom) -> u8 {
        match self {
            RoomStrategy::Combat { .. } => combat_room_level(index == 0, rng),
            _ => normal_room_level(elo, rng),
        }
    }
}

/// Places the player, reveals the starting room, then spawns enemies and treasures.
pub fn spawn_level(
    layout: &mut DungeonLayout,
    profile: &SkillProfile,
    rng: &mut SeededRandom,
) -> SpawnPlan {
    let player_spawn = pick_player_spawn(layout, rng);
    let player_room = player_spawn.and_then(|pos| layout.room_at(pos));
    if let Some(room) = player_room {
        layout.reveal_room(room);
    }

    let weights = SubjectWeights::from_profile(profile);
    let enemies = calculate_enemy_spawns(layout, player_room, &weights, profile, rng);
    let treasures = place_treasures(layout, rng);
    log::info!(
        "spawned {} enemies and {} treasures, player starts in room {:?}",
        enemies.len(),
        treasures.len(),
        player_room
    );
    SpawnPlan { player_spawn, enemies, treasures }
}

fn pick_player_spawn(layout: &DungeonLayout, rng: &mut SeededRandom) -> Option<Pos> {
    let floor = layout.all_floor_tiles();
    if floor.is_empty() {
        log::warn!("level has no floor tiles, player spawn left unset");
        return None;
    }
    Some(floor[rng.next_index(floor.len())])
}

pub fn calculate_enemy_spawns(
    layout: &DungeonLayout,
    player_room: Option<RoomId>,
    weights: &SubjectWeights,
    profile: &SkillProfile,
    rng: &mut SeededRandom,
) -> Vec<EnemySpawn> {
    let mut spawns = Vec::new();
    for room in &layout.rooms {
        if Some(room.id) == player_room {
            continue;
        }
        let floor = layout.floor_tiles(room.id);
        if floor.is_empty() {
            continue;
        }

        let strategy = RoomStrategy::for_kind(room.kind, rng);
        for index in 0..strategy.count() {
            let pos = floor[rng.next_index(floor.len())];
            let subject = weights.select(rng).to_owned();
            let player_elo = profile.effective_rating(&subject);
            let level = strategy.level(index, player_elo, rng);
            spawns.push(EnemySpawn { pos, room: room.id, level, subject, player_elo });
        }
    }
    spawns
}

/// One treasure per treasure room, on a random floor tile of that room.
pub fn place_treasures(layout: &DungeonLayout, rng: &mut SeededRandom) -> Vec<Pos> {
    layout
        .rooms
        .iter()
        .filter(|room| room.kind == RoomKind::Treasure)
        .filter_map(|room| {
            let floor = layout.floor_tiles(room.id);
            (!floor.is_empty()).then(|| floor[rng.next_index(floor.len())])
        })
        .collect()
}
