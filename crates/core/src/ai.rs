//! Per-tick enemy behavior: idle, wander inside the home room, chase the player.

use crate::doors::DoorStates;
use crate::enemy::{
    AGGRO_REACTION_TIME, AGGRO_REACTION_TIME_DOOR, AiState, Enemy, IDLE_WAIT_TIME,
    PATH_UPDATE_INTERVAL,
};
use crate::mapgen::DungeonLayout;
use crate::movement::{WAYPOINT_THRESHOLD, stride_towards};
use crate::pathfinding::Pathfinder;
use crate::rng::SeededRandom;
use crate::types::{TileKind, WorldPos};
use crate::visibility::player_rooms;

/// Distance in tiles at which a chasing enemy engages.
pub const COMBAT_TRIGGER_DISTANCE: f32 = 0.5;

pub struct AiContext<'a> {
    pub dt: f32,
    pub player: WorldPos,
    pub layout: &'a DungeonLayout,
    pub doors: &'a DoorStates,
    pub pathfinder: &'a dyn Pathfinder,
    /// Waypoint draws for wandering.
    pub rng: &'a mut SeededRandom,
    pub in_combat: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiTransition {
    Aggroed,
    LostInterest,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AiTick {
    pub transition: Option<AiTransition>,
    pub combat_start: bool,
}

pub fn update_enemy(enemy: &mut Enemy, ctx: &mut AiContext<'_>) -> AiTick {
    let mut tick = AiTick::default();
    if !enemy.alive || ctx.in_combat {
        return tick;
    }

    if let Some(room) = ctx.layout.room_at(enemy.tile()) {
        enemy.room = room;
    }

    let player_tile = ctx.player.tile();
    // A player in a doorway stands in both rooms the door joins.
    let same_room = player_rooms(ctx.layout, player_tile).contains(&enemy.room);
    let distance = enemy.position.distance_to(ctx.player);
    let player_in_doorway = ctx.layout.tile_at(player_tile) == TileKind::Door;
    tick.transition = apply_transitions(enemy, distance, same_room, player_in_doorway);

    if enemy.ai_state == AiState::Following && enemy.aggro_reaction_timer > 0.0 {
        enemy.aggro_reaction_timer -= ctx.dt;
    }

    match enemy.ai_state {
        AiState::Idle => idle(enemy, ctx),
        AiState::Wandering => wander(enemy, ctx),
        AiState::Following => tick.combat_start = follow(enemy, ctx),
    }
    tick
}

fn apply_transitions(
    enemy: &mut Enemy,
    distance: f32,
    same_room: bool,
    player_in_doorway: bool,
) -> Option<AiTransition> {
    if enemy.ai_state == AiState::Following {
        if distance > enemy.deaggro_radius() {
            enemy.ai_state = AiState::Idle;
            enemy.idle_timer = IDLE_WAIT_TIME;
            enemy.path.clear();
            return Some(AiTransition::LostInterest);
        }
        return None;
    }
    if same_room && distance <= enemy.aggro_radius() {
        enemy.ai_state = AiState::Following;
        enemy.waypoint = None;
        enemy.aggro_reaction_timer =
            if player_in_doorway { AGGRO_REACTION_TIME_DOOR } else { AGGRO_REACTION_TIME };
        return Some(AiTransition::Aggroed);
    }
    None
}

fn idle(enemy: &mut Enemy, ctx: &mut AiContext<'_>) {
    enemy.moving = false;
    enemy.idle_timer -= ctx.dt;
    if enemy.idle_timer <= 0.0 {
        enemy.ai_state = AiState::Wandering;
        let floor = ctx.layout.floor_tiles(enemy.room);
        if !floor.is_empty() {
            enemy.waypoint = Some(WorldPos::at_tile(floor[ctx.rng.next_index(floor.len())]));
        }
    }
}

fn wander(enemy: &mut Enemy, ctx: &mut AiContext<'_>) {
    let Some(waypoint) = enemy.waypoint else {
        rest(enemy);
        return;
    };
    if enemy.position.distance_to(waypoint) < WAYPOINT_THRESHOLD {
        rest(enemy);
        enemy.waypoint = None;
        return;
    }
    walk_towards(enemy, ctx, waypoint);
}

fn rest(enemy: &mut Enemy) {
    enemy.ai_state = AiState::Idle;
    enemy.idle_timer = IDLE_WAIT_TIME;
    enemy.moving = false;
}

/// Returns true when the enemy is close enough and ready to start combat.
fn follow(enemy: &mut Enemy, ctx: &mut AiContext<'_>) -> bool {
    if enemy.position.distance_to(ctx.player) <= COMBAT_TRIGGER_DISTANCE {
        enemy.moving = false;
        return enemy.aggro_reaction_timer <= 0.0;
    }

    enemy.path_update_timer -= ctx.dt;
    if enemy.path_update_timer <= 0.0 || enemy.path.is_empty() {
        enemy.path_update_timer = PATH_UPDATE_INTERVAL;
        let goal = ctx.player.tile();
        enemy.path = ctx.pathfinder.find_path(enemy.tile(), goal, &ctx.layout.tiles, ctx.doors);
    }

    match enemy.path.first().copied() {
        Some(next) => {
            let target = WorldPos::at_tile(next);
            if enemy.position.distance_to(target) < WAYPOINT_THRESHOLD {
                enemy.path.remove(0);
            } else {
                walk_towards(enemy, ctx, target);
            }
        }
        None => walk_towards(enemy, ctx, ctx.player),
    }
    false
}

fn walk_towards(enemy: &mut Enemy, ctx: &AiContext<'_>, target: WorldPos) {
    let speed = enemy.speed();
    let tiles = &ctx.layout.tiles;
    let stride = stride_towards(tiles, ctx.doors, enemy.position, target, speed, ctx.dt);
    enemy.moving = stride.is_some();
    if let Some(stride) = stride {
        enemy.position = stride.position;
        enemy.direction = stride.direction;
    }
}
