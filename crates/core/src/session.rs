//! Frame driver for one generated level.
//! This module exists so the per-frame order (player, fog, enemies) lives in one place.
//! It does not own rendering, question UI or persistence.

mod events;
mod player;

use std::collections::BTreeSet;
use std::mem;

use slotmap::SlotMap;
use thiserror::Error;

use crate::ai::{AiContext, AiTransition, update_enemy};
use crate::config::{DungeonConfig, LevelSeeds};
use crate::doors::DoorStates;
use crate::enemy::Enemy;
use crate::mapgen::{DungeonLayout, GeneratedDungeon, generate_dungeon};
use crate::pathfinding::{AStar, Pathfinder};
use crate::rng::{DungeonRng, SeededRandom};
use crate::spawning::SkillProfile;
use crate::types::{EnemyId, Pos, WorldPos};
use crate::visibility::{FogFrame, reveal_player_room};

pub use events::DungeonEvent;
pub use player::{PLAYER_SPEED, PlayerView};

use player::{adjacent_door, free_tile_near};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no enemy with id {0:?} in this level")]
    UnknownEnemy(EnemyId),
}

/// Input sampled once per frame. Movement axes are in `-1.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub dt: f32,
    pub move_x: f32,
    pub move_y: f32,
    /// Held state of the door key; toggling happens on the press edge.
    pub door_key: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    pub combat_started: Option<EnemyId>,
    /// Events appended to the session log during this frame.
    pub events: Vec<DungeonEvent>,
}

pub struct DungeonSession {
    dungeon: GeneratedDungeon,
    doors: DoorStates,
    enemies: SlotMap<EnemyId, Enemy>,
    player: PlayerView,
    wander_rng: SeededRandom,
    pathfinder: Box<dyn Pathfinder>,
    combat: Option<EnemyId>,
    door_key_held: bool,
    treasures: BTreeSet<Pos>,
    log: Vec<DungeonEvent>,
}

impl DungeonSession {
    /// Wraps a finished dungeon: doors closed, enemies spawned, player on the spawn tile.
    pub fn new(dungeon: GeneratedDungeon) -> Self {
        let doors = DoorStates::all_closed(&dungeon.layout.doors);
        let mut enemies = SlotMap::with_key();
        for spawn in &dungeon.spawns.enemies {
            enemies.insert(Enemy::from_spawn(spawn));
        }
        let player = dungeon.spawns.player_spawn.map(PlayerView::at_tile).unwrap_or_default();
        let treasures = dungeon.spawns.treasures.iter().copied().collect();
        let log = vec![DungeonEvent::Generated {
            seeds: dungeon.seeds,
            rooms: dungeon.layout.rooms.len(),
            enemies: enemies.len(),
        }];
        Self {
            wander_rng: DungeonRng::wander(dungeon.seeds),
            dungeon,
            doors,
            enemies,
            player,
            pathfinder: Box::new(AStar::default()),
            combat: None,
            door_key_held: false,
            treasures,
            log,
        }
    }

    pub fn generate(config: &DungeonConfig, seeds: LevelSeeds, profile: &SkillProfile) -> Self {
        Self::new(generate_dungeon(config, seeds, profile))
    }

    pub fn with_pathfinder(mut self, pathfinder: Box<dyn Pathfinder>) -> Self {
        self.pathfinder = pathfinder;
        self
    }

    /// Replaces the level, its enemies and every in-flight path in one step. The pathfinder
    /// carries over.
    pub fn regenerate(
        &mut self,
        config: &DungeonConfig,
        seeds: LevelSeeds,
        profile: &SkillProfile,
    ) {
        let pathfinder = mem::replace(&mut self.pathfinder, Box::new(AStar::default()));
        *self = Self::generate(config, seeds, profile).with_pathfinder(pathfinder);
    }

    pub fn advance_frame(&mut self, input: &FrameInput) -> FrameOutcome {
        let first_event = self.log.len();
        let pressed = input.door_key && !self.door_key_held;
        self.door_key_held = input.door_key;

        if self.combat.is_none() {
            if pressed {
                self.toggle_adjacent_door();
            }
            let tiles = &self.dungeon.layout.tiles;
            self.player.walk(tiles, &self.doors, input.move_x, input.move_y, input.dt);
        } else {
            self.player.moving = false;
        }
        self.latch_fog();
        self.collect_treasure();
        let combat_started = self.update_enemies(input.dt);

        FrameOutcome { combat_started, events: self.log[first_event..].to_vec() }
    }

    fn toggle_adjacent_door(&mut self) {
        let Some(door) = adjacent_door(&self.doors, self.player.tile()) else {
            return;
        };
        let Some(open) = self.doors.toggle(door) else {
            return;
        };
        let state = if open { "open" } else { "closed" };
        log::debug!("door at ({}, {}) now {state}", door.x, door.y);
        self.log.push(DungeonEvent::DoorToggled { pos: door, open });
        if !open {
            self.push_off_door(door);
        }
    }

    fn push_off_door(&mut self, door: Pos) {
        let layout = &self.dungeon.layout;
        if self.player.tile() == door
            && let Some(free) = free_tile_near(layout, &self.doors, door)
        {
            self.player.position = WorldPos::at_tile(free);
        }
        for enemy in self.enemies.values_mut().filter(|enemy| enemy.alive) {
            if enemy.tile() == door
                && let Some(free) = free_tile_near(layout, &self.doors, door)
            {
                enemy.position = WorldPos::at_tile(free);
                enemy.path.clear();
            }
        }
    }

    fn latch_fog(&mut self) {
        if let Some(room) = reveal_player_room(&mut self.dungeon.layout, self.player.tile()) {
            self.log.push(DungeonEvent::RoomRevealed { room });
        }
    }

    fn collect_treasure(&mut self) {
        let tile = self.player.tile();
        if self.treasures.remove(&tile) {
            self.log.push(DungeonEvent::TreasureCollected { pos: tile });
        }
    }

    /// Runs every enemy in insertion order. The first enemy to engage freezes the rest.
    fn update_enemies(&mut self, dt: f32) -> Option<EnemyId> {
        let mut ctx = AiContext {
            dt,
            player: self.player.position,
            layout: &self.dungeon.layout,
            doors: &self.doors,
            pathfinder: self.pathfinder.as_ref(),
            rng: &mut self.wander_rng,
            in_combat: self.combat.is_some(),
        };
        let mut started = None;
        for (id, enemy) in &mut self.enemies {
            let tick = update_enemy(enemy, &mut ctx);
            match tick.transition {
                Some(AiTransition::Aggroed) => {
                    self.log.push(DungeonEvent::EnemyAggroed { enemy: id });
                }
                Some(AiTransition::LostInterest) => {
                    self.log.push(DungeonEvent::EnemyLostInterest { enemy: id });
                }
                None => {}
            }
            if tick.combat_start && !ctx.in_combat {
                ctx.in_combat = true;
                self.combat = Some(id);
                started = Some(id);
                self.log.push(DungeonEvent::CombatStarted { enemy: id });
            }
        }
        started
    }

    /// Moves the player directly, e.g. after a teleport, and latches fog for the new tile.
    pub fn set_player_position(&mut self, position: WorldPos) {
        self.player.position = position;
        self.player.moving = false;
        self.latch_fog();
    }

    /// Clears the combat flag. Returns the enemy that was fought, if any.
    pub fn end_combat(&mut self) -> Option<EnemyId> {
        let enemy = self.combat.take()?;
        self.log.push(DungeonEvent::CombatEnded { enemy });
        Some(enemy)
    }

    /// Returns true when the hit killed the enemy. Killing the enemy being fought ends combat.
    pub fn damage_enemy(&mut self, id: EnemyId, amount: i32) -> Result<bool, SessionError> {
        let enemy = self.enemies.get_mut(id).ok_or(SessionError::UnknownEnemy(id))?;
        let killed = enemy.take_damage(amount);
        if killed {
            self.log.push(DungeonEvent::EnemyDefeated { enemy: id });
            if self.combat == Some(id) {
                self.end_combat();
            }
        }
        Ok(killed)
    }

    pub fn dungeon(&self) -> &GeneratedDungeon {
        &self.dungeon
    }

    pub fn layout(&self) -> &DungeonLayout {
        &self.dungeon.layout
    }

    pub fn doors(&self) -> &DoorStates {
        &self.doors
    }

    pub fn enemy(&self, id: EnemyId) -> Result<&Enemy, SessionError> {
        self.enemies.get(id).ok_or(SessionError::UnknownEnemy(id))
    }

    /// Enemies in spawn order, dead ones included.
    pub fn enemies(&self) -> impl Iterator<Item = (EnemyId, &Enemy)> {
        self.enemies.iter()
    }

    pub fn player(&self) -> &PlayerView {
        &self.player
    }

    pub fn combat(&self) -> Option<EnemyId> {
        self.combat
    }

    /// Treasure tiles not picked up yet.
    pub fn treasures(&self) -> impl Iterator<Item = Pos> + '_ {
        self.treasures.iter().copied()
    }

    pub fn log(&self) -> &[DungeonEvent] {
        &self.log
    }

    pub fn fog_frame(&self) -> FogFrame {
        FogFrame::compute(&self.dungeon.layout, self.enemies.values(), self.player.tile())
    }
}
