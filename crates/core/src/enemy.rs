//! Enemy state and the formulas derived from level and player skill.

use serde::{Deserialize, Serialize};

use crate::spawning::{DEFAULT_ELO, EnemySpawn};
use crate::types::{Direction, Pos, RoomId, WorldPos};

pub const BASE_AGGRO_RADIUS: f32 = 3.0;
pub const BASE_SPEED: f32 = 3.0;
pub const PATH_UPDATE_INTERVAL: f32 = 0.5;
pub const AGGRO_REACTION_TIME: f32 = 0.1;
/// Reaction time when the player is standing in a doorway.
pub const AGGRO_REACTION_TIME_DOOR: f32 = 2.0;
pub const IDLE_WAIT_TIME: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Idle,
    Wandering,
    Following,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub position: WorldPos,
    pub room: RoomId,
    pub level: u8,
    pub subject: String,
    pub hp: i32,
    pub max_hp: i32,
    pub alive: bool,
    pub direction: Direction,
    pub moving: bool,
    pub ai_state: AiState,
    pub waypoint: Option<WorldPos>,
    /// Remaining tiles to walk, start excluded.
    pub path: Vec<Pos>,
    pub idle_timer: f32,
    pub path_update_timer: f32,
    pub aggro_reaction_timer: f32,
    pub player_elo: f64,
}

impl Enemy {
    pub fn new(position: WorldPos, room: RoomId, level: u8, subject: impl Into<String>) -> Self {
        let max_hp = max_hp_for_level(level);
        Self {
            position,
            room,
            level,
            subject: subject.into(),
            hp: max_hp,
            max_hp,
            alive: true,
            direction: Direction::default(),
            moving: false,
            ai_state: AiState::Idle,
            waypoint: None,
            path: Vec::new(),
            idle_timer: 0.0,
            path_update_timer: 0.0,
            aggro_reaction_timer: 0.0,
            player_elo: DEFAULT_ELO,
        }
    }

    pub fn from_spawn(spawn: &EnemySpawn) -> Self {
        Self {
            player_elo: spawn.player_elo,
            ..Self::new(
                WorldPos::at_tile(spawn.pos),
                spawn.room,
                spawn.level,
                spawn.subject.clone(),
            )
        }
    }

    /// Tiles within which a same-room player is noticed. Stronger players are noticed later.
    pub fn aggro_radius(&self) -> f32 {
        BASE_AGGRO_RADIUS * (1.0 + (f32::from(self.level) - self.player_elo as f32) / 10.0)
    }

    pub fn deaggro_radius(&self) -> f32 {
        self.aggro_radius() * 2.0
    }

    pub fn speed_multiplier(&self) -> f32 {
        1.0 + (f32::from(self.level) - 5.0) * 0.05
    }

    /// Tiles per second.
    pub fn speed(&self) -> f32 {
        BASE_SPEED * self.speed_multiplier()
    }

    pub fn tile(&self) -> Pos {
        self.position.tile()
    }

    /// Applies damage and returns true when this hit killed the enemy.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.hp -= amount;
        if self.hp <= 0 {
            self.hp = 0;
            self.alive = false;
            self.ai_state = AiState::Idle;
            self.path.clear();
            self.waypoint = None;
            return true;
        }
        false
    }
}

pub fn max_hp_for_level(level: u8) -> i32 {
    10 + 5 * i32::from(level)
}
